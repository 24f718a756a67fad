use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// lateness bucket for days-past-due classification
///
/// buckets mirror the historical report: observations beyond 60 days were
/// excluded from the study and classify to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LatenessBucket {
    OnTime,
    UpTo30,
    UpTo45,
    UpTo60,
}

impl LatenessBucket {
    pub const ALL: [LatenessBucket; 4] = [
        LatenessBucket::OnTime,
        LatenessBucket::UpTo30,
        LatenessBucket::UpTo45,
        LatenessBucket::UpTo60,
    ];

    /// analyst-facing bucket label
    pub fn label(&self) -> &'static str {
        match self {
            LatenessBucket::OnTime => "Paid on time",
            LatenessBucket::UpTo30 => "30 days late",
            LatenessBucket::UpTo45 => "45 days late",
            LatenessBucket::UpTo60 => "60 days late",
        }
    }

    /// classify a days-past-due observation
    pub fn classify(days_past_due: u32) -> Option<LatenessBucket> {
        match days_past_due {
            0 => Some(LatenessBucket::OnTime),
            1..=30 => Some(LatenessBucket::UpTo30),
            31..=45 => Some(LatenessBucket::UpTo45),
            46..=60 => Some(LatenessBucket::UpTo60),
            _ => None,
        }
    }
}

/// percentage of observations falling into each lateness bucket
///
/// percentages are taken over the full sample, so observations beyond 60
/// days depress every bucket rather than being renormalized away. an
/// empty sample yields all-zero buckets.
pub fn late_payment_statistics(days_past_due: &[u32]) -> BTreeMap<LatenessBucket, Decimal> {
    let mut counts: BTreeMap<LatenessBucket, u32> =
        LatenessBucket::ALL.iter().map(|b| (*b, 0)).collect();

    for &days in days_past_due {
        if let Some(bucket) = LatenessBucket::classify(days) {
            *counts.entry(bucket).or_insert(0) += 1;
        }
    }

    let total = Decimal::from(days_past_due.len().max(1) as u64);
    counts
        .into_iter()
        .map(|(bucket, count)| {
            let pct = (Decimal::from(count) / total * Decimal::from(100)).round_dp(2);
            (bucket, pct)
        })
        .collect()
}
