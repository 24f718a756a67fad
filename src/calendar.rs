use chrono::{Datelike, NaiveDate};

use crate::errors::{LedgerError, Result};

/// next monthly statement date after the given month
///
/// returns the date in the following calendar month (december wraps to
/// january of the next year) whose day-of-month equals `anchor_day`.
/// fails when the anchor day does not exist in the target month, e.g.
/// anchor 30 rolling into february — no clamping is performed.
pub fn next_billing_date(month: u32, year: i32, anchor_day: u32) -> Result<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(LedgerError::InvalidDate {
            message: format!("month {} out of range 1-12", month),
        });
    }

    let (next_month, next_year) = if month < 12 {
        (month + 1, year)
    } else {
        (1, year + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, anchor_day).ok_or_else(|| {
        LedgerError::InvalidDate {
            message: format!(
                "anchor day {} does not exist in {}-{:02}",
                anchor_day, next_year, next_month
            ),
        }
    })
}

/// first statement date strictly after the month containing `date`
pub fn next_billing_date_after(date: NaiveDate, anchor_day: u32) -> Result<NaiveDate> {
    next_billing_date(date.month(), date.year(), anchor_day)
}

/// parse an ISO-8601 calendar date (YYYY-MM-DD)
///
/// the only accepted input format at the API boundary; ambiguous layouts
/// like MM/DD/YY are rejected rather than reinterpreted.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| LedgerError::InvalidDate {
        message: format!("cannot parse {:?} as YYYY-MM-DD: {}", s, e),
    })
}
