pub mod compound;
pub mod revolving;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

pub use compound::CompoundingEngine;
pub use revolving::{Accrual, AccrualEngine};

/// interest formula applied to each accrual period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterestMode {
    /// day-count simple interest, actual/365
    Simple,
    /// discrete periodic compounding with the given periods per year
    Compound { period: u32 },
}

impl Default for InterestMode {
    fn default() -> Self {
        InterestMode::Simple
    }
}

/// simple interest over an actual/365 year
///
/// principal x days x annual_rate / 365; pure, never fails.
pub fn simple_interest(principal: Money, days: u32, annual_rate: Rate) -> Money {
    let daily_rate = annual_rate.as_decimal() / Decimal::from(365);
    let interest = principal.as_decimal() * Decimal::from(days) * daily_rate;
    Money::from_decimal(interest)
}
