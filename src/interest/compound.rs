use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::decimal::{Money, Rate};

/// engine for discrete periodic compounding
///
/// interest = P((1 + r/n)^(n*t) - 1) with t measured in actual/365 years.
/// whole periods are compounded by decimal iteration; the fractional tail
/// period earns the period rate pro rata, so short spans still accrue
/// rather than rounding away to zero.
pub struct CompoundingEngine {
    pub periods_per_year: u32,
}

impl CompoundingEngine {
    pub fn new(periods_per_year: u32) -> Self {
        Self { periods_per_year }
    }

    /// compound interest over a span of years
    pub fn compound_for_years(
        &self,
        principal: Money,
        annual_rate: Rate,
        time_years: Decimal,
    ) -> Money {
        let n = Decimal::from(self.periods_per_year.max(1));
        let period_rate = annual_rate.as_decimal() / n;
        let periods = n * time_years;
        let whole_periods = periods.floor();
        let stub_fraction = periods - whole_periods;

        let mut compound_factor = Decimal::ONE;
        let base = Decimal::ONE + period_rate;
        let whole_int = whole_periods.to_string().parse::<i32>().unwrap_or(0);
        for _ in 0..whole_int {
            compound_factor *= base;
        }
        compound_factor *= Decimal::ONE + period_rate * stub_fraction;

        let final_amount = principal.as_decimal() * compound_factor;
        Money::from_decimal(final_amount - principal.as_decimal())
    }

    /// compound interest for a specific number of days
    pub fn compound_for_days(&self, principal: Money, annual_rate: Rate, days: u32) -> Money {
        let time_years = Decimal::from(days) / dec!(365);
        self.compound_for_years(principal, annual_rate, time_years)
    }
}
