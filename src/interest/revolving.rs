use crate::calendar::next_billing_date_after;
use crate::decimal::Money;
use crate::errors::Result;
use crate::interest::{simple_interest, CompoundingEngine, InterestMode};
use crate::types::LoanCycle;

/// result of pricing one loan cycle across its billing boundaries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accrual {
    pub interest: Money,
    pub balance_days: u32,
}

impl Accrual {
    pub const NONE: Accrual = Accrual {
        interest: Money::ZERO,
        balance_days: 0,
    };
}

/// revolving-balance accrual engine
///
/// walks the same billing boundaries as [`crate::balance::balance_days`]
/// but carries a decaying principal: before each interest-bearing period
/// the outstanding amount is reduced once by the cycle's decrement rate,
/// modelling the customer paying down part of the revolving balance every
/// statement. after n interest-bearing periods the outstanding principal
/// is exactly P * (1 - d)^n, which stays positive for any d < 1.
#[derive(Debug, Clone, Copy)]
pub struct AccrualEngine {
    pub anchor_day: u32,
    pub mode: InterestMode,
}

impl AccrualEngine {
    /// simple-interest engine with the given statement anchor day
    pub fn new(anchor_day: u32) -> Self {
        Self {
            anchor_day,
            mode: InterestMode::Simple,
        }
    }

    pub fn with_mode(anchor_day: u32, mode: InterestMode) -> Self {
        Self { anchor_day, mode }
    }

    /// total interest and balance days for one loan cycle
    ///
    /// paying exactly on the due date accrues nothing and applies no
    /// decrement. a first period whose due date falls on or after the
    /// first boundary bears no interest and is skipped entirely; only
    /// periods that bear interest consume a decrement.
    pub fn accrue(&self, cycle: &LoanCycle) -> Result<Accrual> {
        if cycle.paid_on_time() {
            return Ok(Accrual::NONE);
        }

        let retained = cycle.decrement_rate.complement().as_decimal();
        let first_boundary = next_billing_date_after(cycle.issue_date, self.anchor_day)?;

        let mut outstanding = cycle.principal;
        let mut interest = Money::ZERO;
        let mut total_days: i64 = 0;

        let mut prev_boundary = first_boundary;
        let mut next_boundary = first_boundary;
        let mut first_period = true;

        while cycle.paid_date > next_boundary {
            if first_period {
                if cycle.due_date < next_boundary {
                    let days = (next_boundary - cycle.due_date).num_days() as u32;
                    outstanding = outstanding * retained;
                    interest += self.period_interest(outstanding, days, cycle);
                    total_days += days as i64;
                }
                first_period = false;
            } else {
                let days = (next_boundary - prev_boundary).num_days() as u32;
                outstanding = outstanding * retained;
                interest += self.period_interest(outstanding, days, cycle);
                total_days += days as i64;
            }
            prev_boundary = next_boundary;
            next_boundary = next_billing_date_after(next_boundary, self.anchor_day)?;
        }

        // final partial period up to the payment date
        let final_days = (cycle.paid_date - prev_boundary).num_days();
        if final_days > 0 {
            outstanding = outstanding * retained;
            interest += self.period_interest(outstanding, final_days as u32, cycle);
            total_days += final_days;
        }

        Ok(Accrual {
            interest,
            balance_days: total_days as u32,
        })
    }

    fn period_interest(&self, outstanding: Money, days: u32, cycle: &LoanCycle) -> Money {
        match self.mode {
            InterestMode::Simple => simple_interest(outstanding, days, cycle.annual_rate),
            InterestMode::Compound { period } => {
                CompoundingEngine::new(period).compound_for_days(outstanding, cycle.annual_rate, days)
            }
        }
    }
}
