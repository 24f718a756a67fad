use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::interest::InterestMode;

/// immutable cohort label -> population share mapping
///
/// always passed explicitly by the caller; there is no shared default
/// table, so one simulation can never mutate the shares of another.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CohortShareTable {
    shares: BTreeMap<String, Rate>,
}

impl CohortShareTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// build from (label, share fraction) pairs
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        let shares = pairs
            .into_iter()
            .map(|(label, share)| (label.into(), Rate::from_decimal(share)))
            .collect();
        Self { shares }
    }

    pub fn insert(&mut self, label: impl Into<String>, share: Rate) {
        self.shares.insert(label.into(), share);
    }

    /// population share for a cohort label
    pub fn share_of(&self, label: &str) -> Result<Rate> {
        self.shares
            .get(label)
            .copied()
            .ok_or_else(|| LedgerError::UnknownCohort {
                label: label.to_string(),
            })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.shares.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// check the shares cover the whole population
    ///
    /// not enforced at construction; callers that want the invariant run
    /// this before simulating.
    pub fn validate(&self) -> Result<()> {
        let total: Decimal = self.shares.values().map(|r| r.as_decimal()).sum();
        if (total - Decimal::ONE).abs() > dec!(0.0001) {
            return Err(LedgerError::InvalidConfiguration {
                message: format!("cohort shares sum to {}, expected 1.0", total),
            });
        }
        Ok(())
    }
}

/// one customer segment with a fixed lateness pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortSpec {
    pub label: String,
    pub lateness_days: u32,
    /// optional cap on generated cycles; used for segments that are not
    /// re-issued a loan after a first delinquent cycle
    pub max_cycles: Option<usize>,
}

impl CohortSpec {
    pub fn new(label: impl Into<String>, lateness_days: u32) -> Self {
        Self {
            label: label.into(),
            lateness_days,
            max_cycles: None,
        }
    }

    pub fn with_max_cycles(mut self, max_cycles: usize) -> Self {
        self.max_cycles = Some(max_cycles);
        self
    }
}

/// full parameter set for a portfolio simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub start_date: NaiveDate,
    pub creditfree_days: u32,
    pub annual_rate: Rate,
    pub principal: Money,
    pub total_customers: u32,
    pub horizon_year: i32,
    pub anchor_day: u32,
    pub decrement_rate: Rate,
    pub interest_mode: InterestMode,
    pub shares: CohortShareTable,
    pub cohorts: Vec<CohortSpec>,
}

impl SimulationConfig {
    /// the historical P2P card study parameters
    ///
    /// 15 creditfree days, 180% annual rate, $1000 principal, 1000
    /// customers, statement anchor on the 1st, 5% monthly paydown, and
    /// the four observed lateness cohorts (the 60-day cohort gets no
    /// follow-up loan, so it is capped at its first cycle).
    pub fn card_program(start_date: NaiveDate, horizon_year: i32) -> Self {
        let shares = CohortShareTable::from_pairs([
            (">15", dec!(0.62)),
            ("30", dec!(0.11)),
            ("45", dec!(0.08)),
            ("60", dec!(0.16)),
        ]);

        Self {
            start_date,
            creditfree_days: 15,
            annual_rate: Rate::from_percentage(180),
            principal: Money::from_major(1_000),
            total_customers: 1_000,
            horizon_year,
            anchor_day: 1,
            decrement_rate: Rate::from_percentage(5),
            interest_mode: InterestMode::Simple,
            shares,
            cohorts: vec![
                CohortSpec::new(">15", 0),
                CohortSpec::new("30", 30),
                CohortSpec::new("45", 45),
                CohortSpec::new("60", 60).with_max_cycles(1),
            ],
        }
    }

    /// eager validation of the whole parameter set
    pub fn validate(&self) -> Result<()> {
        if self.creditfree_days == 0 {
            return Err(LedgerError::InvalidConfiguration {
                message: "creditfree_days must be at least 1".to_string(),
            });
        }
        if self.total_customers == 0 {
            return Err(LedgerError::InvalidConfiguration {
                message: "total_customers must be positive".to_string(),
            });
        }
        if !self.principal.is_positive() {
            return Err(LedgerError::InvalidConfiguration {
                message: format!("principal must be positive, got {}", self.principal),
            });
        }
        if !(1..=31).contains(&self.anchor_day) {
            return Err(LedgerError::InvalidConfiguration {
                message: format!("anchor_day {} out of range 1-31", self.anchor_day),
            });
        }
        if self.horizon_year < self.start_date.year() {
            // generation advances forward in time only; a horizon in the
            // past would never be reached
            return Err(LedgerError::InvalidConfiguration {
                message: format!(
                    "horizon_year {} precedes start year {}",
                    self.horizon_year,
                    self.start_date.year()
                ),
            });
        }
        if self.decrement_rate.as_decimal().is_sign_negative()
            || self.decrement_rate >= Rate::ONE
        {
            return Err(LedgerError::InvalidConfiguration {
                message: format!(
                    "decrement_rate must be in [0, 1), got {}",
                    self.decrement_rate
                ),
            });
        }
        Ok(())
    }
}

/// fixed cost assumptions for the profit/loss rollup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostAssumptions {
    /// fraction of customers who never repay their principal
    pub default_rate: Rate,
    /// production cost of one card
    pub card_cost: Money,
    /// fee collected from the issuing organization per card
    pub issuer_fee: Money,
    /// rate paid to the funding bank on deployed principal
    pub funding_rate: Rate,
}

impl Default for CostAssumptions {
    fn default() -> Self {
        Self {
            default_rate: Rate::from_decimal(dec!(0.03)),
            card_cost: Money::from_major(25),
            issuer_fee: Money::from_major(10),
            funding_rate: Rate::from_decimal(dec!(0.065)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_share_lookup() {
        let table = CohortShareTable::from_pairs([(">15", dec!(0.62)), ("30", dec!(0.38))]);
        assert_eq!(table.share_of(">15").unwrap(), Rate::from_decimal(dec!(0.62)));
        assert!(matches!(
            table.share_of("90"),
            Err(LedgerError::UnknownCohort { .. })
        ));
    }

    #[test]
    fn test_share_table_validation() {
        let complete = CohortShareTable::from_pairs([("a", dec!(0.4)), ("b", dec!(0.6))]);
        assert!(complete.validate().is_ok());

        let short = CohortShareTable::from_pairs([("a", dec!(0.4)), ("b", dec!(0.5))]);
        assert!(short.validate().is_err());
    }

    #[test]
    fn test_card_program_defaults() {
        let config = SimulationConfig::card_program(date(2017, 12, 17), 2020);
        assert!(config.validate().is_ok());
        assert!(config.shares.validate().is_ok());
        assert_eq!(config.cohorts.len(), 4);
        assert_eq!(config.cohorts[3].max_cycles, Some(1));
    }

    #[test]
    fn test_rejects_past_horizon() {
        let mut config = SimulationConfig::card_program(date(2017, 12, 17), 2020);
        config.horizon_year = 2016;
        assert!(matches!(
            config.validate(),
            Err(LedgerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_creditfree_days() {
        let mut config = SimulationConfig::card_program(date(2017, 12, 17), 2020);
        config.creditfree_days = 0;
        assert!(config.validate().is_err());
    }
}
