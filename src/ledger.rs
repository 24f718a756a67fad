use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balance::balance_days;
use crate::config::{CohortSpec, SimulationConfig};
use crate::decimal::Money;
use crate::errors::Result;
use crate::interest::{simple_interest, AccrualEngine};
use crate::types::{LedgerRow, LoanCycle};

/// ordered, append-only sequence of ledger rows
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ledger {
    rows: Vec<LedgerRow>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: LedgerRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LedgerRow> {
        self.rows.iter()
    }

    /// append all rows of another ledger, preserving order
    pub fn extend(&mut self, other: Ledger) {
        self.rows.extend(other.rows);
    }

    /// sum of Total_Principal across rows
    pub fn total_principal(&self) -> Money {
        self.rows
            .iter()
            .fold(Money::ZERO, |acc, row| acc + row.total_principal)
    }

    /// sum of Total_Interest across rows
    pub fn total_interest(&self) -> Money {
        self.rows
            .iter()
            .fold(Money::ZERO, |acc, row| acc + row.total_interest)
    }

    /// export as a JSON array of analyst-facing rows
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.rows)?)
    }

    /// import a ledger previously produced by [`Ledger::to_json`]
    pub fn from_json(json: &str) -> Result<Self> {
        let rows: Vec<LedgerRow> = serde_json::from_str(json)?;
        Ok(Self { rows })
    }
}

impl IntoIterator for Ledger {
    type Item = LedgerRow;
    type IntoIter = std::vec::IntoIter<LedgerRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl FromIterator<LedgerRow> for Ledger {
    fn from_iter<I: IntoIterator<Item = LedgerRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// drives the accrual engine across successive monthly loan cycles for one
/// cohort until the horizon year is reached
pub struct LedgerGenerator<'a> {
    config: &'a SimulationConfig,
    engine: AccrualEngine,
}

impl<'a> LedgerGenerator<'a> {
    /// validates the configuration eagerly
    pub fn new(config: &'a SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            engine: AccrualEngine::with_mode(config.anchor_day, config.interest_mode),
        })
    }

    /// generate the full ledger for one cohort
    ///
    /// the seed cycle is priced through the revolving accrual engine; each
    /// follow-up cycle re-issues the full principal the day after the
    /// previous payment and is priced as single-shot simple interest on
    /// the undecremented principal. the follow-up pricing intentionally
    /// differs from the seed row; see DESIGN.md.
    pub fn generate(&self, cohort: &CohortSpec) -> Result<Ledger> {
        let config = self.config;
        let share = config.shares.share_of(&cohort.label)?;
        let customers = share.as_decimal() * Decimal::from(config.total_customers);

        let mut ledger = Ledger::new();

        let seed = LoanCycle::from_terms(
            config.start_date,
            config.creditfree_days,
            cohort.lateness_days,
            config.principal,
            config.annual_rate,
            cohort.label.clone(),
            config.decrement_rate,
        )?;
        let accrual = self.engine.accrue(&seed)?;
        ledger.push(self.make_row(
            &cohort.label,
            customers,
            seed.issue_date,
            seed.due_date,
            seed.paid_date,
            accrual.balance_days,
            accrual.interest,
        ));

        let mut prev_paid = seed.paid_date;
        loop {
            if let Some(cap) = cohort.max_cycles {
                if ledger.len() >= cap {
                    break;
                }
            }

            let issue = prev_paid + chrono::Duration::days(1);
            let due = issue + chrono::Duration::days(config.creditfree_days as i64);
            let paid = due + chrono::Duration::days(cohort.lateness_days as i64);

            let days = balance_days(issue, due, paid, config.anchor_day)?;
            let interest = simple_interest(config.principal, days, config.annual_rate);

            ledger.push(self.make_row(
                &cohort.label,
                customers,
                issue,
                due,
                paid,
                days,
                interest,
            ));

            // the row that crosses into the horizon year is kept, then
            // generation halts
            if due.year() == config.horizon_year {
                break;
            }
            prev_paid = paid;
        }

        Ok(ledger)
    }

    #[allow(clippy::too_many_arguments)]
    fn make_row(
        &self,
        label: &str,
        customers: Decimal,
        date_issued: NaiveDate,
        due_date: NaiveDate,
        date_paid: NaiveDate,
        balance_days: u32,
        interest_per_person: Money,
    ) -> LedgerRow {
        LedgerRow {
            date_issued,
            due_date,
            date_paid,
            balance_days,
            customer_type: label.to_string(),
            number_of_customers: customers,
            rate: self.config.annual_rate,
            principal: self.config.principal,
            interest_per_person,
            total_interest: interest_per_person * customers,
            total_principal: self.config.principal * customers,
        }
    }
}
