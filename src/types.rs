use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balance::check_date_order;
use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};

/// one simulated loan cycle for a single customer
///
/// immutable once constructed; consumed by the accrual engine to price a
/// single ledger row and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanCycle {
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub paid_date: NaiveDate,
    pub principal: Money,
    pub annual_rate: Rate,
    pub customer_type: String,
    pub decrement_rate: Rate,
}

impl LoanCycle {
    /// validated constructor
    ///
    /// rejects degenerate inputs eagerly instead of letting them surface
    /// as negative day counts or negative interest downstream.
    pub fn new(
        issue_date: NaiveDate,
        due_date: NaiveDate,
        paid_date: NaiveDate,
        principal: Money,
        annual_rate: Rate,
        customer_type: impl Into<String>,
        decrement_rate: Rate,
    ) -> Result<Self> {
        check_date_order(issue_date, due_date, paid_date)?;

        if !principal.is_positive() {
            return Err(LedgerError::InvalidLoanParameters {
                message: format!("principal must be positive, got {}", principal),
            });
        }
        if annual_rate.as_decimal().is_sign_negative() {
            return Err(LedgerError::InvalidLoanParameters {
                message: format!("annual rate must be non-negative, got {}", annual_rate),
            });
        }
        if decrement_rate.as_decimal().is_sign_negative() || decrement_rate >= Rate::ONE {
            return Err(LedgerError::InvalidLoanParameters {
                message: format!("decrement rate must be in [0, 1), got {}", decrement_rate),
            });
        }

        Ok(Self {
            issue_date,
            due_date,
            paid_date,
            principal,
            annual_rate,
            customer_type: customer_type.into(),
            decrement_rate,
        })
    }

    /// build a cycle from issue date plus grace and lateness offsets
    pub fn from_terms(
        issue_date: NaiveDate,
        creditfree_days: u32,
        lateness_days: u32,
        principal: Money,
        annual_rate: Rate,
        customer_type: impl Into<String>,
        decrement_rate: Rate,
    ) -> Result<Self> {
        let due_date = issue_date + chrono::Duration::days(creditfree_days as i64);
        let paid_date = due_date + chrono::Duration::days(lateness_days as i64);
        Self::new(
            issue_date,
            due_date,
            paid_date,
            principal,
            annual_rate,
            customer_type,
            decrement_rate,
        )
    }

    /// true when the customer paid exactly on the due date
    pub fn paid_on_time(&self) -> bool {
        self.paid_date == self.due_date
    }
}

/// one row of a cohort repayment ledger
///
/// serde names match the analyst-facing column headers so exported JSON
/// lines up with the historical report layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    #[serde(rename = "Date_Issued")]
    pub date_issued: NaiveDate,
    #[serde(rename = "Due_Date")]
    pub due_date: NaiveDate,
    #[serde(rename = "Date_Paid")]
    pub date_paid: NaiveDate,
    #[serde(rename = "Balance_Days")]
    pub balance_days: u32,
    #[serde(rename = "Customer_Type")]
    pub customer_type: String,
    #[serde(rename = "No_of_Customers")]
    pub number_of_customers: Decimal,
    #[serde(rename = "Rate")]
    pub rate: Rate,
    #[serde(rename = "Principal")]
    pub principal: Money,
    #[serde(rename = "Interest_Per_Person")]
    pub interest_per_person: Money,
    #[serde(rename = "Total_Interest")]
    pub total_interest: Money,
    #[serde(rename = "Total_Principal")]
    pub total_principal: Money,
}

impl LedgerRow {
    /// check the row's product invariants hold
    pub fn is_consistent(&self) -> bool {
        self.total_interest == self.interest_per_person * self.number_of_customers
            && self.total_principal == self.principal * self.number_of_customers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_terms_offsets() {
        let cycle = LoanCycle::from_terms(
            date(2017, 12, 17),
            15,
            30,
            Money::from_major(1_000),
            Rate::from_percentage(180),
            "30",
            Rate::from_percentage(5),
        )
        .unwrap();

        assert_eq!(cycle.due_date, date(2018, 1, 1));
        assert_eq!(cycle.paid_date, date(2018, 1, 31));
        assert!(!cycle.paid_on_time());
    }

    #[test]
    fn test_zero_lateness_is_on_time() {
        let cycle = LoanCycle::from_terms(
            date(2017, 12, 17),
            15,
            0,
            Money::from_major(1_000),
            Rate::from_percentage(180),
            ">15",
            Rate::from_percentage(5),
        )
        .unwrap();
        assert!(cycle.paid_on_time());
    }

    #[test]
    fn test_rejects_non_positive_principal() {
        let result = LoanCycle::from_terms(
            date(2017, 12, 17),
            15,
            0,
            Money::ZERO,
            Rate::from_percentage(180),
            ">15",
            Rate::from_percentage(5),
        );
        assert!(matches!(
            result,
            Err(LedgerError::InvalidLoanParameters { .. })
        ));
    }

    #[test]
    fn test_rejects_full_decrement() {
        let result = LoanCycle::from_terms(
            date(2017, 12, 17),
            15,
            30,
            Money::from_major(1_000),
            Rate::from_percentage(180),
            "30",
            Rate::from_percentage(100),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_row_consistency() {
        let row = LedgerRow {
            date_issued: date(2017, 12, 17),
            due_date: date(2018, 1, 1),
            date_paid: date(2018, 1, 31),
            balance_days: 30,
            customer_type: "30".to_string(),
            number_of_customers: dec!(110),
            rate: Rate::from_percentage(180),
            principal: Money::from_major(1_000),
            interest_per_person: Money::from_decimal(dec!(10)),
            total_interest: Money::from_decimal(dec!(1100)),
            total_principal: Money::from_major(110_000),
        };
        assert!(row.is_consistent());
    }
}
