use chrono::NaiveDate;

use crate::calendar::next_billing_date_after;
use crate::errors::{LedgerError, Result};

/// total days a balance stayed outstanding, decomposed across statement dates
///
/// walks the monthly billing boundaries between issue and payment and sums
/// the day count of each crossed period. paying exactly on the due date
/// yields zero. the first partial period counts days only when the due date
/// precedes the first boundary after issuance; a due date on or after that
/// boundary contributes nothing for the issuing month (the balance has not
/// come due within that statement cycle yet).
pub fn balance_days(
    issue_date: NaiveDate,
    due_date: NaiveDate,
    paid_date: NaiveDate,
    anchor_day: u32,
) -> Result<u32> {
    check_date_order(issue_date, due_date, paid_date)?;

    if paid_date == due_date {
        return Ok(0);
    }

    let first_boundary = next_billing_date_after(issue_date, anchor_day)?;

    let mut total: i64 = 0;
    let mut prev_boundary = first_boundary;
    let mut next_boundary = first_boundary;
    let mut first_period = true;

    while paid_date > next_boundary {
        if first_period {
            if due_date < next_boundary {
                total += (next_boundary - due_date).num_days();
            }
            first_period = false;
        } else {
            total += (next_boundary - prev_boundary).num_days();
        }
        prev_boundary = next_boundary;
        next_boundary = next_billing_date_after(next_boundary, anchor_day)?;
    }

    // final partial period; payment inside the issuing statement month
    // lands before the first boundary and contributes nothing
    total += (paid_date - prev_boundary).num_days().max(0);

    Ok(total as u32)
}

pub(crate) fn check_date_order(
    issue_date: NaiveDate,
    due_date: NaiveDate,
    paid_date: NaiveDate,
) -> Result<()> {
    if issue_date > due_date || due_date > paid_date {
        return Err(LedgerError::InvalidLoanParameters {
            message: format!(
                "dates must satisfy issue <= due <= paid, got {} / {} / {}",
                issue_date, due_date, paid_date
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_paid_on_time_is_zero() {
        let days = balance_days(
            date(2017, 12, 17),
            date(2018, 1, 1),
            date(2018, 1, 1),
            1,
        )
        .unwrap();
        assert_eq!(days, 0);
    }

    #[test]
    fn test_single_period_past_due() {
        // due on the first boundary, paid 30 days into the next cycle
        let days = balance_days(
            date(2017, 12, 17),
            date(2018, 1, 1),
            date(2018, 1, 31),
            1,
        )
        .unwrap();
        assert_eq!(days, 30);
    }

    #[test]
    fn test_spans_multiple_boundaries() {
        // due on 2018-01-01, paid 2018-03-15: 31 (jan) + 28 (feb) + 14
        let days = balance_days(
            date(2017, 12, 17),
            date(2018, 1, 1),
            date(2018, 3, 15),
            1,
        )
        .unwrap();
        assert_eq!(days, 73);
    }

    #[test]
    fn test_due_before_first_boundary() {
        // first boundary 2018-02-01; first partial period 12 days from due
        let days = balance_days(
            date(2018, 1, 5),
            date(2018, 1, 20),
            date(2018, 3, 10),
            1,
        )
        .unwrap();
        assert_eq!(days, 12 + 28 + 9);
    }

    #[test]
    fn test_paid_within_issuing_month() {
        // paid late but before the first statement date ever cut
        let days = balance_days(
            date(2018, 1, 5),
            date(2018, 1, 10),
            date(2018, 1, 15),
            1,
        )
        .unwrap();
        assert_eq!(days, 0);
    }

    #[test]
    fn test_monotone_in_paid_date() {
        let issue = date(2017, 12, 17);
        let due = date(2018, 1, 1);
        let mut last = 0;
        for offset in 0..120 {
            let paid = due + chrono::Duration::days(offset);
            let days = balance_days(issue, due, paid, 1).unwrap();
            assert!(days >= last, "offset {}: {} < {}", offset, days, last);
            last = days;
        }
    }

    #[test]
    fn test_rejects_out_of_order_dates() {
        let result = balance_days(
            date(2018, 1, 10),
            date(2018, 1, 5),
            date(2018, 1, 20),
            1,
        );
        assert!(matches!(
            result,
            Err(LedgerError::InvalidLoanParameters { .. })
        ));
    }
}
