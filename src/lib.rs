pub mod balance;
pub mod calendar;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod ledger;
pub mod portfolio;
pub mod stats;
pub mod types;

// re-export key types
pub use balance::balance_days;
pub use calendar::{next_billing_date, next_billing_date_after, parse_iso_date};
pub use config::{CohortShareTable, CohortSpec, CostAssumptions, SimulationConfig};
pub use decimal::{Money, Rate};
pub use errors::{LedgerError, Result};
pub use interest::{
    simple_interest, Accrual, AccrualEngine, CompoundingEngine, InterestMode,
};
pub use ledger::{Ledger, LedgerGenerator};
pub use portfolio::{concat, run_simulation, PortfolioSummary};
pub use stats::{late_payment_statistics, LatenessBucket};
pub use types::{LedgerRow, LoanCycle};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
