use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("unknown cohort: {label}")]
    UnknownCohort {
        label: String,
    },

    #[error("invalid loan parameters: {message}")]
    InvalidLoanParameters {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
