use thiserror::Error;

/// Everything that can stop a calculation. Each variant renders as the
/// message shown to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    #[error("Please fill in all fields")]
    MissingInput { field: &'static str },

    #[error("Please enter valid positive numbers ({field}: {value:?} is not a number)")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Please enter valid positive numbers")]
    InvalidRange { field: &'static str },

    #[error("Annual Percentage Rate cannot be 0%")]
    ZeroRate,

    #[error("Calculation error. Please check your inputs.")]
    ComputationFailure,

    #[error("Unknown currency code {0:?}")]
    UnknownCurrency(String),
}

pub type LoanResult<T> = Result<T, LoanError>;
