use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid financing terms: {message}")]
    InvalidTerms {
        message: String,
    },

    #[error("invalid simulation preference: {preference}")]
    InvalidPreference {
        preference: String,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
