use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};

/// unique identifier for a financing
pub type FinancingId = Uuid;

/// upper bound accepted for a financing term
pub const MAX_TERM_MONTHS: u32 = 600;

/// amortization method for a financing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmortizationMethod {
    /// constant principal portion, declining total payment
    Sac,
    /// constant total payment, shifting principal/interest split
    Price,
}

impl fmt::Display for AmortizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmortizationMethod::Sac => write!(f, "SAC"),
            AmortizationMethod::Price => write!(f, "Price"),
        }
    }
}

impl FromStr for AmortizationMethod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sac" => Ok(AmortizationMethod::Sac),
            "price" => Ok(AmortizationMethod::Price),
            _ => Err(EngineError::InvalidTerms {
                message: format!("unsupported amortization method: {s}"),
            }),
        }
    }
}

/// how a recorded payment relates to the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    /// regular payment tied to a scheduled installment
    Installment,
    /// payment below the scheduled amount
    Partial,
    /// extra payment applied ahead of schedule
    Early,
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentType::Installment => write!(f, "installment"),
            PaymentType::Partial => write!(f, "partial"),
            PaymentType::Early => write!(f, "early"),
        }
    }
}

impl FromStr for PaymentType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "installment" => Ok(PaymentType::Installment),
            "partial" => Ok(PaymentType::Partial),
            "early" => Ok(PaymentType::Early),
            _ => Err(EngineError::InvalidTerms {
                message: format!("unsupported payment type: {s}"),
            }),
        }
    }
}

/// borrower preference when applying an early payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentPreference {
    /// keep the installment fixed, finish sooner
    ShortenTerm,
    /// keep the term fixed, pay less per period
    ReduceInstallment,
}

impl fmt::Display for PaymentPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentPreference::ShortenTerm => write!(f, "shortenTerm"),
            PaymentPreference::ReduceInstallment => write!(f, "reduceInstallment"),
        }
    }
}

impl FromStr for PaymentPreference {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "shortenterm" | "shorten_term" => Ok(PaymentPreference::ShortenTerm),
            "reduceinstallment" | "reduce_installment" => Ok(PaymentPreference::ReduceInstallment),
            _ => Err(EngineError::InvalidPreference {
                preference: s.to_string(),
            }),
        }
    }
}

/// immutable terms fixed at financing origination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingTerms {
    pub financing_id: FinancingId,
    pub principal: Money,
    /// monthly decimal fraction, see [`crate::decimal::to_monthly_rate`]
    pub period_rate: Rate,
    pub term_months: u32,
    pub start_date: NaiveDate,
    pub method: AmortizationMethod,
}

impl FinancingTerms {
    pub fn new(
        financing_id: FinancingId,
        principal: Money,
        period_rate: Rate,
        term_months: u32,
        start_date: NaiveDate,
        method: AmortizationMethod,
    ) -> Self {
        Self {
            financing_id,
            principal,
            period_rate,
            term_months,
            start_date,
            method,
        }
    }

    /// defensive check mirroring upstream request validation
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(EngineError::InvalidTerms {
                message: format!("principal must be positive, got {}", self.principal),
            });
        }

        if self.term_months == 0 || self.term_months > MAX_TERM_MONTHS {
            return Err(EngineError::InvalidTerms {
                message: format!(
                    "term must be between 1 and {MAX_TERM_MONTHS} months, got {}",
                    self.term_months
                ),
            });
        }

        if self.period_rate.as_decimal().is_sign_negative() {
            return Err(EngineError::InvalidTerms {
                message: format!("period rate must not be negative, got {}", self.period_rate),
            });
        }

        Ok(())
    }
}
