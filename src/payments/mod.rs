pub mod reconcile;
pub mod simulation;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::PaymentType;

pub use reconcile::{reconcile, ReconciledBalance};
pub use simulation::{simulate, simulate_after, EarlyPaymentResult, SimulationOutcome};

/// recorded payment against a financing, read from storage by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// unset for extra/early payments not tied to a specific installment
    pub installment_index: Option<u32>,
    pub amount: Money,
    pub principal_component: Money,
    pub interest_component: Money,
    pub payment_type: PaymentType,
    pub date: NaiveDate,
}

impl PaymentRecord {
    /// regular payment of a scheduled installment
    pub fn installment(
        installment_index: u32,
        amount: Money,
        principal_component: Money,
        interest_component: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            installment_index: Some(installment_index),
            amount,
            principal_component,
            interest_component,
            payment_type: PaymentType::Installment,
            date,
        }
    }

    /// partial payment, applied as principal reduction
    pub fn partial(amount: Money, date: NaiveDate) -> Self {
        Self {
            installment_index: None,
            amount,
            principal_component: amount,
            interest_component: Money::ZERO,
            payment_type: PaymentType::Partial,
            date,
        }
    }

    /// extra payment ahead of schedule, applied as principal reduction
    pub fn early(amount: Money, date: NaiveDate) -> Self {
        Self {
            installment_index: None,
            amount,
            principal_component: amount,
            interest_component: Money::ZERO,
            payment_type: PaymentType::Early,
            date,
        }
    }
}

/// payments in ascending date order regardless of storage order
pub(crate) fn sorted_by_date(payments: &[PaymentRecord]) -> Vec<PaymentRecord> {
    let mut sorted = payments.to_vec();
    sorted.sort_by_key(|payment| payment.date);
    sorted
}
