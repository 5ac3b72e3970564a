use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::schedule::AmortizationSchedule;
use crate::types::{FinancingTerms, PaymentType};

use super::{sorted_by_date, PaymentRecord};

/// live position of a financing after replaying its payment history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReconciledBalance {
    pub current_balance: Money,
    pub paid_installments: u32,
    pub total_paid: Money,
    pub total_interest_paid: Money,
    pub fully_paid: bool,
}

/// Replay recorded payments against the theoretical schedule to produce the
/// current outstanding balance.
///
/// Payments are processed in ascending date order regardless of input order.
/// Installment payments retire the matching row's principal portion; partial
/// and early payments apply directly as principal reduction (principal-only
/// unless an interest component is explicitly supplied). The balance never
/// goes below zero: excess clamps to zero and marks the financing fully paid.
pub fn reconcile(terms: &FinancingTerms, payments: &[PaymentRecord]) -> Result<ReconciledBalance> {
    let schedule = AmortizationSchedule::generate(terms)?;

    let mut balance = terms.principal;
    let mut total_paid = Money::ZERO;
    let mut total_interest_paid = Money::ZERO;

    for payment in sorted_by_date(payments) {
        let principal_reduction = match payment.payment_type {
            // an unresolvable index falls back to the declared principal component
            PaymentType::Installment => payment
                .installment_index
                .and_then(|index| schedule.get_row(index))
                .map(|row| row.principal_portion)
                .unwrap_or(payment.principal_component),
            PaymentType::Partial | PaymentType::Early => {
                (payment.amount - payment.interest_component).max(Money::ZERO)
            }
        };

        total_paid += payment.amount;
        total_interest_paid += payment.interest_component;

        if principal_reduction > balance {
            tracing::debug!(
                financing_id = %terms.financing_id,
                balance = %balance,
                reduction = %principal_reduction,
                "principal reduction exceeds outstanding balance, clamping to zero"
            );
            balance = Money::ZERO;
        } else {
            balance -= principal_reduction;
        }
    }

    let paid_installments = covered_installments(&schedule, terms.principal - balance);

    Ok(ReconciledBalance {
        current_balance: balance,
        paid_installments,
        total_paid,
        total_interest_paid,
        fully_paid: balance.is_zero(),
    })
}

/// count of schedule rows fully covered by the cumulative principal
/// reduction, front to back
fn covered_installments(schedule: &AmortizationSchedule, principal_reduced: Money) -> u32 {
    let mut covered = 0;
    let mut cumulative = Money::ZERO;

    for row in &schedule.rows {
        cumulative += row.principal_portion;
        if cumulative > principal_reduced {
            break;
        }
        covered += 1;
    }

    covered
}
