use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{to_monthly_rate, Money, Rate};
use crate::errors::{EngineError, Result};
use crate::schedule::{price_payment, sac_installment};
use crate::types::{AmortizationMethod, FinancingTerms, PaymentPreference, MAX_TERM_MONTHS};

use super::ReconciledBalance;

/// effect of the simulated extra payment, one variant per borrower preference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimulationOutcome {
    /// same installment, fewer periods
    TermReduced { new_remaining_installments: u32 },
    /// same term, lower installment
    InstallmentReduced { new_installment: Money },
}

/// result of an early-payment simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarlyPaymentResult {
    pub original_balance: Money,
    pub extra_payment: Money,
    pub new_balance: Money,
    pub interest_saved: Money,
    pub outcome: SimulationOutcome,
}

/// Simulate the effect of an extra payment on the outstanding balance.
///
/// Under `ShortenTerm` the current per-period obligation stays fixed and the
/// number of remaining periods shrinks; under `ReduceInstallment` the term
/// stays fixed and the installment is recomputed against the new balance.
/// `interest_saved` compares the projected remaining interest before and
/// after the extra payment.
pub fn simulate(
    current_balance: Money,
    monthly_rate: Rate,
    remaining_months: u32,
    method: AmortizationMethod,
    extra_payment: Money,
    preference: PaymentPreference,
) -> Result<EarlyPaymentResult> {
    if !extra_payment.is_positive() {
        return Err(EngineError::InvalidPaymentAmount {
            amount: extra_payment,
        });
    }
    if !current_balance.is_positive() {
        return Err(EngineError::InvalidTerms {
            message: format!("current balance must be positive, got {current_balance}"),
        });
    }
    if remaining_months == 0 || remaining_months > MAX_TERM_MONTHS {
        return Err(EngineError::InvalidTerms {
            message: format!(
                "remaining term must be between 1 and {MAX_TERM_MONTHS} months, got {remaining_months}"
            ),
        });
    }

    let new_balance = (current_balance - extra_payment).max(Money::ZERO);
    let projected_before =
        projected_interest(current_balance, monthly_rate, remaining_months, method)?;

    // extra payment settles the loan outright
    if new_balance.is_zero() {
        let outcome = match preference {
            PaymentPreference::ShortenTerm => SimulationOutcome::TermReduced {
                new_remaining_installments: 0,
            },
            PaymentPreference::ReduceInstallment => SimulationOutcome::InstallmentReduced {
                new_installment: Money::ZERO,
            },
        };

        return Ok(EarlyPaymentResult {
            original_balance: current_balance,
            extra_payment,
            new_balance,
            interest_saved: projected_before,
            outcome,
        });
    }

    let (outcome, projected_after) = match preference {
        PaymentPreference::ShortenTerm => {
            let new_term = match method {
                AmortizationMethod::Price => {
                    let fixed = price_payment(current_balance, monthly_rate, remaining_months)?;
                    term_for_fixed_payment(new_balance, monthly_rate, fixed, remaining_months)
                }
                AmortizationMethod::Sac => {
                    let quota = current_balance / Decimal::from(remaining_months);
                    periods_for_quota(new_balance, quota, remaining_months)
                }
            };

            let after = projected_interest(new_balance, monthly_rate, new_term, method)?;
            (
                SimulationOutcome::TermReduced {
                    new_remaining_installments: new_term,
                },
                after,
            )
        }
        PaymentPreference::ReduceInstallment => {
            let new_installment = match method {
                AmortizationMethod::Price => {
                    price_payment(new_balance, monthly_rate, remaining_months)?
                }
                AmortizationMethod::Sac => {
                    sac_installment(new_balance, monthly_rate, remaining_months, 1)?.total
                }
            };

            let after = projected_interest(new_balance, monthly_rate, remaining_months, method)?;
            (
                SimulationOutcome::InstallmentReduced { new_installment },
                after,
            )
        }
    };

    Ok(EarlyPaymentResult {
        original_balance: current_balance,
        extra_payment,
        new_balance,
        interest_saved: (projected_before - projected_after).max(Money::ZERO),
        outcome,
    })
}

/// wire a reconciled position into the simulator
pub fn simulate_after(
    terms: &FinancingTerms,
    reconciled: &ReconciledBalance,
    extra_payment: Money,
    preference: PaymentPreference,
) -> Result<EarlyPaymentResult> {
    if reconciled.fully_paid {
        return Err(EngineError::InvalidTerms {
            message: "financing is already fully paid".to_string(),
        });
    }

    let remaining_months = terms.term_months.saturating_sub(reconciled.paid_installments);

    simulate(
        reconciled.current_balance,
        to_monthly_rate(terms.period_rate),
        remaining_months,
        terms.method,
        extra_payment,
        preference,
    )
}

/// sum of interest portions over a fresh schedule of the given length
fn projected_interest(
    balance: Money,
    monthly_rate: Rate,
    months: u32,
    method: AmortizationMethod,
) -> Result<Money> {
    if months == 0 || balance.is_zero() {
        return Ok(Money::ZERO);
    }

    let per_period = match method {
        AmortizationMethod::Sac => balance / Decimal::from(months),
        AmortizationMethod::Price => price_payment(balance, monthly_rate, months)?,
    };

    let mut remaining = balance;
    let mut total_interest = Money::ZERO;

    for index in 1..=months {
        let interest = remaining.interest_at(monthly_rate);
        total_interest += interest;

        let principal = if index == months {
            remaining
        } else {
            match method {
                AmortizationMethod::Sac => per_period,
                AmortizationMethod::Price => per_period - interest,
            }
        };

        remaining -= principal;
    }

    Ok(total_interest)
}

/// smallest number of periods retiring the balance at a fixed payment
fn term_for_fixed_payment(balance: Money, monthly_rate: Rate, payment: Money, cap: u32) -> u32 {
    let mut remaining = balance;
    let mut months = 0;

    while remaining.is_positive() && months < cap {
        let interest = remaining.interest_at(monthly_rate);
        let principal = payment - interest;

        if !principal.is_positive() {
            break;
        }

        remaining = (remaining - principal).max(Money::ZERO);
        months += 1;
    }

    months
}

/// periods needed to retire the balance at the original principal quota
fn periods_for_quota(balance: Money, quota: Money, cap: u32) -> u32 {
    let periods = (balance.as_decimal() / quota.as_decimal()).ceil();

    periods.to_u32().unwrap_or(cap).min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::{reconcile, PaymentRecord};
    use crate::schedule::AmortizationSchedule;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn rate_1pct() -> Rate {
        Rate::from_decimal(dec!(0.01))
    }

    #[test]
    fn test_full_settlement_shorten_term() {
        let balance = Money::from_major(50_000);
        let result = simulate(
            balance,
            rate_1pct(),
            60,
            AmortizationMethod::Price,
            balance,
            PaymentPreference::ShortenTerm,
        )
        .unwrap();

        assert_eq!(result.new_balance, Money::ZERO);
        assert_eq!(
            result.outcome,
            SimulationOutcome::TermReduced {
                new_remaining_installments: 0
            }
        );
        // all projected interest is saved
        assert!(result.interest_saved.is_positive());
    }

    #[test]
    fn test_full_settlement_reduce_installment() {
        let balance = Money::from_major(50_000);
        let result = simulate(
            balance,
            rate_1pct(),
            60,
            AmortizationMethod::Sac,
            Money::from_major(60_000),
            PaymentPreference::ReduceInstallment,
        )
        .unwrap();

        assert_eq!(result.new_balance, Money::ZERO);
        assert_eq!(
            result.outcome,
            SimulationOutcome::InstallmentReduced {
                new_installment: Money::ZERO
            }
        );
    }

    #[test]
    fn test_price_shorten_term() {
        let result = simulate(
            Money::from_major(100_000),
            rate_1pct(),
            120,
            AmortizationMethod::Price,
            Money::from_major(20_000),
            PaymentPreference::ShortenTerm,
        )
        .unwrap();

        assert_eq!(result.new_balance, Money::from_major(80_000));

        match result.outcome {
            SimulationOutcome::TermReduced {
                new_remaining_installments,
            } => {
                // 80 000 at the original 1434.71 installment retires in ~82 months
                assert!((81..=83).contains(&new_remaining_installments));
            }
            other => panic!("expected term reduction, got {other:?}"),
        }

        assert!(result.interest_saved.is_positive());
    }

    #[test]
    fn test_sac_shorten_term_keeps_original_quota() {
        let result = simulate(
            Money::from_major(100_000),
            rate_1pct(),
            120,
            AmortizationMethod::Sac,
            Money::from_major(20_000),
            PaymentPreference::ShortenTerm,
        )
        .unwrap();

        // quota of 833.33 retires 80 000 in ceil(96.0) = 97 periods
        assert_eq!(
            result.outcome,
            SimulationOutcome::TermReduced {
                new_remaining_installments: 97
            }
        );
        assert!(result.interest_saved.is_positive());
    }

    #[test]
    fn test_price_reduce_installment() {
        let result = simulate(
            Money::from_major(100_000),
            rate_1pct(),
            120,
            AmortizationMethod::Price,
            Money::from_major(20_000),
            PaymentPreference::ReduceInstallment,
        )
        .unwrap();

        assert_eq!(
            result.outcome,
            SimulationOutcome::InstallmentReduced {
                new_installment: Money::from_str_exact("1147.77").unwrap()
            }
        );
        assert!(result.interest_saved.is_positive());
    }

    #[test]
    fn test_sac_reduce_installment() {
        let result = simulate(
            Money::from_major(100_000),
            rate_1pct(),
            120,
            AmortizationMethod::Sac,
            Money::from_major(20_000),
            PaymentPreference::ReduceInstallment,
        )
        .unwrap();

        // 80 000 / 120 = 666.67 quota plus 800.00 first-period interest
        assert_eq!(
            result.outcome,
            SimulationOutcome::InstallmentReduced {
                new_installment: Money::from_str_exact("1466.67").unwrap()
            }
        );
    }

    #[test]
    fn test_zero_rate_projection() {
        let result = simulate(
            Money::from_major(12_000),
            Rate::ZERO,
            12,
            AmortizationMethod::Price,
            Money::from_major(6_000),
            PaymentPreference::ShortenTerm,
        )
        .unwrap();

        // no interest, so nothing to save
        assert_eq!(result.interest_saved, Money::ZERO);
        assert_eq!(
            result.outcome,
            SimulationOutcome::TermReduced {
                new_remaining_installments: 6
            }
        );
    }

    #[test]
    fn test_invalid_inputs() {
        let balance = Money::from_major(10_000);

        let err = simulate(
            balance,
            rate_1pct(),
            12,
            AmortizationMethod::Sac,
            Money::ZERO,
            PaymentPreference::ShortenTerm,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidPaymentAmount { .. }));

        let err = simulate(
            balance,
            rate_1pct(),
            0,
            AmortizationMethod::Sac,
            Money::from_major(100),
            PaymentPreference::ShortenTerm,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTerms { .. }));

        let err = simulate(
            Money::ZERO,
            rate_1pct(),
            12,
            AmortizationMethod::Sac,
            Money::from_major(100),
            PaymentPreference::ShortenTerm,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTerms { .. }));
    }

    #[test]
    fn test_simulate_after_reconciliation() {
        let terms = FinancingTerms::new(
            Uuid::new_v4(),
            Money::from_major(12_000),
            rate_1pct(),
            12,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            AmortizationMethod::Sac,
        );
        let schedule = AmortizationSchedule::generate(&terms).unwrap();
        let row = schedule.get_row(1).unwrap();

        let payments = vec![PaymentRecord::installment(
            1,
            row.total_payment,
            row.principal_portion,
            row.interest_portion,
            row.due_date,
        )];
        let reconciled = reconcile(&terms, &payments).unwrap();

        let result = simulate_after(
            &terms,
            &reconciled,
            Money::from_major(2_000),
            PaymentPreference::ShortenTerm,
        )
        .unwrap();

        assert_eq!(result.original_balance, Money::from_major(11_000));
        assert_eq!(result.new_balance, Money::from_major(9_000));
        // quota of 1000 over the 11 remaining months retires 9000 in 9 periods
        assert_eq!(
            result.outcome,
            SimulationOutcome::TermReduced {
                new_remaining_installments: 9
            }
        );
    }

    #[test]
    fn test_simulate_after_rejects_settled_financing() {
        let terms = FinancingTerms::new(
            Uuid::new_v4(),
            Money::from_major(12_000),
            rate_1pct(),
            12,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            AmortizationMethod::Sac,
        );
        let payments = vec![PaymentRecord::early(
            Money::from_major(12_000),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        )];
        let reconciled = reconcile(&terms, &payments).unwrap();

        let err = simulate_after(
            &terms,
            &reconciled,
            Money::from_major(500),
            PaymentPreference::ShortenTerm,
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::InvalidTerms { .. }));
    }
}
