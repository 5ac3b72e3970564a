use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};

/// payment composition for a single installment index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstallmentParts {
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub total: Money,
}

/// SAC installment for a given index: constant principal portion, interest
/// on the balance outstanding before the installment
pub fn sac_installment(
    principal: Money,
    monthly_rate: Rate,
    term_months: u32,
    installment_index: u32,
) -> Result<InstallmentParts> {
    check_terms(principal, term_months)?;
    check_index(installment_index, term_months)?;

    let principal_portion = principal / Decimal::from(term_months);
    let balance_before = principal - principal_portion * Decimal::from(installment_index - 1);
    let interest_portion = balance_before.interest_at(monthly_rate);

    Ok(InstallmentParts {
        principal_portion,
        interest_portion,
        total: principal_portion + interest_portion,
    })
}

/// fixed Price installment: P * r(1+r)^n / ((1+r)^n - 1)
pub fn price_payment(principal: Money, monthly_rate: Rate, term_months: u32) -> Result<Money> {
    check_terms(principal, term_months)?;

    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(term_months));
    }

    let r = monthly_rate.as_decimal();
    let compound = compound_factor(monthly_rate, term_months);

    let numerator = principal.as_decimal() * r * compound;
    let denominator = compound - Decimal::ONE;

    Ok(Money::from_decimal(numerator / denominator))
}

/// Price installment composition for a given index, derived by iterating
/// interest-on-remaining-balance from index 1
pub fn price_installment(
    principal: Money,
    monthly_rate: Rate,
    term_months: u32,
    installment_index: u32,
) -> Result<InstallmentParts> {
    check_index(installment_index, term_months)?;

    let fixed = price_payment(principal, monthly_rate, term_months)?;

    let mut balance = principal;
    for _ in 1..installment_index {
        let interest = balance.interest_at(monthly_rate);
        balance -= fixed - interest;
    }

    let interest_portion = balance.interest_at(monthly_rate);

    Ok(InstallmentParts {
        principal_portion: fixed - interest_portion,
        interest_portion,
        total: fixed,
    })
}

/// (1 + r)^n by loop multiplication
pub(crate) fn compound_factor(rate: Rate, periods: u32) -> Decimal {
    let base = Decimal::ONE + rate.as_decimal();
    let mut compound = Decimal::ONE;
    for _ in 0..periods {
        compound *= base;
    }
    compound
}

fn check_terms(principal: Money, term_months: u32) -> Result<()> {
    if !principal.is_positive() {
        return Err(EngineError::InvalidTerms {
            message: format!("principal must be positive, got {principal}"),
        });
    }
    if term_months == 0 {
        return Err(EngineError::InvalidTerms {
            message: "term must be at least 1 month".to_string(),
        });
    }
    Ok(())
}

fn check_index(installment_index: u32, term_months: u32) -> Result<()> {
    if installment_index == 0 || installment_index > term_months {
        return Err(EngineError::InvalidTerms {
            message: format!(
                "installment index {installment_index} outside term of {term_months} months"
            ),
        });
    }
    Ok(())
}
