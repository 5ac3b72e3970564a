pub mod installment;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{to_monthly_rate, Money, Rate};
use crate::errors::Result;
use crate::types::{AmortizationMethod, FinancingId, FinancingTerms};

pub use installment::{price_installment, price_payment, sac_installment, InstallmentParts};

/// single row of the amortization table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub installment_index: u32,
    pub due_date: NaiveDate,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub total_payment: Money,
    pub balance_after: Money,
}

/// aggregate totals over the full table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScheduleSummary {
    pub total_principal: Money,
    pub total_interest: Money,
    pub total_payments: Money,
}

/// complete amortization table for a financing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub financing_id: FinancingId,
    pub principal: Money,
    pub monthly_rate: Rate,
    pub term_months: u32,
    pub start_date: NaiveDate,
    pub method: AmortizationMethod,
    pub rows: Vec<AmortizationRow>,
    pub summary: ScheduleSummary,
}

impl AmortizationSchedule {
    /// generate the full table for the given terms
    ///
    /// Every currency value is rounded to 2 decimal places at the row level.
    /// The final row's principal portion absorbs residual rounding drift so
    /// that the principal portions sum to the principal exactly.
    pub fn generate(terms: &FinancingTerms) -> Result<Self> {
        terms.validate()?;

        let monthly_rate = to_monthly_rate(terms.period_rate);
        let term_months = terms.term_months;

        // per-period obligation: principal quota for SAC, fixed total for Price
        let per_period = match terms.method {
            AmortizationMethod::Sac => terms.principal / Decimal::from(term_months),
            AmortizationMethod::Price => {
                price_payment(terms.principal, monthly_rate, term_months)?
            }
        };

        let mut rows = Vec::with_capacity(term_months as usize);
        let mut balance = terms.principal;
        let mut summary = ScheduleSummary::default();

        for installment_index in 1..=term_months {
            let interest_portion = balance.interest_at(monthly_rate);

            let scheduled_principal = match terms.method {
                AmortizationMethod::Sac => per_period,
                AmortizationMethod::Price => per_period - interest_portion,
            };

            // final row retires whatever is left
            let principal_portion = if installment_index == term_months {
                balance
            } else {
                scheduled_principal
            };

            let total_payment = principal_portion + interest_portion;
            balance -= principal_portion;

            summary.total_principal += principal_portion;
            summary.total_interest += interest_portion;
            summary.total_payments += total_payment;

            rows.push(AmortizationRow {
                installment_index,
                due_date: add_months(terms.start_date, installment_index),
                principal_portion,
                interest_portion,
                total_payment,
                balance_after: balance,
            });
        }

        Ok(Self {
            financing_id: terms.financing_id,
            principal: terms.principal,
            monthly_rate,
            term_months,
            start_date: terms.start_date,
            method: terms.method,
            rows,
            summary,
        })
    }

    /// get row for a specific installment index
    pub fn get_row(&self, installment_index: u32) -> Option<&AmortizationRow> {
        if installment_index == 0 {
            return None;
        }
        self.rows.get((installment_index - 1) as usize)
    }

    /// outstanding balance after a given installment
    pub fn balance_after(&self, installment_index: u32) -> Money {
        self.get_row(installment_index)
            .map(|row| row.balance_after)
            .unwrap_or(self.principal)
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// add calendar months, clamping the day to the target month's end
pub(crate) fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    let total = date.month0() + months;
    let year = date.year() + (total / 12) as i32;
    let month = total % 12 + 1;
    let day = date.day().min(days_in_month(year, month));

    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
