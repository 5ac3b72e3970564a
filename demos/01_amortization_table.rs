/// amortization table - compare SAC and Price schedules side by side
use chrono::NaiveDate;
use financing_engine_rs::{
    AmortizationMethod, AmortizationSchedule, FinancingTerms, Money, Rate, Uuid,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).ok_or("bad date")?;

    for method in [AmortizationMethod::Sac, AmortizationMethod::Price] {
        let terms = FinancingTerms::new(
            Uuid::new_v4(),
            Money::from_major(240_000),
            Rate::from_decimal(dec!(0.008)),
            360,
            start,
            method,
        );

        let schedule = AmortizationSchedule::generate(&terms)?;

        println!("== {method} ==");
        for row in schedule.rows.iter().take(3) {
            println!(
                "  #{:<3} due {}  principal {:>10}  interest {:>10}  total {:>10}  balance {:>12}",
                row.installment_index,
                row.due_date,
                row.principal_portion.to_string(),
                row.interest_portion.to_string(),
                row.total_payment.to_string(),
                row.balance_after.to_string(),
            );
        }
        println!("  ...");
        println!(
            "  totals: principal {}  interest {}  payments {}",
            schedule.summary.total_principal,
            schedule.summary.total_interest,
            schedule.summary.total_payments,
        );
    }

    Ok(())
}
