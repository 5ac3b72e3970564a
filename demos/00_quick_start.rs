/// quick start - minimal example to get started
use chrono::NaiveDate;
use financing_engine_rs::{
    AmortizationMethod, AmortizationSchedule, FinancingTerms, Money, Rate, Uuid,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a 100,000 financing at 1% per month over 10 years, constant-principal
    let terms = FinancingTerms::new(
        Uuid::new_v4(),
        Money::from_major(100_000),
        Rate::from_decimal(dec!(0.01)),
        120,
        NaiveDate::from_ymd_opt(2024, 1, 15).ok_or("bad date")?,
        AmortizationMethod::Sac,
    );

    let schedule = AmortizationSchedule::generate(&terms)?;

    let first = &schedule.rows[0];
    println!(
        "installment 1: {} principal + {} interest = {}",
        first.principal_portion, first.interest_portion, first.total_payment
    );
    println!("total interest over the term: {}", schedule.summary.total_interest);

    Ok(())
}
