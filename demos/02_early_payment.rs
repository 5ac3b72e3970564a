/// early payment - reconcile a payment history, then simulate an extra payment
use chrono::NaiveDate;
use financing_engine_rs::{
    reconcile, simulate_after, AmortizationMethod, AmortizationSchedule, FinancingTerms, Money,
    PaymentPreference, PaymentRecord, Rate, SimulationOutcome, Uuid,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let terms = FinancingTerms::new(
        Uuid::new_v4(),
        Money::from_major(60_000),
        Rate::from_decimal(dec!(0.01)),
        60,
        NaiveDate::from_ymd_opt(2024, 1, 10).ok_or("bad date")?,
        AmortizationMethod::Price,
    );
    let schedule = AmortizationSchedule::generate(&terms)?;

    // six regular installments, then a 5,000 extra payment
    let mut payments: Vec<PaymentRecord> = schedule
        .rows
        .iter()
        .take(6)
        .map(|row| {
            PaymentRecord::installment(
                row.installment_index,
                row.total_payment,
                row.principal_portion,
                row.interest_portion,
                row.due_date,
            )
        })
        .collect();
    payments.push(PaymentRecord::early(
        Money::from_major(5_000),
        NaiveDate::from_ymd_opt(2024, 7, 20).ok_or("bad date")?,
    ));

    let position = reconcile(&terms, &payments)?;
    println!(
        "outstanding {} after {} installments ({} paid, {} of it interest)",
        position.current_balance,
        position.paid_installments,
        position.total_paid,
        position.total_interest_paid,
    );

    // what would another 10,000 do under each preference?
    for preference in [
        PaymentPreference::ShortenTerm,
        PaymentPreference::ReduceInstallment,
    ] {
        let result = simulate_after(&terms, &position, Money::from_major(10_000), preference)?;

        match result.outcome {
            SimulationOutcome::TermReduced {
                new_remaining_installments,
            } => println!(
                "{preference}: {} remaining installments, {} interest saved",
                new_remaining_installments, result.interest_saved
            ),
            SimulationOutcome::InstallmentReduced { new_installment } => println!(
                "{preference}: new installment {}, {} interest saved",
                new_installment, result.interest_saved
            ),
        }
    }

    Ok(())
}
