pub mod decimal;
pub mod errors;
pub mod payments;
pub mod schedule;
pub mod types;

// re-export key types
pub use decimal::{to_monthly_rate, Money, Rate};
pub use errors::{EngineError, Result};
pub use payments::{
    reconcile, simulate, simulate_after, EarlyPaymentResult, PaymentRecord, ReconciledBalance,
    SimulationOutcome,
};
pub use schedule::{
    price_installment, price_payment, sac_installment, AmortizationRow, AmortizationSchedule,
    InstallmentParts, ScheduleSummary,
};
pub use types::{
    AmortizationMethod, FinancingId, FinancingTerms, PaymentPreference, PaymentType,
    MAX_TERM_MONTHS,
};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
