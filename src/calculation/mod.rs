//! The Salary Calculator component.
//!
//! Pure functions mapping contract terms and attendance aggregates to
//! monetary amounts: gross computation per contract type and the flat
//! deduction policy applied at payslip generation.

mod deduction;
mod gross;

pub use deduction::{DEDUCTION_RATE, compute_deductions};
pub use gross::{FIXED_FALLBACK_MONTH_DAYS, compute_gross};
