//! Deduction policy.
//!
//! Payslip generation applies a flat deduction rate to the gross amount;
//! the net owed to the employee is `gross - deductions`.

use rust_decimal::Decimal;

/// The flat deduction rate applied to every generated payslip: 5% of gross.
pub const DEDUCTION_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Computes the deduction for a gross amount, rounded to two decimal places.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_deductions;
/// use rust_decimal::Decimal;
///
/// let gross = Decimal::new(500_000, 0);
/// assert_eq!(compute_deductions(gross), Decimal::new(25_000, 0));
/// ```
pub fn compute_deductions(gross: Decimal) -> Decimal {
    (gross * DEDUCTION_RATE).round_dp(2)
}
