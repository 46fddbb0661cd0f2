//! Payslip model and status derivation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The payment status of a payslip, derived from its recorded payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayslipStatus {
    /// No payment recorded yet.
    Pending,
    /// Some money paid, but less than the net amount.
    Partial,
    /// The net amount has been fully paid.
    Paid,
}

impl PayslipStatus {
    /// Derives the status from the amount paid so far versus the net owed.
    ///
    /// Zero paid is `Pending`, anything covering the net is `Paid`,
    /// everything in between is `Partial`. This is the single derivation
    /// used after every payment mutation.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayslipStatus;
    /// use rust_decimal::Decimal;
    ///
    /// let net = Decimal::new(475_000, 0);
    /// assert_eq!(PayslipStatus::from_paid(Decimal::ZERO, net), PayslipStatus::Pending);
    /// assert_eq!(PayslipStatus::from_paid(Decimal::new(100_000, 0), net), PayslipStatus::Partial);
    /// assert_eq!(PayslipStatus::from_paid(net, net), PayslipStatus::Paid);
    /// ```
    pub fn from_paid(paid: Decimal, net: Decimal) -> Self {
        if paid <= Decimal::ZERO {
            PayslipStatus::Pending
        } else if paid >= net {
            PayslipStatus::Paid
        } else {
            PayslipStatus::Partial
        }
    }
}

/// One employee's computed salary line within a pay cycle.
///
/// Created only by payslip generation; `net = gross - deductions` and the
/// sum of the payslip's payments never exceeds `net`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier, allocated by the store.
    pub id: u64,
    /// The cycle this payslip belongs to.
    pub cycle_id: u64,
    /// The employee this payslip pays.
    pub employee_id: u64,
    /// Pre-deduction salary amount.
    pub gross: Decimal,
    /// Deducted amount (flat-rate policy applied at generation).
    pub deductions: Decimal,
    /// Amount owed to the employee: `gross - deductions`.
    pub net: Decimal,
    /// Payment status derived from recorded payments.
    pub status: PayslipStatus,
}
