//! Employee model and related types.
//!
//! This module defines the Employee struct and ContractType enum for
//! representing workers in the payroll engine, along with the validated
//! creation and per-field update payloads.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the type of employment contract.
///
/// The contract type selects which rate field of the employee is meaningful
/// and how the salary calculator turns attendance into a gross amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    /// Flat monthly salary, paid via `monthly_rate`.
    Fixed,
    /// Paid per attended day, via `daily_rate`.
    Daily,
    /// Paid per worked hour, via `hourly_rate`.
    Hourly,
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContractType::Fixed => "fixed",
            ContractType::Daily => "daily",
            ContractType::Hourly => "hourly",
        };
        f.write_str(name)
    }
}

/// Represents an employee owned by a company.
///
/// Employees are created active and are only ever soft-deleted: deactivation
/// flips `is_active` to `false` and is refused while the employee still has
/// unpaid payslips. Exactly one of the rate fields is meaningful per
/// contract type; the others stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier, allocated by the store in creation order.
    pub id: u64,
    /// The company that owns this employee.
    pub company_id: u64,
    /// Display name of the employee.
    pub name: String,
    /// The type of employment contract.
    pub contract_type: ContractType,
    /// Monthly salary for `Fixed` contracts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_rate: Option<Decimal>,
    /// Per-day rate for `Daily` contracts (also the `DaysWorked` fallback
    /// divisor source for `Fixed` contracts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_rate: Option<Decimal>,
    /// Per-hour rate for `Hourly` contracts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
    /// Whether the employee is active. Inactive employees are skipped by
    /// payslip generation.
    pub is_active: bool,
}

/// Payload for creating an employee.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEmployee {
    /// The company that will own the employee.
    pub company_id: u64,
    /// Display name.
    pub name: String,
    /// The type of employment contract.
    pub contract_type: ContractType,
    /// Monthly salary, required for `Fixed` contracts.
    #[serde(default)]
    pub monthly_rate: Option<Decimal>,
    /// Per-day rate, required for `Daily` contracts.
    #[serde(default)]
    pub daily_rate: Option<Decimal>,
    /// Per-hour rate, required for `Hourly` contracts.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
}

/// Per-field update payload for an employee.
///
/// Every field is optional; `None` leaves the stored value untouched. The
/// contract type itself is immutable once the employee exists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeUpdate {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New monthly salary.
    #[serde(default)]
    pub monthly_rate: Option<Decimal>,
    /// New per-day rate.
    #[serde(default)]
    pub daily_rate: Option<Decimal>,
    /// New per-hour rate.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
}

impl Employee {
    /// Returns the rate field matching the employee's contract type.
    pub fn contract_rate(&self) -> Option<Decimal> {
        match self.contract_type {
            ContractType::Fixed => self.monthly_rate,
            ContractType::Daily => self.daily_rate,
            ContractType::Hourly => self.hourly_rate,
        }
    }
}
