//! Company model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a company (tenant) with its spendable payroll budget.
///
/// The budget is the single mutable scalar all approvals debit and all
/// cycle deletions credit; it is only ever touched inside a store
/// transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier, allocated by the store.
    pub id: u64,
    /// Display name of the company.
    pub name: String,
    /// Spendable funds in the single currency unit.
    pub budget: Decimal,
}
