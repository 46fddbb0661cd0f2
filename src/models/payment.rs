//! Payment model and aggregation types.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The method a payment was made with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash handed over directly.
    Cash,
    /// Bank transfer.
    Transfer,
    /// First supported mobile money provider.
    MobileMoneyA,
    /// Second supported mobile money provider.
    MobileMoneyB,
}

/// A single partial or full payment recorded against a payslip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier, allocated by the store.
    pub id: u64,
    /// The payslip this payment goes toward.
    pub payslip_id: u64,
    /// The paid amount; always positive and never pushes the payslip's
    /// paid total above its net.
    pub amount: Decimal,
    /// How the payment was made.
    pub method: PaymentMethod,
    /// When the payment was recorded (UTC).
    pub paid_at: NaiveDateTime,
}

/// Per-method payment totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodTotals {
    /// Total paid in cash.
    pub cash: Decimal,
    /// Total paid by bank transfer.
    pub transfer: Decimal,
    /// Total paid via the first mobile money provider.
    pub mobile_money_a: Decimal,
    /// Total paid via the second mobile money provider.
    pub mobile_money_b: Decimal,
}

impl MethodTotals {
    /// Adds an amount to the bucket matching the given method.
    pub fn record(&mut self, method: PaymentMethod, amount: Decimal) {
        match method {
            PaymentMethod::Cash => self.cash += amount,
            PaymentMethod::Transfer => self.transfer += amount,
            PaymentMethod::MobileMoneyA => self.mobile_money_a += amount,
            PaymentMethod::MobileMoneyB => self.mobile_money_b += amount,
        }
    }
}

/// Aggregated payment statistics, optionally scoped to one company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentStats {
    /// Number of payments matched.
    pub count: u64,
    /// Sum of all matched payment amounts.
    pub total_amount: Decimal,
    /// Totals broken down by payment method.
    pub by_method: MethodTotals,
}
