//! The Payment Ledger component.
//!
//! Records partial and full payments against payslips, re-derives payslip
//! status on every mutation, and aggregates payment statistics.

mod ledger;
mod stats;

pub use ledger::{delete_payment, record_payment};
pub use stats::payment_stats;
