//! The Pay Cycle State Machine component.
//!
//! Governs the `Draft -> Approved -> Closed` lifecycle, enforces budget
//! solvency at approval, and provides the expedited single-employee daily
//! payout path.

mod daily_payout;
mod lifecycle;

pub use daily_payout::{DailyPayout, pay_daily_now};
pub use lifecycle::{approve_cycle, close_cycle, create_cycle, delete_cycle};
