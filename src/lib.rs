//! Payroll Cycle Engine
//!
//! This crate runs company-scoped payroll cycles: it keeps a per-day
//! attendance ledger, turns attendance into gross/net amounts per contract
//! type, generates payslips for a cycle, walks the cycle through its
//! `Draft -> Approved -> Closed` lifecycle against a company budget, and
//! tracks partial payments per payslip.

#![warn(missing_docs)]

pub mod api;
pub mod attendance;
pub mod calculation;
pub mod cycle;
pub mod error;
pub mod models;
pub mod payment;
pub mod payslip;
pub mod roster;
pub mod store;
