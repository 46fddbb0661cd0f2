//! Core data models for the Payroll Cycle Engine.
//!
//! This module contains all the domain entities used throughout the engine.
//! Every enum is a closed tagged type matched exhaustively by the salary
//! calculator and the cycle state machine.

mod attendance;
mod company;
mod employee;
mod pay_cycle;
mod payment;
mod payslip;

pub use attendance::{
    AttendanceAggregate, AttendanceRecord, AttendanceStatus, AttendanceUpdate, StatusCounts,
};
pub use company::Company;
pub use employee::{ContractType, Employee, EmployeeUpdate, NewEmployee};
pub use pay_cycle::{CycleStatus, FixedPaymentPolicy, PayCycle, Period};
pub use payment::{MethodTotals, Payment, PaymentMethod, PaymentStats};
pub use payslip::{Payslip, PayslipStatus};
