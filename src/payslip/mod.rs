//! The Payslip Generator component.

mod generator;

pub use generator::generate_payslips;
