//! The Attendance Ledger component.
//!
//! Stores per-employee-per-day check-in/check-out records, derives worked
//! hours, and folds records into the aggregate the salary calculator
//! consumes.

mod aggregate;
mod ledger;

pub(crate) use aggregate::aggregate_in;
pub use aggregate::aggregate_attendance;
pub use ledger::{
    AttendanceQuery, query_attendance, record_check_in, record_check_out, record_manual_entry,
    update_attendance,
};
