//! Attendance aggregation.
//!
//! The aggregate is the only attendance input the salary calculator sees: a
//! pure fold over the records of one employee within one date range.

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{AttendanceAggregate, AttendanceStatus};
use crate::store::{Store, StoreData};

/// Folds the records of `employee_id` within `[start, end]` (inclusive).
///
/// `days_present` counts records with status `Present`; `total_hours` sums
/// the derived worked hours of every matched record regardless of status.
/// Used directly by payslip generation, which already holds a transaction.
pub(crate) fn aggregate_in(
    data: &StoreData,
    employee_id: u64,
    start: NaiveDate,
    end: NaiveDate,
) -> AttendanceAggregate {
    let mut aggregate = AttendanceAggregate::default();
    for record in data
        .attendance_records()
        .filter(|r| r.employee_id == employee_id && r.date >= start && r.date <= end)
    {
        if record.status == AttendanceStatus::Present {
            aggregate.days_present += 1;
        }
        aggregate.total_hours += record.hours_worked;
        aggregate.by_status.record(record.status);
    }
    aggregate
}

/// Computes the attendance aggregate for one employee over a period.
///
/// Fails with [`crate::error::EngineError::NotFound`] when the employee
/// does not exist.
pub fn aggregate_attendance(
    store: &Store,
    employee_id: u64,
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<AttendanceAggregate> {
    store.read(|data| {
        data.employee(employee_id)?;
        Ok(aggregate_in(data, employee_id, start, end))
    })
}
