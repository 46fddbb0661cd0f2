//! Attendance record keeping.
//!
//! Check-in and check-out upsert against the unique (employee, calendar day)
//! key inside one store transaction, so concurrent punches for the same day
//! serialize instead of racing a read-then-write. Manual entry is reserved
//! for hourly contracts; everything recomputes the derived worked hours
//! whenever a timestamp moves.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceStatus, AttendanceUpdate, ContractType};
use crate::store::{Store, StoreData};

/// Records a check-in for the calendar day of `at`.
///
/// If a record already exists for that day its check-in is replaced and the
/// status forced to `Present`; otherwise a new record is created. Returns
/// the resulting record.
pub fn record_check_in(
    store: &Store,
    employee_id: u64,
    at: NaiveDateTime,
) -> EngineResult<AttendanceRecord> {
    store.transaction(|data| {
        data.employee(employee_id)?;
        let date = at.date();
        if let Some(record) = data.attendance_by_day_mut(employee_id, date) {
            record.check_in = Some(at);
            record.status = AttendanceStatus::Present;
            record.recompute_hours();
            return Ok(record.clone());
        }
        let mut record = AttendanceRecord {
            id: 0,
            employee_id,
            date,
            check_in: Some(at),
            check_out: None,
            status: AttendanceStatus::Present,
            hours_worked: Decimal::ZERO,
            notes: None,
        };
        record.recompute_hours();
        Ok(data.insert_attendance(record))
    })
}

/// Records a check-out for the calendar day of `at`.
///
/// Requires an existing record for that day ([`EngineError::NotFound`]
/// otherwise) with a check-in already set ([`EngineError::InvalidState`]
/// otherwise). Recomputes the worked hours.
pub fn record_check_out(
    store: &Store,
    employee_id: u64,
    at: NaiveDateTime,
) -> EngineResult<AttendanceRecord> {
    store.transaction(|data| {
        data.employee(employee_id)?;
        let date = at.date();
        let Some(record) = data.attendance_by_day_mut(employee_id, date) else {
            return Err(EngineError::NotFound {
                entity: "attendance record",
                id: format!("employee {employee_id} on {date}"),
            });
        };
        if record.check_in.is_none() {
            return Err(EngineError::InvalidState {
                message: format!(
                    "check-out for employee {employee_id} on {date} requires a prior check-in"
                ),
            });
        }
        record.check_out = Some(at);
        record.recompute_hours();
        Ok(record.clone())
    })
}

/// Upserts a complete attendance record for one day of an hourly employee.
///
/// Restricted to `Hourly` contracts ([`EngineError::InvalidContractType`]);
/// the pair of timestamps must form a positive span
/// ([`EngineError::InvalidRange`]). The record ends up with status
/// `Present` and recomputed hours.
pub fn record_manual_entry(
    store: &Store,
    employee_id: u64,
    date: NaiveDate,
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
    notes: Option<String>,
) -> EngineResult<AttendanceRecord> {
    store.transaction(|data| {
        let employee = data.employee(employee_id)?;
        if employee.contract_type != ContractType::Hourly {
            return Err(EngineError::InvalidContractType {
                operation: "manual attendance entry",
                required: ContractType::Hourly,
                actual: employee.contract_type,
            });
        }
        if check_out <= check_in {
            return Err(EngineError::InvalidRange {
                message: format!("check-out {check_out} must be after check-in {check_in}"),
            });
        }

        if let Some(record) = data.attendance_by_day_mut(employee_id, date) {
            record.check_in = Some(check_in);
            record.check_out = Some(check_out);
            record.status = AttendanceStatus::Present;
            record.notes = notes;
            record.recompute_hours();
            return Ok(record.clone());
        }
        let mut record = AttendanceRecord {
            id: 0,
            employee_id,
            date,
            check_in: Some(check_in),
            check_out: Some(check_out),
            status: AttendanceStatus::Present,
            hours_worked: Decimal::ZERO,
            notes,
        };
        record.recompute_hours();
        Ok(data.insert_attendance(record))
    })
}

/// Applies a per-field update to an attendance record.
///
/// The worked hours are recomputed only when a timestamp field is part of
/// the update; status-only or notes-only updates leave them untouched.
pub fn update_attendance(
    store: &Store,
    record_id: u64,
    update: AttendanceUpdate,
) -> EngineResult<AttendanceRecord> {
    store.transaction(|data| {
        let record = data.attendance_record_mut(record_id)?;
        let timestamps_changed = update.check_in.is_some() || update.check_out.is_some();
        if let Some(check_in) = update.check_in {
            record.check_in = Some(check_in);
        }
        if let Some(check_out) = update.check_out {
            record.check_out = Some(check_out);
        }
        if let Some(status) = update.status {
            record.status = status;
        }
        if let Some(notes) = update.notes {
            record.notes = Some(notes);
        }
        if timestamps_changed {
            record.recompute_hours();
        }
        Ok(record.clone())
    })
}

/// Filters for [`query_attendance`]. Every field is optional; unset fields
/// match everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceQuery {
    /// Match records of this employee only.
    #[serde(default)]
    pub employee_id: Option<u64>,
    /// Match records of employees of this company only.
    #[serde(default)]
    pub company_id: Option<u64>,
    /// Match records on or after this date.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Match records on or before this date.
    #[serde(default)]
    pub to: Option<NaiveDate>,
    /// Match records with this status only.
    #[serde(default)]
    pub status: Option<AttendanceStatus>,
}

/// Queries attendance records, newest day first.
pub fn query_attendance(store: &Store, query: &AttendanceQuery) -> Vec<AttendanceRecord> {
    store.read(|data| {
        let mut records: Vec<AttendanceRecord> = data
            .attendance_records()
            .filter(|r| matches_query(data, r, query))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        records
    })
}

fn matches_query(data: &StoreData, record: &AttendanceRecord, query: &AttendanceQuery) -> bool {
    if let Some(employee_id) = query.employee_id {
        if record.employee_id != employee_id {
            return false;
        }
    }
    if let Some(company_id) = query.company_id {
        match data.employee(record.employee_id) {
            Ok(employee) if employee.company_id == company_id => {}
            _ => return false,
        }
    }
    if let Some(from) = query.from {
        if record.date < from {
            return false;
        }
    }
    if let Some(to) = query.to {
        if record.date > to {
            return false;
        }
    }
    if let Some(status) = query.status {
        if record.status != status {
            return false;
        }
    }
    true
}
