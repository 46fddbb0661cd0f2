//! Attendance record model and related types.
//!
//! This module defines the per-employee-per-day attendance record, the
//! per-field update payload, and the aggregate the salary calculator
//! consumes.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The status of an attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// The employee worked on this day.
    Present,
    /// The employee was absent without leave.
    Absent,
    /// The employee was on approved leave.
    Leave,
    /// The employee was on sick leave.
    Sick,
}

/// A single per-employee-per-day attendance record.
///
/// At most one record exists per (employee, calendar day); the day is the
/// check-in timestamp truncated to midnight. `hours_worked` is derived from
/// the two timestamps and recomputed whenever either of them changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier, allocated by the store.
    pub id: u64,
    /// The employee this record belongs to.
    pub employee_id: u64,
    /// The calendar day of the record.
    pub date: NaiveDate,
    /// Check-in timestamp, when recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<NaiveDateTime>,
    /// Check-out timestamp, when recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<NaiveDateTime>,
    /// The attendance status for the day.
    pub status: AttendanceStatus,
    /// Derived worked hours, `max(0, check_out - check_in)`, 0 while either
    /// timestamp is missing.
    pub hours_worked: Decimal,
    /// Free-form notes attached via manual entry or update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AttendanceRecord {
    /// Recomputes `hours_worked` from the current timestamps.
    ///
    /// Negative spans clamp to zero; a missing timestamp yields zero. The
    /// result is rounded to two decimal places.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{AttendanceRecord, AttendanceStatus};
    /// use chrono::{NaiveDate, NaiveDateTime};
    /// use rust_decimal::Decimal;
    ///
    /// let mut record = AttendanceRecord {
    ///     id: 1,
    ///     employee_id: 1,
    ///     date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
    ///     check_in: NaiveDateTime::parse_from_str("2024-03-04 08:00:00", "%Y-%m-%d %H:%M:%S").ok(),
    ///     check_out: NaiveDateTime::parse_from_str("2024-03-04 16:30:00", "%Y-%m-%d %H:%M:%S").ok(),
    ///     status: AttendanceStatus::Present,
    ///     hours_worked: Decimal::ZERO,
    ///     notes: None,
    /// };
    /// record.recompute_hours();
    /// assert_eq!(record.hours_worked, Decimal::new(85, 1)); // 8.5 hours
    /// ```
    pub fn recompute_hours(&mut self) {
        self.hours_worked = match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => {
                let minutes = (check_out - check_in).num_minutes().max(0);
                (Decimal::new(minutes, 0) / Decimal::new(60, 0)).round_dp(2)
            }
            _ => Decimal::ZERO,
        };
    }
}

/// Per-field update payload for an attendance record.
///
/// Every field is optional; `None` leaves the stored value untouched.
/// Updating either timestamp triggers a recomputation of `hours_worked`;
/// a notes-only or status-only update does not.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceUpdate {
    /// New check-in timestamp.
    #[serde(default)]
    pub check_in: Option<NaiveDateTime>,
    /// New check-out timestamp.
    #[serde(default)]
    pub check_out: Option<NaiveDateTime>,
    /// New attendance status.
    #[serde(default)]
    pub status: Option<AttendanceStatus>,
    /// New notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Count of attendance records per status over a period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Number of `Present` records.
    pub present: u32,
    /// Number of `Absent` records.
    pub absent: u32,
    /// Number of `Leave` records.
    pub leave: u32,
    /// Number of `Sick` records.
    pub sick: u32,
}

impl StatusCounts {
    /// Increments the counter matching the given status.
    pub fn record(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Leave => self.leave += 1,
            AttendanceStatus::Sick => self.sick += 1,
        }
    }
}

/// The attendance aggregate for one employee over one period.
///
/// This is the sole attendance input to the salary calculator: a pure fold
/// over the matched records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceAggregate {
    /// Number of days with status `Present`.
    pub days_present: u32,
    /// Sum of `hours_worked` over all matched records.
    pub total_hours: Decimal,
    /// Record counts broken down by status.
    pub by_status: StatusCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn make_record() -> AttendanceRecord {
        AttendanceRecord {
            id: 1,
            employee_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            check_in: None,
            check_out: None,
            status: AttendanceStatus::Present,
            hours_worked: Decimal::ZERO,
            notes: None,
        }
    }

    #[test]
    fn test_recompute_hours_full_day() {
        let mut record = make_record();
        record.check_in = Some(make_datetime("2024-03-04 08:00:00"));
        record.check_out = Some(make_datetime("2024-03-04 17:00:00"));
        record.recompute_hours();
        assert_eq!(record.hours_worked, Decimal::new(9, 0));
    }

    #[test]
    fn test_recompute_hours_partial_hour_rounds_to_two_places() {
        let mut record = make_record();
        record.check_in = Some(make_datetime("2024-03-04 08:00:00"));
        record.check_out = Some(make_datetime("2024-03-04 08:20:00"));
        record.recompute_hours();
        assert_eq!(record.hours_worked, Decimal::new(33, 2)); // 20/60 ~ 0.33
    }

    #[test]
    fn test_recompute_hours_negative_span_clamps_to_zero() {
        let mut record = make_record();
        record.check_in = Some(make_datetime("2024-03-04 17:00:00"));
        record.check_out = Some(make_datetime("2024-03-04 08:00:00"));
        record.recompute_hours();
        assert_eq!(record.hours_worked, Decimal::ZERO);
    }

    #[test]
    fn test_recompute_hours_missing_checkout_is_zero() {
        let mut record = make_record();
        record.check_in = Some(make_datetime("2024-03-04 08:00:00"));
        record.recompute_hours();
        assert_eq!(record.hours_worked, Decimal::ZERO);
    }

    #[test]
    fn test_status_counts_record_each_variant() {
        let mut counts = StatusCounts::default();
        counts.record(AttendanceStatus::Present);
        counts.record(AttendanceStatus::Present);
        counts.record(AttendanceStatus::Absent);
        counts.record(AttendanceStatus::Leave);
        counts.record(AttendanceStatus::Sick);
        assert_eq!(counts.present, 2);
        assert_eq!(counts.absent, 1);
        assert_eq!(counts.leave, 1);
        assert_eq!(counts.sick, 1);
    }

    #[test]
    fn test_attendance_status_serialization() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Present).unwrap(),
            "\"present\""
        );
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Sick).unwrap(),
            "\"sick\""
        );
    }
}
