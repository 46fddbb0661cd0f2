//! Request types for the Payroll Cycle Engine API.
//!
//! Bodies that map one-to-one onto a domain type (new employees, employee
//! updates, attendance updates, attendance query filters) reuse the model
//! types directly; the structs here exist where the wire shape differs from
//! the domain shape, mainly around period strings and entity references.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{FixedPaymentPolicy, PaymentMethod};

/// Body for `POST /companies`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCompanyRequest {
    /// Display name of the company.
    pub name: String,
    /// Initial payroll budget; must not be negative.
    pub budget: Decimal,
}

/// Body for `POST /attendance/check-in` and `POST /attendance/check-out`.
#[derive(Debug, Clone, Deserialize)]
pub struct PunchRequest {
    /// The employee punching in or out.
    pub employee_id: u64,
    /// The punch timestamp; its calendar day keys the attendance record.
    pub at: NaiveDateTime,
}

/// Body for `POST /attendance/manual`.
#[derive(Debug, Clone, Deserialize)]
pub struct ManualEntryRequest {
    /// The hourly employee the entry is for.
    pub employee_id: u64,
    /// The calendar day being recorded.
    pub date: NaiveDate,
    /// Start of the worked span.
    pub check_in: NaiveDateTime,
    /// End of the worked span; must be after `check_in`.
    pub check_out: NaiveDateTime,
    /// Free-form note, e.g. who authorised the entry.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body for `POST /cycles`.
///
/// The period is carried as its wire string (`YYYY-MM` or
/// `DAILY-YYYY-MM-DD`) and parsed in the handler so a malformed value maps
/// to `INVALID_PERIOD` rather than a generic deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCycleRequest {
    /// The company to run payroll for.
    pub company_id: u64,
    /// The period string, e.g. `"2024-03"`.
    pub period: String,
    /// How fixed-contract employees are paid in this cycle.
    pub policy: FixedPaymentPolicy,
}

/// Body for `POST /payouts/daily`.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyPayoutRequest {
    /// The daily-contract employee to pay.
    pub employee_id: u64,
    /// The company footing the payout.
    pub company_id: u64,
    /// The day being paid out; must have a Present attendance record.
    pub date: NaiveDate,
    /// How the money moves.
    pub method: PaymentMethod,
}

/// Body for `POST /payslips/:id/payments`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPaymentRequest {
    /// The amount to pay; positive, at most the payslip's remaining net.
    pub amount: Decimal,
    /// How the money moves.
    pub method: PaymentMethod,
}

/// Query string for `GET /payments/stats`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsQuery {
    /// Restrict the statistics to one company's payslips.
    #[serde(default)]
    pub company_id: Option<u64>,
}

/// Query string for `GET /attendance/aggregate`.
#[derive(Debug, Clone, Deserialize)]
pub struct AggregateQuery {
    /// The employee to aggregate attendance for.
    pub employee_id: u64,
    /// The period string whose date range is aggregated.
    pub period: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_cycle_request_deserialization() {
        let json = r#"{"company_id": 1, "period": "2024-03", "policy": "full_period"}"#;
        let request: CreateCycleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.company_id, 1);
        assert_eq!(request.period, "2024-03");
        assert_eq!(request.policy, FixedPaymentPolicy::FullPeriod);
    }

    #[test]
    fn test_manual_entry_notes_default_to_none() {
        let json = r#"{
            "employee_id": 7,
            "date": "2024-03-04",
            "check_in": "2024-03-04T08:00:00",
            "check_out": "2024-03-04T16:00:00"
        }"#;
        let request: ManualEntryRequest = serde_json::from_str(json).unwrap();
        assert!(request.notes.is_none());
    }

    #[test]
    fn test_record_payment_request_deserialization() {
        let json = r#"{"amount": "475000", "method": "mobile_money_a"}"#;
        let request: RecordPaymentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.amount, Decimal::new(475_000, 0));
        assert_eq!(request.method, PaymentMethod::MobileMoneyA);
    }
}
