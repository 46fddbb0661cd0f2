//! Pay cycle model and the period it covers.
//!
//! This module contains the [`PayCycle`] lifecycle entity together with the
//! [`Period`] type, which is parsed from the wire format `YYYY-MM` for
//! calendar-month cycles or `DAILY-YYYY-MM-DD` for synthetic single-day
//! cycles created by the expedited daily payout path.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{EngineError, EngineResult};

/// The period a pay cycle covers.
///
/// A period is either a full calendar month or a synthetic single day.
/// Together with the company it forms the uniqueness key of a cycle.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Period;
/// use chrono::NaiveDate;
///
/// let period = Period::parse("2024-03").unwrap();
/// let (start, end) = period.range();
/// assert_eq!(start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
/// assert_eq!(period.to_string(), "2024-03");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Period {
    /// A calendar month, held as the first day of that month.
    Monthly(NaiveDate),
    /// A synthetic single-day period for ad-hoc daily payouts.
    Daily(NaiveDate),
}

impl Period {
    /// Parses a period string.
    ///
    /// Accepts `YYYY-MM` (calendar month) and `DAILY-YYYY-MM-DD` (single
    /// day). Anything else fails with [`EngineError::InvalidPeriod`].
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Period;
    ///
    /// assert!(Period::parse("2024-03").is_ok());
    /// assert!(Period::parse("DAILY-2024-03-15").is_ok());
    /// assert!(Period::parse("2024-13").is_err());
    /// assert!(Period::parse("March 2024").is_err());
    /// ```
    pub fn parse(input: &str) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidPeriod {
            period: input.to_string(),
        };

        if let Some(rest) = input.strip_prefix("DAILY-") {
            let date = NaiveDate::parse_from_str(rest, "%Y-%m-%d").map_err(|_| invalid())?;
            return Ok(Period::Daily(date));
        }

        // Strict YYYY-MM: four digit year, dash, two digit month.
        let bytes = input.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid());
        }
        let year: i32 = input[..4].parse().map_err(|_| invalid())?;
        let month: u32 = input[5..].parse().map_err(|_| invalid())?;
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        Ok(Period::Monthly(first))
    }

    /// Returns the inclusive date range this period covers.
    ///
    /// A monthly period spans the first through the last day of its
    /// calendar month; a daily period spans its single day.
    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        match self {
            Period::Monthly(date) => {
                let first = date.with_day(1).unwrap_or(*date);
                let last = first + Months::new(1) - Days::new(1);
                (first, last)
            }
            Period::Daily(date) => (*date, *date),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Monthly(date) => write!(f, "{}", date.format("%Y-%m")),
            Period::Daily(date) => write!(f, "DAILY-{}", date.format("%Y-%m-%d")),
        }
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

impl TryFrom<String> for Period {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Period::parse(&value)
    }
}

/// The lifecycle state of a pay cycle.
///
/// Cycles move `Draft -> Approved -> Closed`; there are no back-transitions
/// and a closed cycle is never re-opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    /// Initial state; payslips may be generated, the cycle may be deleted.
    Draft,
    /// Budget has been debited; payments may be recorded.
    Approved,
    /// Terminal state; no further payments.
    Closed,
}

/// How employees on `Fixed` contracts are paid for a given cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedPaymentPolicy {
    /// Pay the full monthly rate regardless of attendance.
    FullPeriod,
    /// Pay per attended day, using the daily rate or a thirtieth of the
    /// monthly rate.
    DaysWorked,
}

/// A company-scoped payroll run for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayCycle {
    /// Unique identifier, allocated by the store.
    pub id: u64,
    /// The company this cycle belongs to.
    pub company_id: u64,
    /// The period the cycle covers; unique per company.
    pub period: Period,
    /// Current lifecycle state.
    pub status: CycleStatus,
    /// How `Fixed` contract employees are paid in this cycle.
    pub policy: FixedPaymentPolicy,
}
