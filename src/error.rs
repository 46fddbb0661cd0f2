//! Error types for the Payroll Cycle Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure modes of the engine. Every failure is deterministic given
//! the same input and store state; nothing here is retried.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::ContractType;

/// The main error type for the Payroll Cycle Engine.
///
/// All engine operations return this error type. Each variant carries the
/// context a caller needs to act on the failure without re-querying the
/// store.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::NotFound {
///     entity: "pay cycle",
///     id: "42".to_string(),
/// };
/// assert_eq!(error.to_string(), "pay cycle not found: 42");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A referenced entity does not exist in the store.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity that was looked up.
        entity: &'static str,
        /// The key that was not found; usually a numeric id, a
        /// (employee, date) pair for attendance lookups.
        id: String,
    },

    /// A uniqueness constraint would be violated.
    #[error("Conflict: {message}")]
    Conflict {
        /// A description of the conflicting state.
        message: String,
    },

    /// The operation was attempted outside its required lifecycle state.
    #[error("Invalid state: {message}")]
    InvalidState {
        /// A description of the state requirement that was violated.
        message: String,
    },

    /// An operation restricted to one contract type was invoked on another.
    #[error("Operation '{operation}' requires a {required} contract, employee has {actual}")]
    InvalidContractType {
        /// The operation that was attempted.
        operation: &'static str,
        /// The contract type the operation requires.
        required: ContractType,
        /// The contract type the employee actually has.
        actual: ContractType,
    },

    /// A time range or amount failed validation.
    #[error("Invalid range: {message}")]
    InvalidRange {
        /// A description of the malformed range or value.
        message: String,
    },

    /// A period string could not be parsed.
    #[error("Invalid period '{period}': expected YYYY-MM or DAILY-YYYY-MM-DD")]
    InvalidPeriod {
        /// The period string that failed to parse.
        period: String,
    },

    /// Approving the cycle would overdraw the company budget.
    #[error("Insufficient budget: requested {requested}, available {available}")]
    InsufficientBudget {
        /// The total net amount the approval would debit.
        requested: Decimal,
        /// The company budget available at the time of the check.
        available: Decimal,
    },

    /// A payment was larger than the payslip's outstanding balance.
    #[error("Payment of {amount} exceeds remaining balance of {remaining}")]
    AmountExceedsRemaining {
        /// The payment amount that was attempted.
        amount: Decimal,
        /// The outstanding balance on the payslip.
        remaining: Decimal,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_displays_entity_and_id() {
        let error = EngineError::NotFound {
            entity: "payslip",
            id: "7".to_string(),
        };
        assert_eq!(error.to_string(), "payslip not found: 7");
    }

    #[test]
    fn test_conflict_displays_message() {
        let error = EngineError::Conflict {
            message: "cycle already exists for period 2024-03".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Conflict: cycle already exists for period 2024-03"
        );
    }

    #[test]
    fn test_invalid_contract_type_displays_both_types() {
        let error = EngineError::InvalidContractType {
            operation: "manual attendance entry",
            required: ContractType::Hourly,
            actual: ContractType::Fixed,
        };
        assert_eq!(
            error.to_string(),
            "Operation 'manual attendance entry' requires a hourly contract, employee has fixed"
        );
    }

    #[test]
    fn test_invalid_period_displays_period() {
        let error = EngineError::InvalidPeriod {
            period: "2024/03".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid period '2024/03': expected YYYY-MM or DAILY-YYYY-MM-DD"
        );
    }

    #[test]
    fn test_insufficient_budget_displays_amounts() {
        let error = EngineError::InsufficientBudget {
            requested: Decimal::new(475_000, 0),
            available: Decimal::new(10_000, 0),
        };
        assert_eq!(
            error.to_string(),
            "Insufficient budget: requested 475000, available 10000"
        );
    }

    #[test]
    fn test_amount_exceeds_remaining_displays_amounts() {
        let error = EngineError::AmountExceedsRemaining {
            amount: Decimal::new(600, 0),
            remaining: Decimal::new(500, 0),
        };
        assert_eq!(
            error.to_string(),
            "Payment of 600 exceeds remaining balance of 500"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_state() -> EngineResult<()> {
            Err(EngineError::InvalidState {
                message: "cycle is closed".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_state()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
