//! HTTP API module for the Payroll Cycle Engine.
//!
//! This module provides the REST endpoints for the roster, the attendance
//! ledger, cycle lifecycle management and the payment ledger.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AggregateQuery, CreateCompanyRequest, CreateCycleRequest, DailyPayoutRequest,
    ManualEntryRequest, PunchRequest, RecordPaymentRequest, StatsQuery,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
