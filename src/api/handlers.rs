//! HTTP request handlers for the Payroll Cycle Engine API.
//!
//! This module contains the handler functions for all API endpoints and the
//! router wiring them together. Handlers translate wire types into domain
//! calls and rely on the [`ApiErrorResponse`] conversion for failures; the
//! money-moving endpoints log with a per-request correlation id.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::attendance::{
    AttendanceQuery, aggregate_attendance, query_attendance, record_check_in, record_check_out,
    record_manual_entry, update_attendance,
};
use crate::cycle::{approve_cycle, close_cycle, create_cycle, delete_cycle, pay_daily_now};
use crate::models::{AttendanceUpdate, EmployeeUpdate, NewEmployee, Period};
use crate::payment::{delete_payment, payment_stats, record_payment};
use crate::payslip::generate_payslips;
use crate::roster::{
    create_company, create_employee, deactivate_employee, get_company, list_employees,
    update_employee,
};

use super::request::{
    AggregateQuery, CreateCompanyRequest, CreateCycleRequest, DailyPayoutRequest,
    ManualEntryRequest, PunchRequest, RecordPaymentRequest, StatsQuery,
};
use super::response::ApiErrorResponse;
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/companies", post(create_company_handler))
        .route("/companies/:id", get(get_company_handler))
        .route("/companies/:id/employees", get(list_employees_handler))
        .route("/employees", post(create_employee_handler))
        .route("/employees/:id", patch(update_employee_handler))
        .route("/employees/:id", delete(deactivate_employee_handler))
        .route("/attendance/check-in", post(check_in_handler))
        .route("/attendance/check-out", post(check_out_handler))
        .route("/attendance/manual", post(manual_entry_handler))
        .route("/attendance/:id", patch(update_attendance_handler))
        .route("/attendance", get(query_attendance_handler))
        .route("/attendance/aggregate", get(aggregate_handler))
        .route("/cycles", post(create_cycle_handler))
        .route("/cycles/:id/payslips", post(generate_payslips_handler))
        .route("/cycles/:id/approve", post(approve_cycle_handler))
        .route("/cycles/:id/close", post(close_cycle_handler))
        .route("/cycles/:id", delete(delete_cycle_handler))
        .route("/payouts/daily", post(daily_payout_handler))
        .route("/payslips/:id/payments", post(record_payment_handler))
        .route("/payments/:id", delete(delete_payment_handler))
        .route("/payments/stats", get(payment_stats_handler))
        .with_state(state)
}

async fn create_company_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateCompanyRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let company = create_company(state.store(), &request.name, request.budget)?;
    Ok((StatusCode::CREATED, Json(company)))
}

async fn get_company_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    Ok(Json(get_company(state.store(), id)?))
}

async fn list_employees_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    Ok(Json(list_employees(state.store(), id)?))
}

async fn create_employee_handler(
    State(state): State<AppState>,
    Json(request): Json<NewEmployee>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let employee = create_employee(state.store(), request)?;
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn update_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<EmployeeUpdate>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    Ok(Json(update_employee(state.store(), id, request)?))
}

async fn deactivate_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    Ok(Json(deactivate_employee(state.store(), id)?))
}

async fn check_in_handler(
    State(state): State<AppState>,
    Json(request): Json<PunchRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let record = record_check_in(state.store(), request.employee_id, request.at)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn check_out_handler(
    State(state): State<AppState>,
    Json(request): Json<PunchRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    Ok(Json(record_check_out(
        state.store(),
        request.employee_id,
        request.at,
    )?))
}

async fn manual_entry_handler(
    State(state): State<AppState>,
    Json(request): Json<ManualEntryRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let record = record_manual_entry(
        state.store(),
        request.employee_id,
        request.date,
        request.check_in,
        request.check_out,
        request.notes,
    )?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_attendance_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<AttendanceUpdate>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    Ok(Json(update_attendance(state.store(), id, request)?))
}

async fn query_attendance_handler(
    State(state): State<AppState>,
    Query(query): Query<AttendanceQuery>,
) -> impl IntoResponse {
    Json(query_attendance(state.store(), &query))
}

async fn aggregate_handler(
    State(state): State<AppState>,
    Query(query): Query<AggregateQuery>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let period = Period::parse(&query.period)?;
    let (start, end) = period.range();
    let aggregate = aggregate_attendance(state.store(), query.employee_id, start, end)?;
    Ok(Json(aggregate))
}

async fn create_cycle_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateCycleRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let period = Period::parse(&request.period)?;
    let cycle = create_cycle(state.store(), request.company_id, period, request.policy)?;
    Ok((StatusCode::CREATED, Json(cycle)))
}

async fn generate_payslips_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, cycle_id = id, "Generating payslips");

    let payslips = generate_payslips(state.store(), id).inspect_err(|err| {
        warn!(correlation_id = %correlation_id, cycle_id = id, error = %err, "Payslip generation failed");
    })?;

    info!(
        correlation_id = %correlation_id,
        cycle_id = id,
        payslip_count = payslips.len(),
        "Payslips generated"
    );
    Ok((StatusCode::CREATED, Json(payslips)))
}

async fn approve_cycle_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, cycle_id = id, "Approving cycle");

    let cycle = approve_cycle(state.store(), id).inspect_err(|err| {
        warn!(correlation_id = %correlation_id, cycle_id = id, error = %err, "Cycle approval failed");
    })?;

    info!(correlation_id = %correlation_id, cycle_id = id, "Cycle approved, budget debited");
    Ok(Json(cycle))
}

async fn close_cycle_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    Ok(Json(close_cycle(state.store(), id)?))
}

async fn delete_cycle_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, cycle_id = id, "Deleting cycle");

    delete_cycle(state.store(), id).inspect_err(|err| {
        warn!(correlation_id = %correlation_id, cycle_id = id, error = %err, "Cycle deletion failed");
    })?;

    info!(correlation_id = %correlation_id, cycle_id = id, "Cycle deleted, paid amounts refunded");
    Ok(StatusCode::NO_CONTENT)
}

async fn daily_payout_handler(
    State(state): State<AppState>,
    Json(request): Json<DailyPayoutRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee_id,
        date = %request.date,
        "Processing daily payout"
    );

    let payout = pay_daily_now(
        state.store(),
        request.employee_id,
        request.company_id,
        request.date,
        request.method,
    )
    .inspect_err(|err| {
        warn!(
            correlation_id = %correlation_id,
            employee_id = request.employee_id,
            error = %err,
            "Daily payout failed"
        );
    })?;

    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee_id,
        amount = %payout.payment.amount,
        "Daily payout completed"
    );
    Ok((StatusCode::CREATED, Json(payout)))
}

async fn record_payment_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        payslip_id = id,
        amount = %request.amount,
        "Recording payment"
    );

    let payment =
        record_payment(state.store(), id, request.amount, request.method).inspect_err(|err| {
            warn!(correlation_id = %correlation_id, payslip_id = id, error = %err, "Payment failed");
        })?;

    info!(correlation_id = %correlation_id, payment_id = payment.id, "Payment recorded");
    Ok((StatusCode::CREATED, Json(payment)))
}

async fn delete_payment_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, payment_id = id, "Deleting payment");
    let payslip = delete_payment(state.store(), id)?;
    Ok(Json(payslip))
}

async fn payment_stats_handler(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> impl IntoResponse {
    Json(payment_stats(state.store(), query.company_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::response::ApiError;
    use crate::models::{Company, ContractType, Employee, PayCycle};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use tower::ServiceExt;

    async fn send(
        router: Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = router.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_create_company_returns_201() {
        let router = create_router(AppState::new());
        let (status, body) = send(
            router,
            "POST",
            "/companies",
            Some(json!({"name": "Sahel Logistics", "budget": "1000000"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let company: Company = serde_json::from_slice(&body).unwrap();
        assert_eq!(company.name, "Sahel Logistics");
    }

    #[tokio::test]
    async fn test_get_missing_company_returns_404() {
        let router = create_router(AppState::new());
        let (status, body) = send(router, "GET", "/companies/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_create_employee_and_list() {
        let state = AppState::new();
        let router = create_router(state);

        let (_, body) = send(
            router.clone(),
            "POST",
            "/companies",
            Some(json!({"name": "A", "budget": "0"})),
        )
        .await;
        let company: Company = serde_json::from_slice(&body).unwrap();

        let (status, body) = send(
            router.clone(),
            "POST",
            "/employees",
            Some(json!({
                "company_id": company.id,
                "name": "Moussa Traor\u{00e9}",
                "contract_type": "fixed",
                "monthly_rate": "500000"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let employee: Employee = serde_json::from_slice(&body).unwrap();
        assert_eq!(employee.contract_type, ContractType::Fixed);

        let uri = format!("/companies/{}/employees", company.id);
        let (status, body) = send(router, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let employees: Vec<Employee> = serde_json::from_slice(&body).unwrap();
        assert_eq!(employees.len(), 1);
    }

    #[tokio::test]
    async fn test_create_cycle_with_malformed_period_returns_invalid_period() {
        let router = create_router(AppState::new());
        let (_, body) = send(
            router.clone(),
            "POST",
            "/companies",
            Some(json!({"name": "A", "budget": "0"})),
        )
        .await;
        let company: Company = serde_json::from_slice(&body).unwrap();

        let (status, body) = send(
            router,
            "POST",
            "/cycles",
            Some(json!({
                "company_id": company.id,
                "period": "March 2024",
                "policy": "full_period"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_PERIOD");
    }

    #[tokio::test]
    async fn test_duplicate_cycle_returns_409() {
        let router = create_router(AppState::new());
        let (_, body) = send(
            router.clone(),
            "POST",
            "/companies",
            Some(json!({"name": "A", "budget": "0"})),
        )
        .await;
        let company: Company = serde_json::from_slice(&body).unwrap();

        let cycle_body = json!({
            "company_id": company.id,
            "period": "2024-03",
            "policy": "full_period"
        });
        let (status, body) = send(router.clone(), "POST", "/cycles", Some(cycle_body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let cycle: PayCycle = serde_json::from_slice(&body).unwrap();
        assert_eq!(cycle.period.to_string(), "2024-03");

        let (status, body) = send(router, "POST", "/cycles", Some(cycle_body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "CONFLICT");
    }

    #[tokio::test]
    async fn test_approve_missing_cycle_returns_404() {
        let router = create_router(AppState::new());
        let (status, _) = send(router, "POST", "/cycles/42/approve", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
