//! Expedited same-day payout for daily contracts.
//!
//! `pay_daily_now` compresses the whole cycle lifecycle into one
//! transaction: a synthetic single-day cycle is created, one payslip is
//! generated from today's attendance, the budget is checked and debited, a
//! full-amount payment is recorded and the cycle lands directly in
//! `Closed`.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::attendance::aggregate_in;
use crate::calculation::{compute_deductions, compute_gross};
use crate::cycle::lifecycle::create_in;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceStatus, ContractType, CycleStatus, FixedPaymentPolicy, PayCycle, Payment,
    PaymentMethod, Payslip, PayslipStatus, Period,
};
use crate::store::Store;

/// Everything created by one expedited daily payout.
#[derive(Debug, Clone, Serialize)]
pub struct DailyPayout {
    /// The synthetic single-day cycle, already closed.
    pub cycle: PayCycle,
    /// The single payslip, fully paid.
    pub payslip: Payslip,
    /// The full-amount payment.
    pub payment: Payment,
}

/// Pays a daily-contract employee for today, in one shot.
///
/// Requirements, all checked inside the transaction:
///
/// - the employee exists, belongs to `company_id` and has a `Daily`
///   contract ([`EngineError::InvalidContractType`] otherwise);
/// - today's attendance record exists, has a check-out and status
///   `Present` ([`EngineError::InvalidState`] otherwise);
/// - no cycle exists yet for the synthetic `DAILY-<today>` period
///   ([`EngineError::Conflict`] — the employee was already paid today);
/// - the computed net is positive and within the company budget
///   ([`EngineError::InsufficientBudget`]).
///
/// `today` is the caller's normalized current date; the engine does not
/// consult a clock for it.
pub fn pay_daily_now(
    store: &Store,
    employee_id: u64,
    company_id: u64,
    today: NaiveDate,
    method: PaymentMethod,
) -> EngineResult<DailyPayout> {
    store.transaction(|data| {
        data.company(company_id)?;
        let employee = data.employee(employee_id)?.clone();
        if employee.company_id != company_id {
            return Err(EngineError::NotFound {
                entity: "employee",
                id: format!("{employee_id} in company {company_id}"),
            });
        }
        if employee.contract_type != ContractType::Daily {
            return Err(EngineError::InvalidContractType {
                operation: "daily payout",
                required: ContractType::Daily,
                actual: employee.contract_type,
            });
        }

        let Some(record) = data.attendance_by_day(employee_id, today) else {
            return Err(EngineError::InvalidState {
                message: format!("no attendance record for employee {employee_id} on {today}"),
            });
        };
        if record.check_out.is_none() {
            return Err(EngineError::InvalidState {
                message: format!("employee {employee_id} has not checked out on {today}"),
            });
        }
        if record.status != AttendanceStatus::Present {
            return Err(EngineError::InvalidState {
                message: format!(
                    "attendance for employee {employee_id} on {today} is {:?}, not present",
                    record.status
                ),
            });
        }

        let cycle = create_in(
            data,
            company_id,
            Period::Daily(today),
            FixedPaymentPolicy::FullPeriod,
        )?;

        let aggregate = aggregate_in(data, employee_id, today, today);
        let gross = compute_gross(&employee, &aggregate, cycle.policy);
        let deductions = compute_deductions(gross);
        let net = gross - deductions;
        if net <= Decimal::ZERO {
            return Err(EngineError::InvalidState {
                message: format!("computed net for employee {employee_id} is {net}, nothing to pay"),
            });
        }

        let available = data.company(company_id)?.budget;
        if net > available {
            return Err(EngineError::InsufficientBudget {
                requested: net,
                available,
            });
        }
        data.company_mut(company_id)?.budget -= net;

        let payslip = data.insert_payslip(Payslip {
            id: 0,
            cycle_id: cycle.id,
            employee_id,
            gross,
            deductions,
            net,
            status: PayslipStatus::Paid,
        });
        let payment = data.insert_payment(Payment {
            id: 0,
            payslip_id: payslip.id,
            amount: net,
            method,
            paid_at: Utc::now().naive_utc(),
        });

        let cycle = data.cycle_mut(cycle.id)?;
        cycle.status = CycleStatus::Closed;
        Ok(DailyPayout {
            cycle: cycle.clone(),
            payslip,
            payment,
        })
    })
}
