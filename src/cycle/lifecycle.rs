//! Pay cycle lifecycle transitions.
//!
//! Cycles move `Draft -> Approved -> Closed` with no way back. Approval is
//! the only point where money leaves the company budget: the solvency check
//! and the debit happen inside one transaction, so two approvals racing on
//! the same company cannot both pass against a stale balance.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{CycleStatus, FixedPaymentPolicy, PayCycle, PayslipStatus, Period};
use crate::store::{Store, StoreData};

/// Creates a cycle in `Draft` inside an existing transaction.
pub(crate) fn create_in(
    data: &mut StoreData,
    company_id: u64,
    period: Period,
    policy: FixedPaymentPolicy,
) -> EngineResult<PayCycle> {
    data.company(company_id)?;
    if data
        .cycles()
        .any(|c| c.company_id == company_id && c.period == period)
    {
        return Err(EngineError::Conflict {
            message: format!("cycle already exists for company {company_id}, period {period}"),
        });
    }
    Ok(data.insert_cycle(PayCycle {
        id: 0,
        company_id,
        period,
        status: CycleStatus::Draft,
        policy,
    }))
}

/// Creates a draft pay cycle for a company and period.
///
/// Fails with [`EngineError::Conflict`] when a cycle for that
/// (company, period) pair already exists, in any state.
pub fn create_cycle(
    store: &Store,
    company_id: u64,
    period: Period,
    policy: FixedPaymentPolicy,
) -> EngineResult<PayCycle> {
    store.transaction(|data| create_in(data, company_id, period, policy))
}

/// Approves a draft cycle, debiting the company budget by its total net.
///
/// Requires `Draft` with at least one generated payslip
/// ([`EngineError::InvalidState`] otherwise). Fails with
/// [`EngineError::InsufficientBudget`] when the total net exceeds the
/// budget, leaving cycle and budget untouched. The debit and the state
/// transition commit together; no caller ever observes one without the
/// other.
pub fn approve_cycle(store: &Store, cycle_id: u64) -> EngineResult<PayCycle> {
    store.transaction(|data| {
        let cycle = data.cycle(cycle_id)?.clone();
        if cycle.status != CycleStatus::Draft {
            return Err(EngineError::InvalidState {
                message: format!(
                    "only a draft cycle can be approved, cycle {cycle_id} is {:?}",
                    cycle.status
                ),
            });
        }
        let total: Decimal = data.payslips_of_cycle(cycle_id).map(|p| p.net).sum();
        if data.payslips_of_cycle(cycle_id).next().is_none() {
            return Err(EngineError::InvalidState {
                message: format!("cycle {cycle_id} has no payslips, nothing generated"),
            });
        }
        let available = data.company(cycle.company_id)?.budget;
        if total > available {
            return Err(EngineError::InsufficientBudget {
                requested: total,
                available,
            });
        }
        data.company_mut(cycle.company_id)?.budget -= total;
        let cycle = data.cycle_mut(cycle_id)?;
        cycle.status = CycleStatus::Approved;
        Ok(cycle.clone())
    })
}

/// Closes an approved cycle.
///
/// Fails with [`EngineError::InvalidState`] unless the cycle is `Approved`,
/// or when any payslip is still `Pending`. Partially paid payslips do not
/// block closing; the money still owed on them can only be recovered by
/// deleting the cycle.
pub fn close_cycle(store: &Store, cycle_id: u64) -> EngineResult<PayCycle> {
    store.transaction(|data| {
        let cycle = data.cycle(cycle_id)?.clone();
        if cycle.status != CycleStatus::Approved {
            return Err(EngineError::InvalidState {
                message: format!(
                    "only an approved cycle can be closed, cycle {cycle_id} is {:?}",
                    cycle.status
                ),
            });
        }
        let pending = data
            .payslips_of_cycle(cycle_id)
            .filter(|p| p.status == PayslipStatus::Pending)
            .count();
        if pending > 0 {
            return Err(EngineError::InvalidState {
                message: format!("cycle {cycle_id} still has {pending} pending payslip(s)"),
            });
        }
        let cycle = data.cycle_mut(cycle_id)?;
        cycle.status = CycleStatus::Closed;
        Ok(cycle.clone())
    })
}

/// Deletes a cycle in any state, cascading payments and payslips.
///
/// If the cycle already moved money (it is `Approved` or `Closed`), the
/// budget is first credited back by the sum of the nets of its `Paid` and
/// `Partial` payslips, conservatively reversing the approval debit. The
/// refund, the payment rows, the payslips and the cycle row all go in one
/// transaction.
pub fn delete_cycle(store: &Store, cycle_id: u64) -> EngineResult<()> {
    store.transaction(|data| {
        let cycle = data.cycle(cycle_id)?.clone();

        if cycle.status != CycleStatus::Draft {
            let refund: Decimal = data
                .payslips_of_cycle(cycle_id)
                .filter(|p| matches!(p.status, PayslipStatus::Paid | PayslipStatus::Partial))
                .map(|p| p.net)
                .sum();
            data.company_mut(cycle.company_id)?.budget += refund;
        }

        let payslip_ids: Vec<u64> = data.payslips_of_cycle(cycle_id).map(|p| p.id).collect();
        for payslip_id in payslip_ids {
            let payment_ids: Vec<u64> =
                data.payments_of_payslip(payslip_id).map(|p| p.id).collect();
            for payment_id in payment_ids {
                data.remove_payment(payment_id);
            }
            data.remove_payslip(payslip_id);
        }
        data.remove_cycle(cycle_id);
        Ok(())
    })
}
