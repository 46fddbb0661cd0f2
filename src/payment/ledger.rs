//! Payment recording and reversal.
//!
//! Payments are bounded by the payslip's outstanding balance and re-derive
//! the payslip status after every mutation. The cycle-is-not-closed check
//! runs inside the same transaction as the insert, so a payment can never
//! land after closure.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{CycleStatus, Payment, PaymentMethod, Payslip, PayslipStatus};
use crate::store::Store;

/// Records a partial or full payment against a payslip.
///
/// Fails with [`EngineError::NotFound`] when the payslip is missing,
/// [`EngineError::InvalidState`] when the parent cycle is already closed,
/// [`EngineError::InvalidRange`] for a non-positive amount and
/// [`EngineError::AmountExceedsRemaining`] when the amount overshoots the
/// outstanding balance. On success the payslip status becomes `Paid` or
/// `Partial` depending on the new paid total.
///
/// Recording a payment never touches the company budget: the budget was
/// already debited in full when the cycle was approved.
pub fn record_payment(
    store: &Store,
    payslip_id: u64,
    amount: Decimal,
    method: PaymentMethod,
) -> EngineResult<Payment> {
    store.transaction(|data| {
        let payslip = data.payslip(payslip_id)?.clone();
        let cycle = data.cycle(payslip.cycle_id)?;
        if cycle.status == CycleStatus::Closed {
            return Err(EngineError::InvalidState {
                message: format!(
                    "cycle {} is closed, no further payments on payslip {payslip_id}",
                    cycle.id
                ),
            });
        }
        if amount <= Decimal::ZERO {
            return Err(EngineError::InvalidRange {
                message: format!("payment amount must be positive, got {amount}"),
            });
        }

        let already_paid = data.paid_total(payslip_id);
        let remaining = payslip.net - already_paid;
        if amount > remaining {
            return Err(EngineError::AmountExceedsRemaining { amount, remaining });
        }

        let payment = data.insert_payment(Payment {
            id: 0,
            payslip_id,
            amount,
            method,
            paid_at: Utc::now().naive_utc(),
        });
        data.payslip_mut(payslip_id)?.status =
            PayslipStatus::from_paid(already_paid + amount, payslip.net);
        Ok(payment)
    })
}

/// Deletes a payment and re-derives the payslip status.
///
/// Fails with [`EngineError::InvalidState`] when the parent cycle is
/// closed. The payslip falls back to `Pending`, `Partial` or stays `Paid`
/// according to the payments that remain. The company budget is not
/// credited: only whole-cycle deletion reverses the approval debit.
pub fn delete_payment(store: &Store, payment_id: u64) -> EngineResult<Payslip> {
    store.transaction(|data| {
        let payment = data.payment(payment_id)?.clone();
        let payslip = data.payslip(payment.payslip_id)?.clone();
        let cycle = data.cycle(payslip.cycle_id)?;
        if cycle.status == CycleStatus::Closed {
            return Err(EngineError::InvalidState {
                message: format!(
                    "cycle {} is closed, payment {payment_id} can no longer be deleted",
                    cycle.id
                ),
            });
        }

        data.remove_payment(payment_id);
        let paid = data.paid_total(payslip.id);
        let payslip = data.payslip_mut(payslip.id)?;
        payslip.status = PayslipStatus::from_paid(paid, payslip.net);
        Ok(payslip.clone())
    })
}
