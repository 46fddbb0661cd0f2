//! Payment aggregation.

use crate::models::PaymentStats;
use crate::store::Store;

/// Aggregates payment statistics, optionally scoped to one company.
///
/// A pure fold over the payment rows: count, total amount and per-method
/// totals. When `company_id` is set, only payments whose payslip belongs to
/// a cycle of that company are counted.
pub fn payment_stats(store: &Store, company_id: Option<u64>) -> PaymentStats {
    store.read(|data| {
        let mut stats = PaymentStats::default();
        for payment in data.payments() {
            if let Some(company_id) = company_id {
                let owner = data
                    .payslip(payment.payslip_id)
                    .and_then(|payslip| data.cycle(payslip.cycle_id))
                    .map(|cycle| cycle.company_id);
                if !matches!(owner, Ok(id) if id == company_id) {
                    continue;
                }
            }
            stats.count += 1;
            stats.total_amount += payment.amount;
            stats.by_method.record(payment.method, payment.amount);
        }
        stats
    })
}
