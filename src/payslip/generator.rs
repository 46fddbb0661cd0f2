//! Payslip generation.
//!
//! Materializes one salary line per active employee of a cycle's company.
//! The existing-payslips guard and the bulk insert run inside the same
//! transaction, so two concurrent generation requests cannot both pass the
//! guard and double-generate.

use crate::attendance::aggregate_in;
use crate::calculation::{compute_deductions, compute_gross};
use crate::error::{EngineError, EngineResult};
use crate::models::{CycleStatus, Payslip, PayslipStatus};
use crate::store::{Store, StoreData};

/// Generates the payslips of a cycle inside an existing transaction.
pub(crate) fn generate_in(data: &mut StoreData, cycle_id: u64) -> EngineResult<Vec<Payslip>> {
    let cycle = data.cycle(cycle_id)?.clone();
    if cycle.status != CycleStatus::Draft {
        return Err(EngineError::InvalidState {
            message: format!(
                "payslips can only be generated for a draft cycle, cycle {cycle_id} is {:?}",
                cycle.status
            ),
        });
    }
    if data.payslips_of_cycle(cycle_id).next().is_some() {
        return Err(EngineError::Conflict {
            message: format!("payslips already generated for cycle {cycle_id}"),
        });
    }

    let (start, end) = cycle.period.range();
    let employees: Vec<_> = data
        .employees()
        .filter(|e| e.company_id == cycle.company_id && e.is_active)
        .cloned()
        .collect();

    let mut payslips = Vec::with_capacity(employees.len());
    for employee in employees {
        let aggregate = aggregate_in(data, employee.id, start, end);
        let gross = compute_gross(&employee, &aggregate, cycle.policy);
        let deductions = compute_deductions(gross);
        let payslip = data.insert_payslip(Payslip {
            id: 0,
            cycle_id,
            employee_id: employee.id,
            gross,
            deductions,
            net: gross - deductions,
            status: PayslipStatus::Pending,
        });
        payslips.push(payslip);
    }
    Ok(payslips)
}

/// Generates one pending payslip per active employee of the cycle's company.
///
/// The cycle must be in `Draft` ([`EngineError::InvalidState`]) and must not
/// have payslips yet ([`EngineError::Conflict`]; regeneration is not
/// supported). Employees are processed in creation order, which fixes the
/// order of the returned payslips. The company budget is not touched;
/// money only moves at approval.
pub fn generate_payslips(store: &Store, cycle_id: u64) -> EngineResult<Vec<Payslip>> {
    store.transaction(|data| generate_in(data, cycle_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::{record_check_in, record_check_out};
    use crate::cycle::create_cycle;
    use crate::models::{ContractType, FixedPaymentPolicy, NewEmployee, Period};
    use crate::roster::{create_company, create_employee, deactivate_employee};
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;

    fn datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn new_employee(company_id: u64, name: &str, contract_type: ContractType) -> NewEmployee {
        NewEmployee {
            company_id,
            name: name.to_string(),
            contract_type,
            monthly_rate: Some(Decimal::new(500_000, 0)),
            daily_rate: Some(Decimal::new(20_000, 0)),
            hourly_rate: Some(Decimal::new(2_500, 0)),
        }
    }

    #[test]
    fn test_generate_fixed_full_period_payslip() {
        let store = Store::new();
        let company = create_company(&store, "A", Decimal::new(1_000_000, 0)).unwrap();
        create_employee(&store, new_employee(company.id, "Awa", ContractType::Fixed)).unwrap();
        let cycle = create_cycle(
            &store,
            company.id,
            Period::parse("2024-03").unwrap(),
            FixedPaymentPolicy::FullPeriod,
        )
        .unwrap();

        let payslips = generate_payslips(&store, cycle.id).unwrap();
        assert_eq!(payslips.len(), 1);
        let slip = &payslips[0];
        assert_eq!(slip.gross, Decimal::new(500_000, 0));
        assert_eq!(slip.deductions, Decimal::new(25_000, 0));
        assert_eq!(slip.net, Decimal::new(475_000, 0));
        assert_eq!(slip.status, PayslipStatus::Pending);
    }

    #[test]
    fn test_generate_uses_attendance_within_cycle_period() {
        let store = Store::new();
        let company = create_company(&store, "A", Decimal::new(1_000_000, 0)).unwrap();
        let employee =
            create_employee(&store, new_employee(company.id, "Moussa", ContractType::Daily))
                .unwrap();
        // Two present days in March, one outside the period.
        for day in ["2024-03-04", "2024-03-05", "2024-04-01"] {
            record_check_in(&store, employee.id, datetime(&format!("{day} 08:00:00"))).unwrap();
            record_check_out(&store, employee.id, datetime(&format!("{day} 16:00:00"))).unwrap();
        }
        let cycle = create_cycle(
            &store,
            company.id,
            Period::parse("2024-03").unwrap(),
            FixedPaymentPolicy::FullPeriod,
        )
        .unwrap();

        let payslips = generate_payslips(&store, cycle.id).unwrap();
        assert_eq!(payslips[0].gross, Decimal::new(40_000, 0));
    }

    #[test]
    fn test_generate_skips_inactive_employees() {
        let store = Store::new();
        let company = create_company(&store, "A", Decimal::new(1_000_000, 0)).unwrap();
        create_employee(&store, new_employee(company.id, "Awa", ContractType::Fixed)).unwrap();
        let gone =
            create_employee(&store, new_employee(company.id, "Sekou", ContractType::Fixed))
                .unwrap();
        deactivate_employee(&store, gone.id).unwrap();
        let cycle = create_cycle(
            &store,
            company.id,
            Period::parse("2024-03").unwrap(),
            FixedPaymentPolicy::FullPeriod,
        )
        .unwrap();

        let payslips = generate_payslips(&store, cycle.id).unwrap();
        assert_eq!(payslips.len(), 1);
    }

    #[test]
    fn test_generate_orders_payslips_by_employee_creation() {
        let store = Store::new();
        let company = create_company(&store, "A", Decimal::new(1_000_000, 0)).unwrap();
        let first =
            create_employee(&store, new_employee(company.id, "Awa", ContractType::Fixed)).unwrap();
        let second =
            create_employee(&store, new_employee(company.id, "Sekou", ContractType::Fixed))
                .unwrap();
        let cycle = create_cycle(
            &store,
            company.id,
            Period::parse("2024-03").unwrap(),
            FixedPaymentPolicy::FullPeriod,
        )
        .unwrap();

        let payslips = generate_payslips(&store, cycle.id).unwrap();
        let order: Vec<u64> = payslips.iter().map(|p| p.employee_id).collect();
        assert_eq!(order, vec![first.id, second.id]);
    }

    #[test]
    fn test_second_generate_is_conflict_and_keeps_single_set() {
        let store = Store::new();
        let company = create_company(&store, "A", Decimal::new(1_000_000, 0)).unwrap();
        create_employee(&store, new_employee(company.id, "Awa", ContractType::Fixed)).unwrap();
        let cycle = create_cycle(
            &store,
            company.id,
            Period::parse("2024-03").unwrap(),
            FixedPaymentPolicy::FullPeriod,
        )
        .unwrap();

        generate_payslips(&store, cycle.id).unwrap();
        let err = generate_payslips(&store, cycle.id).unwrap_err();
        assert!(matches!(err, EngineError::Conflict { .. }));

        let count = store.read(|data| data.payslips_of_cycle(cycle.id).count());
        assert_eq!(count, 1);
    }

    #[test]
    fn test_generate_unknown_cycle_is_not_found() {
        let store = Store::new();
        let err = generate_payslips(&store, 42).unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }
}
