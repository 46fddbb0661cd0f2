//! Property-based tests for the payment ledger and salary math.

use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_engine::calculation::{compute_deductions, compute_gross};
use payroll_engine::cycle::{approve_cycle, create_cycle};
use payroll_engine::models::{
    AttendanceAggregate, ContractType, Employee, FixedPaymentPolicy, NewEmployee, PaymentMethod,
    Period, PayslipStatus, StatusCounts,
};
use payroll_engine::payment::{delete_payment, record_payment};
use payroll_engine::payslip::generate_payslips;
use payroll_engine::roster::{create_company, create_employee};
use payroll_engine::store::Store;

/// One step of a randomized payment ledger run.
#[derive(Debug, Clone)]
enum LedgerOp {
    /// Try to record a payment of this many whole currency units.
    Record(i64),
    /// Try to delete the nth recorded payment, if it exists.
    Delete(usize),
}

fn ledger_op() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        (1i64..600_000).prop_map(LedgerOp::Record),
        (0usize..8).prop_map(LedgerOp::Delete),
    ]
}

/// Builds an approved monthly cycle with a single payslip of net 475000.
fn approved_payslip() -> (Store, u64) {
    let store = Store::new();
    let company = create_company(&store, "A", Decimal::new(1_000_000, 0)).unwrap();
    create_employee(
        &store,
        NewEmployee {
            company_id: company.id,
            name: "Awa Diallo".to_string(),
            contract_type: ContractType::Fixed,
            monthly_rate: Some(Decimal::new(500_000, 0)),
            daily_rate: None,
            hourly_rate: None,
        },
    )
    .unwrap();
    let cycle = create_cycle(
        &store,
        company.id,
        Period::parse("2024-03").unwrap(),
        FixedPaymentPolicy::FullPeriod,
    )
    .unwrap();
    let payslips = generate_payslips(&store, cycle.id).unwrap();
    approve_cycle(&store, cycle.id).unwrap();
    (store, payslips[0].id)
}

proptest! {
    /// Property: no sequence of payment records and deletions can push the
    /// paid total above the payslip net, and the status always matches the
    /// paid total.
    #[test]
    fn prop_paid_total_bounded_by_net(ops in prop::collection::vec(ledger_op(), 1..30)) {
        let (store, payslip_id) = approved_payslip();
        let net = Decimal::new(475_000, 0);
        let mut recorded: Vec<u64> = Vec::new();

        for op in ops {
            match op {
                LedgerOp::Record(amount) => {
                    if let Ok(payment) =
                        record_payment(&store, payslip_id, Decimal::new(amount, 0), PaymentMethod::Cash)
                    {
                        recorded.push(payment.id);
                    }
                }
                LedgerOp::Delete(index) => {
                    if index < recorded.len() {
                        let payment_id = recorded.swap_remove(index);
                        let _ = delete_payment(&store, payment_id);
                    }
                }
            }

            let (paid, status) = store.read(|data| {
                (data.paid_total(payslip_id), data.payslip(payslip_id).unwrap().status)
            });
            prop_assert!(paid >= Decimal::ZERO);
            prop_assert!(paid <= net, "paid {paid} exceeds net {net}");
            prop_assert_eq!(status, PayslipStatus::from_paid(paid, net));
        }
    }

    /// Property: the status derivation partitions the paid range cleanly.
    #[test]
    fn prop_status_derivation_partitions_paid_range(paid in 0i64..1_000_000, net in 1i64..1_000_000) {
        let paid = Decimal::new(paid, 0);
        let net = Decimal::new(net, 0);
        let status = PayslipStatus::from_paid(paid, net);
        if paid == Decimal::ZERO {
            prop_assert_eq!(status, PayslipStatus::Pending);
        } else if paid >= net {
            prop_assert_eq!(status, PayslipStatus::Paid);
        } else {
            prop_assert_eq!(status, PayslipStatus::Partial);
        }
    }

    /// Property: gross is never negative and the flat deduction never
    /// exceeds the gross it was computed from.
    #[test]
    fn prop_deductions_bounded_by_gross(
        rate in 0i64..10_000_000,
        days in 0u32..31,
        hours in 0i64..400,
        contract in prop_oneof![
            Just(ContractType::Fixed),
            Just(ContractType::Daily),
            Just(ContractType::Hourly),
        ],
    ) {
        let employee = Employee {
            id: 1,
            company_id: 1,
            name: "Awa Diallo".to_string(),
            contract_type: contract,
            monthly_rate: Some(Decimal::new(rate, 0)),
            daily_rate: Some(Decimal::new(rate, 0)),
            hourly_rate: Some(Decimal::new(rate, 0)),
            is_active: true,
        };
        let aggregate = AttendanceAggregate {
            days_present: days,
            total_hours: Decimal::new(hours, 0),
            by_status: StatusCounts::default(),
        };

        for policy in [FixedPaymentPolicy::FullPeriod, FixedPaymentPolicy::DaysWorked] {
            let gross = compute_gross(&employee, &aggregate, policy);
            let deductions = compute_deductions(gross);
            prop_assert!(gross >= Decimal::ZERO);
            prop_assert!(deductions >= Decimal::ZERO);
            prop_assert!(deductions <= gross);
            prop_assert!(gross - deductions <= gross);
        }
    }
}
