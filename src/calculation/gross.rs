//! Gross salary computation.
//!
//! This module provides the pure function mapping contract terms and an
//! attendance aggregate to a gross amount. It has no side effects and is
//! deterministic given identical inputs.

use rust_decimal::Decimal;

use crate::models::{AttendanceAggregate, ContractType, Employee, FixedPaymentPolicy};

/// Days assumed per month when a fixed-contract employee is paid per day
/// worked but has no explicit daily rate.
pub const FIXED_FALLBACK_MONTH_DAYS: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Computes the gross salary for one employee over one period.
///
/// The contract type is matched exhaustively:
///
/// - `Fixed` under [`FixedPaymentPolicy::FullPeriod`]: the monthly rate,
///   attendance irrelevant.
/// - `Fixed` under [`FixedPaymentPolicy::DaysWorked`]: days present times
///   the daily rate, falling back to a thirtieth of the monthly rate.
/// - `Daily`: days present times the daily rate; the policy is irrelevant.
/// - `Hourly`: total worked hours times the hourly rate; the policy is
///   irrelevant.
///
/// A missing rate contributes zero rather than failing; rate validation
/// happens at employee creation. The result is rounded to two decimal
/// places.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_gross;
/// use payroll_engine::models::{
///     AttendanceAggregate, ContractType, Employee, FixedPaymentPolicy,
/// };
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: 1,
///     company_id: 1,
///     name: "Awa Diallo".to_string(),
///     contract_type: ContractType::Daily,
///     monthly_rate: None,
///     daily_rate: Some(Decimal::new(20_000, 0)),
///     hourly_rate: None,
///     is_active: true,
/// };
/// let aggregate = AttendanceAggregate {
///     days_present: 20,
///     ..Default::default()
/// };
///
/// let gross = compute_gross(&employee, &aggregate, FixedPaymentPolicy::FullPeriod);
/// assert_eq!(gross, Decimal::new(400_000, 0));
/// ```
pub fn compute_gross(
    employee: &Employee,
    aggregate: &AttendanceAggregate,
    policy: FixedPaymentPolicy,
) -> Decimal {
    let days_present = Decimal::from(aggregate.days_present);
    let gross = match employee.contract_type {
        ContractType::Fixed => match policy {
            FixedPaymentPolicy::FullPeriod => employee.monthly_rate.unwrap_or(Decimal::ZERO),
            FixedPaymentPolicy::DaysWorked => {
                let per_day = employee.daily_rate.or_else(|| {
                    employee
                        .monthly_rate
                        .map(|monthly| monthly / FIXED_FALLBACK_MONTH_DAYS)
                });
                days_present * per_day.unwrap_or(Decimal::ZERO)
            }
        },
        ContractType::Daily => days_present * employee.daily_rate.unwrap_or(Decimal::ZERO),
        ContractType::Hourly => {
            aggregate.total_hours * employee.hourly_rate.unwrap_or(Decimal::ZERO)
        }
    };
    gross.round_dp(2)
}
