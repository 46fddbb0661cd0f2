//! Company and employee registration.
//!
//! Employees are created active and only ever soft-deleted; deactivation is
//! refused while any of their payslips is still owed money.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{Company, ContractType, Employee, EmployeeUpdate, NewEmployee, PayslipStatus};
use crate::store::Store;

/// Creates a company with an initial budget.
///
/// Fails with [`EngineError::InvalidRange`] when the budget is negative.
pub fn create_company(store: &Store, name: &str, budget: Decimal) -> EngineResult<Company> {
    if budget < Decimal::ZERO {
        return Err(EngineError::InvalidRange {
            message: format!("company budget must not be negative, got {budget}"),
        });
    }
    store.transaction(|data| Ok(data.insert_company(name.to_string(), budget)))
}

/// Returns a company by id.
pub fn get_company(store: &Store, company_id: u64) -> EngineResult<Company> {
    store.read(|data| data.company(company_id).cloned())
}

/// Creates an employee, validating the rate matching its contract type.
///
/// The employee starts active. Fails with [`EngineError::NotFound`] when the
/// company does not exist and [`EngineError::InvalidRange`] when the rate
/// required by the contract type is missing or any provided rate is
/// negative.
pub fn create_employee(store: &Store, new: NewEmployee) -> EngineResult<Employee> {
    store.transaction(|data| {
        data.company(new.company_id)?;
        let employee = Employee {
            id: 0,
            company_id: new.company_id,
            name: new.name,
            contract_type: new.contract_type,
            monthly_rate: new.monthly_rate,
            daily_rate: new.daily_rate,
            hourly_rate: new.hourly_rate,
            is_active: true,
        };
        validate_rates(&employee)?;
        Ok(data.insert_employee(employee))
    })
}

/// Applies a per-field update to an employee.
///
/// `None` fields are left untouched; the contract type is immutable. The
/// updated record is re-validated before it reaches the store.
pub fn update_employee(store: &Store, id: u64, update: EmployeeUpdate) -> EngineResult<Employee> {
    store.transaction(|data| {
        let mut updated = data.employee(id)?.clone();
        if let Some(name) = update.name {
            updated.name = name;
        }
        if let Some(rate) = update.monthly_rate {
            updated.monthly_rate = Some(rate);
        }
        if let Some(rate) = update.daily_rate {
            updated.daily_rate = Some(rate);
        }
        if let Some(rate) = update.hourly_rate {
            updated.hourly_rate = Some(rate);
        }
        validate_rates(&updated)?;
        *data.employee_mut(id)? = updated.clone();
        Ok(updated)
    })
}

/// Soft-deletes an employee.
///
/// Fails with [`EngineError::InvalidState`] while the employee still has a
/// payslip that is not fully paid; otherwise flips `is_active` off. The row
/// is never removed.
pub fn deactivate_employee(store: &Store, id: u64) -> EngineResult<Employee> {
    store.transaction(|data| {
        let unpaid = data
            .payslips_of_employee(id)
            .filter(|p| p.status != PayslipStatus::Paid)
            .count();
        if unpaid > 0 {
            return Err(EngineError::InvalidState {
                message: format!("employee {id} has {unpaid} unpaid payslip(s)"),
            });
        }
        let employee = data.employee_mut(id)?;
        employee.is_active = false;
        Ok(employee.clone())
    })
}

/// Lists the employees of a company in creation order.
pub fn list_employees(store: &Store, company_id: u64) -> EngineResult<Vec<Employee>> {
    store.read(|data| {
        data.company(company_id)?;
        Ok(data
            .employees()
            .filter(|e| e.company_id == company_id)
            .cloned()
            .collect())
    })
}

fn validate_rates(employee: &Employee) -> EngineResult<()> {
    let required = match employee.contract_type {
        ContractType::Fixed => ("monthly_rate", employee.monthly_rate),
        ContractType::Daily => ("daily_rate", employee.daily_rate),
        ContractType::Hourly => ("hourly_rate", employee.hourly_rate),
    };
    if let (field, None) = required {
        return Err(EngineError::InvalidRange {
            message: format!(
                "{field} is required for a {} contract",
                employee.contract_type
            ),
        });
    }

    for (field, rate) in [
        ("monthly_rate", employee.monthly_rate),
        ("daily_rate", employee.daily_rate),
        ("hourly_rate", employee.hourly_rate),
    ] {
        if let Some(rate) = rate {
            if rate < Decimal::ZERO {
                return Err(EngineError::InvalidRange {
                    message: format!("{field} must not be negative, got {rate}"),
                });
            }
        }
    }
    Ok(())
}
