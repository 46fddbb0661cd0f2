//! The engine's persistence handle.
//!
//! All entities live in a single [`Store`], an in-process relational-style
//! store guarded by one `RwLock`. Engine components never touch shared
//! state directly; every mutation goes through [`Store::transaction`], which
//! applies the closure to a copy of the state and only publishes the copy
//! when the closure succeeds. A failing closure therefore rolls back
//! completely, and because the write lock is held for the whole closure,
//! multi-step sequences (budget debits, attendance upserts, generation
//! guards, payment-versus-close checks) are serialized and never observable
//! half-applied.

use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Company, Employee, PayCycle, Payment, Payslip};

/// The full entity state held by a [`Store`].
///
/// Maps are keyed by id; `BTreeMap` keeps iteration in id order, which is
/// creation order, giving the stable orderings the engine relies on (for
/// example payslips generated in employee creation order).
#[derive(Debug, Clone, Default)]
pub struct StoreData {
    next_id: u64,
    companies: BTreeMap<u64, Company>,
    employees: BTreeMap<u64, Employee>,
    attendance: BTreeMap<u64, AttendanceRecord>,
    cycles: BTreeMap<u64, PayCycle>,
    payslips: BTreeMap<u64, Payslip>,
    payments: BTreeMap<u64, Payment>,
}

impl StoreData {
    /// Allocates the next identifier. Ids are unique across entity kinds.
    pub fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Looks up a company by id.
    pub fn company(&self, id: u64) -> EngineResult<&Company> {
        self.companies.get(&id).ok_or_else(|| EngineError::NotFound {
            entity: "company",
            id: id.to_string(),
        })
    }

    /// Looks up a company by id for mutation.
    pub fn company_mut(&mut self, id: u64) -> EngineResult<&mut Company> {
        self.companies.get_mut(&id).ok_or_else(|| EngineError::NotFound {
            entity: "company",
            id: id.to_string(),
        })
    }

    /// Inserts a company, allocating its id.
    pub fn insert_company(&mut self, name: String, budget: Decimal) -> Company {
        let company = Company {
            id: self.next_id(),
            name,
            budget,
        };
        self.companies.insert(company.id, company.clone());
        company
    }

    /// Looks up an employee by id.
    pub fn employee(&self, id: u64) -> EngineResult<&Employee> {
        self.employees.get(&id).ok_or_else(|| EngineError::NotFound {
            entity: "employee",
            id: id.to_string(),
        })
    }

    /// Looks up an employee by id for mutation.
    pub fn employee_mut(&mut self, id: u64) -> EngineResult<&mut Employee> {
        self.employees.get_mut(&id).ok_or_else(|| EngineError::NotFound {
            entity: "employee",
            id: id.to_string(),
        })
    }

    /// Inserts a fully-built employee record under a freshly allocated id.
    pub fn insert_employee(&mut self, mut employee: Employee) -> Employee {
        employee.id = self.next_id();
        self.employees.insert(employee.id, employee.clone());
        employee
    }

    /// Iterates all employees in creation order.
    pub fn employees(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    /// Looks up an attendance record by id.
    pub fn attendance_record(&self, id: u64) -> EngineResult<&AttendanceRecord> {
        self.attendance.get(&id).ok_or_else(|| EngineError::NotFound {
            entity: "attendance record",
            id: id.to_string(),
        })
    }

    /// Looks up an attendance record by id for mutation.
    pub fn attendance_record_mut(&mut self, id: u64) -> EngineResult<&mut AttendanceRecord> {
        self.attendance.get_mut(&id).ok_or_else(|| EngineError::NotFound {
            entity: "attendance record",
            id: id.to_string(),
        })
    }

    /// Finds the unique record for an (employee, calendar day) pair.
    pub fn attendance_by_day(&self, employee_id: u64, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.attendance
            .values()
            .find(|r| r.employee_id == employee_id && r.date == date)
    }

    /// Finds the unique record for an (employee, calendar day) pair for
    /// mutation.
    pub fn attendance_by_day_mut(
        &mut self,
        employee_id: u64,
        date: NaiveDate,
    ) -> Option<&mut AttendanceRecord> {
        self.attendance
            .values_mut()
            .find(|r| r.employee_id == employee_id && r.date == date)
    }

    /// Inserts a fully-built attendance record under a freshly allocated id.
    pub fn insert_attendance(&mut self, mut record: AttendanceRecord) -> AttendanceRecord {
        record.id = self.next_id();
        self.attendance.insert(record.id, record.clone());
        record
    }

    /// Iterates all attendance records in creation order.
    pub fn attendance_records(&self) -> impl Iterator<Item = &AttendanceRecord> {
        self.attendance.values()
    }

    /// Looks up a pay cycle by id.
    pub fn cycle(&self, id: u64) -> EngineResult<&PayCycle> {
        self.cycles.get(&id).ok_or_else(|| EngineError::NotFound {
            entity: "pay cycle",
            id: id.to_string(),
        })
    }

    /// Looks up a pay cycle by id for mutation.
    pub fn cycle_mut(&mut self, id: u64) -> EngineResult<&mut PayCycle> {
        self.cycles.get_mut(&id).ok_or_else(|| EngineError::NotFound {
            entity: "pay cycle",
            id: id.to_string(),
        })
    }

    /// Inserts a fully-built cycle under a freshly allocated id.
    pub fn insert_cycle(&mut self, mut cycle: PayCycle) -> PayCycle {
        cycle.id = self.next_id();
        self.cycles.insert(cycle.id, cycle.clone());
        cycle
    }

    /// Removes a cycle row. The caller is responsible for cascading.
    pub fn remove_cycle(&mut self, id: u64) {
        self.cycles.remove(&id);
    }

    /// Iterates all cycles in creation order.
    pub fn cycles(&self) -> impl Iterator<Item = &PayCycle> {
        self.cycles.values()
    }

    /// Looks up a payslip by id.
    pub fn payslip(&self, id: u64) -> EngineResult<&Payslip> {
        self.payslips.get(&id).ok_or_else(|| EngineError::NotFound {
            entity: "payslip",
            id: id.to_string(),
        })
    }

    /// Looks up a payslip by id for mutation.
    pub fn payslip_mut(&mut self, id: u64) -> EngineResult<&mut Payslip> {
        self.payslips.get_mut(&id).ok_or_else(|| EngineError::NotFound {
            entity: "payslip",
            id: id.to_string(),
        })
    }

    /// Inserts a fully-built payslip under a freshly allocated id.
    pub fn insert_payslip(&mut self, mut payslip: Payslip) -> Payslip {
        payslip.id = self.next_id();
        self.payslips.insert(payslip.id, payslip.clone());
        payslip
    }

    /// Removes a payslip row. The caller is responsible for cascading.
    pub fn remove_payslip(&mut self, id: u64) {
        self.payslips.remove(&id);
    }

    /// Iterates the payslips of one cycle in creation order.
    pub fn payslips_of_cycle(&self, cycle_id: u64) -> impl Iterator<Item = &Payslip> {
        self.payslips.values().filter(move |p| p.cycle_id == cycle_id)
    }

    /// Iterates the payslips of one employee in creation order.
    pub fn payslips_of_employee(&self, employee_id: u64) -> impl Iterator<Item = &Payslip> {
        self.payslips
            .values()
            .filter(move |p| p.employee_id == employee_id)
    }

    /// Looks up a payment by id.
    pub fn payment(&self, id: u64) -> EngineResult<&Payment> {
        self.payments.get(&id).ok_or_else(|| EngineError::NotFound {
            entity: "payment",
            id: id.to_string(),
        })
    }

    /// Inserts a fully-built payment under a freshly allocated id.
    pub fn insert_payment(&mut self, mut payment: Payment) -> Payment {
        payment.id = self.next_id();
        self.payments.insert(payment.id, payment.clone());
        payment
    }

    /// Removes a payment row.
    pub fn remove_payment(&mut self, id: u64) {
        self.payments.remove(&id);
    }

    /// Iterates the payments of one payslip in creation order.
    pub fn payments_of_payslip(&self, payslip_id: u64) -> impl Iterator<Item = &Payment> {
        self.payments
            .values()
            .filter(move |p| p.payslip_id == payslip_id)
    }

    /// Iterates all payments in creation order.
    pub fn payments(&self) -> impl Iterator<Item = &Payment> {
        self.payments.values()
    }

    /// Sums the amounts already paid against a payslip.
    pub fn paid_total(&self, payslip_id: u64) -> Decimal {
        self.payments_of_payslip(payslip_id)
            .map(|p| p.amount)
            .sum()
    }
}

/// The shared transactional store handle.
///
/// Cheap to share behind an `Arc`; every engine operation takes `&Store`
/// rather than reaching for process-global state.
#[derive(Debug, Default)]
pub struct Store {
    inner: RwLock<StoreData>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a read-only closure against the current state.
    pub fn read<R>(&self, f: impl FnOnce(&StoreData) -> R) -> R {
        let guard = self.inner.read().expect("store lock poisoned");
        f(&guard)
    }

    /// Runs a closure as one atomic transaction.
    ///
    /// The closure receives a private copy of the state. On `Ok` the copy
    /// replaces the shared state in one step; on `Err` the copy is dropped
    /// and the shared state is untouched. The write lock is held across the
    /// whole closure, so transactions are fully serialized.
    pub fn transaction<R>(
        &self,
        f: impl FnOnce(&mut StoreData) -> EngineResult<R>,
    ) -> EngineResult<R> {
        let mut guard = self.inner.write().expect("store lock poisoned");
        let mut working = guard.clone();
        let result = f(&mut working)?;
        *guard = working;
        Ok(result)
    }
}
