//! Aggregate statistics printed on the report's statistics page.

use std::collections::HashMap;

use crate::error_handling::ExportError;
use crate::export::money::Money;
use crate::export::projector::{department_label, require_salary};
use crate::storage::EmployeeRecord;

/// Salary totals for one department.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepartmentAggregate {
    /// Department name (`N/A` for employees without one)
    pub department_name: String,
    /// Employees seen in this department
    pub employee_count: usize,
    /// Sum of their salaries
    pub total_salary: Money,
}

impl DepartmentAggregate {
    /// Mean salary, rounded half away from zero.
    pub fn average_salary(&self) -> Money {
        self.total_salary.divide(self.employee_count)
    }
}

/// Department aggregates kept in the order departments were first seen.
#[derive(Debug, Default)]
struct DepartmentFold {
    aggregates: Vec<DepartmentAggregate>,
    index: HashMap<String, usize>,
}

impl DepartmentFold {
    fn add(&mut self, department: &str, salary: Money) -> Option<()> {
        let slot = match self.index.get(department) {
            Some(&slot) => slot,
            None => {
                self.aggregates.push(DepartmentAggregate {
                    department_name: department.to_string(),
                    employee_count: 0,
                    total_salary: Money::ZERO,
                });
                self.index
                    .insert(department.to_string(), self.aggregates.len() - 1);
                self.aggregates.len() - 1
            }
        };
        let aggregate = &mut self.aggregates[slot];
        aggregate.total_salary = aggregate.total_salary.checked_add(salary)?;
        aggregate.employee_count += 1;
        Some(())
    }
}

/// Figures for the statistics page. Every amount is zero for an empty export.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportStatistics {
    /// Number of exported employees
    pub total_employees: usize,
    /// Sum of all salaries
    pub total_salary: Money,
    /// Mean salary
    pub average_salary: Money,
    /// Lowest salary
    pub min_salary: Money,
    /// Highest salary
    pub max_salary: Money,
    /// Per-department breakdown in first-seen order
    pub departments: Vec<DepartmentAggregate>,
}

impl ReportStatistics {
    /// Folds `records` in order.
    ///
    /// # Errors
    ///
    /// - `ExportError::DataIntegrity` for the first record without a salary.
    /// - `ExportError::SalaryOverflow` if a total no longer fits in cents.
    pub fn from_records(records: &[EmployeeRecord]) -> Result<Self, ExportError> {
        let mut fold = DepartmentFold::default();
        let mut total = Money::ZERO;
        let mut range: Option<(Money, Money)> = None;

        for (index, record) in records.iter().enumerate() {
            let salary = require_salary(index, record)?;
            let overflow = || ExportError::SalaryOverflow { index };
            total = total.checked_add(salary).ok_or_else(overflow)?;
            range = Some(match range {
                Some((min, max)) => (min.min(salary), max.max(salary)),
                None => (salary, salary),
            });
            fold.add(department_label(record), salary)
                .ok_or_else(overflow)?;
        }

        let (min_salary, max_salary) = range.unwrap_or((Money::ZERO, Money::ZERO));
        Ok(Self {
            total_employees: records.len(),
            total_salary: total,
            average_salary: total.divide(records.len()),
            min_salary,
            max_salary,
            departments: fold.aggregates,
        })
    }
}
