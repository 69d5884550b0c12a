//! Record projection.
//!
//! Maps an `EmployeeRecord` onto the flat, display-ready field set shared by
//! every export format. The column set is chosen once per export and every
//! row carries the same columns in the same order.

use chrono::SecondsFormat;

use crate::config::MISSING_DEPARTMENT;
use crate::error_handling::ExportError;
use crate::storage::EmployeeRecord;

use super::money::Money;

/// An exported column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    /// Employee id
    Id,
    /// Employee name
    Name,
    /// Employee email
    Email,
    /// Department name (or `N/A`)
    Department,
    /// Salary with two decimals
    Salary,
    /// Creation time (ISO 8601)
    CreatedAt,
    /// Last update time (ISO 8601)
    UpdatedAt,
}

const BASE_COLUMNS: &[Column] = &[
    Column::Id,
    Column::Name,
    Column::Email,
    Column::Department,
    Column::Salary,
];

const TIMESTAMP_COLUMNS: &[Column] = &[
    Column::Id,
    Column::Name,
    Column::Email,
    Column::Department,
    Column::Salary,
    Column::CreatedAt,
    Column::UpdatedAt,
];

impl Column {
    /// Active column set for an export.
    pub fn set(include_timestamps: bool) -> &'static [Column] {
        if include_timestamps {
            TIMESTAMP_COLUMNS
        } else {
            BASE_COLUMNS
        }
    }

    /// Human-readable header title.
    pub fn title(self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::Name => "Name",
            Column::Email => "Email",
            Column::Department => "Department",
            Column::Salary => "Salary",
            Column::CreatedAt => "Created At",
            Column::UpdatedAt => "Updated At",
        }
    }
}

/// One employee flattened into display strings, in column order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectedRow {
    cells: Vec<(Column, String)>,
}

impl ProjectedRow {
    /// Value of `column`, if it is part of this row.
    pub fn get(&self, column: Column) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Values in column order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(_, v)| v.as_str())
    }
}

/// Salary of the record at `index`, or a data-integrity error naming it.
pub(crate) fn require_salary(index: usize, record: &EmployeeRecord) -> Result<Money, ExportError> {
    record.salary.ok_or(ExportError::DataIntegrity {
        index,
        field: "salary",
    })
}

/// Department name of a record, `N/A` when unresolved.
pub(crate) fn department_label(record: &EmployeeRecord) -> &str {
    record
        .department_name
        .as_deref()
        .unwrap_or(MISSING_DEPARTMENT)
}

/// Projects `record` (at position `index` in the result set) onto `columns`.
///
/// # Errors
///
/// Returns `ExportError::DataIntegrity` when the record has no salary.
pub fn project(
    index: usize,
    record: &EmployeeRecord,
    columns: &[Column],
) -> Result<ProjectedRow, ExportError> {
    let salary = require_salary(index, record)?;
    let cells = columns
        .iter()
        .map(|&column| {
            let value = match column {
                Column::Id => record.id.to_string(),
                Column::Name => record.name.clone(),
                Column::Email => record.email.clone(),
                Column::Department => department_label(record).to_string(),
                Column::Salary => salary.to_string(),
                Column::CreatedAt => record
                    .created_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
                Column::UpdatedAt => record
                    .updated_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            };
            (column, value)
        })
        .collect();
    Ok(ProjectedRow { cells })
}
