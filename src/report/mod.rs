//! Result envelope assembly.
//!
//! Every import operation returns a [`ParseResult`] regardless of outcome:
//! a structural failure produces `success = false` with `data = None` and a
//! single diagnostic error; recoverable failures accumulate as ordered
//! [`ParseError`] values next to whatever data was still extracted.
use serde::Serialize;

use crate::config::SuccessPolicy;
use crate::error::Error;
use crate::model::MatrixData;

/// A recoverable, row/cell-scoped problem in the source file.
///
/// Row and column indices are 0-based grid coordinates, matching the
/// addressing of [`Grid`](crate::grid::Grid).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    pub row: Option<usize>,
    pub column: Option<usize>,
    /// Logical field the error is scoped to, e.g. a skill name.
    pub field: Option<String>,
    pub message: String,
    /// The offending raw cell value, when there is one.
    pub value: Option<String>,
}

impl ParseError {
    /// Wrap a structural error as the single entry of a failed envelope.
    pub fn structural(err: &Error) -> Self {
        Self {
            row: None,
            column: None,
            field: None,
            message: err.to_string(),
            value: None,
        }
    }

    /// A field-level error scoped to a row and, optionally, a column.
    pub fn field(
        row: usize,
        column: Option<usize>,
        field: impl Into<String>,
        message: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        Self {
            row: Some(row),
            column,
            field: Some(field.into()),
            message: message.into(),
            value,
        }
    }
}

/// A non-fatal notice; never affects `success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    pub row: Option<usize>,
    pub column: Option<usize>,
    pub message: String,
}

impl ParseWarning {
    pub fn new(row: Option<usize>, column: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            row,
            column,
            message: message.into(),
        }
    }
}

/// Distinct entity counts computed from the final entity sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub departments: usize,
    pub employees: usize,
    pub skills: usize,
    pub assessments: usize,
    pub tasks: usize,
}

/// The envelope returned by every import operation.
#[derive(Debug, Clone, Serialize)]
pub struct ParseResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub errors: Vec<ParseError>,
    pub warnings: Vec<ParseWarning>,
    pub summary: Summary,
}

impl<T> ParseResult<T> {
    /// Envelope for a structural failure: no data, one diagnostic error.
    pub fn structural_failure(err: Error) -> Self {
        Self {
            success: false,
            data: None,
            errors: vec![ParseError::structural(&err)],
            warnings: Vec::new(),
            summary: Summary::default(),
        }
    }

    /// Assemble an envelope from extracted data and its diagnostics.
    ///
    /// `success` is true exactly when no errors accumulated. Whether partial
    /// data survives a failed parse depends on the import kind's
    /// [`SuccessPolicy`]; the two behaviors observed in production are kept
    /// apart deliberately instead of being unified.
    pub fn assemble(
        policy: SuccessPolicy,
        data: T,
        mut errors: Vec<ParseError>,
        mut warnings: Vec<ParseWarning>,
        summary: Summary,
    ) -> Self {
        sort_diagnostics(&mut errors, &mut warnings);
        let success = errors.is_empty();
        let data = match policy {
            SuccessPolicy::Strict if !success => None,
            _ => Some(data),
        };
        Self {
            success,
            data,
            errors,
            warnings,
            summary,
        }
    }
}

/// Order diagnostics by row, then column; entries without a row sort first.
pub fn sort_diagnostics(errors: &mut [ParseError], warnings: &mut [ParseWarning]) {
    errors.sort_by_key(|e| (e.row.unwrap_or(0), e.column.unwrap_or(0)));
    warnings.sort_by_key(|w| (w.row.unwrap_or(0), w.column.unwrap_or(0)));
}

/// Flat insert payloads for the downstream persistence store.
///
/// The ingestion core never talks to the store; callers serialize this batch
/// and hand it over themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersistenceBatch {
    pub departments: Vec<DepartmentInsert>,
    pub employees: Vec<EmployeeInsert>,
    pub assessments: Vec<AssessmentInsert>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentInsert {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeInsert {
    pub id: String,
    pub name: String,
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentInsert {
    pub employee_id: String,
    pub skill_name: String,
    pub current: u8,
    pub target: u8,
}

/// Map extracted matrix data to persistence-store insert payloads.
pub fn to_persistence_batches(data: &MatrixData) -> PersistenceBatch {
    PersistenceBatch {
        departments: data
            .departments
            .iter()
            .map(|d| DepartmentInsert {
                name: d.name.clone(),
            })
            .collect(),
        employees: data
            .employees
            .iter()
            .map(|e| EmployeeInsert {
                id: e.id.clone(),
                name: e.name.clone(),
                department: e.department.clone(),
            })
            .collect(),
        assessments: data
            .assessments
            .iter()
            .map(|a| AssessmentInsert {
                employee_id: a.employee_id.clone(),
                skill_name: a.skill_name.clone(),
                current: a.current,
                target: a.target,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests;
