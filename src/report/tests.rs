use super::*;
use crate::model::{Assessment, Department, Employee};

fn err(row: usize, column: usize) -> ParseError {
    ParseError::field(row, Some(column), "f", "bad", None)
}

#[test]
fn diagnostics_sort_by_row_then_column() {
    let result = ParseResult::assemble(
        SuccessPolicy::PartialData,
        (),
        vec![err(7, 2), err(3, 9), err(3, 1)],
        vec![
            ParseWarning::new(Some(9), None, "late"),
            ParseWarning::new(Some(2), Some(4), "early"),
        ],
        Summary::default(),
    );
    let order: Vec<(Option<usize>, Option<usize>)> =
        result.errors.iter().map(|e| (e.row, e.column)).collect();
    assert_eq!(order, vec![(Some(3), Some(1)), (Some(3), Some(9)), (Some(7), Some(2))]);
    assert_eq!(result.warnings[0].message, "early");
}

#[test]
fn success_is_error_driven_not_warning_driven() {
    let result = ParseResult::assemble(
        SuccessPolicy::Strict,
        42,
        Vec::new(),
        vec![ParseWarning::new(None, None, "heads up")],
        Summary::default(),
    );
    assert!(result.success);
    assert_eq!(result.data, Some(42));
}

#[test]
fn strict_policy_withholds_data_on_failure() {
    let result = ParseResult::assemble(
        SuccessPolicy::Strict,
        42,
        vec![err(0, 0)],
        Vec::new(),
        Summary::default(),
    );
    assert!(!result.success);
    assert_eq!(result.data, None);
}

#[test]
fn partial_policy_keeps_data_on_failure() {
    let result = ParseResult::assemble(
        SuccessPolicy::PartialData,
        42,
        vec![err(0, 0)],
        Vec::new(),
        Summary::default(),
    );
    assert!(!result.success);
    assert_eq!(result.data, Some(42));
}

#[test]
fn structural_failures_carry_one_unscoped_error() {
    let result: ParseResult<()> = ParseResult::structural_failure(crate::error::Error::NoSheet);
    assert!(!result.success);
    assert!(result.data.is_none());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].row, None);
    assert_eq!(result.errors[0].message, "workbook contains no sheets");
}

#[test]
fn persistence_batches_mirror_matrix_data() {
    let data = MatrixData {
        departments: vec![Department { name: "Quality".into() }],
        employees: vec![Employee {
            id: "Quality_王伟".into(),
            name: "王伟".into(),
            department: "Quality".into(),
        }],
        skills: vec!["5S".into()],
        assessments: vec![Assessment {
            employee_id: "Quality_王伟".into(),
            skill_name: "5S".into(),
            current: 2,
            target: 4,
        }],
    };
    let batch = to_persistence_batches(&data);
    assert_eq!(batch.departments.len(), 1);
    assert_eq!(batch.employees[0].id, "Quality_王伟");
    assert_eq!(batch.assessments[0].target, 4);
}
