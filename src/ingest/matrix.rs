//! Assessment-matrix extraction.
use std::collections::HashSet;

use tracing::debug;

use crate::config::{ImportContext, ParserConfig};
use crate::grid::Grid;
use crate::header::HeaderPlan;
use crate::model::{Assessment, Department, Employee, MatrixData};
use crate::report::{ParseError, ParseResult, ParseWarning, Summary};
use crate::roles::{resolve_matrix, SkillColumn};
use crate::runs::RunAxis;

use super::LevelCell;

/// Extract departments, employees, and assessments from a decoded grid.
pub fn run(grid: &Grid, context: &ImportContext, config: &ParserConfig) -> ParseResult<MatrixData> {
    let plan = match HeaderPlan::fixed_offset(grid, config.matrix_layout) {
        Ok(plan) => plan,
        Err(err) => return ParseResult::structural_failure(err),
    };
    let (columns, mut warnings) = match resolve_matrix(grid, &plan, config) {
        Ok(resolved) => resolved,
        Err(err) => return ParseResult::structural_failure(err),
    };

    let mut data = MatrixData::default();
    let mut errors: Vec<ParseError> = Vec::new();
    let mut department_names: HashSet<String> = HashSet::new();
    let mut identities = crate::identity::IdentityResolver::default();
    // The department column uses merged cells spanning its employees.
    let mut department_axis = RunAxis::default();

    let mut skill_names: HashSet<&str> = HashSet::new();
    for skill in &columns.skills {
        if skill_names.insert(&skill.name) {
            data.skills.push(skill.name.clone());
        }
    }

    for row in plan.first_data_row()..grid.height() {
        let department_cell = grid.cell(row, columns.department);
        let name_cell = grid.cell(row, columns.name).trim();
        if department_cell.trim().is_empty() && name_cell.is_empty() {
            continue;
        }
        if super::is_summary_cell(department_cell, config) || super::is_summary_cell(name_cell, config)
        {
            continue;
        }

        let department = department_axis.resolve(department_cell).map(str::to_string);
        if name_cell.is_empty() {
            // A department label row opening a merged block; no employee.
            continue;
        }
        let Some(department) = department else {
            errors.push(ParseError::field(
                row,
                Some(columns.department),
                "department",
                "no department on or above this row",
                None,
            ));
            continue;
        };

        if context.off_roster(name_cell) {
            warnings.push(ParseWarning::new(
                Some(row),
                Some(columns.name),
                format!("employee '{name_cell}' is not on the provided roster"),
            ));
        }

        let assigned = identities.assign(&department, name_cell);
        if assigned.collided {
            warnings.push(ParseWarning::new(
                Some(row),
                Some(columns.name),
                format!("duplicate identity for '{name_cell}' in '{department}'; assigned id {}", assigned.id),
            ));
        }
        if department_names.insert(department.clone()) {
            data.departments.push(Department { name: department.clone() });
        }
        data.employees.push(Employee {
            id: assigned.id.clone(),
            name: name_cell.to_string(),
            department,
        });

        for skill in &columns.skills {
            match rating_pair(grid, row, skill) {
                Ok(Some((current, target))) => data.assessments.push(Assessment {
                    employee_id: assigned.id.clone(),
                    skill_name: skill.name.clone(),
                    current,
                    target,
                }),
                Ok(None) => {}
                Err(error) => errors.push(error),
            }
        }
    }

    debug!(
        employees = data.employees.len(),
        assessments = data.assessments.len(),
        errors = errors.len(),
        "assessment matrix extracted"
    );
    let summary = Summary {
        departments: data.departments.len(),
        employees: data.employees.len(),
        skills: data.skills.len(),
        assessments: data.assessments.len(),
        ..Summary::default()
    };
    ParseResult::assemble(config.matrix_success, data, errors, warnings, summary)
}

/// Read one current/target pair for one employee row.
///
/// `Ok(None)` means the pair is simply absent. A combined cell like `3/4`
/// in the current column supplies both values at once; the explicit target
/// cell is ignored in that case.
fn rating_pair(
    grid: &Grid,
    row: usize,
    skill: &SkillColumn,
) -> Result<Option<(u8, u8)>, ParseError> {
    let current_raw = grid.cell(row, skill.current).trim();
    let target_raw = grid.cell(row, skill.target).trim();

    let (current, target) = if let Some((left, right)) = current_raw.split_once('/') {
        match (super::level_cell(left), super::level_cell(right)) {
            (LevelCell::Level(current), LevelCell::Level(target)) => (current, target),
            _ => {
                return Err(ParseError::field(
                    row,
                    Some(skill.current),
                    &skill.name,
                    "combined rating cell is not two levels in 1..=5",
                    Some(current_raw.to_string()),
                ))
            }
        }
    } else {
        match (super::level_cell(current_raw), super::level_cell(target_raw)) {
            (LevelCell::Empty, LevelCell::Empty) => return Ok(None),
            (LevelCell::Level(current), LevelCell::Level(target)) => (current, target),
            (LevelCell::Invalid, _) => {
                return Err(ParseError::field(
                    row,
                    Some(skill.current),
                    &skill.name,
                    "current level is not a number in 1..=5",
                    Some(current_raw.to_string()),
                ))
            }
            (_, LevelCell::Invalid) => {
                return Err(ParseError::field(
                    row,
                    Some(skill.target),
                    &skill.name,
                    "target level is not a number in 1..=5",
                    Some(target_raw.to_string()),
                ))
            }
            (LevelCell::Empty, _) => {
                return Err(ParseError::field(
                    row,
                    Some(skill.current),
                    &skill.name,
                    "current level is missing while target is set",
                    None,
                ))
            }
            (_, LevelCell::Empty) => {
                return Err(ParseError::field(
                    row,
                    Some(skill.target),
                    &skill.name,
                    "target level is missing while current is set",
                    None,
                ))
            }
        }
    };

    if current > target {
        return Err(ParseError::field(
            row,
            Some(skill.current),
            &skill.name,
            format!("current level {current} exceeds target {target}"),
            Some(current_raw.to_string()),
        ));
    }
    Ok(Some((current, target)))
}
