//! Column role resolution.
//!
//! Headers never use one canonical label, so roles are resolved against
//! configured alias lists with bidirectional containment matching. The
//! stacked matrix header additionally pairs current/target rating columns
//! through its marker row: a `C` marker under a usable skill name claims
//! the column to its right as the paired target column.
use tracing::debug;

use crate::config::ParserConfig;
use crate::error::{Error, Result};
use crate::grid::{matches_alias, normalize_label, Grid};
use crate::header::{dump_rows, HeaderPlan};
use crate::report::ParseWarning;

/// Resolved columns of the flat skill-definition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillTableColumns {
    pub module: usize,
    pub skill: usize,
    /// Absent when the sheet carries no explicit ordering column; display
    /// order then falls back to row order.
    pub order: Option<usize>,
}

/// One current/target column pair in the assessment matrix, keyed by the
/// skill name above the `C` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillColumn {
    pub name: String,
    pub current: usize,
    pub target: usize,
}

/// Resolved columns of the assessment matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixColumns {
    pub department: usize,
    pub name: usize,
    pub skills: Vec<SkillColumn>,
}

/// Resolved columns of the task-schedule sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleColumns {
    pub name: usize,
    pub topic: Option<usize>,
    pub task_type: Option<usize>,
    pub location: Option<usize>,
    /// Day-of-month columns in sheet order as `(column, day)`.
    pub days: Vec<(usize, u8)>,
}

/// First column of `row` matching any alias in `aliases`.
fn find_column(row: &[String], aliases: &[String]) -> Option<usize> {
    row.iter()
        .position(|cell| aliases.iter().any(|alias| matches_alias(cell, alias)))
}

/// First matching column across several header rows, searched top-down.
fn find_column_stacked(grid: &Grid, mut rows: std::ops::Range<usize>, aliases: &[String]) -> Option<usize> {
    rows.find_map(|r| find_column(grid.row(r), aliases))
}

/// Resolve the flat skill-table columns from the plan's label row.
pub fn resolve_skill_table(
    grid: &Grid,
    plan: &HeaderPlan,
    config: &ParserConfig,
) -> Result<SkillTableColumns> {
    let row = grid.row(plan.label_row());
    let module = find_column(row, &config.skill_table.module);
    let skill = find_column(row, &config.skill_table.skill);
    let order = find_column(row, &config.skill_table.order);
    match (module, skill) {
        (Some(module), Some(skill)) => Ok(SkillTableColumns { module, skill, order }),
        _ => {
            let mut missing = Vec::new();
            if module.is_none() {
                missing.push("module");
            }
            if skill.is_none() {
                missing.push("skill");
            }
            Err(Error::MissingRoles {
                missing: missing.join(", "),
                inspected: format!("[{}]", row.join(" | ")),
            })
        }
    }
}

/// Resolve identity columns and current/target pairs of the matrix.
///
/// Identity columns are searched across every stacked header row, since
/// merged cells put the labels on varying rows. Pairing walks the marker
/// row left to right: a cell reading exactly `C` (case-insensitive, after
/// trimming) whose skill cell above is non-empty and not a reserved
/// aggregate token claims the next column as its target without
/// re-checking that column's own marker. A `T` marker not claimed by a
/// preceding pair yields a warning, never an error.
pub fn resolve_matrix(
    grid: &Grid,
    plan: &HeaderPlan,
    config: &ParserConfig,
) -> Result<(MatrixColumns, Vec<ParseWarning>)> {
    let layout = plan.matrix_layout();
    let header_rows = 0..layout.data_start;
    let mut department = find_column_stacked(grid, header_rows.clone(), &config.roles.department);
    let mut name = find_column_stacked(grid, header_rows.clone(), &config.roles.name);

    let mut warnings = Vec::new();
    // Positional fallback: some matrices label nothing, but the identity
    // columns are always the two leftmost. Only taken when the first data
    // row actually has values there.
    if (department.is_none() || name.is_none())
        && !grid.cell(layout.data_start, 0).trim().is_empty()
        && !grid.cell(layout.data_start, 1).trim().is_empty()
    {
        warnings.push(ParseWarning::new(
            None,
            None,
            "identity headers not found; assuming department in column 0 and name in column 1",
        ));
        department = Some(department.unwrap_or(0));
        name = Some(name.unwrap_or(1));
    }

    let mut skills = Vec::new();
    let width = grid.width();
    let mut column = 0;
    while column < width {
        let marker = normalize_label(grid.cell(layout.marker_row, column));
        if marker == "c" {
            let skill = grid.cell(layout.skill_row, column).trim();
            if !skill.is_empty() && !is_reserved_skill(skill, config) {
                skills.push(SkillColumn {
                    name: skill.to_string(),
                    current: column,
                    target: column + 1,
                });
                column += 2;
                continue;
            }
        } else if marker == "t" {
            warnings.push(ParseWarning::new(
                Some(layout.marker_row),
                Some(column),
                "target marker without a preceding current marker; column ignored",
            ));
        }
        column += 1;
    }

    match (department, name) {
        (Some(department), Some(name)) if !skills.is_empty() => {
            debug!(pairs = skills.len(), department, name, "matrix columns resolved");
            Ok((MatrixColumns { department, name, skills }, warnings))
        }
        _ => {
            let mut missing = Vec::new();
            if department.is_none() {
                missing.push("department");
            }
            if name.is_none() {
                missing.push("name");
            }
            if skills.is_empty() {
                missing.push("skill column pairs");
            }
            Err(Error::MissingRoles {
                missing: missing.join(", "),
                inspected: dump_rows(grid, layout.data_start),
            })
        }
    }
}

/// Reserved aggregate tokens block pairing by containment, so compound
/// labels like `Gap count` stay out as well.
fn is_reserved_skill(skill: &str, config: &ParserConfig) -> bool {
    let normalized = normalize_label(skill);
    config
        .reserved_skill_tokens
        .iter()
        .any(|token| normalized.contains(&normalize_label(token)))
}

/// Resolve the schedule columns from the plan's day header row.
///
/// Day columns are the header cells that parse as an integer in `1..=31`;
/// everything else resolves by alias. The employee name column and at
/// least one day column are required.
pub fn resolve_schedule(
    grid: &Grid,
    plan: &HeaderPlan,
    config: &ParserConfig,
) -> Result<ScheduleColumns> {
    let row = grid.row(plan.label_row());
    let name = find_column(row, &config.roles.name);
    let days: Vec<(usize, u8)> = row
        .iter()
        .enumerate()
        .filter_map(|(column, cell)| {
            cell.trim()
                .parse::<u8>()
                .ok()
                .filter(|d| (1..=31).contains(d))
                .map(|d| (column, d))
        })
        .collect();

    match name {
        Some(name) if !days.is_empty() => {
            debug!(days = days.len(), name, "schedule columns resolved");
            Ok(ScheduleColumns {
                name,
                topic: find_column(row, &config.roles.topic),
                task_type: find_column(row, &config.roles.task_type),
                location: find_column(row, &config.roles.location),
                days,
            })
        }
        _ => {
            let mut missing = Vec::new();
            if name.is_none() {
                missing.push("name");
            }
            if days.is_empty() {
                missing.push("day columns");
            }
            Err(Error::MissingRoles {
                missing: missing.join(", "),
                inspected: format!("[{}]", row.join(" | ")),
            })
        }
    }
}
