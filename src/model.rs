//! Relational records produced by the ingestion core.
//!
//! Entities are created fresh per parse invocation and are immutable once
//! returned. Cross-record references go through synthetic ids or natural
//! keys, never through object identity; durable storage and cross-call
//! deduplication belong to the external persistence store.
use chrono::NaiveDate;
use serde::Serialize;

/// A department, unique by name within one parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Department {
    pub name: String,
}

/// An employee with a synthetic id derived from (department, name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    /// Synthetic id, e.g. `Lean_Office_Liu_Yang`; see [`crate::identity`].
    pub id: String,
    pub name: String,
    /// Department natural key (its name).
    pub department: String,
}

/// A skill definition from the catalog import.
///
/// (module_id, name) is unique within one parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skill {
    /// Module the skill belongs to, 1..=9.
    pub module_id: u8,
    pub module_name: String,
    pub name: String,
    pub display_order: u32,
}

/// A single current/target competency rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub employee_id: String,
    pub skill_name: String,
    /// Current level, 1..=5.
    pub current: u8,
    /// Target level, 1..=5; always >= `current`.
    pub target: u8,
}

impl Assessment {
    /// Competency gap. Derived, never stored independently of its inputs.
    pub fn gap(&self) -> u8 {
        self.target - self.current
    }
}

/// A scheduled task covering one or more consecutive days.
///
/// Single-day tasks have `end_date == date` and `day_end == day_of_month`;
/// the end markers come from run-merging equal type codes across adjacent
/// day columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTask {
    pub employee_name: String,
    pub date: NaiveDate,
    pub end_date: NaiveDate,
    /// Canonical `YYYY-MM` label resolved from the month axis.
    pub year_month: String,
    /// Calendar-week label as written in the sheet, e.g. `CW23`; may be
    /// empty when the sheet carries no week axis.
    pub cw_week: String,
    pub day_of_month: u8,
    pub day_end: u8,
    /// May be empty.
    pub topic: String,
    /// Never empty.
    pub task_type: String,
    /// May be empty.
    pub location: String,
}

/// Result data of the skill-definition import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillCatalog {
    pub skills: Vec<Skill>,
}

/// Result data of the assessment-matrix import.
///
/// `skills` holds the distinct skill names seen in the matrix header, in
/// column order; full [`Skill`] records (module, order) come from the
/// separate catalog import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatrixData {
    pub departments: Vec<Department>,
    pub employees: Vec<Employee>,
    pub skills: Vec<String>,
    pub assessments: Vec<Assessment>,
}

/// Result data of the task-schedule import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleData {
    pub tasks: Vec<DailyTask>,
}
