//! Spreadsheet ingestion and normalization for competency and scheduling
//! dashboards.
//!
//! The crate turns messy, hand-maintained workbooks into clean relational
//! records. Three import kinds are supported, one per sheet family:
//!
//! - **Skill definitions**: a flat module/skill/order table feeding the
//!   skill catalog, via [`import_skill_definitions`].
//! - **Assessment matrix**: a stacked-header grid of per-employee
//!   current/target ratings, via [`import_assessment_matrix`].
//! - **Task schedule**: a month calendar of per-day task marks, via
//!   [`import_task_schedule`].
//!
//! Every import returns a [`ParseResult`] envelope instead of failing
//! fast: structural problems (undecodable file, no usable header) abort
//! with a single diagnostic, while cell-level problems accumulate as
//! ordered, field-scoped errors next to whatever data was still
//! extracted.
//!
//! ```no_run
//! use skillsheet::{import_assessment_matrix, ImportContext, ParserConfig};
//!
//! let bytes = std::fs::read("matrix.xlsx")?;
//! let result = import_assessment_matrix(&bytes, &ImportContext::default(), ParserConfig::shared());
//! if let Some(data) = &result.data {
//!     println!("{} employees, {} assessments", data.employees.len(), data.assessments.len());
//! }
//! for error in &result.errors {
//!     eprintln!("row {:?}: {}", error.row, error.message);
//! }
//! # Ok::<(), std::io::Error>(())
//! ```
pub mod config;
pub mod error;
pub mod grid;
pub mod header;
pub mod identity;
pub mod ingest;
pub mod model;
pub mod report;
pub mod roles;
pub mod runs;

pub use config::{ImportContext, ParserConfig, SuccessPolicy};
pub use error::{Error, Result};
pub use grid::Grid;
pub use model::{
    Assessment, DailyTask, Department, Employee, MatrixData, ScheduleData, Skill, SkillCatalog,
};
pub use report::{
    to_persistence_batches, ParseError, ParseResult, ParseWarning, PersistenceBatch, Summary,
};

/// Import a skill-definition workbook held in memory.
pub fn import_skill_definitions(bytes: &[u8], config: &ParserConfig) -> ParseResult<SkillCatalog> {
    match Grid::from_bytes(bytes, config) {
        Ok(grid) => ingest::skills::run(&grid, config),
        Err(err) => ParseResult::structural_failure(err),
    }
}

/// Import an assessment-matrix workbook held in memory.
pub fn import_assessment_matrix(
    bytes: &[u8],
    context: &ImportContext,
    config: &ParserConfig,
) -> ParseResult<MatrixData> {
    match Grid::from_bytes(bytes, config) {
        Ok(grid) => ingest::matrix::run(&grid, context, config),
        Err(err) => ParseResult::structural_failure(err),
    }
}

/// Import a task-schedule workbook held in memory.
pub fn import_task_schedule(
    bytes: &[u8],
    context: &ImportContext,
    config: &ParserConfig,
) -> ParseResult<ScheduleData> {
    match Grid::from_bytes(bytes, config) {
        Ok(grid) => ingest::schedule::run(&grid, context, config),
        Err(err) => ParseResult::structural_failure(err),
    }
}
