//! Task-schedule extraction.
use tracing::debug;

use crate::config::{ImportContext, ParserConfig};
use crate::grid::{normalize_label, Grid};
use crate::header::HeaderPlan;
use crate::model::{DailyTask, ScheduleData};
use crate::report::{ParseError, ParseResult, ParseWarning, Summary};
use crate::roles::resolve_schedule;
use crate::runs::{fold_task_runs, RunAxis};

/// One day column with its resolved month and calendar-week labels.
struct DayColumn {
    column: usize,
    day: u8,
    month: Option<(i32, u32)>,
    cw: String,
}

/// Extract scheduled tasks from a decoded grid.
pub fn run(grid: &Grid, context: &ImportContext, config: &ParserConfig) -> ParseResult<ScheduleData> {
    let groups = config.schedule_keyword_groups();
    let plan = match HeaderPlan::keyword(grid, &groups, config.header_scan_rows) {
        Ok(plan) => plan,
        Err(err) => return ParseResult::structural_failure(err),
    };
    let columns = match resolve_schedule(grid, &plan, config) {
        Ok(columns) => columns,
        Err(err) => return ParseResult::structural_failure(err),
    };

    let mut errors: Vec<ParseError> = Vec::new();
    let mut warnings: Vec<ParseWarning> = Vec::new();
    let header_row = plan.label_row();
    let data_start = plan.first_data_row();

    // The month and week axes sit directly above the day header and are
    // merged across the day columns they span, so both resolve with a
    // carry that only ever looks at day columns.
    let month_row = header_row.checked_sub(2);
    let cw_row = header_row.checked_sub(1);
    let mut month_axis = RunAxis::default();
    let mut cw_axis = RunAxis::default();
    let mut days: Vec<DayColumn> = Vec::new();
    for &(column, day) in &columns.days {
        let label = month_row.and_then(|r| month_axis.resolve(grid.cell(r, column)).map(str::to_string));
        let month = label
            .as_deref()
            .and_then(|l| super::parse_year_month(l, context.fiscal_year));
        if month.is_none() && column_has_marks(grid, data_start, column) {
            errors.push(ParseError::field(
                month_row.unwrap_or(header_row),
                Some(column),
                "year_month",
                "day column has marks but no resolvable month label",
                label.clone(),
            ));
        }
        let cw = cw_row
            .and_then(|r| cw_axis.resolve(grid.cell(r, column)).map(str::to_string))
            .unwrap_or_default();
        days.push(DayColumn { column, day, month, cw });
    }

    let mut data = ScheduleData::default();
    for row in data_start..grid.height() {
        if grid.is_row_blank(row) {
            continue;
        }
        let name = grid.cell(row, columns.name).trim();
        if name.is_empty() || super::is_summary_cell(name, config) {
            continue;
        }
        if context.off_roster(name) {
            warnings.push(ParseWarning::new(
                Some(row),
                Some(columns.name),
                format!("employee '{name}' is not on the provided roster"),
            ));
        }

        let topic = cell_at(grid, row, columns.topic);
        let location = cell_at(grid, row, columns.location);
        let row_type = cell_at(grid, row, columns.task_type);

        // Resolve each day cell to its final task code before folding, so
        // runs merge on what the task actually is.
        let mut codes: Vec<String> = Vec::new();
        for day in &days {
            let raw = grid.cell(row, day.column).trim();
            if raw.is_empty() {
                codes.push(String::new());
            } else if is_generic_mark(raw, config) {
                if row_type.is_empty() {
                    errors.push(ParseError::field(
                        row,
                        Some(day.column),
                        "task_type",
                        "generic day mark but the row has no task type",
                        Some(raw.to_string()),
                    ));
                    codes.push(String::new());
                } else {
                    codes.push(row_type.clone());
                }
            } else {
                codes.push(raw.to_string());
            }
        }

        // Fold runs within maximal spans of day columns sharing a month;
        // a task never merges across a month boundary.
        let mut span_start = 0;
        while span_start < days.len() {
            let Some(month) = days[span_start].month else {
                span_start += 1;
                continue;
            };
            let mut span_end = span_start;
            while span_end + 1 < days.len() && days[span_end + 1].month == Some(month) {
                span_end += 1;
            }
            let span = &days[span_start..=span_end];
            let marks: Vec<(u8, &str)> = span
                .iter()
                .zip(&codes[span_start..=span_end])
                .map(|(d, code)| (d.day, code.as_str()))
                .collect();
            for run in fold_task_runs(&marks) {
                let start = span.iter().find(|d| d.day == run.start_day);
                let column = start.map(|d| d.column);
                let (year, month_number) = month;
                let date = chrono::NaiveDate::from_ymd_opt(year, month_number, run.start_day as u32);
                let end_date = chrono::NaiveDate::from_ymd_opt(year, month_number, run.end_day as u32);
                match (date, end_date) {
                    (Some(date), Some(end_date)) => data.tasks.push(DailyTask {
                        employee_name: name.to_string(),
                        date,
                        end_date,
                        year_month: format!("{year:04}-{month_number:02}"),
                        cw_week: start.map(|d| d.cw.clone()).unwrap_or_default(),
                        day_of_month: run.start_day,
                        day_end: run.end_day,
                        topic: topic.clone(),
                        task_type: run.code,
                        location: location.clone(),
                    }),
                    _ => {
                        let bad = if date.is_none() { run.start_day } else { run.end_day };
                        errors.push(ParseError::field(
                            row,
                            column,
                            "date",
                            format!("day {bad} does not exist in {year:04}-{month_number:02}"),
                            None,
                        ));
                    }
                }
            }
            span_start = span_end + 1;
        }
    }

    debug!(tasks = data.tasks.len(), errors = errors.len(), "task schedule extracted");
    let summary = Summary { tasks: data.tasks.len(), ..Summary::default() };
    ParseResult::assemble(config.schedule_success, data, errors, warnings, summary)
}

fn cell_at(grid: &Grid, row: usize, column: Option<usize>) -> String {
    column.map(|c| grid.cell(row, c).trim().to_string()).unwrap_or_default()
}

fn is_generic_mark(mark: &str, config: &ParserConfig) -> bool {
    let normalized = normalize_label(mark);
    config
        .generic_day_marks
        .iter()
        .any(|m| normalized == normalize_label(m))
}

fn column_has_marks(grid: &Grid, data_start: usize, column: usize) -> bool {
    (data_start..grid.height()).any(|row| !grid.cell(row, column).trim().is_empty())
}
