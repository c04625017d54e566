//! Continuation handling for merged and repeated cells.
//!
//! Spreadsheet merges decode as one populated cell followed by blanks, so
//! the logical value of an axis has to be carried forward. [`RunAxis`] does
//! the carry for one axis; [`fold_task_runs`] collapses consecutive
//! identical day marks into multi-day runs.

/// Carry-forward state for one axis (a department column walked down rows,
/// a month row walked across columns).
///
/// A non-blank cell replaces the carried value; a blank cell yields the
/// carry. Until the first non-blank cell the axis is simply unset and
/// resolves to `None`, which callers treat as "skip", not as an error.
#[derive(Debug, Clone, Default)]
pub struct RunAxis {
    last: Option<String>,
}

impl RunAxis {
    pub fn resolve(&mut self, cell: &str) -> Option<&str> {
        let trimmed = cell.trim();
        if !trimmed.is_empty() {
            self.last = Some(trimmed.to_string());
        }
        self.last.as_deref()
    }
}

/// A maximal run of consecutive days carrying the same mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRun {
    pub code: String,
    pub start_day: u8,
    pub end_day: u8,
}

/// Collapse per-day marks into runs.
///
/// Input is `(day, mark)` in sheet order. A run extends while the next
/// populated day is exactly one later and carries the same trimmed mark;
/// a blank mark or a day gap closes the open run, and the trailing open
/// run is flushed at the end. The fold keeps one open run next to the
/// closed ones, mirroring how the marks read left to right in the sheet.
pub fn fold_task_runs(marks: &[(u8, &str)]) -> Vec<TaskRun> {
    let mut closed = Vec::new();
    let mut open: Option<TaskRun> = None;
    for &(day, mark) in marks {
        let mark = mark.trim();
        if mark.is_empty() {
            if let Some(run) = open.take() {
                closed.push(run);
            }
            continue;
        }
        match &mut open {
            Some(run) if run.code == mark && day == run.end_day + 1 => run.end_day = day,
            _ => {
                if let Some(run) = open.take() {
                    closed.push(run);
                }
                open = Some(TaskRun {
                    code: mark.to_string(),
                    start_day: day,
                    end_day: day,
                });
            }
        }
    }
    if let Some(run) = open {
        closed.push(run);
    }
    closed
}
