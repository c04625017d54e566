//! Header discovery.
//!
//! Flat tables carry an unpredictable preamble (titles, legends, revision
//! notes) before the real header row, so the header is located by keyword
//! density instead of by position: each candidate row in the scan window is
//! scored by how many keyword groups it matches, and the first row
//! reaching the group threshold wins.
//! The stacked matrix header is positional and is validated by its fixed
//! offsets instead; see [`crate::config::MatrixLayout`].
use tracing::debug;

use crate::config::MatrixLayout;
use crate::error::{Error, Result};
use crate::grid::{matches_alias, Grid};

/// A located header layout.
///
/// Strategy selection happens once per sheet; everything downstream
/// (column resolution, the data-row walk) consumes the resulting plan
/// instead of re-deciding how the header is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPlan {
    /// One labeled header row; data starts on the next row.
    Keyword { header_row: usize },
    /// Stacked header rows at fixed offsets from the top of the sheet.
    FixedOffset(MatrixLayout),
}

impl HeaderPlan {
    /// Locate a keyword-density header and wrap it as a plan.
    pub fn keyword(grid: &Grid, groups: &[&[String]], scan_rows: usize) -> Result<HeaderPlan> {
        locate_keyword_header(grid, groups, scan_rows)
            .map(|header_row| HeaderPlan::Keyword { header_row })
    }

    /// Adopt fixed offsets, validating that the grid reaches the data
    /// rows at all.
    pub fn fixed_offset(grid: &Grid, layout: MatrixLayout) -> Result<HeaderPlan> {
        if grid.height() <= layout.data_start {
            return Err(Error::InsufficientRows {
                got: grid.height(),
                want: layout.data_start + 1,
            });
        }
        Ok(HeaderPlan::FixedOffset(layout))
    }

    /// Row carrying the column labels (the skill-name row of a stacked
    /// plan).
    pub fn label_row(&self) -> usize {
        match self {
            HeaderPlan::Keyword { header_row } => *header_row,
            HeaderPlan::FixedOffset(layout) => layout.skill_row,
        }
    }

    /// Stacked offsets of the plan. A keyword plan degrades to a two-row
    /// stack starting at its header row, which is what compact matrices
    /// without a preamble look like.
    pub fn matrix_layout(&self) -> MatrixLayout {
        match self {
            HeaderPlan::Keyword { header_row } => MatrixLayout {
                skill_row: *header_row,
                marker_row: header_row + 1,
                data_start: header_row + 2,
            },
            HeaderPlan::FixedOffset(layout) => *layout,
        }
    }

    /// First row of entity data under this plan.
    pub fn first_data_row(&self) -> usize {
        match self {
            HeaderPlan::Keyword { header_row } => header_row + 1,
            HeaderPlan::FixedOffset(layout) => layout.data_start,
        }
    }
}

/// Locate the header row by keyword density over the first `scan_rows`
/// rows.
///
/// A row's score is the number of keyword groups with at least one alias
/// matching some cell of the row; multiple hits from one group still count
/// once. The first row scoring at least half the groups (rounded up) wins;
/// when no row in the window reaches the threshold the scan fails
/// structurally with the inspected row content embedded in the error.
pub fn locate_keyword_header(
    grid: &Grid,
    groups: &[&[String]],
    scan_rows: usize,
) -> Result<usize> {
    let end = scan_rows.min(grid.height());
    let threshold = groups.len().div_ceil(2);
    for row in 0..end {
        let score = row_score(grid.row(row), groups);
        if score >= threshold {
            debug!(row, score, threshold, "header row located by keyword density");
            return Ok(row);
        }
    }
    Err(Error::HeaderNotFound {
        start: 0,
        end,
        inspected: dump_rows(grid, end),
    })
}

fn row_score(row: &[String], groups: &[&[String]]) -> usize {
    groups
        .iter()
        .filter(|aliases| {
            row.iter()
                .any(|cell| aliases.iter().any(|alias| matches_alias(cell, alias)))
        })
        .count()
}

/// Literal content of the first `end` rows, for structural error messages.
pub(crate) fn dump_rows(grid: &Grid, end: usize) -> String {
    (0..end.min(grid.height()))
        .map(|r| format!("row {r}: [{}]", grid.row(r).join(" | ")))
        .collect::<Vec<_>>()
        .join("; ")
}
