//! Uniform in-memory grid over a decoded workbook.
//!
//! The external codec is confined to this module: everything above works on
//! a rectangular grid of owned cell strings and never sees codec types.
//! Coercion to text happens once at decode time, so numeric cells like `3`
//! read back as `"3"` rather than `"3.0"` no matter how the file stored
//! them.
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use tracing::debug;

use crate::config::ParserConfig;
use crate::error::{Error, Result};

/// A rectangular grid of cell text, addressed as `(row, column)` with
/// 0-based indices. Out-of-range reads yield the empty string, which keeps
/// ragged source rows from turning into bounds checks at every call site.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Decode the first worksheet of a workbook held in memory.
    ///
    /// The codec picks the container format from the byte signature, so
    /// both `.xlsx` and legacy `.xls` payloads decode through the same
    /// path. Fails structurally when the container cannot be decoded, has
    /// no sheets, or the first sheet is shorter than the configured
    /// minimum.
    pub fn from_bytes(bytes: &[u8], config: &ParserConfig) -> Result<Grid> {
        let cursor = Cursor::new(bytes);
        let mut workbook =
            open_workbook_auto_from_rs(cursor).map_err(|e| Error::Decode(e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(Error::NoSheet)?
            .map_err(|e| Error::Decode(e.to_string()))?;
        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(data_to_string).collect())
            .collect();
        let grid = Grid::from_rows(rows);
        if grid.height() < config.min_grid_rows {
            return Err(Error::InsufficientRows {
                got: grid.height(),
                want: config.min_grid_rows,
            });
        }
        debug!(rows = grid.height(), columns = grid.width(), "decoded first worksheet");
        Ok(grid)
    }

    /// Build a grid directly from rows of cell text.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Grid {
        Grid { rows }
    }

    /// Cell text at `(row, column)`; empty string when out of range.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// One row of cells; empty slice when out of range.
    pub fn row(&self, row: usize) -> &[String] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Widest row in the grid. Source rows are ragged, so per-row lengths
    /// are not meaningful on their own.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// True when every cell of the row is blank after trimming.
    pub fn is_row_blank(&self, row: usize) -> bool {
        self.row(row).iter().all(|c| c.trim().is_empty())
    }
}

/// Coerce one codec cell value to text.
///
/// Floats without a fractional part print as integers so identity cells
/// and level cells survive the round trip through the codec's numeric
/// representation. Date cells render as `YYYY-MM-DD`, with a time suffix
/// only when one is present.
fn data_to_string(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(d) if d.time() == chrono::NaiveTime::MIN => {
                d.date().format("%Y-%m-%d").to_string()
            }
            Some(d) => d.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

/// Canonical form used for label comparison: lowercased with whitespace,
/// underscores, and hyphens removed. Other punctuation is kept, so tokens
/// like `"Con."` stay distinct from `"Con"`.
pub(crate) fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Bidirectional containment match between a header cell and an alias.
///
/// Containment runs both ways so a truncated header still resolves
/// against its full alias. The reverse direction skips single ASCII
/// characters, otherwise marker cells like `T` would absorb into aliases
/// such as `"dept"`; a single CJK character still matches, since one han
/// character is a meaningful truncation.
pub(crate) fn matches_alias(cell: &str, alias: &str) -> bool {
    let c = normalize_label(cell);
    let a = normalize_label(alias);
    if c.is_empty() || a.is_empty() {
        return false;
    }
    c.contains(&a) || (a.contains(&c) && (c.chars().count() >= 2 || !c.is_ascii()))
}

#[cfg(test)]
pub(crate) mod fixtures;
