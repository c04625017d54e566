//! Row-wise entity extraction.
//!
//! One submodule per import kind, plus the cell-level parsers they share.
//! Extraction is deliberately forgiving at the row level: a cell that does
//! not parse produces a recoverable [`ParseError`] scoped to its field and
//! the walk moves on, so one bad rating never discards a whole sheet.
//!
//! [`ParseError`]: crate::report::ParseError
use crate::config::ParserConfig;
use crate::grid::normalize_label;

pub mod matrix;
pub mod schedule;
pub mod skills;

/// Classification of one rating cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LevelCell {
    /// Blank after trimming.
    Empty,
    /// A valid level after rounding, in `1..=5`.
    Level(u8),
    /// Populated but unusable.
    Invalid,
}

/// Parse one rating cell. Fractional inputs round half-up, so `"3.5"`
/// reads as level 4; anything outside `1..=5` after rounding is invalid
/// rather than clamped.
pub(crate) fn level_cell(raw: &str) -> LevelCell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return LevelCell::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(value) => {
            let rounded = value.round();
            if (1.0..=5.0).contains(&rounded) {
                LevelCell::Level(rounded as u8)
            } else {
                LevelCell::Invalid
            }
        }
        Err(_) => LevelCell::Invalid,
    }
}

/// Parse a module cell of the skill-definition table.
///
/// Accepts a leading numeric id (`"3"`, `"3. 流程优化"`, `"模块3"`) or a
/// bare module name matched against the configured list. When only the id
/// is present the canonical name comes from configuration; an id outside
/// the configured set keeps whatever label text followed it.
pub(crate) fn parse_module(raw: &str, config: &ParserConfig) -> Option<(u8, String)> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(id) = leading_digits(trimmed) {
        if !(1..=9).contains(&id) {
            return None;
        }
        if let Some(known) = config.modules.iter().find(|m| m.id == id) {
            return Some((id, known.name.clone()));
        }
        let label: String = trimmed
            .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == '、')
            .trim()
            .to_string();
        return Some((id, label));
    }
    let normalized = normalize_label(trimmed);
    config
        .modules
        .iter()
        .find(|m| {
            let name = normalize_label(&m.name);
            normalized.contains(&name) || name.contains(&normalized)
        })
        .map(|m| (m.id, m.name.clone()))
}

/// First ascii digit sequence in the label, covering both `3. 流程优化`
/// and `模块3`. Numerals written as han characters are out of scope.
fn leading_digits(text: &str) -> Option<u8> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Parse a month axis label into `(year, month)`.
///
/// Accepted forms: `2024-6`, `2024.06`, `2024/6`, `2024年6月`, `Jun-24`,
/// `Jun 2024`, and a bare `6月`, which borrows the caller's fiscal year.
pub(crate) fn parse_year_month(raw: &str, fiscal_year: Option<i32>) -> Option<(i32, u32)> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains('年') {
        let body = trimmed.strip_suffix('月').unwrap_or(trimmed);
        let (year, month) = body.split_once('年')?;
        return build_year_month(year.trim().parse().ok()?, month.trim().parse().ok()?);
    }

    if let Some(month) = trimmed.strip_suffix('月') {
        return build_year_month(fiscal_year?, month.trim().parse().ok()?);
    }

    for separator in ['-', '.', '/'] {
        if let Some((left, right)) = trimmed.split_once(separator) {
            let left = left.trim();
            let right = right.trim();
            if let (Ok(year), Ok(month)) = (left.parse::<i32>(), right.parse::<u32>()) {
                if year >= 1000 {
                    return build_year_month(year, month);
                }
            }
            if let (Some(month), Ok(year)) = (english_month(left), right.parse::<i32>()) {
                let year = if year < 100 { 2000 + year } else { year };
                return build_year_month(year, month);
            }
        }
    }

    if let Some((left, right)) = trimmed.split_once(' ') {
        if let (Some(month), Ok(year)) = (english_month(left.trim()), right.trim().parse::<i32>()) {
            let year = if year < 100 { 2000 + year } else { year };
            return build_year_month(year, month);
        }
    }

    None
}

fn build_year_month(year: i32, month: u32) -> Option<(i32, u32)> {
    ((1..=12).contains(&month) && (1000..=9999).contains(&year)).then_some((year, month))
}

fn english_month(text: &str) -> Option<u32> {
    const NAMES: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let lower = text.to_lowercase();
    NAMES
        .iter()
        .position(|name| lower.starts_with(name))
        .map(|i| i as u32 + 1)
}

/// True when the cell marks a summary row that must not become an entity.
pub(crate) fn is_summary_cell(cell: &str, config: &ParserConfig) -> bool {
    let normalized = normalize_label(cell);
    if normalized.is_empty() {
        return false;
    }
    config
        .summary_row_markers
        .iter()
        .any(|marker| normalized.contains(&normalize_label(marker)))
}
