//! Skill-definition table extraction.
use std::collections::HashSet;

use tracing::debug;

use crate::config::ParserConfig;
use crate::grid::Grid;
use crate::header::HeaderPlan;
use crate::model::{Skill, SkillCatalog};
use crate::report::{ParseError, ParseResult, ParseWarning, Summary};
use crate::roles::resolve_skill_table;
use crate::runs::RunAxis;

/// Extract the skill catalog from a decoded grid.
pub fn run(grid: &Grid, config: &ParserConfig) -> ParseResult<SkillCatalog> {
    let groups = config.skill_table_keyword_groups();
    let plan = match HeaderPlan::keyword(grid, &groups, config.header_scan_rows) {
        Ok(plan) => plan,
        Err(err) => return ParseResult::structural_failure(err),
    };
    let columns = match resolve_skill_table(grid, &plan, config) {
        Ok(columns) => columns,
        Err(err) => return ParseResult::structural_failure(err),
    };

    let mut skills: Vec<Skill> = Vec::new();
    let mut errors: Vec<ParseError> = Vec::new();
    let warnings: Vec<ParseWarning> = Vec::new();
    let mut seen: HashSet<(u8, String)> = HashSet::new();
    // The module column uses merged cells, one label per block of skills.
    let mut module_axis = RunAxis::default();

    for row in plan.first_data_row()..grid.height() {
        if grid.is_row_blank(row) {
            continue;
        }
        let module_cell = grid.cell(row, columns.module);
        let skill_cell = grid.cell(row, columns.skill).trim();
        if super::is_summary_cell(module_cell, config) || super::is_summary_cell(skill_cell, config)
        {
            continue;
        }

        let Some(module_label) = module_axis.resolve(module_cell).map(str::to_string) else {
            errors.push(ParseError::field(
                row,
                Some(columns.module),
                "module",
                "no module label on or above this row",
                None,
            ));
            continue;
        };
        let Some((module_id, module_name)) = super::parse_module(&module_label, config) else {
            errors.push(ParseError::field(
                row,
                Some(columns.module),
                "module",
                "unrecognized module label",
                Some(module_label),
            ));
            continue;
        };

        if skill_cell.is_empty() {
            errors.push(ParseError::field(
                row,
                Some(columns.skill),
                "skill",
                "skill name is empty",
                None,
            ));
            continue;
        }

        if !seen.insert((module_id, skill_cell.to_string())) {
            errors.push(ParseError::field(
                row,
                Some(columns.skill),
                "skill",
                format!("duplicate skill '{skill_cell}' in module {module_id}"),
                Some(skill_cell.to_string()),
            ));
            continue;
        }

        let display_order = match columns.order {
            Some(order_column) => {
                let raw = grid.cell(row, order_column).trim();
                if raw.is_empty() {
                    skills.len() as u32 + 1
                } else {
                    match raw.parse::<u32>() {
                        Ok(value) => value,
                        Err(_) => {
                            errors.push(ParseError::field(
                                row,
                                Some(order_column),
                                "display_order",
                                "display order is not a whole number",
                                Some(raw.to_string()),
                            ));
                            continue;
                        }
                    }
                }
            }
            None => skills.len() as u32 + 1,
        };

        skills.push(Skill {
            module_id,
            module_name,
            name: skill_cell.to_string(),
            display_order,
        });
    }

    debug!(skills = skills.len(), errors = errors.len(), "skill catalog extracted");
    let summary = Summary { skills: skills.len(), ..Summary::default() };
    ParseResult::assemble(
        config.skills_success,
        SkillCatalog { skills },
        errors,
        warnings,
        summary,
    )
}
