//! Injected configuration: alias tables, layout offsets, success policies.
//!
//! Label sets vary by deployment (plants label the same column 部门, 科室 or
//! "Dept."), so everything the matchers consult lives in a [`ParserConfig`]
//! value rather than in hard-coded constants. The bundled defaults cover the
//! bilingual Chinese/English labels seen in production files.
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// How `success` and partial data are computed for one import kind.
///
/// Production computed success differently per import kind; the divergence
/// is preserved as an explicit choice instead of being unified silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuccessPolicy {
    /// `success` iff no errors; on failure the data is withheld entirely.
    Strict,
    /// `success` iff no errors, but partial data is always returned next to
    /// the error list.
    PartialData,
}

/// Alias lists for the single-cell column roles.
///
/// Matching is containment in both directions over normalized text, so a
/// truncated header like `"部"` still resolves against the alias `"部门"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAliases {
    pub department: Vec<String>,
    pub name: Vec<String>,
    pub year_month: Vec<String>,
    pub cw_week: Vec<String>,
    pub day_of_month: Vec<String>,
    pub topic: Vec<String>,
    pub task_type: Vec<String>,
    pub location: Vec<String>,
}

/// Alias lists for the flat skill-definition table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTableAliases {
    pub module: Vec<String>,
    pub skill: Vec<String>,
    pub order: Vec<String>,
}

/// A known module with its canonical display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleLabel {
    pub id: u8,
    pub name: String,
}

/// Fixed 0-based row offsets of the stacked skill-matrix header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixLayout {
    /// Row holding the skill names (leaf labels).
    pub skill_row: usize,
    /// Row holding the `C`/`T` markers.
    pub marker_row: usize,
    /// First data row.
    pub data_start: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Window of leading rows inspected by the keyword-density scan.
    pub header_scan_rows: usize,
    /// Minimum row count below which decoding fails structurally.
    pub min_grid_rows: usize,
    pub matrix_layout: MatrixLayout,
    pub roles: RoleAliases,
    pub skill_table: SkillTableAliases,
    /// Canonical module names, used when a module cell carries only an id.
    pub modules: Vec<ModuleLabel>,
    /// Lowercase substrings marking summary rows that must be filtered.
    pub summary_row_markers: Vec<String>,
    /// Lowercase tokens that disqualify a skill-name cell from C/T pairing.
    pub reserved_skill_tokens: Vec<String>,
    /// Day-cell marks that mean "scheduled" without naming a type; the
    /// row-level task-type column supplies the code for these.
    pub generic_day_marks: Vec<String>,
    pub skills_success: SuccessPolicy,
    pub matrix_success: SuccessPolicy,
    pub schedule_success: SuccessPolicy,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            header_scan_rows: 10,
            min_grid_rows: 2,
            matrix_layout: MatrixLayout {
                skill_row: 3,
                marker_row: 4,
                data_start: 5,
            },
            roles: RoleAliases {
                department: strings(&["部门", "科室", "所属部门", "department", "dept"]),
                name: strings(&["姓名", "名字", "员工", "name", "employee"]),
                year_month: strings(&["年月", "月份", "month", "yearmonth"]),
                cw_week: strings(&["周次", "周", "cw", "week", "calendarweek"]),
                day_of_month: strings(&["日期", "日", "day", "date"]),
                topic: strings(&["主题", "题目", "内容", "topic", "subject"]),
                task_type: strings(&["任务类型", "类型", "tasktype", "type"]),
                location: strings(&["地点", "场所", "location", "place", "room"]),
            },
            skill_table: SkillTableAliases {
                module: strings(&["模块", "模组", "module"]),
                skill: strings(&["技能", "能力", "skill", "skillname"]),
                order: strings(&["序号", "顺序", "编号", "order", "displayorder"]),
            },
            modules: vec![
                ModuleLabel {
                    id: 1,
                    name: "精益基础".into(),
                },
                ModuleLabel {
                    id: 2,
                    name: "价值流".into(),
                },
                ModuleLabel {
                    id: 3,
                    name: "流程优化".into(),
                },
                ModuleLabel {
                    id: 4,
                    name: "质量管理".into(),
                },
                ModuleLabel {
                    id: 5,
                    name: "设备管理".into(),
                },
                ModuleLabel {
                    id: 6,
                    name: "物流计划".into(),
                },
                ModuleLabel {
                    id: 7,
                    name: "数字化工具".into(),
                },
                ModuleLabel {
                    id: 8,
                    name: "项目管理".into(),
                },
                ModuleLabel {
                    id: 9,
                    name: "领导力".into(),
                },
            ],
            summary_row_markers: strings(&["competence field", "nr. of gaps", "合计", "汇总"]),
            reserved_skill_tokens: strings(&["gap", "con.", "exe."]),
            generic_day_marks: strings(&["x", "✓", "√", "●", "*"]),
            skills_success: SuccessPolicy::Strict,
            matrix_success: SuccessPolicy::PartialData,
            schedule_success: SuccessPolicy::PartialData,
        }
    }
}

impl ParserConfig {
    /// Shared default configuration; import calls that take no custom config
    /// borrow this one instead of rebuilding the alias tables.
    pub fn shared() -> &'static ParserConfig {
        static DEFAULT: Lazy<ParserConfig> = Lazy::new(ParserConfig::default);
        &DEFAULT
    }

    /// Keyword groups scored by the header scan of the skill-definition
    /// table. A group counts once per row no matter how many of its aliases
    /// match.
    pub fn skill_table_keyword_groups(&self) -> Vec<&[String]> {
        vec![
            &self.skill_table.module,
            &self.skill_table.skill,
            &self.skill_table.order,
        ]
    }

    /// Keyword groups scored by the header scan of the schedule sheet.
    pub fn schedule_keyword_groups(&self) -> Vec<&[String]> {
        vec![
            &self.roles.name,
            &self.roles.topic,
            &self.roles.task_type,
            &self.roles.location,
        ]
    }
}

/// Optional caller-supplied context for one import invocation.
#[derive(Debug, Clone, Default)]
pub struct ImportContext {
    /// Year assumed when a month label carries none, e.g. `6月`.
    pub fiscal_year: Option<i32>,
    /// Previously-persisted employee names; names absent from the roster
    /// produce warnings (never errors) for later reconciliation.
    pub roster: Option<Vec<String>>,
}

impl ImportContext {
    /// True when a roster was supplied and `name` is not on it.
    pub fn off_roster(&self, name: &str) -> bool {
        match &self.roster {
            Some(roster) => !roster.iter().any(|n| n.trim() == name.trim()),
            None => false,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
