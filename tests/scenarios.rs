//! End-to-end imports against workbooks assembled in memory.
use skillsheet::{
    import_assessment_matrix, import_skill_definitions, import_task_schedule,
    to_persistence_batches, ImportContext, ParserConfig,
};

#[path = "../src/grid/fixtures.rs"]
mod fixtures;

use fixtures::xlsx_bytes as xlsx;

fn matrix_rows() -> Vec<Vec<&'static str>> {
    vec![
        vec!["2024 技能矩阵"],
        vec![],
        vec!["部门", "姓名"],
        vec!["", "", "5S", "", "VSM", "", "Gap", ""],
        vec!["", "", "C", "T", "C", "T", "C", ""],
        vec!["Lean Office", "刘洋", "2", "4", "3", "3", "2", ""],
        vec!["", "王伟", "1", "3", "", "", "2", ""],
        vec!["Quality", "刘洋", "4", "5", "", "", "1", ""],
        vec!["", "Nr. of gaps", "3", "", "", "", "", ""],
    ]
}

#[test]
fn well_formed_matrix_imports_cleanly() {
    let bytes = xlsx(&matrix_rows());
    let result = import_assessment_matrix(&bytes, &ImportContext::default(), ParserConfig::shared());
    assert!(result.success, "errors: {:?}", result.errors);
    let data = result.data.unwrap();
    assert_eq!(data.departments.len(), 2);
    assert_eq!(data.employees.len(), 3);
    // The reserved Gap column never pairs, so only 5S and VSM count.
    assert_eq!(data.skills, vec!["5S".to_string(), "VSM".to_string()]);
    assert_eq!(data.assessments.len(), 4);
    assert_eq!(result.summary.employees, 3);
    assert_eq!(result.summary.assessments, 4);

    let batch = to_persistence_batches(&data);
    assert_eq!(batch.employees.len(), 3);
    assert_eq!(batch.assessments.len(), 4);
}

#[test]
fn same_name_across_departments_stays_distinct() {
    let bytes = xlsx(&matrix_rows());
    let result = import_assessment_matrix(&bytes, &ImportContext::default(), ParserConfig::shared());
    let data = result.data.unwrap();
    let ids: Vec<&str> = data.employees.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["Lean_Office_刘洋", "Lean_Office_王伟", "Quality_刘洋"]);
}

#[test]
fn bad_rating_fails_the_import_but_keeps_partial_data() {
    let mut rows = matrix_rows();
    rows[5][2] = "x";
    let bytes = xlsx(&rows);
    let result = import_assessment_matrix(&bytes, &ImportContext::default(), ParserConfig::shared());
    assert!(!result.success);
    let data = result.data.expect("partial data survives a failed matrix import");
    assert_eq!(data.employees.len(), 3);
    assert_eq!(data.assessments.len(), 3);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].row, Some(5));
    assert_eq!(result.errors[0].field.as_deref(), Some("5S"));
}

#[test]
fn skill_definitions_import_behind_a_preamble() {
    let bytes = xlsx(&[
        vec!["能力模型 v3"],
        vec!["维护: 张明"],
        vec![],
        vec!["序号", "模块", "技能"],
        vec!["1", "1. 精益基础", "5S"],
        vec!["2", "", "标准化作业"],
        vec!["3", "7. 数字化工具", "Power BI"],
    ]);
    let result = import_skill_definitions(&bytes, ParserConfig::shared());
    assert!(result.success, "errors: {:?}", result.errors);
    let catalog = result.data.unwrap();
    assert_eq!(catalog.skills.len(), 3);
    assert_eq!(catalog.skills[1].module_name, "精益基础");
    assert_eq!(catalog.skills[2].module_id, 7);
}

#[test]
fn skill_definition_errors_withhold_the_catalog() {
    let bytes = xlsx(&[
        vec!["序号", "模块", "技能"],
        vec!["1", "99. 未知", "5S"],
        vec!["2", "1", "VSM"],
    ]);
    let result = import_skill_definitions(&bytes, ParserConfig::shared());
    assert!(!result.success);
    assert!(result.data.is_none(), "skill catalog is all or nothing");
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn schedule_import_merges_day_runs() {
    let bytes = xlsx(&[
        vec!["六月排程"],
        vec!["", "", "", "", "2024年6月"],
        vec!["", "", "", "", "CW23", "", "", "CW24"],
        vec!["姓名", "主题", "类型", "地点", "3", "4", "5", "10"],
        vec!["刘洋", "现场审核", "AU", "车间", "AU", "AU", "", "TR"],
        vec!["王伟", "设备点检", "", "B栋", "", "x", "", ""],
    ]);
    let result = import_task_schedule(&bytes, &ImportContext::default(), ParserConfig::shared());
    assert!(!result.success);
    // 王伟 has a generic mark but no task type, so his day errors while
    // 刘洋's runs still import.
    let tasks = result.data.unwrap().tasks;
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].day_of_month, 3);
    assert_eq!(tasks[0].day_end, 4);
    assert_eq!(tasks[0].cw_week, "CW23");
    assert_eq!(tasks[1].day_of_month, 10);
    assert_eq!(tasks[1].task_type, "TR");
    assert_eq!(tasks[1].cw_week, "CW24");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].row, Some(5));
}

#[test]
fn diagnostics_come_back_in_row_then_column_order() {
    let mut rows = matrix_rows();
    rows[6][4] = "9"; // invalid VSM current on the later row
    rows[5][2] = "x"; // invalid 5S current on the earlier row
    let bytes = xlsx(&rows);
    let result = import_assessment_matrix(&bytes, &ImportContext::default(), ParserConfig::shared());
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors[0].row < result.errors[1].row);
}

#[test]
fn undecodable_bytes_fail_structurally() {
    let result = import_skill_definitions(b"PK\x03\x04 truncated junk", ParserConfig::shared());
    assert!(!result.success);
    assert!(result.data.is_none());
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].row.is_none());
}
