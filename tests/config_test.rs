// ==========================================
// 导入配置集成测试
// ==========================================
// 测试目标: 配置文件 → ConfigLoader → 解析引擎行为
// ==========================================


use std::io::Write;
use tempfile::NamedTempFile;
use test_helpers::{single_sheet_workbook, SequentialIds};
use timetable_import::domain::{Confidence, Sheet, Workbook};
use timetable_import::{ConfigLoader, ImportConfig, ImportError, TimetableParser};

fn config_file(json: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", json).unwrap();
    temp_file
}

#[test]
fn test_min_weekday_columns_changes_sheet_choice() {
    let three_days = Sheet::from_rows(
        "Short",
        &[vec!["Time", "Monday", "Tuesday", "Wednesday"], vec!["9:00", "Math", "", ""]],
    );
    let five_days = Sheet::from_rows(
        "Full",
        &[
            vec!["Time", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday"],
            vec!["9:00", "", "", "", "", "Art"],
        ],
    );
    let workbook = Workbook::new(vec![three_days, five_days]);

    let file = config_file(r#"{ "min_weekday_columns": 5 }"#);
    let config = ConfigLoader::load(Some(file.path())).unwrap();
    let preview = TimetableParser::new(config)
        .parse_workbook(&workbook, &SequentialIds::new())
        .unwrap();

    assert_eq!(preview.sessions.len(), 1);
    assert_eq!(preview.sessions[0].subject_name, "Art");

    // 默认配置下第一个工作表即满足条件
    let preview = TimetableParser::default()
        .parse_workbook(&workbook, &SequentialIds::new())
        .unwrap();
    assert_eq!(preview.sessions[0].subject_name, "Math");
}

#[test]
fn test_header_scan_rows_limits_detection() {
    let mut rows: Vec<Vec<&str>> = vec![vec!["Title"]; 4];
    rows.push(vec!["Time", "Monday", "Tuesday", "Wednesday"]);
    rows.push(vec!["9:00", "Math", "", ""]);
    let workbook = single_sheet_workbook("Deep", &rows);

    let config = ImportConfig {
        header_scan_rows: 2,
        ..ImportConfig::default()
    };
    let result = TimetableParser::new(config).parse_workbook(&workbook, &SequentialIds::new());
    assert!(matches!(result, Err(ImportError::Structure(_))));

    let preview = TimetableParser::default()
        .parse_workbook(&workbook, &SequentialIds::new())
        .unwrap();
    assert_eq!(preview.sessions.len(), 1);
}

#[test]
fn test_header_scan_cols_limits_day_columns() {
    let workbook = single_sheet_workbook(
        "Wide",
        &[
            vec!["Time", "", "", "Monday", "Tuesday", "Wednesday"],
            vec!["9:00", "", "", "Math", "Art", "PE"],
        ],
    );

    // 窗口只覆盖前 3 列: 找到时间列, 但没有任何星期列
    let config = ImportConfig {
        header_scan_cols: 2,
        ..ImportConfig::default()
    };
    let preview = TimetableParser::new(config)
        .parse_workbook(&workbook, &SequentialIds::new())
        .unwrap();
    assert!(preview.sessions.is_empty());
    assert_eq!(preview.metadata.total_cells, 0);
    assert_eq!(preview.metadata.confidence, Confidence::Low);

    let preview = TimetableParser::default()
        .parse_workbook(&workbook, &SequentialIds::new())
        .unwrap();
    assert_eq!(preview.sessions.len(), 3);
}

#[test]
fn test_invalid_values_are_rejected() {
    let file = config_file(r#"{ "min_weekday_columns": 0 }"#);
    let result = ConfigLoader::load_from_file(file.path());
    assert!(matches!(result, Err(ImportError::ConfigValueError { .. })));
}

#[test]
fn test_import_ratio_thresholds_from_file() {
    let file = config_file(r#"{ "import_high_ratio": 0.5, "import_medium_ratio": 0.25 }"#);
    let config = ConfigLoader::load_from_file(file.path()).unwrap();
    let workbook = single_sheet_workbook(
        "Week",
        &[vec!["Time", "Monday", "Tuesday", "Wednesday"], vec!["9:00", "Math", "", ""]],
    );

    // 第 1 个单元格失败: parsed = 3 - 1 = 2, ratio 0.67 ≥ 0.5
    let preview = TimetableParser::new(config)
        .parse_workbook(&workbook, &SequentialIds::failing_on(0))
        .unwrap();
    assert_eq!(preview.metadata.parsed_cells, 2);
    assert_eq!(preview.metadata.confidence, Confidence::High);
}
