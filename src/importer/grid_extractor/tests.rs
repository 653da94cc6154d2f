use super::*;
use crate::config::ImportConfig;
use crate::domain::types::Weekday;
use crate::domain::workbook::{CellValue, Sheet};
use crate::importer::error::ImportError;

// ==========================================
// 测试辅助函数
// ==========================================

fn basic_sheet() -> Sheet {
    Sheet::from_rows(
        "Week",
        &[
            vec!["Time", "Monday", "Tuesday", "Wednesday"],
            vec!["9:00", "Math (L): (R1) Dr. A: (G1)", "", "Art"],
            vec!["lunch", "Lunch Break", "Lunch Break", "Lunch Break"],
            vec!["2 PM", "", "Physics", ""],
        ],
    )
}

// ==========================================
// 表头识别
// ==========================================

#[test]
fn test_detect_basic_header() {
    let config = ImportConfig::default();
    let header = GridExtractor::new(&config).detect_header(&basic_sheet()).unwrap();

    assert_eq!(header.header_row, 0);
    assert_eq!(header.time_col, 0);
    assert_eq!(header.day_columns.len(), 3);
    assert_eq!(header.day_columns[&Weekday::Monday], 1);
    assert_eq!(header.day_columns[&Weekday::Wednesday], 3);
}

#[test]
fn test_missing_time_column_is_structure_error() {
    let config = ImportConfig::default();
    let sheet = Sheet::from_rows(
        "NoTime",
        &[vec!["Slot", "Monday", "Tuesday"], vec!["9:00", "Math", "Art"]],
    );

    let err = GridExtractor::new(&config).extract(&sheet).unwrap_err();
    assert!(matches!(err, ImportError::Structure(_)));
    assert!(err.to_string().contains("could not find timetable structure"));
}

#[test]
fn test_empty_sheet_is_structure_error() {
    let config = ImportConfig::default();
    let err = GridExtractor::new(&config).extract(&Sheet::new("Empty")).unwrap_err();
    assert!(matches!(err, ImportError::Structure(_)));
}

#[test]
fn test_last_time_cell_wins_before_days_complete() {
    // 第 0 行有 "Timetable" 标题, 第 2 行才是真正的表头
    let config = ImportConfig::default();
    let sheet = Sheet::from_rows(
        "Titled",
        &[
            vec!["Timetable 2024", "", "", ""],
            vec!["", "", "", ""],
            vec!["Time", "Monday", "Tuesday", "Wednesday"],
            vec!["8:00", "Math", "Art", "Music"],
        ],
    );

    let header = GridExtractor::new(&config).detect_header(&sheet).unwrap();
    assert_eq!(header.header_row, 2);
    assert_eq!(header.time_col, 0);
}

#[test]
fn test_last_time_cell_in_same_row_wins() {
    let config = ImportConfig::default();
    let sheet = Sheet::from_rows(
        "TwoTimes",
        &[
            vec!["Time", "Monday", "Tuesday", "Wednesday", "Time (end)"],
            vec!["9:00", "Math", "Art", "Music", "10:00"],
        ],
    );

    let header = GridExtractor::new(&config).detect_header(&sheet).unwrap();
    assert_eq!(header.time_col, 4);
}

#[test]
fn test_last_day_column_wins() {
    let config = ImportConfig::default();
    let sheet = Sheet::from_rows(
        "DupDays",
        &[vec![
            "Time", "Monday", "Tuesday", "Wednesday", "Monday (extra)",
        ]],
    );

    let header = GridExtractor::new(&config).detect_header(&sheet).unwrap();
    assert_eq!(header.day_columns[&Weekday::Monday], 4);
}

#[test]
fn test_scan_stops_once_header_complete() {
    // 表头完整后, 后续行中的 "time" 不再覆盖
    let config = ImportConfig::default();
    let sheet = Sheet::from_rows(
        "Stops",
        &[
            vec!["Time", "Monday", "Tuesday", "Wednesday"],
            vec!["9:00", "Free time", "", ""],
        ],
    );

    let header = GridExtractor::new(&config).detect_header(&sheet).unwrap();
    assert_eq!(header.header_row, 0);
    assert_eq!(header.time_col, 0);
}

#[test]
fn test_incomplete_header_keeps_scanning_window() {
    // 星期列不足时继续扫描, 后续行的 "time" 覆盖表头行
    let config = ImportConfig::default();
    let sheet = Sheet::from_rows(
        "Sparse",
        &[
            vec!["Time", "Monday", "Tuesday"],
            vec!["9:00", "Free time", ""],
        ],
    );

    let header = GridExtractor::new(&config).detect_header(&sheet).unwrap();
    assert_eq!(header.header_row, 1);
    assert_eq!(header.time_col, 1);
}

// ==========================================
// 数据行遍历
// ==========================================

#[test]
fn test_extract_collects_non_blank_cells() {
    let config = ImportConfig::default();
    let grid = GridExtractor::new(&config).extract(&basic_sheet()).unwrap();

    // "lunch" 行的时间无法识别, 整行跳过
    assert_eq!(grid.skipped_rows, 1);
    assert_eq!(grid.cells.len(), 3);

    assert_eq!(grid.cells[0].day, Weekday::Monday);
    assert_eq!(grid.cells[0].start_time, "09:00");
    assert_eq!(grid.cells[1].day, Weekday::Wednesday);
    assert_eq!(grid.cells[1].text, "Art");
    assert_eq!(grid.cells[2].day, Weekday::Tuesday);
    assert_eq!(grid.cells[2].start_time, "14:00");
    assert_eq!((grid.cells[2].row, grid.cells[2].col), (3, 2));
}

#[test]
fn test_total_cells_counts_skipped_rows() {
    let config = ImportConfig::default();
    let grid = GridExtractor::new(&config).extract(&basic_sheet()).unwrap();

    // (3 - 0) × 3
    assert_eq!(grid.total_cells(), 9);
}

#[test]
fn test_numeric_time_cells() {
    let config = ImportConfig::default();
    let mut sheet = Sheet::from_rows("Numeric", &[vec!["Time", "Monday", "Tuesday", "Wednesday"]]);
    sheet.set(1, 0, CellValue::Number(9.0));
    sheet.set(1, 1, CellValue::from("Math"));

    let grid = GridExtractor::new(&config).extract(&sheet).unwrap();
    assert_eq!(grid.cells.len(), 1);
    assert_eq!(grid.cells[0].start_time, "09:00");
}

#[test]
fn test_header_without_days_yields_no_cells() {
    let config = ImportConfig::default();
    let sheet = Sheet::from_rows("OnlyTime", &[vec!["Time", "Room"], vec!["9:00", "A"]]);

    let grid = GridExtractor::new(&config).extract(&sheet).unwrap();
    assert!(grid.cells.is_empty());
    assert_eq!(grid.total_cells(), 0);
}
