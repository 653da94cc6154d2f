// ==========================================
// 课表导入引擎 - 文件解码器适配
// ==========================================
// 职责: 原始字节 → Workbook（工作表名 → 单元格网格）
// 支持: Excel/ODS (.xlsx/.xlsm/.xlsb/.xls/.ods) / CSV (.csv)
// 说明: 解码本身交给 calamine / csv, 引擎从不接触字节
// ==========================================

use crate::domain::workbook::{CellValue, Sheet, SheetRange, Workbook};
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use csv::ReaderBuilder;
use regex::Regex;
use std::io::Cursor;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// 支持的表格扩展名
pub const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// CSV 没有工作表名时使用的默认名称
pub const DEFAULT_CSV_SHEET_NAME: &str = "Sheet1";

// ==========================================
// FileParser Trait
// ==========================================
pub trait FileParser: Send + Sync {
    /// 解码文件字节为工作簿
    ///
    /// # 参数
    /// - file_name: 文件名（用于判断格式/命名工作表）
    /// - bytes: 文件内容
    fn parse_to_workbook(&self, file_name: &str, bytes: &[u8]) -> ImportResult<Workbook>;
}

fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_workbook(&self, file_name: &str, bytes: &[u8]) -> ImportResult<Workbook> {
        let ext = extension_of(file_name);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 去掉 UTF-8 BOM
        let content = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);

        let mut reader = ReaderBuilder::new()
            .has_headers(false) // 表头位置由引擎识别
            .flexible(true) // 允许行长度不一致
            .from_reader(content);

        let sheet_name = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_CSV_SHEET_NAME)
            .to_string();

        let mut sheet = Sheet::new(sheet_name);
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            for (col_idx, value) in record.iter().enumerate() {
                sheet.set(row_idx as u32, col_idx as u32, CellValue::from(value));
            }
        }

        debug!(sheet = %sheet.name, "CSV 解码完成");
        Ok(Workbook::new(vec![sheet]))
    }
}

// ==========================================
// Excel Parser 实现（calamine 自动识别格式）
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_workbook(&self, file_name: &str, bytes: &[u8]) -> ImportResult<Workbook> {
        let ext = extension_of(file_name);
        if !SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::EmptyWorkbook);
        }

        let mut sheets = Vec::with_capacity(sheet_names.len());
        for name in sheet_names {
            let range = workbook.worksheet_range(&name)?;
            let mut sheet = Sheet::new(name.clone());

            if let (Some((start_row, start_col)), Some((end_row, end_col))) =
                (range.start(), range.end())
            {
                for (r, c, cell) in range.used_cells() {
                    sheet.set(
                        start_row + r as u32,
                        start_col + c as u32,
                        convert_cell(cell),
                    );
                }
                sheet = sheet.with_range(SheetRange {
                    first_row: start_row,
                    first_col: start_col,
                    last_row: end_row,
                    last_col: end_col,
                });
            }

            debug!(sheet = %name, "工作表解码完成");
            sheets.push(sheet);
        }

        Ok(Workbook::new(sheets))
    }
}

/// calamine 单元格 → CellValue
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::from(s.as_str()),
        // ODS: office:date-value / office:time-value 以 ISO 文本给出
        Data::DateTimeIso(s) => CellValue::Text(iso_datetime_to_text(s)),
        Data::DurationIso(s) => CellValue::Text(iso_duration_to_text(s)),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Text(excel_serial_to_text(dt.as_f64())),
    }
}

/// 电子表格日期系统的零点（1899-12-30）
fn serial_epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30).and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn minutes_to_hhmm(minutes: i64) -> String {
    let minutes = minutes.rem_euclid(24 * 60);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Excel 日期序列号 → 文本
///
/// - 序列号 < 1: 纯时间, 输出 HH:MM
/// - 其它: 输出 YYYY-MM-DD HH:MM; 超出日期范围时原样输出数值
pub fn excel_serial_to_text(serial: f64) -> String {
    let total_minutes = (serial * 24.0 * 60.0).round() as i64;
    if serial < 1.0 {
        return minutes_to_hhmm(total_minutes);
    }

    match serial_epoch()
        .zip(Duration::try_minutes(total_minutes))
        .and_then(|(base, offset)| base.checked_add_signed(offset))
    {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => serial.to_string(),
    }
}

/// ISO 8601 时长（如 PT09H00M00S）→ HH:MM
///
/// 不足一天的时长视为一天中的时刻; 其它情况原样输出
pub fn iso_duration_to_text(raw: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"^P(?:(\d+)D)?T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)(?:[.,]\d+)?S)?$")
            .expect("硬编码正则")
    });

    let trimmed = raw.trim();
    let caps = match pattern.captures(trimmed) {
        Some(caps) => caps,
        None => return raw.to_string(),
    };
    let part = |i: usize| -> i64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };

    let total_minutes = part(1)
        .saturating_mul(24 * 60)
        .saturating_add(part(2).saturating_mul(60))
        .saturating_add(part(3));
    if total_minutes < 24 * 60 {
        minutes_to_hhmm(total_minutes)
    } else {
        raw.to_string()
    }
}

/// ISO 8601 日期时间 → 文本
///
/// - 纯时间, 或日期为零点日 (1899-12-30): HH:MM
/// - 完整日期时间: YYYY-MM-DD HH:MM
/// - 其它（如纯日期）: 原样输出
pub fn iso_datetime_to_text(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        if serial_epoch().map(|e| e.date()) == Some(dt.date()) {
            return dt.format("%H:%M").to_string();
        }
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(t) = NaiveTime::parse_from_str(trimmed, "%H:%M:%S%.f") {
        return t.format("%H:%M").to_string();
    }
    raw.to_string()
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_workbook(&self, file_name: &str, bytes: &[u8]) -> ImportResult<Workbook> {
        let ext = extension_of(file_name);
        match ext.as_str() {
            "csv" => CsvParser.parse_to_workbook(file_name, bytes),
            e if SPREADSHEET_EXTENSIONS.contains(&e) => {
                ExcelParser.parse_to_workbook(file_name, bytes)
            }
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
