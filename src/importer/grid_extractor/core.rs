use crate::config::ImportConfig;
use crate::domain::types::Weekday;
use crate::domain::workbook::Sheet;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::time_normalizer::TimeNormalizer;
use tracing::{debug, info};

use super::header::{detect_header, HeaderGeometry};

// ==========================================
// RawCell - 待解析的原始单元格
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RawCell {
    pub row: u32,           // 绝对行号（0 起始）
    pub col: u32,           // 绝对列号（0 起始）
    pub day: Weekday,
    pub start_time: String, // 已规范化 HH:MM
    pub text: String,       // 原始文本
}

// ==========================================
// RawGrid - 网格提取结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RawGrid {
    pub sheet_name: String,
    pub header: HeaderGeometry,
    pub last_row: u32,
    pub cells: Vec<RawCell>,
    /// 因时间无法规范化而被跳过的行数（仅用于日志）
    pub skipped_rows: usize,
}

impl RawGrid {
    pub fn total_cells(&self) -> usize {
        self.header.total_cells(self.last_row)
    }
}

// ==========================================
// GridExtractor - 网格提取器（无可变状态）
// ==========================================
pub struct GridExtractor<'a> {
    config: &'a ImportConfig,
    normalizer: TimeNormalizer,
}

impl<'a> GridExtractor<'a> {
    pub fn new(config: &'a ImportConfig) -> Self {
        Self {
            config,
            normalizer: TimeNormalizer,
        }
    }

    /// 仅识别表头几何
    pub fn detect_header(&self, sheet: &Sheet) -> ImportResult<HeaderGeometry> {
        detect_header(sheet, self.config).ok_or_else(|| {
            ImportError::Structure(format!(
                "header row / time column not found in sheet '{}'",
                sheet.name
            ))
        })
    }

    /// 提取工作表中的原始课表单元格
    ///
    /// # 返回
    /// - Ok(RawGrid): 表头几何 + 非空星期单元格（按行、按星期顺序）
    /// - Err(ImportError::Structure): 扫描窗口内找不到表头行/时间列
    pub fn extract(&self, sheet: &Sheet) -> ImportResult<RawGrid> {
        let header = self.detect_header(sheet)?;
        let last_row = sheet.range().map(|r| r.last_row).unwrap_or(header.header_row);

        info!(
            sheet = %sheet.name,
            header_row = header.header_row,
            time_col = header.time_col,
            day_columns = header.day_columns.len(),
            "表头识别完成"
        );

        let mut cells = Vec::new();
        let mut skipped_rows = 0;

        for row in header.header_row.saturating_add(1)..=last_row {
            let time_text = sheet.text(row, header.time_col);
            let start_time = match self.normalizer.normalize(&time_text) {
                Some(t) => t,
                None => {
                    debug!(row = row + 1, time_text = %time_text, "时间无法识别, 跳过整行");
                    skipped_rows += 1;
                    continue;
                }
            };

            for (&day, &col) in &header.day_columns {
                let text = sheet.text(row, col);
                if text.trim().is_empty() {
                    continue;
                }
                cells.push(RawCell {
                    row,
                    col,
                    day,
                    start_time: start_time.clone(),
                    text,
                });
            }
        }

        Ok(RawGrid {
            sheet_name: sheet.name.clone(),
            header,
            last_row,
            cells,
            skipped_rows,
        })
    }
}
