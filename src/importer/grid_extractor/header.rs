use crate::config::ImportConfig;
use crate::domain::types::Weekday;
use crate::domain::workbook::Sheet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// HeaderGeometry - 表头几何（不可变扫描结果）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderGeometry {
    /// 表头行（绝对行号, 0 起始）
    pub header_row: u32,
    /// 时间列（绝对列号, 0 起始）
    pub time_col: u32,
    /// 星期 → 列号
    pub day_columns: BTreeMap<Weekday, u32>,
}

impl HeaderGeometry {
    /// 期望的单元格总数: (末行 - 表头行) × 星期列数
    ///
    /// 时间无法识别而被跳过的行同样计入
    pub fn total_cells(&self, last_row: u32) -> usize {
        last_row.saturating_sub(self.header_row) as usize * self.day_columns.len()
    }
}

/// 扫描过程中的累积状态
#[derive(Default)]
struct HeaderScan {
    time_cell: Option<(u32, u32)>,
    day_columns: BTreeMap<Weekday, u32>,
}

impl HeaderScan {
    /// 吸收一个单元格（后出现者覆盖先出现者）
    fn absorb(mut self, row: u32, col: u32, lowered: &str) -> Self {
        if lowered.contains("time") {
            self.time_cell = Some((row, col));
        }
        if let Some(day) = Weekday::find_in(lowered) {
            self.day_columns.insert(day, col);
        }
        self
    }

    fn is_complete(&self, min_weekday_columns: usize) -> bool {
        self.time_cell.is_some() && self.day_columns.len() >= min_weekday_columns
    }

    fn finish(self) -> Option<HeaderGeometry> {
        let (header_row, time_col) = self.time_cell?;
        Some(HeaderGeometry {
            header_row,
            time_col,
            day_columns: self.day_columns,
        })
    }
}

/// 在扫描窗口内查找表头
///
/// # 规则
/// - 文本含 "time" 的单元格 → 表头行/时间列候选, 后者覆盖前者
/// - 文本含星期名的单元格 → 星期列, 同一星期后者覆盖前者
/// - 某行结束时已有表头且星期列数达标 → 停止扫描
///
/// # 返回
/// - None: 窗口内没有任何 "time" 单元格
pub(super) fn detect_header(sheet: &Sheet, config: &ImportConfig) -> Option<HeaderGeometry> {
    let range = sheet.range()?;
    let window = range.scan_window(config.header_scan_rows, config.header_scan_cols);

    let mut scan = HeaderScan::default();
    for row in window.first_row..=window.last_row {
        scan = (window.first_col..=window.last_col).fold(scan, |acc, col| {
            let lowered = sheet.text(row, col).trim().to_lowercase();
            if lowered.is_empty() {
                acc
            } else {
                acc.absorb(row, col, &lowered)
            }
        });

        if scan.is_complete(config.min_weekday_columns) {
            break;
        }
    }

    scan.finish()
}
