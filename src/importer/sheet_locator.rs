// ==========================================
// 课表导入引擎 - 工作表定位
// ==========================================
// 职责: 在多工作表工作簿中选出承载课表的工作表
// 规则: 扫描窗口内同时出现 "time" 与 >= 3 个不同星期 → 命中（一个单元格只记一个星期）
// 兜底: 无命中时返回第一个工作表（即使并非课表）
// ==========================================

use crate::config::ImportConfig;
use crate::domain::types::Weekday;
use crate::domain::workbook::{Sheet, Workbook};
use std::collections::BTreeSet;
use tracing::debug;

// ==========================================
// SheetLocator - 工作表定位器（无可变状态）
// ==========================================
pub struct SheetLocator<'a> {
    config: &'a ImportConfig,
}

impl<'a> SheetLocator<'a> {
    pub fn new(config: &'a ImportConfig) -> Self {
        Self { config }
    }

    /// 选出课表所在工作表
    ///
    /// # 返回
    /// - Some(&Sheet): 首个命中的工作表; 无命中时为第一个工作表
    /// - None: 工作簿为空
    pub fn locate<'w>(&self, workbook: &'w Workbook) -> Option<&'w Sheet> {
        for sheet in &workbook.sheets {
            if self.looks_like_timetable(sheet) {
                debug!(sheet = %sheet.name, "命中课表工作表");
                return Some(sheet);
            }
        }

        let fallback = workbook.sheets.first();
        if let Some(sheet) = fallback {
            debug!(sheet = %sheet.name, "未命中课表工作表, 回退到第一个工作表");
        }
        fallback
    }

    /// 扫描窗口内是否同时出现 "time" 与足够多的星期
    fn looks_like_timetable(&self, sheet: &Sheet) -> bool {
        let range = match sheet.range() {
            Some(r) => r,
            None => return false,
        };
        let window = range.scan_window(self.config.header_scan_rows, self.config.header_scan_cols);

        let mut has_time = false;
        let mut days_seen: BTreeSet<Weekday> = BTreeSet::new();

        for row in window.first_row..=window.last_row {
            for col in window.first_col..=window.last_col {
                let text = sheet.text(row, col).trim().to_lowercase();
                if text.is_empty() {
                    continue;
                }

                if text.contains("time") {
                    has_time = true;
                }
                // 与表头识别一致: 每个单元格只认一个星期（按周序取第一个）
                days_seen.extend(Weekday::find_in(&text));

                if has_time && days_seen.len() >= self.config.min_weekday_columns {
                    return true;
                }
            }
        }

        false
    }
}
