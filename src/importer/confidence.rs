// ==========================================
// 课表导入引擎 - 置信度评分
// ==========================================
// 职责: 单行解析置信度 + 整体导入置信度
// 红线: 结果恒为 low / medium / high 之一
// ==========================================

use crate::config::ImportConfig;
use crate::domain::types::Confidence;

// ==========================================
// ConfidenceScorer - 置信度评分器
// ==========================================
pub struct ConfidenceScorer<'a> {
    config: &'a ImportConfig,
}

impl<'a> ConfidenceScorer<'a> {
    pub fn new(config: &'a ImportConfig) -> Self {
        Self { config }
    }

    /// 单行字段得分
    ///
    /// # 规则
    /// - 科目名长度 > 3: +2
    /// - 类型非空: +1
    /// - 教室非空: +1
    /// - 教师长度 > 3: +1
    /// - 班组非空: +1
    pub fn line_score(
        subject_name: &str,
        session_type: &str,
        room_or_code: &str,
        lecturer: &str,
        groups: &[String],
    ) -> u32 {
        let mut score = 0;
        if subject_name.chars().count() > 3 {
            score += 2;
        }
        if !session_type.is_empty() {
            score += 1;
        }
        if !room_or_code.is_empty() {
            score += 1;
        }
        if lecturer.chars().count() > 3 {
            score += 1;
        }
        if !groups.is_empty() {
            score += 1;
        }
        score
    }

    /// 单行得分 → 置信度
    pub fn line_confidence(&self, score: u32) -> Confidence {
        if score >= self.config.line_high_score {
            Confidence::High
        } else if score >= self.config.line_medium_score {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    /// 整体导入置信度
    ///
    /// # 说明
    /// - ratio = parsed_cells / max(total_cells, 1), total_cells = 0 时不会除零
    pub fn import_confidence(&self, total_cells: usize, parsed_cells: usize) -> Confidence {
        if total_cells == 0 {
            return Confidence::Low;
        }
        let ratio = parsed_cells as f64 / total_cells.max(1) as f64;
        if ratio >= self.config.import_high_ratio {
            Confidence::High
        } else if ratio >= self.config.import_medium_ratio {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}
