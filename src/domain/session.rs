// ==========================================
// 课表导入引擎 - 课次领域模型
// ==========================================
// 职责: Session / ParsedLine / UnparsedCell / ImportPreview
// 红线: Session 只由引擎在解析时创建, 考勤字段恒为空
// ==========================================

use crate::domain::types::{Confidence, Weekday};
use serde::{Deserialize, Serialize};

// ==========================================
// Session - 课次
// ==========================================
// 对齐: 导出 JSON (snake_case 字段)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,                       // 本次导入内唯一
    pub day: Weekday,                     // 星期
    pub start_time: String,               // 规范化 HH:MM (24 小时制)
    pub duration_slots: u32,              // 固定为 1
    pub subject_name: String,             // 科目名
    pub session_type: Option<String>,     // 类型代码 (P/L/T/F/R 组合)
    pub room: Option<String>,             // 教室/代码
    pub lecturer: Option<String>,         // 教师
    pub groups: Vec<String>,              // 班组代码（保持原顺序）
    pub notes: String,                    // 恒为空字符串
    pub attendance_marked: Option<bool>,  // 恒为 null, 由考勤模块回填
}

impl Session {
    /// 单课次的固定时段数
    pub const DEFAULT_DURATION_SLOTS: u32 = 1;

    /// 由解析结果构造课次（空字段 → None）
    pub fn from_parsed(id: String, day: Weekday, start_time: String, line: &ParsedLine) -> Self {
        Self {
            id,
            day,
            start_time,
            duration_slots: Self::DEFAULT_DURATION_SLOTS,
            subject_name: line.subject_name.clone(),
            session_type: non_empty(&line.session_type),
            room: non_empty(&line.room_or_code),
            lecturer: non_empty(&line.lecturer),
            groups: line.groups.clone(),
            notes: String::new(),
            attendance_marked: None,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// ==========================================
// ParsedLine - 单行解析结果（瞬态）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedLine {
    pub subject_name: String,
    pub session_type: String,
    pub room_or_code: String,
    pub lecturer: String,
    pub groups: Vec<String>,
    pub raw_text: String,
    pub confidence: Confidence,
}

// ==========================================
// UnparsedCell - 无法解析的单元格（诊断信息, 非课次）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnparsedCell {
    pub row: u32,        // 1 起始
    pub col: u32,        // 1 起始
    pub content: String, // 原始单元格文本
}

// ==========================================
// ImportPreview - 导入预览（引擎唯一输出）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreview {
    pub sessions: Vec<Session>,
    pub unparsed_cells: Vec<UnparsedCell>,
    pub metadata: PreviewMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewMetadata {
    pub total_cells: usize,
    pub parsed_cells: usize,
    pub confidence: Confidence,
}

// ==========================================
// SubjectAttendance - 科目考勤计数（由考勤模块维护, 此处只做保留/丢弃）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectAttendance {
    pub subject_name: String,
    pub attended: u32,
    pub total: u32,
}

impl SubjectAttendance {
    pub fn new(subject_name: impl Into<String>) -> Self {
        Self {
            subject_name: subject_name.into(),
            attended: 0,
            total: 0,
        }
    }
}

// ==========================================
// StoredSchedule - 持久化协作方持有的课表快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoredSchedule {
    pub sessions: Vec<Session>,
    pub attendance: Vec<SubjectAttendance>,
}
