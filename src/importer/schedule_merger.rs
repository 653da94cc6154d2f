// ==========================================
// 课表导入引擎 - 课表合并
// ==========================================
// 职责: 预览确认后, 按导入模式把课次写入已存课表
// 模式: REPLACE 整体替换 / MERGE 追加（按 星期+开始时间+科目 去重）
// 红线: 考勤计数只做保留/丢弃/置零, 不做任何计数运算
// ==========================================

use crate::domain::session::{ImportPreview, Session, StoredSchedule, SubjectAttendance};
use crate::domain::types::{ImportMode, Weekday};
use std::collections::HashSet;
use tracing::info;

/// 课次去重键: (星期, 开始时间, 科目名)
fn session_key(session: &Session) -> (Weekday, &str, &str) {
    (
        session.day,
        session.start_time.as_str(),
        session.subject_name.as_str(),
    )
}

pub struct ScheduleMerger;

impl ScheduleMerger {
    /// 应用导入预览
    ///
    /// # 参数
    /// - existing_sessions: 已存课次
    /// - existing_attendance: 已存考勤计数
    /// - preview: 用户确认的导入预览
    /// - mode: 导入模式
    ///
    /// # 返回
    /// - StoredSchedule: 新的课次列表与考勤计数
    pub fn apply(
        &self,
        existing_sessions: &[Session],
        existing_attendance: &[SubjectAttendance],
        preview: &ImportPreview,
        mode: ImportMode,
    ) -> StoredSchedule {
        let sessions = match mode {
            ImportMode::Replace => preview.sessions.clone(),
            ImportMode::Merge => Self::merge_sessions(existing_sessions, &preview.sessions),
        };
        let attendance = Self::reconcile_attendance(existing_attendance, &sessions);

        info!(
            mode = ?mode,
            sessions = sessions.len(),
            subjects = attendance.len(),
            "课表已应用导入预览"
        );

        StoredSchedule {
            sessions,
            attendance,
        }
    }

    /// MERGE: 保留已存课次, 追加键未出现过的新课次
    fn merge_sessions(existing: &[Session], incoming: &[Session]) -> Vec<Session> {
        let existing_keys: HashSet<_> = existing.iter().map(session_key).collect();

        let mut merged = existing.to_vec();
        merged.extend(
            incoming
                .iter()
                .filter(|s| !existing_keys.contains(&session_key(s)))
                .cloned(),
        );
        merged
    }

    /// 考勤计数对齐到结果课表中的科目集合
    ///
    /// - 仍存在的科目: 原样保留（保持原顺序）
    /// - 消失的科目: 丢弃
    /// - 新科目: 置零, 按首次出现顺序追加
    fn reconcile_attendance(
        existing: &[SubjectAttendance],
        sessions: &[Session],
    ) -> Vec<SubjectAttendance> {
        let mut subjects: Vec<&str> = Vec::new();
        let mut seen = HashSet::new();
        for session in sessions {
            if seen.insert(session.subject_name.as_str()) {
                subjects.push(session.subject_name.as_str());
            }
        }

        let mut attendance: Vec<SubjectAttendance> = existing
            .iter()
            .filter(|a| seen.contains(a.subject_name.as_str()))
            .cloned()
            .collect();

        let tracked: HashSet<String> = attendance.iter().map(|a| a.subject_name.clone()).collect();
        attendance.extend(
            subjects
                .into_iter()
                .filter(|name| !tracked.contains(*name))
                .map(SubjectAttendance::new),
        );
        attendance
    }
}
