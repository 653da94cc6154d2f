// ==========================================
// 课表导入引擎 - 课次 ID 生成
// ==========================================
// 职责: 为每个课次生成本次导入内唯一的 ID
// 说明: 生成失败属于单元格级错误, 整个单元格记为 UnparsedCell
// ==========================================

use crate::importer::error::ImportResult;
use uuid::Uuid;

/// 课次 ID 生成器接口
pub trait SessionIdGenerator: Send + Sync {
    /// 生成新的课次 ID
    fn next_id(&self) -> ImportResult<String>;
}

/// 默认实现: UUID v4
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl SessionIdGenerator for UuidIdGenerator {
    fn next_id(&self) -> ImportResult<String> {
        Ok(Uuid::new_v4().to_string())
    }
}
