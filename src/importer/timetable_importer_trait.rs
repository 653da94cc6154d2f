// ==========================================
// 课表导入引擎 - 导入器 Trait
// ==========================================
// 职责: 定义课表导入接口（不包含实现）
// 说明: 解码器/文件读取属于外层, 解析引擎本身保持同步、无 IO
// ==========================================

use crate::domain::session::ImportPreview;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

// ==========================================
// TimetableImporter Trait
// ==========================================
// 用途: 课表导入主接口
// 实现者: TimetableImporterImpl
#[async_trait]
pub trait TimetableImporter: Send + Sync {
    /// 从内存中的文件内容导入
    ///
    /// # 参数
    /// - file_name: 文件名（决定解码格式）
    /// - bytes: 文件内容
    ///
    /// # 返回
    /// - Ok(ImportPreview): 导入预览（未写入任何存储）
    /// - Err: 格式不支持、解码失败、找不到课表结构等
    async fn import_from_bytes(&self, file_name: &str, bytes: &[u8])
        -> ImportResult<ImportPreview>;

    /// 从文件路径导入
    ///
    /// # 返回
    /// - Err(ImportError::FileNotFound): 文件不存在
    async fn import_from_path(&self, path: &Path) -> ImportResult<ImportPreview>;

    /// 批量导入多个文件（并发执行）
    ///
    /// # 说明
    /// - 每个文件独立导入, 结果与输入顺序一一对应
    /// - 某个文件失败不影响其他文件
    async fn batch_import(&self, paths: Vec<PathBuf>) -> Vec<ImportResult<ImportPreview>>;
}
