// ==========================================
// 课表导入引擎 - 网格提取
// ==========================================
// 职责: 定位表头行、时间列、星期列; 逐行收集 (星期, 时间, 单元格文本)
// 输入: 选定的工作表
// 输出: 表头几何 + 原始单元格列表, 或结构错误
// ==========================================
// 注: 时间无法规范化的行整行静默跳过, 不产生诊断
// ==========================================

mod core;
mod header;

#[cfg(test)]
mod tests;

pub use self::core::{GridExtractor, RawCell, RawGrid};
pub use header::HeaderGeometry;
