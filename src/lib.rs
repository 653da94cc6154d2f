// ==========================================
// 课表导入引擎 - 核心库
// ==========================================
// 职责: 课表电子表格（Excel/ODS/CSV）→ 结构化课次预览
// 系统定位: 导入预览由用户确认后, 交由持久化协作方写入
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 解码适配与解析引擎
pub mod importer;

// 配置层 - 导入阈值
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Confidence, ImportMode, Weekday};

// 领域实体
pub use domain::{
    CellValue, ImportPreview, PreviewMetadata, Session, Sheet, StoredSchedule, SubjectAttendance,
    UnparsedCell, Workbook,
};

// 导入器
pub use importer::{
    ImportError, ImportResult, ScheduleMerger, TimetableImporter, TimetableImporterImpl,
    TimetableParser,
};

// 配置
pub use config::{ConfigLoader, ImportConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "课表导入引擎";
