// ==========================================
// 课表导入引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含解析逻辑, 不含 IO
// ==========================================

pub mod session;
pub mod types;
pub mod workbook;

// 重导出核心类型
pub use session::{
    ImportPreview, ParsedLine, PreviewMetadata, Session, StoredSchedule, SubjectAttendance,
    UnparsedCell,
};
pub use types::{Confidence, ImportMode, Weekday};
pub use workbook::{CellValue, Sheet, SheetRange, Workbook};
