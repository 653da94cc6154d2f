// ==========================================
// 课表导入引擎 - 导入层
// ==========================================
// 职责: 课表电子表格 → 结构化课次预览
// 支持: Excel/ODS, CSV
// ==========================================

// 模块声明
pub mod confidence;
pub mod error;
pub mod file_parser;
pub mod grid_extractor;
pub mod id_generator;
pub mod line_parser;
pub mod preview_assembler;
pub mod schedule_merger;
pub mod sheet_locator;
pub mod time_normalizer;
pub mod timetable_importer_impl;
pub mod timetable_importer_trait;
pub mod timetable_parser;

// 重导出核心类型
pub use confidence::ConfidenceScorer;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use grid_extractor::{GridExtractor, HeaderGeometry, RawCell, RawGrid};
pub use id_generator::UuidIdGenerator;
pub use line_parser::LineParser;
pub use preview_assembler::PreviewAssembler;
pub use schedule_merger::ScheduleMerger;
pub use sheet_locator::SheetLocator;
pub use time_normalizer::TimeNormalizer;
pub use timetable_importer_impl::TimetableImporterImpl;
pub use timetable_parser::TimetableParser;

// 重导出 Trait 接口
pub use file_parser::FileParser;
pub use id_generator::SessionIdGenerator;
pub use timetable_importer_trait::TimetableImporter;
