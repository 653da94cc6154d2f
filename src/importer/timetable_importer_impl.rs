// ==========================================
// 课表导入引擎 - 导入器实现
// ==========================================
// 职责: 整合导入流程, 从文件到导入预览
// 流程: 读取 → 解码 (calamine/csv) → 解析引擎 → 预览
// ==========================================

use crate::config::ImportConfig;
use crate::domain::session::ImportPreview;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{FileParser, UniversalFileParser};
use crate::importer::id_generator::{SessionIdGenerator, UuidIdGenerator};
use crate::importer::timetable_importer_trait::TimetableImporter;
use crate::importer::timetable_parser::TimetableParser;
use async_trait::async_trait;
use futures::future::join_all;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument};

// ==========================================
// TimetableImporterImpl - 课表导入器实现
// ==========================================
pub struct TimetableImporterImpl {
    // 解析引擎
    parser: TimetableParser,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    id_generator: Box<dyn SessionIdGenerator>,
}

impl TimetableImporterImpl {
    /// 使用默认组件创建导入器
    ///
    /// - 文件解析: UniversalFileParser（按扩展名选择）
    /// - 课次 ID: UUID v4
    pub fn new(config: ImportConfig) -> Self {
        Self::with_components(
            config,
            Box::new(UniversalFileParser),
            Box::new(UuidIdGenerator),
        )
    }

    /// 使用自定义组件创建导入器
    pub fn with_components(
        config: ImportConfig,
        file_parser: Box<dyn FileParser>,
        id_generator: Box<dyn SessionIdGenerator>,
    ) -> Self {
        Self {
            parser: TimetableParser::new(config),
            file_parser,
            id_generator,
        }
    }

    pub fn config(&self) -> &ImportConfig {
        self.parser.config()
    }
}

#[async_trait]
impl TimetableImporter for TimetableImporterImpl {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn import_from_bytes(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> ImportResult<ImportPreview> {
        let workbook = self.file_parser.parse_to_workbook(file_name, bytes)?;
        info!(sheets = ?workbook.sheet_names(), "文件解码完成");

        self.parser
            .parse_workbook(&workbook, self.id_generator.as_ref())
    }

    #[instrument(skip(self, path), fields(path = %path.display()))]
    async fn import_from_path(&self, path: &Path) -> ImportResult<ImportPreview> {
        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ImportError::FileNotFound(path.display().to_string()),
            _ => ImportError::from(e),
        })?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();

        self.import_from_bytes(file_name, &bytes).await
    }

    async fn batch_import(&self, paths: Vec<PathBuf>) -> Vec<ImportResult<ImportPreview>> {
        info!(count = paths.len(), "开始批量导入文件");

        // 为每个文件创建导入任务
        let import_tasks = paths.iter().map(|path| async move {
            let result = self.import_from_path(path).await;
            match &result {
                Ok(preview) => info!(
                    file = %path.display(),
                    sessions = preview.sessions.len(),
                    confidence = %preview.metadata.confidence,
                    "文件导入成功"
                ),
                Err(e) => error!(file = %path.display(), error = %e, "文件导入失败"),
            }
            result
        });

        // 并发执行所有导入任务
        let results = join_all(import_tasks).await;

        info!(
            total = results.len(),
            success = results.iter().filter(|r| r.is_ok()).count(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "批量导入完成"
        );

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Confidence, Weekday};
    use std::io::Write;
    use tempfile::TempDir;

    const WEEK_CSV: &str = "\
Time,Monday,Tuesday,Wednesday
9:00,Math (L): (Room3) Dr. Smith: (G1),,
2 PM,,Art,
";

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_import_from_bytes_csv() {
        let importer = TimetableImporterImpl::new(ImportConfig::default());
        let preview = importer
            .import_from_bytes("week.csv", WEEK_CSV.as_bytes())
            .await
            .unwrap();

        assert_eq!(preview.sessions.len(), 2);
        assert_eq!(preview.sessions[1].day, Weekday::Tuesday);
        assert_eq!(preview.sessions[1].start_time, "14:00");
        assert_eq!(preview.metadata.total_cells, 6);
        assert_eq!(preview.metadata.confidence, Confidence::High);
    }

    #[tokio::test]
    async fn test_import_from_path_missing_file() {
        let dir = TempDir::new().unwrap();
        let importer = TimetableImporterImpl::new(ImportConfig::default());

        let result = importer
            .import_from_path(&dir.path().join("missing.csv"))
            .await;
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_batch_import_isolates_failures() {
        let dir = TempDir::new().unwrap();
        let good = write_file(&dir, "good.csv", WEEK_CSV);
        let bad = write_file(&dir, "bad.csv", "Subject,Room\nMath,R1\n");
        let unsupported = write_file(&dir, "notes.txt", "hello");

        let importer = TimetableImporterImpl::new(ImportConfig::default());
        let results = importer.batch_import(vec![good, bad, unsupported]).await;

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(ImportError::Structure(_))));
        assert!(matches!(results[2], Err(ImportError::UnsupportedFormat(_))));
    }
}
