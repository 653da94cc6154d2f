// ==========================================
// 课表导入引擎 - 预览汇总
// ==========================================
// 职责: 汇总课次、未解析单元格与元数据, 生成 ImportPreview
// 红线: 此处不做额外校验
// ==========================================

use crate::config::ImportConfig;
use crate::domain::session::{ImportPreview, PreviewMetadata, Session, UnparsedCell};
use crate::importer::confidence::ConfidenceScorer;

pub struct PreviewAssembler<'a> {
    scorer: ConfidenceScorer<'a>,
}

impl<'a> PreviewAssembler<'a> {
    pub fn new(config: &'a ImportConfig) -> Self {
        Self {
            scorer: ConfidenceScorer::new(config),
        }
    }

    /// 生成导入预览
    ///
    /// parsed_cells = total_cells - 未解析单元格数
    pub fn assemble(
        &self,
        sessions: Vec<Session>,
        unparsed_cells: Vec<UnparsedCell>,
        total_cells: usize,
    ) -> ImportPreview {
        let parsed_cells = total_cells.saturating_sub(unparsed_cells.len());
        let confidence = self.scorer.import_confidence(total_cells, parsed_cells);

        ImportPreview {
            sessions,
            unparsed_cells,
            metadata: PreviewMetadata {
                total_cells,
                parsed_cells,
                confidence,
            },
        }
    }
}
