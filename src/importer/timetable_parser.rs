// ==========================================
// 课表导入引擎 - 解析主流程
// ==========================================
// 流程: 工作表定位 → 网格提取 → (逐单元格) 行解析 ∘ 时间规范化 → 置信度 → 预览汇总
// 红线: 纯计算, 无 IO, 无跨调用可变状态; 相同输入结果确定（ID 除外）
// ==========================================
// 失败边界:
// - 单行无法解析: 静默丢弃该行
// - 单元格内出现意外错误: 整个单元格（含已解析的行）记为一条 UnparsedCell
// - 找不到表头/时间列: 整个导入失败
// ==========================================

use crate::config::ImportConfig;
use crate::domain::session::{ImportPreview, Session, UnparsedCell};
use crate::domain::workbook::{Sheet, Workbook};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::grid_extractor::{GridExtractor, RawCell};
use crate::importer::id_generator::SessionIdGenerator;
use crate::importer::line_parser::{split_lines, LineParser};
use crate::importer::preview_assembler::PreviewAssembler;
use crate::importer::sheet_locator::SheetLocator;
use tracing::{debug, info, instrument, warn};

// ==========================================
// TimetableParser - 课表解析引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct TimetableParser {
    config: ImportConfig,
}

impl TimetableParser {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// 解析整个工作簿
    ///
    /// # 返回
    /// - Ok(ImportPreview): 导入预览
    /// - Err(ImportError::EmptyWorkbook): 工作簿无工作表
    /// - Err(ImportError::Structure): 选中的工作表找不到表头/时间列
    pub fn parse_workbook(
        &self,
        workbook: &Workbook,
        ids: &dyn SessionIdGenerator,
    ) -> ImportResult<ImportPreview> {
        let sheet = SheetLocator::new(&self.config)
            .locate(workbook)
            .ok_or(ImportError::EmptyWorkbook)?;
        self.parse_sheet(sheet, ids)
    }

    /// 解析单个工作表
    #[instrument(skip(self, sheet, ids), fields(sheet = %sheet.name))]
    pub fn parse_sheet(
        &self,
        sheet: &Sheet,
        ids: &dyn SessionIdGenerator,
    ) -> ImportResult<ImportPreview> {
        let grid = GridExtractor::new(&self.config).extract(sheet)?;
        let line_parser = LineParser::new(&self.config);

        let mut sessions = Vec::new();
        let mut unparsed_cells = Vec::new();

        for cell in &grid.cells {
            match self.parse_cell(&line_parser, cell, ids) {
                Ok(mut cell_sessions) => sessions.append(&mut cell_sessions),
                Err(e) => {
                    warn!(row = cell.row + 1, col = cell.col + 1, error = %e, "单元格解析失败, 整格丢弃");
                    unparsed_cells.push(UnparsedCell {
                        row: cell.row + 1,
                        col: cell.col + 1,
                        content: cell.text.clone(),
                    });
                }
            }
        }

        let preview = PreviewAssembler::new(&self.config).assemble(
            sessions,
            unparsed_cells,
            grid.total_cells(),
        );

        info!(
            sessions = preview.sessions.len(),
            unparsed = preview.unparsed_cells.len(),
            skipped_rows = grid.skipped_rows,
            total_cells = preview.metadata.total_cells,
            parsed_cells = preview.metadata.parsed_cells,
            confidence = %preview.metadata.confidence,
            "课表解析完成"
        );

        Ok(preview)
    }

    /// 解析单个单元格（多行 = 同一时段的多个课次）
    ///
    /// 任一行产生错误时整个单元格作废, 已解析的行一并丢弃
    fn parse_cell(
        &self,
        line_parser: &LineParser<'_>,
        cell: &RawCell,
        ids: &dyn SessionIdGenerator,
    ) -> ImportResult<Vec<Session>> {
        let mut sessions = Vec::new();
        for line in split_lines(&cell.text) {
            let parsed = match line_parser.parse_line(line) {
                Some(p) => p,
                None => {
                    debug!(row = cell.row + 1, col = cell.col + 1, line = %line, "行无法解析, 已丢弃");
                    continue;
                }
            };
            debug!(subject = %parsed.subject_name, confidence = %parsed.confidence, "行解析完成");

            let id = ids.next_id()?;
            sessions.push(Session::from_parsed(
                id,
                cell.day,
                cell.start_time.clone(),
                &parsed,
            ));
        }
        Ok(sessions)
    }
}
