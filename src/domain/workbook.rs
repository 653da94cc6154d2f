// ==========================================
// 课表导入引擎 - 工作簿领域模型
// ==========================================
// 职责: 外部解码器产出的 工作表名 → 稀疏单元格网格
// 红线: 本模型对引擎只读, 引擎不接触原始字节/文件路径
// ==========================================

use std::collections::BTreeMap;

// ==========================================
// CellValue - 单元格值
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// 转换为显示文本（整数不带小数点, 如 9 而非 9.0）
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Bool(b) => b.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::from(value.as_str())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

// ==========================================
// SheetRange - 工作表已用区域（绝对坐标, 0 起始, 闭区间）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetRange {
    pub first_row: u32,
    pub first_col: u32,
    pub last_row: u32,
    pub last_col: u32,
}

impl SheetRange {
    /// 扩展区域以包含 (row, col)
    fn include(&mut self, row: u32, col: u32) {
        self.first_row = self.first_row.min(row);
        self.first_col = self.first_col.min(col);
        self.last_row = self.last_row.max(row);
        self.last_col = self.last_col.max(col);
    }

    /// 表头扫描窗口: 起始行/列 + span, 且不超出已用区域
    pub fn scan_window(&self, row_span: u32, col_span: u32) -> SheetRange {
        SheetRange {
            first_row: self.first_row,
            first_col: self.first_col,
            last_row: self.last_row.min(self.first_row.saturating_add(row_span)),
            last_col: self.last_col.min(self.first_col.saturating_add(col_span)),
        }
    }
}

// ==========================================
// Sheet - 工作表
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    cells: BTreeMap<(u32, u32), CellValue>,
    range: Option<SheetRange>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
            range: None,
        }
    }

    /// 按行文本构造（从 (0, 0) 开始, 空字符串视为空单元格）
    pub fn from_rows<S: AsRef<str>>(name: impl Into<String>, rows: &[Vec<S>]) -> Self {
        let mut sheet = Sheet::new(name);
        for (r, row) in rows.iter().enumerate() {
            for (c, text) in row.iter().enumerate() {
                sheet.set(r as u32, c as u32, CellValue::from(text.as_ref()));
            }
        }
        sheet
    }

    /// 写入单元格（空值不落盘, 但仍扩展已用区域）
    pub fn set(&mut self, row: u32, col: u32, value: CellValue) {
        match self.range.as_mut() {
            Some(range) => range.include(row, col),
            None => {
                self.range = Some(SheetRange {
                    first_row: row,
                    first_col: col,
                    last_row: row,
                    last_col: col,
                })
            }
        }
        if !matches!(value, CellValue::Empty) {
            self.cells.insert((row, col), value);
        }
    }

    /// 显式设置已用区域（解码器给出的区域可能大于实际有值的单元格）
    pub fn with_range(mut self, range: SheetRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn range(&self) -> Option<SheetRange> {
        self.range
    }

    pub fn get(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    /// 单元格文本（缺失 → 空字符串）
    pub fn text(&self, row: u32, col: u32) -> String {
        self.get(row, col).map(CellValue::to_text).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// ==========================================
// Workbook - 工作簿（有序工作表列表）
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}
