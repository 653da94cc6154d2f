// ==========================================
// 课表导入引擎 - 导入配置
// ==========================================
// 职责: 表头扫描窗口、星期列阈值、置信度阈值
// 存储: JSON 文件（缺省时使用内置默认值）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "TIMETABLE_IMPORT_CONFIG";

/// 默认配置目录名（位于系统配置目录下）
pub const CONFIG_DIR_NAME: &str = "timetable-import";

/// 默认配置文件名
pub const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// 配置键（用于错误报告）
// ==========================================
pub mod config_keys {
    pub const HEADER_SCAN_ROWS: &str = "header_scan_rows";
    pub const HEADER_SCAN_COLS: &str = "header_scan_cols";
    pub const MIN_WEEKDAY_COLUMNS: &str = "min_weekday_columns";
    pub const LINE_HIGH_SCORE: &str = "line_high_score";
    pub const LINE_MEDIUM_SCORE: &str = "line_medium_score";
    pub const IMPORT_HIGH_RATIO: &str = "import_high_ratio";
    pub const IMPORT_MEDIUM_RATIO: &str = "import_medium_ratio";
}

// ==========================================
// ImportConfig - 导入配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// 表头扫描窗口: 起始行之后再扫描的行数（窗口共 n+1 行）
    pub header_scan_rows: u32,
    /// 表头扫描窗口: 起始列之后再扫描的列数
    pub header_scan_cols: u32,
    /// 判定为课表所需的最少星期数
    pub min_weekday_columns: usize,
    /// 单行得分 >= 此值 → high
    pub line_high_score: u32,
    /// 单行得分 >= 此值 → medium
    pub line_medium_score: u32,
    /// 整体解析率 >= 此值 → high
    pub import_high_ratio: f64,
    /// 整体解析率 >= 此值 → medium
    pub import_medium_ratio: f64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            header_scan_rows: 10,
            header_scan_cols: 10,
            min_weekday_columns: 3,
            line_high_score: 5,
            line_medium_score: 3,
            import_high_ratio: 0.8,
            import_medium_ratio: 0.6,
        }
    }
}

impl ImportConfig {
    /// 校验配置有效性
    ///
    /// # 规则
    /// 1. min_weekday_columns ∈ [1, 7]
    /// 2. line_medium_score <= line_high_score
    /// 3. 比例 ∈ [0, 1] 且 medium <= high
    pub fn validate(&self) -> ImportResult<()> {
        if self.min_weekday_columns == 0 || self.min_weekday_columns > 7 {
            return Err(ImportError::ConfigValueError {
                key: config_keys::MIN_WEEKDAY_COLUMNS.to_string(),
                message: format!("必须在 [1, 7] 内, 实际 {}", self.min_weekday_columns),
            });
        }

        if self.line_medium_score > self.line_high_score {
            return Err(ImportError::ConfigValueError {
                key: config_keys::LINE_MEDIUM_SCORE.to_string(),
                message: format!(
                    "不能大于 {} ({} > {})",
                    config_keys::LINE_HIGH_SCORE,
                    self.line_medium_score,
                    self.line_high_score
                ),
            });
        }

        for (key, ratio) in [
            (config_keys::IMPORT_HIGH_RATIO, self.import_high_ratio),
            (config_keys::IMPORT_MEDIUM_RATIO, self.import_medium_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(ImportError::ConfigValueError {
                    key: key.to_string(),
                    message: format!("比例必须在 [0, 1] 内, 实际 {}", ratio),
                });
            }
        }

        if self.import_medium_ratio > self.import_high_ratio {
            return Err(ImportError::ConfigValueError {
                key: config_keys::IMPORT_MEDIUM_RATIO.to_string(),
                message: format!(
                    "不能大于 {} ({} > {})",
                    config_keys::IMPORT_HIGH_RATIO,
                    self.import_medium_ratio,
                    self.import_high_ratio
                ),
            });
        }

        Ok(())
    }
}

// ==========================================
// ConfigLoader - 配置加载器
// ==========================================
// 查找顺序: 显式路径 → 环境变量 → 系统配置目录 → 内置默认
pub struct ConfigLoader;

impl ConfigLoader {
    /// 默认配置文件路径（系统配置目录不可用时为 None）
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// 解析应读取的配置文件路径
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        Self::default_path()
    }

    /// 加载配置
    ///
    /// # 说明
    /// - 显式指定的文件不存在 → 错误
    /// - 默认位置的文件不存在 → 使用内置默认值
    pub fn load(explicit: Option<&Path>) -> ImportResult<ImportConfig> {
        let path = match Self::resolve_path(explicit) {
            Some(p) => p,
            None => {
                debug!("系统配置目录不可用, 使用默认配置");
                return Ok(ImportConfig::default());
            }
        };

        if !path.exists() {
            if explicit.is_some() {
                return Err(ImportError::ConfigReadError {
                    path: path.display().to_string(),
                    message: "文件不存在".to_string(),
                });
            }
            debug!(path = %path.display(), "配置文件不存在, 使用默认配置");
            return Ok(ImportConfig::default());
        }

        let config = Self::load_from_file(&path)?;
        info!(path = %path.display(), "已加载导入配置");
        Ok(config)
    }

    /// 从指定 JSON 文件读取并校验配置
    pub fn load_from_file(path: &Path) -> ImportResult<ImportConfig> {
        let raw = std::fs::read_to_string(path).map_err(|e| ImportError::ConfigReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: ImportConfig =
            serde_json::from_str(&raw).map_err(|e| ImportError::ConfigReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }
}
