// ==========================================
// 课表导入引擎 - 配置层
// ==========================================
// 职责: 导入配置定义、加载与校验
// 存储: JSON 文件
// ==========================================

pub mod import_config;

// 重导出核心配置类型
pub use import_config::{config_keys, ConfigLoader, ImportConfig, CONFIG_PATH_ENV};
