// ==========================================
// 课表导入引擎 - 命令行入口
// ==========================================
// 用法: timetable-import <file> [--config <path>] [--merge-into <schedule.json>] [--mode merge|replace]
// 输出: 导入预览 (JSON) → stdout; 日志 → stderr
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use timetable_import::domain::StoredSchedule;
use timetable_import::{
    logging, ConfigLoader, ImportMode, ScheduleMerger, TimetableImporter, TimetableImporterImpl,
};

/// 导入模式（命令行取值）
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// 在已存课表上追加新课次
    Merge,
    /// 用预览整体替换已存课次
    Replace,
}

impl From<ModeArg> for ImportMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Merge => ImportMode::Merge,
            ModeArg::Replace => ImportMode::Replace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "timetable-import", version)]
#[command(about = "课表导入引擎 - 从电子表格提取课表预览", long_about = None)]
struct CliArgs {
    /// 课表文件 (.xlsx/.xlsm/.xlsb/.xls/.ods/.csv)
    file: PathBuf,

    /// 导入配置文件 (JSON)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// 将预览写入该课表文件 (JSON, 不存在时新建)
    #[arg(long, value_name = "SCHEDULE")]
    merge_into: Option<PathBuf>,

    /// 写入课表时的导入模式
    #[arg(long, value_enum, ignore_case = true, default_value_t = ModeArg::Merge)]
    mode: ModeArg,
}

/// 读取已存课表（文件不存在 → 空课表）
fn load_schedule(path: &Path) -> Result<StoredSchedule> {
    if !path.exists() {
        return Ok(StoredSchedule::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("读取课表失败: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("课表格式错误: {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CliArgs::parse();
    logging::init();

    tracing::info!(version = timetable_import::VERSION, file = %cli.file.display(), "开始导入课表");

    let config = ConfigLoader::load(cli.config.as_deref())?;
    let importer = TimetableImporterImpl::new(config);
    let preview = importer.import_from_path(&cli.file).await?;

    println!("{}", serde_json::to_string_pretty(&preview)?);

    if let Some(target) = cli.merge_into {
        let existing = load_schedule(&target)?;
        let schedule = ScheduleMerger.apply(
            &existing.sessions,
            &existing.attendance,
            &preview,
            cli.mode.into(),
        );

        std::fs::write(&target, serde_json::to_string_pretty(&schedule)?)
            .with_context(|| format!("写入课表失败: {}", target.display()))?;
        tracing::info!(path = %target.display(), sessions = schedule.sessions.len(), "课表已写入");
    }

    Ok(())
}
