// ==========================================
// BOQ 策略模板迁移工具 - 命令行入口
// ==========================================
// 命令:
//   import-boq (importBoq): CSV → 模板服务
//   export-boq (exportBoq): 策略库 → CSV
// ==========================================

use anyhow::{Context, Result};
use boq_migrate::logging::{self, LogOptions};
use boq_migrate::{BoqExporter, ImportPipeline};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "boq-migrate")]
#[command(about = "BOQ 策略模板迁移工具：CSV 导入模板服务 / 策略库导出 CSV")]
#[command(version)]
struct Cli {
    /// 日志级别（RUST_LOG 优先）
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// 以 JSON 格式输出日志
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 导入 BOQ 策略 CSV 到模板服务
    #[command(alias = "importBoq")]
    ImportBoq {
        /// 导入配置文件路径（boq-import-config.json）
        #[arg(short = 'f', long)]
        config: PathBuf,
    },

    /// 从策略库导出 BOQ 记录为 CSV
    #[command(alias = "exportBoq")]
    ExportBoq {
        /// 导出配置文件路径（boq-export-config.json）
        #[arg(short = 'f', long)]
        config: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(&LogOptions {
        level: cli.log_level.clone(),
        json: cli.log_json,
    });

    info!("==================================================");
    info!("{} v{}", boq_migrate::APP_NAME, boq_migrate::VERSION);
    info!("==================================================");
    info!(args = ?std::env::args().collect::<Vec<_>>(), "命令行参数");

    let result = match &cli.command {
        Commands::ImportBoq { config } => run_import(config).await,
        Commands::ExportBoq { config } => run_export(config),
    };

    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("执行失败: {:#}", e);
            ExitCode::FAILURE
        }
    };

    info!("Done. Exit application.");
    code
}

async fn run_import(config_path: &Path) -> Result<()> {
    let pipeline = ImportPipeline::from_config_file(config_path)
        .with_context(|| format!("加载导入配置失败: {}", config_path.display()))?;
    let summary = pipeline.run().await?;

    info!(
        run_id = %summary.run_id,
        batches = summary.progress.batches_committed,
        records = summary.progress.records_committed,
        elapsed_ms = summary.elapsed_ms,
        "导入汇总"
    );
    Ok(())
}

fn run_export(config_path: &Path) -> Result<()> {
    let exporter = BoqExporter::from_config_file(config_path)
        .with_context(|| format!("初始化导出失败: {}", config_path.display()))?;
    let rows = exporter.execute()?;

    info!(rows = rows, file = %exporter.target().display(), "导出汇总");
    Ok(())
}
