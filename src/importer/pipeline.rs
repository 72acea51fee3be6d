// ==========================================
// BOQ 策略模板迁移工具 - 导入编排器
// ==========================================
// 状态机:
//   Init → Authenticated → BootstrapPublished → Streaming → (Flushing)* → Done
//   任意状态出错 → Failed（终止，不再处理后续行）
// ==========================================
// 流程: 认证 → 发布分类类型 → 逐行 解析 → 层级 → 模板 → 累加 → 满批提交
// 红线: 严格顺序执行；一行转换完成后才读下一行，一批提交完成后才继续累加
// ==========================================

use crate::config::ImportConfig;
use crate::importer::batch_accumulator::BatchAccumulator;
use crate::importer::bootstrap::BootstrapMetadata;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::record_parser::RecordParser;
use crate::importer::row_transformer::RowTransformer;
use crate::service::{HttpSessionProvider, SessionProvider, TemplateService};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

// ==========================================
// PipelineState - 编排器状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineState {
    Init,
    Authenticated,
    BootstrapPublished,
    Streaming,
    Flushing,
    Done,
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Init => write!(f, "INIT"),
            PipelineState::Authenticated => write!(f, "AUTHENTICATED"),
            PipelineState::BootstrapPublished => write!(f, "BOOTSTRAP_PUBLISHED"),
            PipelineState::Streaming => write!(f, "STREAMING"),
            PipelineState::Flushing => write!(f, "FLUSHING"),
            PipelineState::Done => write!(f, "DONE"),
            PipelineState::Failed => write!(f, "FAILED"),
        }
    }
}

// ==========================================
// ImportProgress - 导入进度
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportProgress {
    /// 已读取的数据记录数
    pub records_read: u64,
    /// 最近一条记录所在的物理行号
    pub last_line: u64,
    /// 已被远端接受的批次数
    pub batches_committed: usize,
    /// 已被远端接受的记录数
    pub records_committed: u64,
}

// ==========================================
// ImportSummary - 成功完成的导入汇总
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub run_id: String,
    pub source_file: String,
    pub batch_size: usize,
    pub progress: ImportProgress,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

// ==========================================
// ImportFailure - 失败的导入（保留失败阶段与已提交进度）
// ==========================================
#[derive(Error, Debug)]
#[error(
    "BOQ 导入在 {failed_in} 阶段失败 (已提交 {} 批 / {} 条记录): {error}",
    .progress.batches_committed,
    .progress.records_committed
)]
pub struct ImportFailure {
    pub run_id: String,
    /// 出错时所处的状态（之后进入 Failed）
    pub failed_in: PipelineState,
    pub progress: ImportProgress,
    #[source]
    pub error: ImportError,
}

// ==========================================
// ImportPipeline - 导入编排器
// ==========================================
pub struct ImportPipeline<P: SessionProvider> {
    config: ImportConfig,
    provider: P,
    bootstrap: BootstrapMetadata,
    transformer: RowTransformer,
}

impl ImportPipeline<HttpSessionProvider> {
    /// 使用 HTTP 模板服务
    pub fn from_config(config: ImportConfig) -> Self {
        let provider = HttpSessionProvider::new(config.service.clone());
        Self::new(config, provider)
    }

    /// 从配置文件构建导入管线
    pub fn from_config_file<T: AsRef<Path>>(path: T) -> ImportResult<Self> {
        let config = ImportConfig::load(path)?;
        Ok(Self::from_config(config))
    }
}

impl<P: SessionProvider> ImportPipeline<P> {
    pub fn new(config: ImportConfig, provider: P) -> Self {
        let bootstrap = BootstrapMetadata::from_config(config.bootstrap_file.as_ref());
        let transformer = RowTransformer::new(config.field_mapping.clone());

        Self {
            config,
            provider,
            bootstrap,
            transformer,
        }
    }

    /// 覆盖引导元数据来源
    pub fn with_bootstrap(mut self, bootstrap: BootstrapMetadata) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// 执行导入
    ///
    /// # 返回
    /// - Ok(ImportSummary): 全部记录已提交
    /// - Err(ImportFailure): 失败阶段、已提交进度、原始错误
    #[instrument(skip(self), fields(run_id = tracing::field::Empty))]
    pub async fn run(&self) -> Result<ImportSummary, ImportFailure> {
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());

        let started_at = Utc::now();
        let timer = Instant::now();
        let source_file = self.config.source_file.display().to_string();

        info!(
            file = %source_file,
            batch_size = self.config.batch_size,
            fields = self.config.field_mapping.len(),
            "开始导入 BOQ 策略模板"
        );

        let mut state = PipelineState::Init;
        let mut progress = ImportProgress::default();

        match self.execute(&mut state, &mut progress).await {
            Ok(()) => {
                transition(&mut state, PipelineState::Done);
                let summary = ImportSummary {
                    run_id,
                    source_file,
                    batch_size: self.config.batch_size,
                    progress,
                    started_at,
                    finished_at: Utc::now(),
                    elapsed_ms: timer.elapsed().as_millis() as u64,
                };
                info!(
                    batches = summary.progress.batches_committed,
                    records = summary.progress.records_committed,
                    elapsed_ms = summary.elapsed_ms,
                    "BOQ 策略模板导入完成: {}",
                    summary.source_file
                );
                Ok(summary)
            }
            Err(err) => {
                let failed_in = state;
                transition(&mut state, PipelineState::Failed);
                error!(
                    failed_in = %failed_in,
                    kind = err.kind_name(),
                    line = err.line(),
                    records_read = progress.records_read,
                    batches_committed = progress.batches_committed,
                    records_committed = progress.records_committed,
                    error = %err,
                    "BOQ 导入失败，已终止"
                );
                Err(ImportFailure {
                    run_id,
                    failed_in,
                    progress,
                    error: err,
                })
            }
        }
    }

    async fn execute(
        &self,
        state: &mut PipelineState,
        progress: &mut ImportProgress,
    ) -> ImportResult<()> {
        // === Init → Authenticated ===
        let service = self.provider.open_session().await?;
        transition(state, PipelineState::Authenticated);

        // === Authenticated → BootstrapPublished ===
        let payload = self.bootstrap.load()?;
        service.publish_bootstrap_metadata(&payload).await?;
        transition(state, PipelineState::BootstrapPublished);

        // === BootstrapPublished → Streaming ===
        // parser 持有文件句柄，任一返回路径上随作用域结束释放
        let rows = RecordParser::open(&self.config.source_file)?;
        transition(state, PipelineState::Streaming);

        let mut batch = BatchAccumulator::new(self.config.batch_size);
        for row in rows {
            let row = row?;
            progress.records_read = row.record_number();
            progress.last_line = row.line();

            let unit = self.transformer.transform(&row)?;
            debug!(line = row.line(), code = %unit.template.code, "记录转换完成");
            batch.add(unit);

            if batch.is_full() {
                self.flush(&service, &mut batch, state, progress).await?;
            }
        }

        // 文件读完后提交剩余不足一批的记录
        if !batch.is_empty() {
            self.flush(&service, &mut batch, state, progress).await?;
        }

        Ok(())
    }

    async fn flush(
        &self,
        service: &P::Service,
        batch: &mut BatchAccumulator,
        state: &mut PipelineState,
        progress: &mut ImportProgress,
    ) -> ImportResult<()> {
        transition(state, PipelineState::Flushing);

        let units = batch.drain();
        let batch_no = progress.batches_committed + 1;
        let first_record = progress.records_committed + 1;

        service
            .submit_batch(&units)
            .await
            .map_err(|source| ImportError::BatchRejected {
                batch_no,
                first_record,
                last_record: progress.records_read,
                source,
            })?;

        progress.batches_committed = batch_no;
        progress.records_committed += units.len() as u64;
        info!(
            batch_no = batch_no,
            units = units.len(),
            records_processed = progress.records_read,
            "批次提交完成 - 已处理记录数 = {}",
            progress.records_read
        );

        transition(state, PipelineState::Streaming);
        Ok(())
    }
}

fn transition(state: &mut PipelineState, next: PipelineState) {
    debug!(from = %state, to = %next, "状态迁移");
    *state = next;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(PipelineState::BootstrapPublished.to_string(), "BOOTSTRAP_PUBLISHED");
        assert_eq!(PipelineState::Failed.to_string(), "FAILED");
    }

    #[test]
    fn test_transition() {
        let mut state = PipelineState::Init;
        transition(&mut state, PipelineState::Authenticated);
        assert_eq!(state, PipelineState::Authenticated);
    }

    #[test]
    fn test_failure_message_carries_progress() {
        let failure = ImportFailure {
            run_id: "r".to_string(),
            failed_in: PipelineState::Flushing,
            progress: ImportProgress {
                records_read: 7,
                last_line: 8,
                batches_committed: 1,
                records_committed: 5,
            },
            error: ImportError::MetadataMissing("x".to_string()),
        };
        let message = failure.to_string();
        assert!(message.contains("FLUSHING"));
        assert!(message.contains("已提交 1 批 / 5 条记录"));
    }
}
