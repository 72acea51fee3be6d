// ==========================================
// BOQ 策略模板迁移工具 - 导入层
// ==========================================
// 职责: CSV 源记录 → 分类层级 + 模板 → 批量提交模板服务
// 流程: 解析 → 层级派生 → 模板构建 → 累加 → 提交
// ==========================================

// 模块声明
pub mod batch_accumulator;
pub mod bootstrap;
pub mod error;
pub mod hierarchy_builder;
pub mod pipeline;
pub mod record_parser;
pub mod row_transformer;
pub mod template_builder;

// 重导出核心类型
pub use batch_accumulator::BatchAccumulator;
pub use bootstrap::BootstrapMetadata;
pub use error::{ImportError, ImportResult};
pub use hierarchy_builder::{ClassificationPath, HierarchyBuilder, DESCRIPTOR_LEVELS, PATH_DELIMITER};
pub use pipeline::{ImportFailure, ImportPipeline, ImportProgress, ImportSummary, PipelineState};
pub use record_parser::{RecordParser, SourceRow};
pub use row_transformer::RowTransformer;
pub use template_builder::TemplateBuilder;
