// ==========================================
// BOQ 策略模板迁移工具 - 导出层
// ==========================================
// 职责: 关系型数据源 → 分隔符文本（无转换逻辑）
// ==========================================

pub mod boq_exporter;
pub mod error;
pub mod policy_source;
pub mod sqlite_source;

// 重导出核心类型
pub use boq_exporter::BoqExporter;
pub use error::{ExportError, ExportResult};
pub use policy_source::{ExportTable, PolicyRecordSource};
pub use sqlite_source::SqliteRecordSource;
