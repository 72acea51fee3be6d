// ==========================================
// BOQ 策略模板迁移工具 - 配置层
// ==========================================
// 职责: 导入/导出 JSON 配置加载，启动后不可变
// ==========================================

pub mod error;
pub mod export_config;
pub mod field_mapping;
pub mod import_config;

// 重导出核心配置类型
pub use error::{ConfigError, ConfigResult};
pub use export_config::ExportConfig;
pub use field_mapping::{FieldMapping, FieldMappingEntry};
pub use import_config::{Credentials, ImportConfig, TemplateServiceConfig, DEFAULT_BATCH_SIZE};
