// ==========================================
// BOQ 策略模板迁移工具 - 核心库
// ==========================================
// 职责: 旧系统 BOQ 策略记录（CSV）→ 模板服务分类层级 + 字段模板
// 技术栈: Rust + tokio + reqwest + SQLite
// 方向: 导入（CSV → 模板服务） / 导出（策略库 → CSV）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 线上数据结构
pub mod domain;

// 配置层 - JSON 配置加载
pub mod config;

// 导入层 - 解析、转换、批量提交
pub mod importer;

// 模板服务层 - 认证与 HTTP 客户端
pub mod service;

// 导出层 - 策略库 → CSV
pub mod exporter;

// 数据库基础设施（导出方向）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    ClassificationNode, ClassificationTemplateUnit, DataType, NodeType, Template, TemplateField,
};

// 配置
pub use config::{ConfigError, ExportConfig, FieldMapping, ImportConfig};

// 导入
pub use importer::{
    ImportError, ImportFailure, ImportPipeline, ImportProgress, ImportSummary, PipelineState,
};

// 模板服务
pub use service::{ServiceError, SessionProvider, TemplateService, TemplateServiceClient};

// 导出
pub use exporter::{BoqExporter, ExportError, SqliteRecordSource};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "BOQ 策略模板迁移工具";
