// ==========================================
// BOQ 策略模板迁移工具 - 领域模型层
// ==========================================
// 职责: 定义分类节点、模板、批量单元等线上数据结构
// 红线: 不含 IO，不含 HTTP 逻辑
// ==========================================

pub mod classification;
pub mod template;
pub mod types;
pub mod unit;

// 重导出核心类型
pub use classification::{
    ClassificationNode, BOQ_CLASSIFICATION_TYPE, BOQ_ROOT_CODE, BOQ_ROOT_DESCRIPTION,
    NOT_SPECIFIED, NULL_SENTINEL,
};
pub use template::{Template, TemplateField};
pub use types::{DataType, NodeType};
pub use unit::ClassificationTemplateUnit;
