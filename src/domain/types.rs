// ==========================================
// BOQ 策略模板迁移工具 - 领域类型定义
// ==========================================
// 职责: 分类节点类型、模板字段数据类型等封闭枚举
// 序列化格式: 与模板服务线上格式一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 分类节点类型 (Classification Node Type)
// ==========================================
// 固定深度: 根 → 财年 → 四级描述符
// 线上标签沿用旧系统代码 (BOQ_ROOT / BOQ_FY / BOQ_CT ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    #[serde(rename = "BOQ_ROOT")]
    Root, // 根节点
    #[serde(rename = "BOQ_FY")]
    FinancialYear, // 财年
    #[serde(rename = "BOQ_CT")]
    ComponentType, // 构件类型
    #[serde(rename = "BOQ_DT")]
    DescriptorType, // 描述符类型
    #[serde(rename = "BOQ_DC")]
    DescriptorClass, // 描述符分类
    #[serde(rename = "BOQ_DS")]
    DescriptorSize, // 描述符尺寸
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeType::Root => write!(f, "ROOT"),
            NodeType::FinancialYear => write!(f, "FINANCIAL_YEAR"),
            NodeType::ComponentType => write!(f, "COMPONENT_TYPE"),
            NodeType::DescriptorType => write!(f, "DESCRIPTOR_TYPE"),
            NodeType::DescriptorClass => write!(f, "DESCRIPTOR_CLASS"),
            NodeType::DescriptorSize => write!(f, "DESCRIPTOR_SIZE"),
        }
    }
}

// ==========================================
// 模板字段数据类型 (Data Type)
// ==========================================
// 仅作标签透传,不对字段值做类型校验
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    Numeric, // 数值
    String,  // 字符串
    Boolean, // 布尔
}

impl DataType {
    /// 从配置标签解析（大小写不敏感）
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_uppercase().as_str() {
            "NUMERIC" => Some(DataType::Numeric),
            "STRING" => Some(DataType::String),
            "BOOLEAN" => Some(DataType::Boolean),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Numeric => write!(f, "NUMERIC"),
            DataType::String => write!(f, "STRING"),
            DataType::Boolean => write!(f, "BOOLEAN"),
        }
    }
}
