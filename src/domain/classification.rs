// ==========================================
// BOQ 策略模板迁移工具 - 分类节点
// ==========================================
// 职责: 分类层级中的单个节点（线上格式）
// ==========================================

use crate::domain::types::NodeType;
use serde::{Deserialize, Serialize};

/// 分类类型代码（所有节点固定）
pub const BOQ_CLASSIFICATION_TYPE: &str = "BOQ";

/// 根节点代码
pub const BOQ_ROOT_CODE: &str = "BOQ_ROOT";

/// 根节点描述
pub const BOQ_ROOT_DESCRIPTION: &str = "Bill of Quantities Root";

/// 空值哨兵（源数据中的 "NULL" 字面量 / 根节点的父路径）
pub const NULL_SENTINEL: &str = "NULL";

/// 描述为空时的占位描述
pub const NOT_SPECIFIED: &str = "Not Specified";

// ==========================================
// ClassificationNode - 分类节点
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationNode {
    pub classification_type: String,
    pub classification_node_type: NodeType,
    pub code: String,
    pub parent_path: String,
    pub description: String,
    pub active: bool,
}

impl ClassificationNode {
    /// 创建 BOQ 分类节点（active 恒为 true）
    pub fn new(
        node_type: NodeType,
        code: impl Into<String>,
        parent_path: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            classification_type: BOQ_CLASSIFICATION_TYPE.to_string(),
            classification_node_type: node_type,
            code: code.into(),
            parent_path: parent_path.into(),
            description: description.into(),
            active: true,
        }
    }

    /// 固定根节点
    pub fn root() -> Self {
        Self::new(
            NodeType::Root,
            BOQ_ROOT_CODE,
            NULL_SENTINEL,
            BOQ_ROOT_DESCRIPTION,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_node() {
        let root = ClassificationNode::root();
        assert_eq!(root.code, "BOQ_ROOT");
        assert_eq!(root.parent_path, "NULL");
        assert_eq!(root.classification_type, "BOQ");
        assert!(root.active);
    }

    #[test]
    fn test_wire_field_names() {
        let node = ClassificationNode::new(NodeType::FinancialYear, "2020", "BOQ_ROOT", "2020");
        let value = serde_json::to_value(&node).unwrap();

        assert_eq!(value["classificationType"], "BOQ");
        assert_eq!(value["classificationNodeType"], "BOQ_FY");
        assert_eq!(value["parentPath"], "BOQ_ROOT");
        assert_eq!(value["active"], true);
    }
}
