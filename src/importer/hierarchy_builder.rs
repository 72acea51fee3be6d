// ==========================================
// BOQ 策略模板迁移工具 - 分类层级构建器
// ==========================================
// 职责: 由一行源记录派生固定深度的分类节点路径 + 模板复合名称
// 路径: 根 → 财年 → 构件类型 → 描述符类型 → 描述符分类 → 描述符尺寸
// ==========================================
// 父路径规则:
//   boqPath 为分隔符拼接的层级串，描述符层级的父路径为
//   boqPath 截断到第 N 个分隔符（不含）处，N 为该层级的出现序号
// ==========================================

use crate::domain::{
    ClassificationNode, NodeType, BOQ_ROOT_CODE, NOT_SPECIFIED, NULL_SENTINEL,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::record_parser::SourceRow;

/// boqPath 列名
pub const COLUMN_BOQ_PATH: &str = "boqPath";

/// 财年列名
pub const COLUMN_FINANCIAL_YEAR: &str = "financialYear";

/// boqPath 层级分隔符
pub const PATH_DELIMITER: char = '-';

/// 描述符层级定义
#[derive(Debug, Clone, Copy)]
pub struct DescriptorLevel {
    /// 描述列名（代码列为 `<field>_ID`）
    pub field: &'static str,
    pub node_type: NodeType,
    /// 父路径截断位置: 第 N 个分隔符
    pub delimiter_occurrence: usize,
}

/// 四级描述符（固定顺序）
pub const DESCRIPTOR_LEVELS: [DescriptorLevel; 4] = [
    DescriptorLevel {
        field: "componentType",
        node_type: NodeType::ComponentType,
        delimiter_occurrence: 2,
    },
    DescriptorLevel {
        field: "descriptorType",
        node_type: NodeType::DescriptorType,
        delimiter_occurrence: 3,
    },
    DescriptorLevel {
        field: "descriptorClass",
        node_type: NodeType::DescriptorClass,
        delimiter_occurrence: 4,
    },
    DescriptorLevel {
        field: "descriptorSize",
        node_type: NodeType::DescriptorSize,
        delimiter_occurrence: 5,
    },
];

/// 层级构建结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationPath {
    pub nodes: Vec<ClassificationNode>,
    /// 非空描述按层级顺序以空格拼接
    pub composite_name: String,
}

// ==========================================
// HierarchyBuilder - 分类层级构建器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct HierarchyBuilder;

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self
    }

    /// 构建分类路径
    ///
    /// # 返回
    /// - Ok(ClassificationPath): 6 个节点（根、财年、四级描述符）+ 复合名称
    /// - Err(PathFormat): boqPath 分隔符数量不足（不产出任何节点）
    /// - Err(MissingField): 必需列缺失
    pub fn build_classification_path(&self, row: &SourceRow) -> ImportResult<ClassificationPath> {
        let boq_path = row.get(COLUMN_BOQ_PATH)?;
        let financial_year = row.get(COLUMN_FINANCIAL_YEAR)?;

        // 先校验分隔符数量，校验失败时不产出任何节点
        let delimiter_positions: Vec<usize> = boq_path
            .match_indices(PATH_DELIMITER)
            .map(|(idx, _)| idx)
            .collect();
        let required = DESCRIPTOR_LEVELS
            .iter()
            .map(|level| level.delimiter_occurrence)
            .max()
            .unwrap_or(0);
        if delimiter_positions.len() < required {
            return Err(ImportError::PathFormat {
                line: row.line(),
                path: boq_path.to_string(),
                delimiter: PATH_DELIMITER,
                required,
                found: delimiter_positions.len(),
            });
        }

        let mut nodes = Vec::with_capacity(2 + DESCRIPTOR_LEVELS.len());
        nodes.push(ClassificationNode::root());
        nodes.push(ClassificationNode::new(
            NodeType::FinancialYear,
            financial_year,
            BOQ_ROOT_CODE,
            financial_year,
        ));

        let mut name_parts: Vec<&str> = Vec::with_capacity(DESCRIPTOR_LEVELS.len());
        for level in DESCRIPTOR_LEVELS.iter() {
            let code = row.get(&format!("{}_ID", level.field))?;
            let description = row.get(level.field)?;
            let parent_path = &boq_path[..delimiter_positions[level.delimiter_occurrence - 1]];

            let node = if description.is_empty() {
                ClassificationNode::new(level.node_type, NULL_SENTINEL, parent_path, NOT_SPECIFIED)
            } else {
                name_parts.push(description);
                ClassificationNode::new(level.node_type, code, parent_path, description)
            };
            nodes.push(node);
        }

        Ok(ClassificationPath {
            nodes,
            composite_name: name_parts.join(" "),
        })
    }
}
