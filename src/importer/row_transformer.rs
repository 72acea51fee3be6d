// ==========================================
// BOQ 策略模板迁移工具 - 行转换器
// ==========================================
// 职责: 源记录 → 分类层级 + 模板 → ClassificationTemplateUnit
// 红线: 纯函数，同一行重复转换结果完全一致
// ==========================================

use crate::config::FieldMapping;
use crate::domain::ClassificationTemplateUnit;
use crate::importer::error::ImportResult;
use crate::importer::hierarchy_builder::HierarchyBuilder;
use crate::importer::record_parser::SourceRow;
use crate::importer::template_builder::TemplateBuilder;

#[derive(Debug, Clone)]
pub struct RowTransformer {
    hierarchy: HierarchyBuilder,
    templates: TemplateBuilder,
}

impl RowTransformer {
    pub fn new(field_mapping: FieldMapping) -> Self {
        Self {
            hierarchy: HierarchyBuilder::new(),
            templates: TemplateBuilder::new(field_mapping),
        }
    }

    pub fn transform(&self, row: &SourceRow) -> ImportResult<ClassificationTemplateUnit> {
        let path = self.hierarchy.build_classification_path(row)?;
        let template = self.templates.build_template(row, &path.composite_name)?;
        Ok(ClassificationTemplateUnit::new(path.nodes, template))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataType, NodeType};

    fn row() -> SourceRow {
        SourceRow::from_pairs(
            3,
            &[
                ("financialYear", "2021"),
                ("boqPath", "BOQ-2021-CT02-DT01-DC03-DS07"),
                ("componentType", "Valve"),
                ("componentType_ID", "CT02"),
                ("descriptorType", "Gate"),
                ("descriptorType_ID", "DT01"),
                ("descriptorClass", "Manual"),
                ("descriptorClass_ID", "DC03"),
                ("descriptorSize", "250"),
                ("descriptorSize_ID", "DS07"),
                ("eul", "20"),
                ("extentUnit", "NULL"),
            ],
        )
    }

    #[test]
    fn test_transform_assembles_unit() {
        let transformer = RowTransformer::new(
            FieldMapping::new()
                .with("eul", DataType::Numeric)
                .with("extentUnit", DataType::String),
        );
        let unit = transformer.transform(&row()).unwrap();

        assert_eq!(unit.classifications.len(), 6);
        assert_eq!(unit.classifications[0].classification_node_type, NodeType::Root);
        assert_eq!(unit.classifications[5].classification_node_type, NodeType::DescriptorSize);
        assert_eq!(unit.template.code, "BOQ-2021-CT02-DT01-DC03-DS07");
        assert_eq!(unit.template.name, "Valve Gate Manual 250");
        assert_eq!(unit.template.fields.len(), 1);
    }

    #[test]
    fn test_transform_is_deterministic() {
        let transformer = RowTransformer::new(FieldMapping::new().with("eul", DataType::Numeric));
        let row = row();

        let first = serde_json::to_vec(&transformer.transform(&row).unwrap()).unwrap();
        let second = serde_json::to_vec(&transformer.transform(&row).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
