// ==========================================
// BOQ 策略模板迁移工具 - 模板构建器
// ==========================================
// 职责: 按 fieldList 映射从源记录生成模板字段
// 规则: 值为空或为 "NULL" 字面量的字段不输出
// 顺序: 按 fieldList 声明顺序，而非源文件列顺序
// ==========================================

use crate::config::FieldMapping;
use crate::domain::{Template, TemplateField, NULL_SENTINEL};
use crate::importer::error::ImportResult;
use crate::importer::hierarchy_builder::COLUMN_BOQ_PATH;
use crate::importer::record_parser::SourceRow;

/// descriptorSize 列同时作为描述符，纯尺寸值通过该别名导入
pub const DESCRIPTOR_SIZE_VALUE_ALIAS: &str = "descriptorSizeValue";

/// 别名实际读取的列
pub const DESCRIPTOR_SIZE_COLUMN: &str = "descriptorSize";

/// 源值是否视为空（空串或 "NULL"）
pub fn is_blank_value(value: &str) -> bool {
    value.is_empty() || value == NULL_SENTINEL
}

// ==========================================
// TemplateBuilder - 模板构建器
// ==========================================
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    field_mapping: FieldMapping,
}

impl TemplateBuilder {
    pub fn new(field_mapping: FieldMapping) -> Self {
        Self { field_mapping }
    }

    /// 构建模板
    ///
    /// # 参数
    /// - row: 源记录
    /// - composite_name: 层级构建得到的复合名称
    ///
    /// # 返回
    /// - Err(MissingField): boqPath 或 fieldList 中的列不存在
    pub fn build_template(&self, row: &SourceRow, composite_name: &str) -> ImportResult<Template> {
        // boqPath 作为模板代码（唯一性由上游保证，此处不校验）
        let mut template = Template::new(row.get(COLUMN_BOQ_PATH)?, composite_name);

        for entry in self.field_mapping.iter() {
            let column = source_column(&entry.name);
            let value = row.get(column)?;

            if is_blank_value(value) {
                continue;
            }
            template
                .fields
                .push(TemplateField::optional(column, value, entry.data_type));
        }

        Ok(template)
    }
}

fn source_column(field_name: &str) -> &str {
    if field_name == DESCRIPTOR_SIZE_VALUE_ALIAS {
        DESCRIPTOR_SIZE_COLUMN
    } else {
        field_name
    }
}
