// ==========================================
// BOQ 策略模板迁移工具 - 模板与模板字段
// ==========================================
// 职责: 模板服务中的模板定义（线上格式）
// 红线: 值为 None 的可选字段不出现在 JSON 中
// ==========================================

use crate::domain::types::DataType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// TemplateField - 模板字段
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateField {
    pub field_name: String,
    pub default_value: String,
    pub data_type: DataType,
    pub mandatory: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TemplateField {
    /// 非必填、无校验、无描述的字段
    pub fn optional(
        field_name: impl Into<String>,
        default_value: impl Into<String>,
        data_type: DataType,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            default_value: default_value.into(),
            data_type,
            mandatory: false,
            validation: None,
            description: None,
        }
    }
}

// ==========================================
// Template - 模板
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// boqPath 原值（唯一性由外部保证）
    pub code: String,
    /// 描述符描述拼接而成的名称
    pub name: String,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_deactivated: Option<NaiveDate>,
    pub allow_delete: bool,
    #[serde(default)]
    pub fields: Vec<TemplateField>,
}

impl Template {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            active: true,
            date_added: None,
            date_deactivated: None,
            allow_delete: false,
            fields: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_are_omitted() {
        let mut template = Template::new("BOQ-2020-1", "Pump");
        template
            .fields
            .push(TemplateField::optional("eul", "15", DataType::Numeric));

        let value = serde_json::to_value(&template).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("dateAdded"));
        assert!(!obj.contains_key("dateDeactivated"));
        assert_eq!(value["allowDelete"], false);

        let field = value["fields"][0].as_object().unwrap();
        assert_eq!(field["fieldName"], "eul");
        assert_eq!(field["dataType"], "NUMERIC");
        assert_eq!(field["mandatory"], false);
        assert!(!field.contains_key("validation"));
        assert!(!field.contains_key("description"));
    }
}
