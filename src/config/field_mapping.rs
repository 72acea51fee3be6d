// ==========================================
// BOQ 策略模板迁移工具 - 字段映射表
// ==========================================
// 职责: fieldList 配置（字段名 → 数据类型标签）
// 红线: 保持配置声明顺序（决定模板字段输出顺序）
// ==========================================

use crate::domain::DataType;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// 单个映射项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMappingEntry {
    pub name: String,
    pub data_type: DataType,
}

// ==========================================
// FieldMapping - 有序字段映射
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    entries: Vec<FieldMappingEntry>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加映射项
    ///
    /// # 返回
    /// - false: 字段名已存在（未追加）
    pub fn push(&mut self, name: impl Into<String>, data_type: DataType) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.entries.push(FieldMappingEntry { name, data_type });
        true
    }

    /// 链式构造（重复字段名被忽略）
    pub fn with(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.push(name, data_type);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldMappingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for FieldMapping {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FieldMappingVisitor)
    }
}

struct FieldMappingVisitor;

impl<'de> Visitor<'de> for FieldMappingVisitor {
    type Value = FieldMapping;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("字段名 → 数据类型标签 (NUMERIC/STRING/BOOLEAN) 的 JSON 对象")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut mapping = FieldMapping::new();

        // MapAccess 按文档顺序产出键值对
        while let Some((name, tag)) = map.next_entry::<String, String>()? {
            let data_type = DataType::from_tag(&tag).ok_or_else(|| {
                de::Error::custom(format!("字段 {} 的数据类型标签无效: {}", name, tag))
            })?;

            if !mapping.push(name.clone(), data_type) {
                return Err(de::Error::custom(format!("fieldList 字段重复: {}", name)));
            }
        }

        Ok(mapping)
    }
}
