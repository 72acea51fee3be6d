// ==========================================
// BOQ 策略模板迁移工具 - 分类类型引导元数据
// ==========================================
// 职责: 加载 BOQ 分类类型定义（在处理任何数据行之前发布到 tree 端点）
// 来源: 内置资源，或配置项 bootstrapFile 指定的文件
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use std::path::PathBuf;

/// 内置的 BOQ 分类类型定义
pub const EMBEDDED_BOQ_CLASSIFICATION_TYPE: &str =
    include_str!("../../resources/classificationtype-boq.json");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapMetadata {
    Embedded,
    File(PathBuf),
}

impl BootstrapMetadata {
    pub fn from_config(path: Option<&PathBuf>) -> Self {
        match path {
            Some(p) => BootstrapMetadata::File(p.clone()),
            None => BootstrapMetadata::Embedded,
        }
    }

    /// 加载原始 JSON 文本
    ///
    /// # 返回
    /// - Err(MetadataMissing): 文件不可读、内容为空或不是合法 JSON
    pub fn load(&self) -> ImportResult<String> {
        let (payload, origin) = match self {
            BootstrapMetadata::Embedded => (
                EMBEDDED_BOQ_CLASSIFICATION_TYPE.to_string(),
                "classificationtype-boq.json (内置)".to_string(),
            ),
            BootstrapMetadata::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    ImportError::MetadataMissing(format!("{}: {}", path.display(), e))
                })?;
                (text, path.display().to_string())
            }
        };

        if payload.trim().is_empty() {
            return Err(ImportError::MetadataMissing(format!("{}: 内容为空", origin)));
        }
        serde_json::from_str::<serde_json::Value>(&payload)
            .map_err(|e| ImportError::MetadataMissing(format!("{}: 非法 JSON ({})", origin, e)))?;

        Ok(payload)
    }
}
