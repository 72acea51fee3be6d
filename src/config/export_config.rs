// ==========================================
// BOQ 策略模板迁移工具 - 导出配置
// ==========================================
// 职责: 读取 boq-export-config.json
// ==========================================
//
// 配置示例:
// {
//     "dbParams": {
//         "databasePath": "/data/asset_policy.sqlite",
//         "exportQuery": "SELECT * FROM PolicyVARExportForBOQ",
//         "duplicateQuery": "SELECT * FROM AssetPolicyVARDuplicates LIMIT 1"
//     },
//     "exportFilename": "/data/exports/export_boq.csv"
// }

use crate::config::error::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 默认导出查询（替代旧系统存储过程 PolicyVARExportForBOQ 的视图）
pub const DEFAULT_EXPORT_QUERY: &str = "SELECT * FROM PolicyVARExportForBOQ";

/// 默认重复记录检查查询（返回任意行即视为存在重复）
pub const DEFAULT_DUPLICATE_QUERY: &str = "SELECT * FROM AssetPolicyVARDuplicates LIMIT 1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub export_file: PathBuf,
    pub database_path: PathBuf,
    pub export_query: String,
    pub duplicate_query: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExportConfig {
    export_filename: Option<String>,
    db_params: Option<RawDbParams>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDbParams {
    database_path: Option<String>,
    export_query: Option<String>,
    duplicate_query: Option<String>,
}

impl ExportConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let raw: RawExportConfig = serde_json::from_str(text)?;

        let export_file = raw
            .export_filename
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingKey("exportFilename".to_string()))?;
        let db = raw
            .db_params
            .ok_or_else(|| ConfigError::MissingKey("dbParams".to_string()))?;
        let database_path = db
            .database_path
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingKey("dbParams.databasePath".to_string()))?;

        Ok(Self {
            export_file: PathBuf::from(export_file.trim()),
            database_path: PathBuf::from(database_path.trim()),
            export_query: non_empty_or(db.export_query, DEFAULT_EXPORT_QUERY),
            duplicate_query: non_empty_or(db.duplicate_query, DEFAULT_DUPLICATE_QUERY),
        })
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
