// ==========================================
// BOQ 策略模板迁移工具 - 导出模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("源数据存在重复记录，拒绝导出: {0}")]
    DuplicateRecord(String),

    #[error("数据库查询失败: {0}")]
    Database(String),

    #[error("CSV 写入失败: {0}")]
    Csv(String),

    #[error("文件写入失败 ({path}): {message}")]
    Io { path: String, message: String },
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for ExportError {
    fn from(err: rusqlite::Error) -> Self {
        ExportError::Database(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err.to_string())
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
