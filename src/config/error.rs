// ==========================================
// BOQ 策略模板迁移工具 - 配置错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置加载错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    FileRead { path: String, message: String },

    #[error("配置文件解析失败: {0}")]
    Parse(String),

    #[error("配置项缺失: {0}")]
    MissingKey(String),

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
