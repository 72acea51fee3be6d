// ==========================================
// BOQ 策略模板迁移工具 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 任一错误都终止本次导入（无跳行/续传模式）
// ==========================================

use crate::config::ConfigError;
use crate::service::ServiceError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 配置 =====
    #[error(transparent)]
    Config(#[from] ConfigError),

    // ===== 文件相关错误 =====
    #[error("导入文件读取失败 ({path}): {message}")]
    FileRead { path: String, message: String },

    #[error("输入格式错误 (行 {line}): {message}")]
    MalformedInput { line: u64, message: String },

    #[error("字段缺失 (行 {line}): {field}")]
    MissingField { line: u64, field: String },

    // ===== 层级派生错误 =====
    #[error(
        "boqPath 格式错误 (行 {line}): '{path}' 需要至少 {required} 个 '{delimiter}' 分隔符，实际 {found} 个"
    )]
    PathFormat {
        line: u64,
        path: String,
        delimiter: char,
        required: usize,
        found: usize,
    },

    // ===== 引导元数据 =====
    #[error("BOQ 分类元数据加载失败: {0}")]
    MetadataMissing(String),

    // ===== 模板服务 =====
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("第 {batch_no} 批提交失败 (记录 {first_record}-{last_record}): {source}")]
    BatchRejected {
        batch_no: usize,
        first_record: u64,
        last_record: u64,
        #[source]
        source: ServiceError,
    },
}

impl ImportError {
    /// 错误分类名（日志/告警用）
    pub fn kind_name(&self) -> &'static str {
        match self {
            ImportError::Config(_) => "ConfigError",
            ImportError::FileRead { .. } => "FileReadError",
            ImportError::MalformedInput { .. } => "MalformedInputError",
            ImportError::MissingField { .. } => "MissingFieldError",
            ImportError::PathFormat { .. } => "PathFormatError",
            ImportError::MetadataMissing(_) => "MetadataMissingError",
            ImportError::Service(ServiceError::Authentication { .. }) => "AuthenticationError",
            ImportError::Service(ServiceError::RemoteRejection { .. })
            | ImportError::BatchRejected {
                source: ServiceError::RemoteRejection { .. },
                ..
            } => "RemoteRejectionError",
            ImportError::Service(_) | ImportError::BatchRejected { .. } => "TransportError",
        }
    }

    /// 出错的源文件行号（仅行级错误有值）
    pub fn line(&self) -> Option<u64> {
        match self {
            ImportError::MalformedInput { line, .. }
            | ImportError::MissingField { line, .. }
            | ImportError::PathFormat { line, .. } => Some(*line),
            _ => None,
        }
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.kind() {
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => ImportError::MalformedInput {
                line,
                message: format!("列数与表头不一致: 期望 {}，实际 {}", expected_len, len),
            },
            _ => ImportError::MalformedInput {
                line,
                message: err.to_string(),
            },
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        let err = ImportError::MissingField {
            line: 3,
            field: "boqPath".to_string(),
        };
        assert_eq!(err.kind_name(), "MissingFieldError");
        assert_eq!(err.line(), Some(3));

        let err = ImportError::BatchRejected {
            batch_no: 2,
            first_record: 6,
            last_record: 7,
            source: ServiceError::RemoteRejection {
                status_code: 500,
                endpoint: "http://h/templates".to_string(),
            },
        };
        assert_eq!(err.kind_name(), "RemoteRejectionError");
        assert_eq!(err.line(), None);
        assert!(err.to_string().contains("第 2 批"));
    }
}
