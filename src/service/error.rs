// ==========================================
// BOQ 策略模板迁移工具 - 模板服务错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 所有错误均不重试，直接上抛给编排器
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    // ===== 认证 =====
    #[error("认证失败 ({endpoint}): {message}")]
    Authentication { endpoint: String, message: String },

    // ===== 远端拒绝 =====
    #[error("模板服务拒绝请求 (HTTP {status_code}, 端点 {endpoint})")]
    RemoteRejection { status_code: u16, endpoint: String },

    // ===== 传输 =====
    #[error("HTTP 请求失败 ({endpoint}): {message}")]
    Transport { endpoint: String, message: String },

    #[error("请求体序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    /// 远端返回的 HTTP 状态码（仅 RemoteRejection 有值）
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ServiceError::RemoteRejection { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

/// Result 类型别名
pub type ServiceResult<T> = Result<T, ServiceError>;
