// ==========================================
// BOQ 策略模板迁移工具 - 模板服务层
// ==========================================
// 职责: 认证会话、模板服务接口与 HTTP 实现
// ==========================================

pub mod auth;
pub mod error;
pub mod template_client;
pub mod template_service_trait;

// 重导出核心类型
pub use auth::{authenticate, AuthSession, SessionToken};
pub use error::{ServiceError, ServiceResult};
pub use template_client::{HttpSessionProvider, TemplateServiceClient};

// 重导出 Trait 接口
pub use template_service_trait::{SessionProvider, TemplateService};
