// ==========================================
// BOQ 策略模板迁移工具 - 模板服务 Trait
// ==========================================
// 职责: 定义编排器所依赖的远端接口（不包含实现）
// 实现者: TemplateServiceClient（reqwest），测试中的记录型 Mock
// ==========================================

use crate::domain::ClassificationTemplateUnit;
use crate::service::error::ServiceResult;
use async_trait::async_trait;

// ==========================================
// TemplateService Trait
// ==========================================
// 两个操作均为 PUT 语义的"创建或替换"，成功状态码为 201
#[async_trait]
pub trait TemplateService: Send + Sync {
    /// 发布 BOQ 分类类型定义（tree 端点）
    ///
    /// # 参数
    /// - payload: 原始 JSON 文本，原样发送
    ///
    /// # 返回
    /// - Err(RemoteRejection): 非 201
    async fn publish_bootstrap_metadata(&self, payload: &str) -> ServiceResult<()>;

    /// 提交一批分类模板单元（templates 端点）
    ///
    /// # 返回
    /// - Err(RemoteRejection): 非 201
    async fn submit_batch(&self, units: &[ClassificationTemplateUnit]) -> ServiceResult<()>;
}

// ==========================================
// SessionProvider Trait
// ==========================================
// 用途: 编排器在 Init → Authenticated 阶段调用一次，取得已认证的服务句柄
#[async_trait]
pub trait SessionProvider: Send + Sync {
    type Service: TemplateService;

    /// 认证并返回服务句柄
    ///
    /// # 返回
    /// - Err(Authentication): 认证失败（致命）
    async fn open_session(&self) -> ServiceResult<Self::Service>;
}
