// ==========================================
// BOQ 策略模板迁移工具 - 模板服务 HTTP 客户端
// ==========================================
// 协议:
//   PUT <baseURI>tree       body = 分类类型定义 JSON → 期望 201
//   PUT <baseURI>templates  body = ClassificationTemplateUnit 数组 → 期望 201
//   两者均携带 content-type: application/json 与 Cookie 会话令牌
// 红线: 不重试，失败直接上抛
// ==========================================

use crate::config::TemplateServiceConfig;
use crate::domain::ClassificationTemplateUnit;
use crate::service::auth::AuthSession;
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::template_service_trait::{SessionProvider, TemplateService};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info, instrument};

// ==========================================
// TemplateServiceClient - 已认证的模板服务客户端
// ==========================================
#[derive(Debug, Clone)]
pub struct TemplateServiceClient {
    http: Client,
    session: AuthSession,
    tree_endpoint: String,
    templates_endpoint: String,
}

impl TemplateServiceClient {
    /// 端点地址统一由配置派生
    pub fn new(http: Client, session: AuthSession, config: &TemplateServiceConfig) -> Self {
        Self {
            http,
            session,
            tree_endpoint: config.tree_endpoint(),
            templates_endpoint: config.templates_endpoint(),
        }
    }

    /// 构建 HTTP 客户端并完成认证
    pub async fn connect(config: &TemplateServiceConfig) -> ServiceResult<Self> {
        let http = build_http_client(config)?;
        let session = AuthSession::establish(&http, config).await?;
        Ok(Self::new(http, session, config))
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn tree_endpoint(&self) -> &str {
        &self.tree_endpoint
    }

    pub fn templates_endpoint(&self) -> &str {
        &self.templates_endpoint
    }

    /// PUT JSON 文本，仅 201 视为成功
    async fn put_json(&self, endpoint: &str, body: String) -> ServiceResult<()> {
        info!(endpoint = %endpoint, "请求端点");

        let response = self
            .http
            .put(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(COOKIE, self.session.token().header_value())
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!(endpoint = %endpoint, error = %e, "HTTP 请求失败");
                ServiceError::Transport {
                    endpoint: endpoint.to_string(),
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if status != StatusCode::CREATED {
            error!(endpoint = %endpoint, status_code = status.as_u16(), "模板服务拒绝请求");
            return Err(ServiceError::RemoteRejection {
                status_code: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl TemplateService for TemplateServiceClient {
    #[instrument(skip(self, payload))]
    async fn publish_bootstrap_metadata(&self, payload: &str) -> ServiceResult<()> {
        debug!("publish_bootstrap_metadata ENTER");
        self.put_json(&self.tree_endpoint, payload.to_string()).await?;
        debug!("publish_bootstrap_metadata EXIT");
        Ok(())
    }

    #[instrument(skip(self, units), fields(batch_size = units.len()))]
    async fn submit_batch(&self, units: &[ClassificationTemplateUnit]) -> ServiceResult<()> {
        debug!("submit_batch ENTER");
        let body = serde_json::to_string(units)?;
        debug!(payload = %body, "PAYLOAD");
        self.put_json(&self.templates_endpoint, body).await?;
        debug!("submit_batch EXIT");
        Ok(())
    }
}

fn build_http_client(config: &TemplateServiceConfig) -> ServiceResult<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(|e| ServiceError::Transport {
        endpoint: config.base_uri.clone(),
        message: format!("HTTP 客户端初始化失败: {}", e),
    })
}

// ==========================================
// HttpSessionProvider - 基于配置的会话提供者
// ==========================================
#[derive(Debug, Clone)]
pub struct HttpSessionProvider {
    config: TemplateServiceConfig,
}

impl HttpSessionProvider {
    pub fn new(config: TemplateServiceConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SessionProvider for HttpSessionProvider {
    type Service = TemplateServiceClient;

    async fn open_session(&self) -> ServiceResult<TemplateServiceClient> {
        TemplateServiceClient::connect(&self.config).await
    }
}
