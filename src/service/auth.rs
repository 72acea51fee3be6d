// ==========================================
// BOQ 策略模板迁移工具 - 认证会话
// ==========================================
// 职责: 一次性凭据交换，取得会话令牌（整个运行期间复用，不刷新）
// 协议: POST <authSvcURI>login + Basic 认证 → 期望 200，令牌取自 Set-Cookie
// 红线: 失败即致命，不重试
// ==========================================

use crate::config::{Credentials, TemplateServiceConfig};
use crate::service::error::{ServiceError, ServiceResult};
use reqwest::header::SET_COOKIE;
use reqwest::{Client, StatusCode};
use std::fmt;
use tracing::{error, info, instrument};

// ==========================================
// SessionToken - 不透明会话令牌
// ==========================================
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// 由 Set-Cookie 头部构造: 每个头部取首个 `name=value`，以 `; ` 拼接
    ///
    /// # 返回
    /// - None: 没有可用的 cookie
    pub fn from_set_cookie_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let pairs: Vec<&str> = headers
            .into_iter()
            .filter_map(|h| h.split(';').next())
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .collect();

        if pairs.is_empty() {
            None
        } else {
            Some(Self(pairs.join("; ")))
        }
    }

    /// 作为 Cookie 请求头的值
    pub fn header_value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken(***)")
    }
}

/// 凭据交换
///
/// # 参数
/// - http: HTTP 客户端
/// - endpoint: 登录端点（完整 URL）
/// - credentials: 用户名/密码
///
/// # 返回
/// - Err(Authentication): 非 200、传输失败或响应中无 Set-Cookie
#[instrument(skip(http, credentials), fields(username = %credentials.username))]
pub async fn authenticate(
    http: &Client,
    endpoint: &str,
    credentials: &Credentials,
) -> ServiceResult<SessionToken> {
    info!(endpoint = %endpoint, "请求端点");

    let auth_error = |message: String| {
        error!(
            endpoint = %endpoint,
            username = %credentials.username,
            message = %message,
            "认证失败"
        );
        ServiceError::Authentication {
            endpoint: endpoint.to_string(),
            message,
        }
    };

    let response = http
        .post(endpoint)
        .basic_auth(&credentials.username, Some(credentials.password()))
        .send()
        .await
        .map_err(|e| auth_error(e.to_string()))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(auth_error(format!("HTTP {}", status)));
    }

    let cookies = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok());

    SessionToken::from_set_cookie_headers(cookies)
        .ok_or_else(|| auth_error("响应中缺少 Set-Cookie".to_string()))
}

// ==========================================
// AuthSession - 会话（令牌 + 模板服务根地址）
// ==========================================
#[derive(Debug, Clone)]
pub struct AuthSession {
    token: SessionToken,
    base_uri: String,
}

impl AuthSession {
    pub fn new(token: SessionToken, base_uri: impl Into<String>) -> Self {
        Self {
            token,
            base_uri: base_uri.into(),
        }
    }

    /// 按配置登录并建立会话
    pub async fn establish(http: &Client, config: &TemplateServiceConfig) -> ServiceResult<Self> {
        let token = authenticate(http, &config.login_endpoint(), &config.credentials).await?;
        info!(base_uri = %config.base_uri, "认证成功，会话已建立");
        Ok(Self::new(token, config.base_uri.clone()))
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_from_multiple_cookies() {
        let token = SessionToken::from_set_cookie_headers([
            "session=abc123; Path=/; HttpOnly",
            "login=imqs; Max-Age=3600",
        ])
        .unwrap();
        assert_eq!(token.header_value(), "session=abc123; login=imqs");
    }

    #[test]
    fn test_token_requires_cookie() {
        assert!(SessionToken::from_set_cookie_headers(Vec::<&str>::new()).is_none());
        assert!(SessionToken::from_set_cookie_headers(["  ; Path=/"]).is_none());
    }

    #[test]
    fn test_token_debug_redacted() {
        let token = SessionToken::from_set_cookie_headers(["session=abc123"]).unwrap();
        assert!(!format!("{:?}", token).contains("abc123"));
    }
}
