// ==========================================
// BOQ 策略模板迁移工具 - 导入配置
// ==========================================
// 职责: 读取 boq-import-config.json，启动后不可变
// 红线: 仅做存在性检查，不校验远端可达性
// ==========================================
//
// 配置示例:
// {
//     "templateService": {
//         "baseURI": "http://192.168.1.65:8668/template/v1_0/",
//         "authSvcURI": "http://192.168.1.65/auth2/",
//         "username": "imqs",
//         "password": "password"
//     },
//     "batchSize": 5,
//     "importFilename": "/data/exports/export_boq.csv",
//     "fieldList": {
//         "eul": "NUMERIC",
//         "extentUnit": "STRING",
//         "IncludeDescriptorSize": "BOOLEAN"
//     }
// }

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::field_mapping::FieldMapping;
use reqwest::Url;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// 默认批量大小
pub const DEFAULT_BATCH_SIZE: usize = 50;

// ==========================================
// Credentials - 认证凭据
// ==========================================
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

// ==========================================
// TemplateServiceConfig - 模板服务连接配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateServiceConfig {
    /// 模板服务根地址（以 / 结尾）
    pub base_uri: String,
    /// 认证服务地址（以 / 结尾，或直接指向 login 端点）
    pub auth_uri: String,
    pub credentials: Credentials,
    /// None: 使用 HTTP 客户端默认超时
    pub request_timeout: Option<Duration>,
}

impl TemplateServiceConfig {
    pub fn new(base_uri: &str, auth_uri: Option<&str>, credentials: Credentials) -> ConfigResult<Self> {
        let base_uri = with_trailing_slash(base_uri);
        let auth_uri = match auth_uri {
            Some(uri) if !uri.trim().is_empty() => uri.trim().to_string(),
            _ => default_auth_uri(&base_uri)?,
        };

        Ok(Self {
            base_uri,
            auth_uri,
            credentials,
            request_timeout: None,
        })
    }

    /// 登录端点: `<authSvcURI>login`
    pub fn login_endpoint(&self) -> String {
        if self.auth_uri.trim_end_matches('/').ends_with("/login") {
            self.auth_uri.clone()
        } else {
            format!("{}login", with_trailing_slash(&self.auth_uri))
        }
    }

    /// 分类树端点: `<baseURI>tree`
    pub fn tree_endpoint(&self) -> String {
        format!("{}tree", self.base_uri)
    }

    /// 模板端点: `<baseURI>templates`
    pub fn templates_endpoint(&self) -> String {
        format!("{}templates", self.base_uri)
    }
}

// ==========================================
// ImportConfig - 导入配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub source_file: PathBuf,
    pub batch_size: usize,
    pub field_mapping: FieldMapping,
    pub service: TemplateServiceConfig,
    /// None: 使用内置的 BOQ 分类类型定义
    pub bootstrap_file: Option<PathBuf>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawImportConfig {
    import_filename: Option<String>,
    #[serde(default)]
    batch_size: Option<serde_json::Value>,
    field_list: Option<FieldMapping>,
    #[serde(alias = "imqs-template-service")]
    template_service: Option<RawServiceConfig>,
    bootstrap_file: Option<String>,
}

#[derive(Deserialize)]
struct RawServiceConfig {
    #[serde(rename = "baseURI")]
    base_uri: Option<String>,
    #[serde(rename = "authSvcURI")]
    auth_svc_uri: Option<String>,
    username: Option<String>,
    password: Option<String>,
    #[serde(rename = "requestTimeoutSecs")]
    request_timeout_secs: Option<u64>,
}

impl ImportConfig {
    /// 从 JSON 文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    /// 从 JSON 文本解析
    ///
    /// 直接反序列化原文（不经 serde_json::Value），以保留 fieldList 的声明顺序
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let raw: RawImportConfig = serde_json::from_str(text)?;

        let source_file = required(raw.import_filename, "importFilename")?;
        let field_mapping = raw
            .field_list
            .ok_or_else(|| ConfigError::MissingKey("fieldList".to_string()))?;
        let svc = raw
            .template_service
            .ok_or_else(|| ConfigError::MissingKey("templateService".to_string()))?;

        let base_uri = required(svc.base_uri, "templateService.baseURI")?;
        let credentials = Credentials::new(
            required(svc.username, "templateService.username")?,
            required(svc.password, "templateService.password")?,
        );

        let mut service =
            TemplateServiceConfig::new(&base_uri, svc.auth_svc_uri.as_deref(), credentials)?;
        service.request_timeout = svc
            .request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Ok(Self {
            source_file: PathBuf::from(source_file),
            batch_size: resolve_batch_size(raw.batch_size.as_ref()),
            field_mapping,
            service,
            bootstrap_file: raw
                .bootstrap_file
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

fn required(value: Option<String>, key: &str) -> ConfigResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConfigError::MissingKey(key.to_string())),
    }
}

/// batchSize 解析：整数、整数值浮点数或数字字符串；缺失/无法解析/非正数 → 默认 50
fn resolve_batch_size(value: Option<&serde_json::Value>) -> usize {
    let parsed = match value {
        None | Some(serde_json::Value::Null) => return DEFAULT_BATCH_SIZE,
        // 5.0 这类整数值浮点数按整数处理
        Some(serde_json::Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Some(serde_json::Value::String(s)) => s.trim().parse::<u64>().ok(),
        Some(_) => None,
    };

    match parsed
        .filter(|n| *n > 0)
        .and_then(|n| usize::try_from(n).ok())
    {
        Some(n) => n,
        None => {
            warn!(
                value = %value.map(|v| v.to_string()).unwrap_or_default(),
                default = DEFAULT_BATCH_SIZE,
                "batchSize 无法解析，使用默认值"
            );
            DEFAULT_BATCH_SIZE
        }
    }
}

fn with_trailing_slash(uri: &str) -> String {
    let uri = uri.trim();
    if uri.ends_with('/') {
        uri.to_string()
    } else {
        format!("{}/", uri)
    }
}

/// 未配置 authSvcURI 时，取 baseURI 的 origin + /auth2/
fn default_auth_uri(base_uri: &str) -> ConfigResult<String> {
    let url = Url::parse(base_uri).map_err(|e| ConfigError::InvalidValue {
        key: "templateService.baseURI".to_string(),
        value: base_uri.to_string(),
        message: e.to_string(),
    })?;

    let host = url.host_str().ok_or_else(|| ConfigError::InvalidValue {
        key: "templateService.baseURI".to_string(),
        value: base_uri.to_string(),
        message: "缺少主机名".to_string(),
    })?;

    let port = url.port().map(|p| format!(":{}", p)).unwrap_or_default();
    Ok(format!("{}://{}{}/auth2/", url.scheme(), host, port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DataType;

    const FULL_CONFIG: &str = r#"{
        "imqs-template-service": {
            "baseURI": "http://10.0.0.5:8668/template/v1_0",
            "authSvcURI": "http://10.0.0.5/auth2/",
            "username": "imqs",
            "password": "secret"
        },
        "batchSize": 5,
        "importFilename": "export_boq.csv",
        "fieldList": {
            "eul": "NUMERIC",
            "extentUnit": "STRING",
            "descriptorSizeValue": "NUMERIC"
        }
    }"#;

    #[test]
    fn test_load_full_config() {
        let config = ImportConfig::from_json_str(FULL_CONFIG).unwrap();

        assert_eq!(config.source_file, PathBuf::from("export_boq.csv"));
        assert_eq!(config.batch_size, 5);
        assert_eq!(config.field_mapping.len(), 3);
        assert_eq!(
            config.field_mapping.iter().next().unwrap().data_type,
            DataType::Numeric
        );
        assert_eq!(config.service.base_uri, "http://10.0.0.5:8668/template/v1_0/");
        assert_eq!(config.service.tree_endpoint(), "http://10.0.0.5:8668/template/v1_0/tree");
        assert_eq!(config.service.login_endpoint(), "http://10.0.0.5/auth2/login");
        assert_eq!(config.service.credentials.password(), "secret");
        assert!(config.service.request_timeout.is_none());
        assert!(config.bootstrap_file.is_none());
    }

    #[test]
    fn test_batch_size_defaults() {
        assert_eq!(resolve_batch_size(None), 50);
        assert_eq!(resolve_batch_size(Some(&serde_json::json!("abc"))), 50);
        assert_eq!(resolve_batch_size(Some(&serde_json::json!(0))), 50);
        assert_eq!(resolve_batch_size(Some(&serde_json::json!(-3))), 50);
        assert_eq!(resolve_batch_size(Some(&serde_json::json!("12"))), 12);
        assert_eq!(resolve_batch_size(Some(&serde_json::json!(7))), 7);
        assert_eq!(resolve_batch_size(Some(&serde_json::json!(5.0))), 5);
        assert_eq!(resolve_batch_size(Some(&serde_json::json!(5.5))), 50);
        assert_eq!(resolve_batch_size(Some(&serde_json::json!(-2.0))), 50);
    }

    #[test]
    fn test_missing_import_filename() {
        let json = r#"{"fieldList": {}, "templateService": {"baseURI": "http://h/", "username": "u", "password": "p"}}"#;
        let err = ImportConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey(ref k) if k == "importFilename"));
    }

    #[test]
    fn test_default_auth_uri_derived_from_base() {
        let json = r#"{
            "importFilename": "a.csv",
            "fieldList": {},
            "templateService": {"baseURI": "https://svc.local:8443/template/v1_0/", "username": "u", "password": "p"}
        }"#;
        let config = ImportConfig::from_json_str(json).unwrap();
        assert_eq!(config.service.auth_uri, "https://svc.local:8443/auth2/");
        assert_eq!(config.service.login_endpoint(), "https://svc.local:8443/auth2/login");
    }

    #[test]
    fn test_login_endpoint_not_doubled() {
        let creds = Credentials::new("u", "p");
        let svc = TemplateServiceConfig::new("http://h/t/", Some("http://h/auth2/login"), creds).unwrap();
        assert_eq!(svc.login_endpoint(), "http://h/auth2/login");
    }

    #[test]
    fn test_password_not_in_debug() {
        let creds = Credentials::new("imqs", "top-secret");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("imqs"));
        assert!(!debug.contains("top-secret"));
    }
}
