//! 客户端运行配置加载。

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 客户端与本地开发服务的运行配置。
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    /// 未设置时请求没有超时。
    pub http_timeout: Option<Duration>,
    /// 未设置时凭据仅保存在内存中。
    pub auth_token_file: Option<PathBuf>,
    pub default_page_size: u32,
    pub wizard_rollback: bool,
    pub dev_server_addr: String,
    /// 设置后本地开发服务要求 `Authorization: Bearer <token>`。
    pub dev_server_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api".to_string(),
            http_timeout: None,
            auth_token_file: None,
            default_page_size: 20,
            wizard_rollback: false,
            dev_server_addr: "127.0.0.1:8080".to_string(),
            dev_server_token: None,
        }
    }
}

impl ClientConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let api_url = env::var("BATIMENT_API_URL")
            .map(|value| value.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);
        let http_timeout = read_optional_u64("BATIMENT_HTTP_TIMEOUT_SECONDS")?
            .filter(|value| *value > 0)
            .map(Duration::from_secs);
        let auth_token_file = read_optional("BATIMENT_AUTH_TOKEN_FILE").map(PathBuf::from);
        let default_page_size =
            read_u32_with_default("BATIMENT_DEFAULT_PAGE_SIZE", defaults.default_page_size)?;
        if default_page_size == 0 {
            return Err(ConfigError::Invalid(
                "BATIMENT_DEFAULT_PAGE_SIZE".to_string(),
                "0".to_string(),
            ));
        }
        let wizard_rollback = read_bool_with_default("BATIMENT_WIZARD_ROLLBACK", false);
        let dev_server_addr =
            env::var("BATIMENT_DEV_SERVER_ADDR").unwrap_or(defaults.dev_server_addr);
        let dev_server_token = read_optional("BATIMENT_DEV_SERVER_TOKEN");

        Ok(Self {
            api_url,
            http_timeout,
            auth_token_file,
            default_page_size,
            wizard_rollback,
            dev_server_addr,
            dev_server_token,
        })
    }

    /// 先加载本地 .env（如存在），再读取环境变量。
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }
}

fn read_u32_with_default(key: &str, default: u32) -> Result<u32, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u32>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_optional_u64(key: &str) -> Result<Option<u64>, ConfigError> {
    match env::var(key) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(key.to_string(), value)),
        Err(_) => Ok(None),
    }
}

fn read_bool_with_default(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => default,
    }
}
