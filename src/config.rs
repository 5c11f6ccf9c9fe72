/*
 * Responsibility
 * - 環境変数の読み込み (PORT, API_TOKEN, DATABASE_URL, CORS 許可など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// どの storage backend を使うか
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    // 開発用。プロセス内の list なので再起動で消える
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // Authorization: Bearer <api_token> と完全一致で比較する
    pub api_token: String,

    pub storage: StorageConfig,

    pub cors_allowed_origins: Vec<String>,

    pub request_timeout: Duration,
    pub request_body_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `from_env` の本体。テストから任意の値を差し込めるように lookup を受け取る
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = lookup("APP_ENV")
            .map(|v| AppEnv::parse(&v))
            .unwrap_or(AppEnv::Development);

        let api_token = lookup("API_TOKEN")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("API_TOKEN"))?;

        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(5);

        let storage = match lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            Some(database_url) => StorageConfig::Postgres {
                database_url,
                max_connections,
            },
            // production で in-memory に落ちるのは事故なので起動失敗にする
            None if app_env.is_production() => return Err(ConfigError::Missing("DATABASE_URL")),
            None => StorageConfig::Memory,
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let request_timeout = lookup("REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let request_body_limit = lookup("REQUEST_BODY_LIMIT_BYTES")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        Ok(Self {
            addr,
            app_env,
            api_token,
            storage,
            cors_allowed_origins,
            request_timeout,
            request_body_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn api_token_is_required() {
        assert_eq!(load(&[]).unwrap_err(), ConfigError::Missing("API_TOKEN"));
        assert_eq!(
            load(&[("API_TOKEN", "")]).unwrap_err(),
            ConfigError::Missing("API_TOKEN")
        );
    }

    #[test]
    fn defaults_to_memory_storage_in_development() {
        let config = load(&[("API_TOKEN", "secret")]).unwrap();
        assert_eq!(config.storage, StorageConfig::Memory);
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn production_requires_database_url() {
        let err = load(&[("API_TOKEN", "secret"), ("APP_ENV", "prod")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));

        let config = load(&[
            ("API_TOKEN", "secret"),
            ("APP_ENV", "production"),
            ("DATABASE_URL", "postgres://localhost/bookmarks"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ])
        .unwrap();
        assert_eq!(
            config.storage,
            StorageConfig::Postgres {
                database_url: "postgres://localhost/bookmarks".into(),
                max_connections: 12,
            }
        );
    }

    #[test]
    fn rejects_unparsable_port() {
        let err = load(&[("API_TOKEN", "secret"), ("PORT", "http")]).unwrap_err();
        assert_eq!(err, ConfigError::Invalid("PORT"));
    }

    #[test]
    fn splits_cors_origins() {
        let config = load(&[
            ("API_TOKEN", "secret"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
        ])
        .unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }
}
