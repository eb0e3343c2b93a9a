use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable that overrides `[email] api_key`, so the secret can
/// live in `.env` instead of the config file.
pub const EMAIL_API_KEY_ENV: &str = "BETAPOOL_EMAIL_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub pool: PoolConfig,

    pub email: EmailConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    #[serde(default)]
    pub suppress_connection_errors: bool,

    /// Event bus buffer size (default: 100)
    pub event_bus_buffer_size: usize,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/betapool.db".to_string(),
            log_level: "info".to_string(),
            suppress_connection_errors: false,
            event_bus_buffer_size: 100,
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8750,
            cors_allowed_origins: vec![
                "http://localhost:8750".to_string(),
                "http://127.0.0.1:8750".to_string(),
            ],
        }
    }
}

/// One pre-provisioned credential in the `[[pool.accounts]]` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolAccountConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// The fixed account pool, synced into the database at startup.
    pub accounts: Vec<PoolAccountConfig>,

    /// Remaining-spots threshold that triggers a pool-low warning.
    pub low_watermark: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            accounts: default_pool_accounts(),
            low_watermark: 5,
        }
    }
}

/// The 20-account pool the beta launched with: `beta_user_NNN` plus a fixed
/// password prefix and a per-account suffix.
fn default_pool_accounts() -> Vec<PoolAccountConfig> {
    const SUFFIXES: [char; 20] = [
        '!', '@', '#', '$', '%', '^', '&', '*', '+', '=', '?', '<', '>', '[', ']', '{', '}', '|',
        '~', '`',
    ];

    SUFFIXES
        .iter()
        .enumerate()
        .map(|(i, suffix)| PoolAccountConfig {
            username: format!("beta_user_{:03}", i + 1),
            password: format!("VaniB2024{suffix}"),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// When false, deliveries are logged instead of sent and reported as
    /// successful (simulation mode).
    pub enabled: bool,

    /// Base URL of the Mailgun-compatible HTTP API.
    pub api_base_url: String,

    /// Sending domain registered with the mail provider.
    pub domain: String,

    /// API key; prefer supplying it via `BETAPOOL_EMAIL_API_KEY`.
    pub api_key: String,

    /// From header, e.g. `Vaniloom Beta <beta@vaniloom.com>`.
    pub from: String,

    /// Administrator address that receives a copy of every credentials email.
    pub admin_copy_to: Option<String>,

    /// Sign-in link embedded in the credentials email.
    pub signin_url: String,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u32,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_base_url: "https://api.mailgun.net".to_string(),
            domain: "mail.vaniloom.com".to_string(),
            api_key: String::new(),
            from: "Vaniloom Beta <beta@vaniloom.com>".to_string(),
            admin_copy_to: None,
            signin_url: "https://vaniloom.com".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,

    pub loki_labels: std::collections::HashMap<String, String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        let mut labels = std::collections::HashMap::new();
        labels.insert("app".to_string(), "betapool".to_string());

        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
            loki_labels: labels,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            pool: PoolConfig::default(),
            email: EmailConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(EMAIL_API_KEY_ENV) {
            if !key.is_empty() {
                self.email.api_key = key;
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::default_config_path();
        self.save_to_path(&path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("betapool").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".betapool").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pool.accounts.is_empty() {
            anyhow::bail!("Account pool cannot be empty");
        }

        let mut usernames: Vec<&str> = self
            .pool
            .accounts
            .iter()
            .map(|a| a.username.as_str())
            .collect();
        usernames.sort_unstable();
        usernames.dedup();
        if usernames.len() != self.pool.accounts.len() {
            anyhow::bail!("Account pool contains duplicate usernames");
        }

        if self.email.enabled {
            if self.email.api_key.is_empty() {
                anyhow::bail!(
                    "Email API key cannot be empty when email is enabled (set {EMAIL_API_KEY_ENV} or [email] api_key)"
                );
            }
            if self.email.domain.is_empty() {
                anyhow::bail!("Email domain cannot be empty when email is enabled");
            }
            if self.email.from.is_empty() {
                anyhow::bail!("Email from address cannot be empty when email is enabled");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.pool.accounts.len(), 20);
        assert_eq!(config.pool.accounts[0].username, "beta_user_001");
        assert_eq!(config.pool.accounts[0].password, "VaniB2024!");
        assert_eq!(config.pool.low_watermark, 5);
        assert!(!config.email.enabled);
        assert_eq!(config.server.port, 8750);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[[pool.accounts]]"));
        assert!(toml_str.contains("[email]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [pool]
            low_watermark = 2

            [[pool.accounts]]
            username = "tester_001"
            password = "secret"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.pool.low_watermark, 2);
        assert_eq!(config.pool.accounts.len(), 1);

        assert_eq!(config.email.api_base_url, "https://api.mailgun.net");
    }

    #[test]
    fn test_validate_rejects_bad_pools() {
        let mut config = Config::default();
        config.pool.accounts.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.pool.accounts[1].username = config.pool.accounts[0].username.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_email_credentials_when_enabled() {
        let mut config = Config::default();
        config.email.enabled = true;
        config.email.api_key = String::new();
        assert!(config.validate().is_err());

        config.email.api_key = "key-test".to_string();
        assert!(config.validate().is_ok());
    }
}
