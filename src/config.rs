//! Configuration module
//!
//! Loaded from a TOML file (default: ~/.config/evslot-service/config.toml,
//! override with the EVSLOT_CONFIG environment variable). Every field
//! has a default so a missing file or partial file still boots.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Application configuration root
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub otp: OtpConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Graceful shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl DatabaseSettings {
    pub fn connection_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: i64,
    /// PBKDF2-HMAC-SHA256 iteration count for the credential store
    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpConfig {
    /// One-time code lifetime in minutes
    #[serde(default = "default_otp_ttl_minutes")]
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    /// How often the expiry task scans for stale pending bookings
    #[serde(default = "default_expiry_check_interval")]
    pub expiry_check_interval_secs: u64,
    /// Pending bookings older than this are auto-cancelled
    #[serde(default = "default_pending_ttl_minutes")]
    pub pending_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_email")]
    pub email: String,
    #[serde(default = "default_admin_name")]
    pub name: String,
    #[serde(default = "default_admin_password")]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_shutdown_timeout() -> u64 {
    30
}
fn default_db_path() -> String {
    "./evslot.db".to_string()
}
fn default_jwt_secret() -> String {
    "super-secret-key-change-in-production".to_string()
}
fn default_jwt_expiration_hours() -> i64 {
    24
}
fn default_pbkdf2_iterations() -> u32 {
    100_000
}
fn default_otp_ttl_minutes() -> i64 {
    10
}
fn default_expiry_check_interval() -> u64 {
    60
}
fn default_pending_ttl_minutes() -> i64 {
    30
}
fn default_admin_email() -> String {
    "admin@evslot.local".to_string()
}
fn default_admin_name() -> String {
    "Administrator".to_string()
}
fn default_admin_password() -> String {
    "admin123".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_expiration_hours: default_jwt_expiration_hours(),
            pbkdf2_iterations: default_pbkdf2_iterations(),
        }
    }
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_otp_ttl_minutes(),
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            expiry_check_interval_secs: default_expiry_check_interval(),
            pending_ttl_minutes: default_pending_ttl_minutes(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: default_admin_email(),
            name: default_admin_name(),
            password: default_admin_password(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        toml::from_str(&raw).map_err(ConfigError::Parse)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {0}: {1}")]
    Io(String, #[source] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Default config path: ~/.config/evslot-service/config.toml
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("evslot-service")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.otp.ttl_minutes, 10);
        assert_eq!(cfg.security.pbkdf2_iterations, 100_000);
        assert_eq!(cfg.booking.pending_ttl_minutes, 30);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9090

            [otp]
            ttl_minutes = 5

            [security]
            pbkdf2_iterations = 10000
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.otp.ttl_minutes, 5);
        assert_eq!(cfg.security.pbkdf2_iterations, 10_000);
        assert_eq!(cfg.bind_address(), "0.0.0.0:9090");
    }

    #[test]
    fn database_url_is_sqlite_rwc() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.database.connection_url(), "sqlite://./evslot.db?mode=rwc");
    }
}
