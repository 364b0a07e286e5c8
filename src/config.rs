//! Configuration module for Agora.

use serde::Deserialize;
use std::path::Path;

use crate::{AgoraError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins. Empty means permissive (development mode).
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/agora.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Authentication configuration.
///
/// Session tokens carry a fixed 7-day expiry; only the signing secret is
/// configurable.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// JWT signing secret (must be set; the server refuses to start without it).
    #[serde(default)]
    pub jwt_secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/agora.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Initial admin bootstrap configuration.
///
/// When all four fields are set and no admin account exists yet, one is
/// created at startup. Leaving any field empty skips the bootstrap.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BootstrapConfig {
    /// Username for the initial admin account.
    #[serde(default)]
    pub admin_username: String,
    /// Password for the initial admin account.
    #[serde(default)]
    pub admin_password: String,
    /// Display name for the initial admin account.
    #[serde(default)]
    pub admin_nickname: String,
    /// Email for the initial admin account.
    #[serde(default)]
    pub admin_email: String,
}

impl BootstrapConfig {
    /// Whether every field required to create the admin account is present.
    pub fn is_complete(&self) -> bool {
        !self.admin_username.is_empty()
            && !self.admin_password.is_empty()
            && !self.admin_nickname.is_empty()
            && !self.admin_email.is_empty()
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Initial admin bootstrap.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(AgoraError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| AgoraError::Validation(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `AGORA_JWT_SECRET`: Override the JWT signing secret
    /// - `AGORA_DB_PATH`: Override the database file path
    pub fn apply_env_overrides(&mut self) {
        // JWT secret from environment variable (highest priority)
        if let Ok(jwt_secret) = std::env::var("AGORA_JWT_SECRET") {
            if !jwt_secret.is_empty() {
                self.auth.jwt_secret = jwt_secret;
            }
        }
        if let Ok(db_path) = std::env::var("AGORA_DB_PATH") {
            if !db_path.is_empty() {
                self.database.path = db_path;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the JWT secret is not set. The server must never
    /// issue unsigned or default-keyed session tokens.
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(AgoraError::Config(
                "jwt_secret is not set. \
                 Set it in config.toml or via the AGORA_JWT_SECRET environment variable."
                    .to_string(),
            ));
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

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.server.cors_origins.is_empty());

        assert_eq!(config.database.path, "data/agora.db");

        assert!(config.auth.jwt_secret.is_empty());

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/agora.log");

        assert!(config.bootstrap.admin_username.is_empty());
        assert!(!config.bootstrap.is_complete());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 3000
cors_origins = ["http://localhost:3000", "http://localhost:5173"]

[database]
path = "custom/board.sqlite"

[auth]
jwt_secret = "test-secret-key"

[logging]
level = "debug"
file = "custom/logs/app.log"

[bootstrap]
admin_username = "admin"
admin_password = "changeme1"
admin_nickname = "Admin"
admin_email = "admin@example.com"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.cors_origins.len(), 2);
        assert_eq!(config.server.cors_origins[0], "http://localhost:3000");

        assert_eq!(config.database.path, "custom/board.sqlite");

        assert_eq!(config.auth.jwt_secret, "test-secret-key");

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");

        assert!(config.bootstrap.is_complete());
        assert_eq!(config.bootstrap.admin_username, "admin");
        assert_eq!(config.bootstrap.admin_email, "admin@example.com");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 3000

[auth]
jwt_secret = "partial-secret"
"#;

        let config = Config::parse(toml).unwrap();

        // Specified values
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.jwt_secret, "partial-secret");

        // Default values
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.path, "data/agora.db");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_empty_config() {
        let toml = "";
        let config = Config::parse(toml).unwrap();

        // All defaults
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, "data/agora.db");
    }

    #[test]
    fn test_parse_invalid_config() {
        let toml = "this is not valid toml [[[";
        let result = Config::parse(toml);

        assert!(result.is_err());
        if let Err(AgoraError::Validation(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Validation error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");

        assert!(result.is_err());
        assert!(matches!(result, Err(AgoraError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[server]
port = 9999

[auth]
jwt_secret = "file-secret"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.auth.jwt_secret, "file-secret");
    }

    // Single test for the env override paths; parallel tests must not
    // race on the same process-wide variable.
    #[test]
    fn test_apply_env_overrides() {
        let original = std::env::var("AGORA_JWT_SECRET").ok();

        std::env::set_var("AGORA_JWT_SECRET", "env-secret-key");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.auth.jwt_secret, "env-secret-key");

        // An empty value must not override an existing secret
        std::env::set_var("AGORA_JWT_SECRET", "");
        let mut config = Config::default();
        config.auth.jwt_secret = "original-secret".to_string();
        config.apply_env_overrides();
        assert_eq!(config.auth.jwt_secret, "original-secret");

        if let Some(val) = original {
            std::env::set_var("AGORA_JWT_SECRET", val);
        } else {
            std::env::remove_var("AGORA_JWT_SECRET");
        }
    }

    #[test]
    fn test_validate_no_secret() {
        let config = Config::default();

        let result = config.validate();
        assert!(result.is_err());
        if let Err(AgoraError::Config(msg)) = result {
            assert!(msg.contains("jwt_secret"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_validate_with_secret() {
        let mut config = Config::default();
        config.auth.jwt_secret = "secret".to_string();

        assert!(config.validate().is_ok());
    }
}
