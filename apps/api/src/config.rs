//! Server configuration module.
//!
//! Configuration is loaded from an optional `.env` file and environment
//! variables, with fallback to defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use kasir_db::DbConfig;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind (default: 0.0.0.0)
    pub host: String,

    /// Port to listen on (default: 8080)
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Connection pool size (default: 5)
    pub db_max_connections: u32,

    /// Seconds to wait for a pooled connection (default: 5)
    pub db_acquire_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `HOST` | `0.0.0.0` |
    /// | `PORT` | `8080` |
    /// | `KASIR_DB_PATH` | platform data dir + `kasir.db` |
    /// | `DB_MAX_CONNECTIONS` | `5` |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `5` |
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_path = match env::var("KASIR_DB_PATH") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_database_path()?,
        };

        let config = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 8080)?,
            database_path,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout_secs: parse_var("DB_ACQUIRE_TIMEOUT_SECS", 5)?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Socket address to bind to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("HOST".to_string()))
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
            .max_connections(self.db_max_connections)
            .acquire_timeout(Duration::from_secs(self.db_acquire_timeout_secs))
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

/// Platform data directory for the database.
///
/// - **macOS**: `~/Library/Application Support/com.kasir.pos/kasir.db`
/// - **Windows**: `%APPDATA%\kasir\pos\data\kasir.db`
/// - **Linux**: `~/.local/share/pos/kasir.db`
fn default_database_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("com", "kasir", "pos").ok_or(ConfigError::NoDataDir)?;
    let data_dir = proj_dirs.data_dir();

    std::fs::create_dir_all(data_dir)
        .map_err(|e| ConfigError::DataDir(data_dir.display().to_string(), e))?;

    Ok(data_dir.join("kasir.db"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine app data directory; set KASIR_DB_PATH")]
    NoDataDir,

    #[error("Could not create data directory {0}: {1}")]
    DataDir(String, #[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_default_and_invalid() {
        assert_eq!(parse_var::<u16>("KASIR_TEST_UNSET_PORT", 8080).unwrap(), 8080);

        env::set_var("KASIR_TEST_BAD_PORT", "eighty");
        assert!(matches!(
            parse_var::<u16>("KASIR_TEST_BAD_PORT", 8080),
            Err(ConfigError::InvalidValue(name)) if name == "KASIR_TEST_BAD_PORT"
        ));
        env::remove_var("KASIR_TEST_BAD_PORT");
    }

    #[test]
    fn test_socket_addr_and_db_config() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
            database_path: PathBuf::from("/tmp/kasir-test.db"),
            db_max_connections: 3,
            db_acquire_timeout_secs: 2,
        };

        assert_eq!(config.socket_addr().unwrap().port(), 9000);

        let db = config.db_config();
        assert_eq!(db.max_connections, 3);
        assert_eq!(db.acquire_timeout, Duration::from_secs(2));
        assert_eq!(db.database_path, PathBuf::from("/tmp/kasir-test.db"));
    }
}
