//! Configuration loading for the feedback binary
//!
//! Priority order (highest to lowest):
//! 1. Command-line flags and environment variables (via clap)
//! 2. TOML file (`--config`, else ./feedback.toml)
//! 3. .env files (current directory, then ~/.feedback/.env)
//! 4. Built-in defaults

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use feedback_server::http::server::{normalize_prefix, DEFAULT_API_PREFIX, DEFAULT_CORS_ORIGINS};
use feedback_server::ServerConfig;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

/// Config file looked up in the current directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "feedback.toml";

/// Load environment variables from .env files.
///
/// dotenvy never overwrites variables that are already set, so the
/// current directory wins over ~/.feedback/.env and both lose to the
/// real environment. Returns the files that were loaded.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded.push(env_file);
        }
    }

    loaded
}

/// Get the feedback config directory path (~/.feedback)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".feedback"))
}

// ============================================================================
// TOML Configuration
// ============================================================================

#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeedbackConfig {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Debug-level logging
    #[serde(default)]
    pub debug: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_prefix: default_api_prefix(),
            cors_origins: default_cors_origins(),
            debug: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSection {
    /// Full connection URL; wins over the discrete fields below
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_db_host")]
    pub host: String,

    #[serde(default = "default_db_port")]
    pub port: u16,

    #[serde(default = "default_db_name")]
    pub name: String,

    #[serde(default = "default_db_user")]
    pub user: String,

    #[serde(default)]
    pub password: Option<String>,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            host: default_db_host(),
            port: default_db_port(),
            name: default_db_name(),
            user: default_db_user(),
            password: None,
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_api_prefix() -> String {
    DEFAULT_API_PREFIX.to_string()
}

fn default_cors_origins() -> Vec<String> {
    DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect()
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_name() -> String {
    "fullstack_demo".to_string()
}

fn default_db_user() -> String {
    "postgres".to_string()
}

impl FeedbackConfig {
    /// Load config from a TOML file.
    ///
    /// An explicit path must exist. Without one, ./feedback.toml is used
    /// when present, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.exists() {
                    Self::from_file(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

impl ServerSection {
    /// Resolve into the server's runtime configuration.
    pub fn to_server_config(&self) -> Result<ServerConfig> {
        let bind_addr = resolve_bind_addr(&self.host, self.port)?;

        Ok(ServerConfig {
            bind_addr,
            api_prefix: normalize_prefix(&self.api_prefix),
            cors_origins: self.cors_origins.clone(),
        })
    }
}

fn resolve_bind_addr(host: &str, port: u16) -> Result<SocketAddr> {
    (host, port)
        .to_socket_addrs()
        .with_context(|| format!("Invalid bind address {}:{}", host, port))?
        .next()
        .with_context(|| format!("Bind address {}:{} did not resolve", host, port))
}

impl DatabaseSection {
    /// Build connection options from the URL, or from the discrete fields.
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        if let Some(url) = &self.url {
            return url.parse().context("Invalid database URL");
        }

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user);

        if let Some(password) = &self.password {
            options = options.password(password);
        }

        Ok(options)
    }
}

// ============================================================================
// Command-line overrides
// ============================================================================

/// Server flags; each overrides the config file when given
#[derive(Args, Debug, Default)]
pub struct ServerOverrides {
    /// Host to bind to [default: 0.0.0.0]
    #[arg(long, env = "FEEDBACK_HOST")]
    pub host: Option<String>,

    /// Port to listen on [default: 5000]
    #[arg(long, short = 'p', env = "FEEDBACK_PORT")]
    pub port: Option<u16>,

    /// Prefix all routes are mounted under [default: /api]
    #[arg(long, env = "FEEDBACK_API_PREFIX")]
    pub api_prefix: Option<String>,

    /// Allowed CORS origin (repeatable, or comma-separated)
    #[arg(long = "cors-origin", env = "FEEDBACK_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
}

impl ServerOverrides {
    pub fn apply(&self, server: &mut ServerSection) {
        if let Some(host) = &self.host {
            server.host = host.clone();
        }
        if let Some(port) = self.port {
            server.port = port;
        }
        if let Some(prefix) = &self.api_prefix {
            server.api_prefix = prefix.clone();
        }
        let origins: Vec<String> = self
            .cors_origins
            .iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        if !origins.is_empty() {
            server.cors_origins = origins;
        }
    }
}

/// Database flags; each overrides the config file when given
#[derive(Args, Debug, Default)]
pub struct DatabaseOverrides {
    /// Full PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Database host [default: localhost]
    #[arg(long, env = "PGHOST")]
    pub db_host: Option<String>,

    /// Database port [default: 5432]
    #[arg(long, env = "PGPORT")]
    pub db_port: Option<u16>,

    /// Database name [default: fullstack_demo]
    #[arg(long, env = "PGDATABASE")]
    pub db_name: Option<String>,

    /// Database user [default: postgres]
    #[arg(long, env = "PGUSER")]
    pub db_user: Option<String>,

    /// Database password
    #[arg(long, env = "PGPASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,
}

impl DatabaseOverrides {
    pub fn apply(&self, database: &mut DatabaseSection) {
        if let Some(url) = &self.database_url {
            database.url = Some(url.clone());
        }
        if let Some(host) = &self.db_host {
            database.host = host.clone();
        }
        if let Some(port) = self.db_port {
            database.port = port;
        }
        if let Some(name) = &self.db_name {
            database.name = name.clone();
        }
        if let Some(user) = &self.db_user {
            database.user = user.clone();
        }
        if let Some(password) = &self.db_password {
            database.password = Some(password.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_original_deployment() {
        let config = FeedbackConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.api_prefix, "/api");
        assert_eq!(
            config.server.cors_origins,
            ["http://localhost:5173", "http://localhost:3000"]
        );
        assert!(!config.server.debug);
        assert_eq!(config.database.name, "fullstack_demo");
        assert_eq!(config.database.port, 5432);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config(
            r#"
            [server]
            port = 8080
            cors_origins = ["https://feedback.example"]

            [database]
            name = "feedback"
            password = "secret"
            "#,
        );

        let config = FeedbackConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.cors_origins, ["https://feedback.example"]);
        assert_eq!(config.database.name, "feedback");
        assert_eq!(config.database.user, "postgres");
        assert_eq!(config.database.password.as_deref(), Some("secret"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = FeedbackConfig::load(Some(Path::new("/nonexistent/feedback.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = write_config("[server]\nport = \"not a number\"\n");
        let err = FeedbackConfig::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn overrides_win_over_file() {
        let mut config = FeedbackConfig::default();

        ServerOverrides {
            host: Some("127.0.0.1".into()),
            port: Some(9000),
            api_prefix: Some("v1/".into()),
            cors_origins: vec![" http://a.example ".into(), "".into()],
        }
        .apply(&mut config.server);

        DatabaseOverrides {
            db_name: Some("other".into()),
            ..Default::default()
        }
        .apply(&mut config.database);

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.cors_origins, ["http://a.example"]);
        assert_eq!(config.database.name, "other");
        assert_eq!(config.database.host, "localhost");

        let server = config.server.to_server_config().unwrap();
        assert_eq!(server.bind_addr, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(server.api_prefix, "/v1");
    }

    #[test]
    fn empty_overrides_change_nothing() {
        let mut config = FeedbackConfig::default();
        ServerOverrides::default().apply(&mut config.server);
        DatabaseOverrides::default().apply(&mut config.database);

        let defaults = FeedbackConfig::default();
        assert_eq!(config.server.cors_origins, defaults.server.cors_origins);
        assert_eq!(config.database.url, None);
    }

    #[test]
    fn connect_options_from_parts() {
        let database = DatabaseSection {
            host: "db.internal".into(),
            port: 6543,
            name: "feedback".into(),
            user: "app".into(),
            ..Default::default()
        };

        let options = database.connect_options().unwrap();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_database(), Some("feedback"));
        assert_eq!(options.get_username(), "app");
    }

    #[test]
    fn url_wins_over_parts() {
        let database = DatabaseSection {
            url: Some("postgres://u:p@urlhost:5555/urldb".into()),
            host: "ignored".into(),
            ..Default::default()
        };

        let options = database.connect_options().unwrap();
        assert_eq!(options.get_host(), "urlhost");
        assert_eq!(options.get_port(), 5555);
        assert_eq!(options.get_database(), Some("urldb"));
    }

    #[test]
    fn invalid_url_is_an_error() {
        let database = DatabaseSection {
            url: Some("not a url".into()),
            ..Default::default()
        };
        assert!(database.connect_options().is_err());
    }
}
