//! Configuration management
//!
//! Sources, lowest precedence first: built-in defaults,
//! `config/neoservice.toml` (optional), `NEOSERVICE__SECTION__KEY`
//! environment variables, then the plain `DATABASE_URL`, `DATABASE_NAME`,
//! `HOST` and `PORT` variables.

use ::config::builder::DefaultState;
use ::config::{ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which document store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub database: DatabaseConfig,
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL; the store stays uninitialized without it
    pub url: Option<String>,
    /// Database name, overriding the one in `url`
    pub name: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

impl DatabaseConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            name: None,
            max_connections: 10,
            min_connections: 2,
            connect_timeout_secs: 5,
            idle_timeout_secs: 600,  // 10 minutes
            max_lifetime_secs: 1800, // 30 minutes
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            store: StoreConfig {
                backend: if cfg!(feature = "postgres") {
                    StoreBackend::Postgres
                } else {
                    StoreBackend::Memory
                },
                database: DatabaseConfig::default(),
            },
        }
    }
}

impl Config {
    /// Load configuration from the file and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("config/neoservice").required(false))
            .add_source(Environment::with_prefix("NEOSERVICE").separator("__"))
            .set_override_option("store.database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("store.database.name", std::env::var("DATABASE_NAME").ok())?
            .set_override_option("server.host", std::env::var("HOST").ok())?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a TOML document layered over the defaults
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = Config::default();
        let db = &defaults.store.database;

        ::config::Config::builder()
            .set_default("server.host", defaults.server.host.clone())?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default(
                "store.backend",
                match defaults.store.backend {
                    StoreBackend::Postgres => "postgres",
                    StoreBackend::Memory => "memory",
                },
            )?
            .set_default("store.database.max_connections", i64::from(db.max_connections))?
            .set_default("store.database.min_connections", i64::from(db.min_connections))?
            .set_default("store.database.connect_timeout_secs", db.connect_timeout_secs as i64)?
            .set_default("store.database.idle_timeout_secs", db.idle_timeout_secs as i64)?
            .set_default("store.database.max_lifetime_secs", db.max_lifetime_secs as i64)
    }
}
