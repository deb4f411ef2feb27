//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::dashboard::{DashboardSettings, EmptyFilterPolicy};
use crate::domain::RatingPolicy;

pub const ADDR_VAR: &str = "BUS_SEARCH_ADDR";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const DATA_FILE_VAR: &str = "BUS_SEARCH_DATA_FILE";
pub const MAX_CONNECTIONS_VAR: &str = "BUS_SEARCH_MAX_CONNECTIONS";
pub const RATING_POLICY_VAR: &str = "BUS_SEARCH_RATING_POLICY";
pub const EMPTY_FILTER_VAR: &str = "BUS_SEARCH_EMPTY_FILTER";
pub const STATIC_DIR_VAR: &str = "BUS_SEARCH_STATIC_DIR";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("no data source configured: set DATABASE_URL or BUS_SEARCH_DATA_FILE")]
    NoDataSource,
}

/// Where trips are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSourceConfig {
    /// A SQL database reached through a connection URL.
    Database { url: String, max_connections: u32 },
    /// A JSON file of trips held in memory.
    File(PathBuf),
}

/// Configuration for the web server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// Data source, if one is configured.
    pub data_source: Option<DataSourceConfig>,

    pub settings: DashboardSettings,

    /// Directory served under `/static`.
    pub static_dir: String,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if set. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(addr) = get(ADDR_VAR) {
            config.addr = parse_var(ADDR_VAR, &addr)?;
        }
        if let Some(policy) = get(RATING_POLICY_VAR) {
            config.settings.rating_policy = parse_var(RATING_POLICY_VAR, &policy)?;
        }
        if let Some(policy) = get(EMPTY_FILTER_VAR) {
            config.settings.empty_filter_policy = parse_var(EMPTY_FILTER_VAR, &policy)?;
        }
        if let Some(dir) = get(STATIC_DIR_VAR) {
            config.static_dir = dir;
        }

        let max_connections = match get(MAX_CONNECTIONS_VAR) {
            Some(n) => match parse_var::<u32>(MAX_CONNECTIONS_VAR, &n)? {
                0 => {
                    return Err(ConfigError::Invalid {
                        var: MAX_CONNECTIONS_VAR,
                        value: n,
                        reason: "must be at least 1".into(),
                    });
                }
                n => n,
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        config.data_source = match (get(DATABASE_URL_VAR), get(DATA_FILE_VAR)) {
            (Some(url), _) => Some(DataSourceConfig::Database {
                url,
                max_connections,
            }),
            (None, Some(path)) => Some(DataSourceConfig::File(PathBuf::from(path))),
            (None, None) => None,
        };

        Ok(config)
    }

    /// The configured data source.
    pub fn require_data_source(&self) -> Result<&DataSourceConfig, ConfigError> {
        self.data_source.as_ref().ok_or(ConfigError::NoDataSource)
    }
}

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_source: None,
            settings: DashboardSettings {
                rating_policy: RatingPolicy::Bucket,
                empty_filter_policy: EmptyFilterPolicy::ShowNothing,
            },
            static_dir: "static".to_string(),
        }
    }
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
