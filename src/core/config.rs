//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (optionally loaded from a `.env` file) and defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::ClientError;

/// Environment variable holding the ftrack server URL.
pub const SERVER_ENV: &str = "FTRACK_SERVER";
/// Environment variable holding the ftrack API user.
pub const API_USER_ENV: &str = "FTRACK_API_USER";
/// Environment variable holding the ftrack API key.
pub const API_KEY_ENV: &str = "FTRACK_API_KEY";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Identity used to talk to the ftrack API.
    pub ftrack: FtrackConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "ftrack-mcp-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Read `MCP_LOG_LEVEL`, falling back to `info`.
    pub fn from_env() -> Self {
        let mut logging = Self::default();
        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            logging.level = level;
        }
        logging
    }
}

/// ftrack API identity: server URL, API user and API key.
///
/// All three values are required; a partially configured identity cannot be
/// constructed. The only ways in are [`FtrackConfig::resolve`] and
/// deserialization, which goes through it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FtrackConfigSource")]
pub struct FtrackConfig {
    /// Server URL without a trailing slash.
    server_url: String,

    /// API user name sent in the `ftrack-user` header.
    api_user: String,

    /// API key sent in the `ftrack-api-key` header.
    #[serde(skip_serializing)]
    api_key: String,
}

/// Unvalidated identity as it appears in a configuration document.
#[derive(Debug, Default, Deserialize)]
struct FtrackConfigSource {
    #[serde(default)]
    server_url: Option<String>,
    #[serde(default)]
    api_user: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
}

impl TryFrom<FtrackConfigSource> for FtrackConfig {
    type Error = ClientError;

    fn try_from(source: FtrackConfigSource) -> Result<Self, Self::Error> {
        Self::resolve(source.server_url, source.api_user, source.api_key)
    }
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for FtrackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FtrackConfig")
            .field("server_url", &self.server_url)
            .field("api_user", &self.api_user)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl FtrackConfig {
    /// Resolve the identity from explicit values, falling back to the
    /// `FTRACK_SERVER`, `FTRACK_API_USER` and `FTRACK_API_KEY` variables.
    ///
    /// Empty values count as missing. Every missing variable is reported.
    pub fn resolve(
        server_url: Option<String>,
        api_user: Option<String>,
        api_key: Option<String>,
    ) -> Result<Self, ClientError> {
        let server_url = explicit_or_env(server_url, SERVER_ENV);
        let api_user = explicit_or_env(api_user, API_USER_ENV);
        let api_key = explicit_or_env(api_key, API_KEY_ENV);

        match (server_url, api_user, api_key) {
            (Some(server_url), Some(api_user), Some(api_key)) => Ok(Self {
                server_url: server_url.trim_end_matches('/').to_string(),
                api_user,
                api_key,
            }),
            (server_url, api_user, api_key) => {
                let missing = [
                    (server_url.is_none(), SERVER_ENV),
                    (api_user.is_none(), API_USER_ENV),
                    (api_key.is_none(), API_KEY_ENV),
                ]
                .into_iter()
                .filter_map(|(missing, name)| missing.then_some(name))
                .collect();
                Err(ClientError::configuration(missing))
            }
        }
    }

    /// Resolve the identity from the environment only.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::resolve(None, None, None)
    }

    /// Server URL without a trailing slash.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// API user name.
    pub fn api_user(&self) -> &str {
        &self.api_user
    }

    /// API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

fn explicit_or_env(explicit: Option<String>, var: &str) -> Option<String> {
    explicit
        .or_else(|| std::env::var(var).ok())
        .filter(|value| !value.trim().is_empty())
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    /// Server settings use the `MCP_` prefix; the ftrack identity uses the
    /// `FTRACK_` variables and is required.
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let mut server = ServerConfig::default();
        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            server.name = name;
        }

        let ftrack = FtrackConfig::from_env()?;
        debug!(
            "ftrack identity loaded: {} as {}",
            ftrack.server_url, ftrack.api_user
        );

        Ok(Self {
            server,
            logging: LoggingConfig::from_env(),
            transport: TransportConfig::from_env(),
            ftrack,
        })
    }

    /// Build a configuration around an explicit identity, with defaults elsewhere.
    pub fn with_ftrack(ftrack: FtrackConfig) -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
            ftrack,
        }
    }
}
