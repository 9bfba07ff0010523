#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Blocking HTTP/JSON adapter for the remote maze service.
//!
//! The service exposes three endpoints: `GET /session` exchanges an identity
//! for a session token, `GET /game` reports the consolidated session status,
//! and `POST /game` submits a single move. This adapter implements the
//! [`Oracle`] contract over those endpoints and never retries a move: a
//! successful move changes remote state, so reissuing one after a transport
//! failure could walk the agent somewhere it does not believe it is.

use std::fs;
use std::path::Path;
use std::time::Duration;

use maze_scout_core::{
    CellCoord, GameState, GridSize, Heading, MoveOutcome, Oracle, OracleError, SessionToken,
    StatusReport,
};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Environment variable overriding the service base URL.
pub const ENV_BASE_URL: &str = "MAZE_SCOUT_BASE_URL";
/// Environment variable overriding the request timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "MAZE_SCOUT_TIMEOUT_MS";
/// Config file consulted by [`OracleConfig::from_default_sources`].
pub const DEFAULT_CONFIG_FILE_NAME: &str = "maze-scout.toml";
/// Service endpoint used when no other source provides one.
pub const DEFAULT_BASE_URL: &str = "http://ec2-34-216-8-43.us-west-2.compute.amazonaws.com";
/// Request timeout applied when no other source provides one.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Errors surfaced while assembling the adapter configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read {path}: {message}")]
    ReadFile {
        /// Path of the unreadable file.
        path: String,
        /// Underlying io failure detail.
        message: String,
    },
    /// The config file is not valid TOML.
    #[error("failed to parse {path}: {message}")]
    ParseFile {
        /// Path of the malformed file.
        path: String,
        /// Underlying parse failure detail.
        message: String,
    },
    /// A timeout value was present but not a positive integer.
    #[error("{key} must be a positive integer of milliseconds, got {value:?}")]
    InvalidTimeout {
        /// Config key or environment variable that held the value.
        key: &'static str,
        /// Rejected raw value.
        value: String,
    },
}

/// Connection settings for the maze service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OracleConfig {
    /// Base URL of the service, without a trailing slash requirement.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl OracleConfig {
    /// Creates a config pointing at the provided base URL with defaults.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Resolves the config from the default sources.
    ///
    /// A `maze-scout.toml` in the working directory wins when present, the
    /// environment is consulted next, and built-in defaults fill anything
    /// left unset.
    pub fn from_default_sources() -> Result<Self, ConfigError> {
        let config_path = Path::new(DEFAULT_CONFIG_FILE_NAME);
        if config_path.exists() {
            return Self::from_config_file(config_path);
        }
        Self::from_env()
    }

    /// Reads the config from a TOML file, with the environment as fallback
    /// for keys the file omits.
    pub fn from_config_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|err| ConfigError::ReadFile {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let value: toml::Value = toml::from_str(&content).map_err(|err| ConfigError::ParseFile {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let table = value.as_table().cloned().unwrap_or_default();

        Self::from_env_with(|key| {
            table
                .get(key)
                .and_then(toml_value_to_string)
                .or_else(|| std::env::var(key).ok())
        })
    }

    /// Reads the config from the environment alone.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    fn from_env_with<F>(mut getter: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let base_url = getter(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let timeout_ms = match getter(ENV_TIMEOUT_MS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(parsed) if parsed > 0 => parsed,
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        key: ENV_TIMEOUT_MS,
                        value: raw,
                    })
                }
            },
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            base_url,
            timeout_ms,
        })
    }
}

fn toml_value_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(text) => Some(text.clone()),
        toml::Value::Integer(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Blocking HTTP client implementing the [`Oracle`] contract.
#[derive(Clone, Debug)]
pub struct HttpOracle {
    base_url: String,
    client: Client,
}

impl HttpOracle {
    /// Builds a client for the configured service.
    pub fn connect(config: &OracleConfig) -> Result<Self, OracleError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms.max(1)))
            .build()
            .map_err(|err| OracleError::Transport {
                reason: format!("client build failed: {err}"),
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            client,
        })
    }

    /// Base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchanges an identity string for a session token.
    pub fn authenticate(&self, identity: &str) -> Result<SessionToken, OracleError> {
        let url = format!("{}/session", self.base_url);
        let response = self
            .client
            .get(url)
            .query(&[("uid", identity)])
            .send()
            .map_err(|err| OracleError::Auth {
                reason: format!("session request failed: {err}"),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(OracleError::Auth {
                reason: http_failure(status, response),
            });
        }

        let decoded: AuthResponse = response.json().map_err(|err| OracleError::Auth {
            reason: format!("session response did not decode: {err}"),
        })?;
        debug!(base_url = %self.base_url, "session established");
        Ok(SessionToken::new(decoded.token))
    }
}

impl Oracle for HttpOracle {
    fn status(&self, session: &SessionToken) -> Result<StatusReport, OracleError> {
        let url = format!("{}/game", self.base_url);
        let response = self
            .client
            .get(url)
            .query(&[("token", session.as_str())])
            .send()
            .map_err(|err| OracleError::Transport {
                reason: format!("status request failed: {err}"),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(OracleError::Transport {
                reason: http_failure(status, response),
            });
        }

        let decoded: StatusResponse = response.json().map_err(|err| OracleError::Transport {
            reason: format!("status response did not decode: {err}"),
        })?;
        Ok(decoded.into())
    }

    fn attempt_move(
        &self,
        session: &SessionToken,
        heading: Heading,
    ) -> Result<MoveOutcome, OracleError> {
        let url = format!("{}/game", self.base_url);
        let response = self
            .client
            .post(url)
            .query(&[("token", session.as_str())])
            .form(&MoveRequest { action: heading })
            .send()
            .map_err(|err| OracleError::Transport {
                reason: format!("move request failed: {err}"),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(OracleError::Transport {
                reason: http_failure(status, response),
            });
        }

        let decoded: MoveResponse = response.json().map_err(|err| OracleError::Transport {
            reason: format!("move response did not decode: {err}"),
        })?;
        Ok(decoded.result)
    }
}

fn http_failure(status: StatusCode, response: reqwest::blocking::Response) -> String {
    let body = response.text().unwrap_or_else(|_| "<no body>".to_owned());
    format!("http status {}: {body}", status.as_u16())
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
}

#[derive(Debug, Serialize)]
struct MoveRequest {
    action: Heading,
}

#[derive(Debug, Deserialize)]
struct MoveResponse {
    result: MoveOutcome,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: GameState,
    #[serde(default)]
    current_location: Option<[u32; 2]>,
    #[serde(default)]
    maze_size: Option<[u32; 2]>,
    #[serde(default)]
    levels_completed: u32,
    #[serde(default)]
    total_levels: u32,
}

impl From<StatusResponse> for StatusReport {
    fn from(response: StatusResponse) -> Self {
        Self {
            game_state: response.status,
            location: response.current_location.map(|[x, y]| CellCoord::new(x, y)),
            maze_size: response
                .maze_size
                .map(|[width, height]| GridSize::new(width, height)),
            levels_completed: response.levels_completed,
            total_levels: response.total_levels,
        }
    }
}
