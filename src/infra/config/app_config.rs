use serde::{Deserialize, Serialize};
use url::Url;

use crate::infra::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    /// File name inside the log directory.
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            file: "sockchat.log".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    pub endpoint: String,
    /// Sent once, right after the handshake completes.
    pub greeting: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            endpoint: "ws://localhost:8080".to_owned(),
            greeting: "Hello Server!".to_owned(),
        }
    }
}

impl ServerConfig {
    /// Parses the endpoint, accepting only `ws` and `wss` URLs.
    pub fn endpoint_url(&self) -> Result<Url, AppError> {
        let url = Url::parse(&self.endpoint).map_err(|error| AppError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            details: error.to_string(),
        })?;

        match url.scheme() {
            "ws" | "wss" => Ok(url),
            other => Err(AppError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                details: format!("unsupported scheme `{other}`, expected ws or wss"),
            }),
        }
    }
}
