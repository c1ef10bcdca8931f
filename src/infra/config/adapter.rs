use std::path::{Path, PathBuf};

use crate::infra::{
    config::{load, AppConfig},
    contracts::ConfigAdapter,
    error::AppError,
};

/// Loads the config file and applies command-line overrides on top of it.
#[derive(Debug, Clone, Default)]
pub struct FileConfigAdapter {
    path: Option<PathBuf>,
    endpoint_override: Option<String>,
}

impl FileConfigAdapter {
    pub fn new(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
            endpoint_override: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: Option<&str>) -> Self {
        self.endpoint_override = endpoint.map(str::to_owned);
        self
    }
}

impl ConfigAdapter for FileConfigAdapter {
    fn load(&self) -> Result<AppConfig, AppError> {
        let mut config = load(self.path.as_deref())?;

        if let Some(endpoint) = &self.endpoint_override {
            config.server.endpoint = endpoint.clone();
        }

        Ok(config)
    }
}
