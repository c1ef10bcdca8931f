use url::Url;

use crate::infra::{config::AppConfig, storage_layout::StorageLayout};

#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    /// Validated form of `config.server.endpoint`.
    pub endpoint: Url,
    pub layout: StorageLayout,
}

impl AppContext {
    pub fn new(config: AppConfig, endpoint: Url, layout: StorageLayout) -> Self {
        Self {
            config,
            endpoint,
            layout,
        }
    }
}
