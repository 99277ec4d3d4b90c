//! Application state management

use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    catalog: CatalogStore,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Self {
        let catalog = CatalogStore::new(&config.data);
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the catalog store
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_shares_config_across_clones() {
        let mut config = Config::default();
        config.server.port = 4100;
        let state = AppState::new(config);
        let clone = state.clone();

        assert_eq!(clone.config().server.port, 4100);
        assert_eq!(clone.config().bind_addr(), state.config().bind_addr());
        assert!(Arc::ptr_eq(&state.inner, &clone.inner));
    }
}
