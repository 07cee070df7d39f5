//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use convgate_core::{BatchConverter, FormatAllowList, RateProvider, UnitRegistry};

use crate::config::Config;

/// State shared across all HTTP handlers. Everything in it is immutable.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Batch converter holding the format allow-list and limits.
    pub converter: Arc<BatchConverter>,
    /// Unit table used by the units endpoint.
    pub units: UnitRegistry,
    /// Exchange-rate source used by the currency endpoint.
    pub rates: Arc<dyn RateProvider>,
}

impl AppState {
    pub fn new(config: Config, rates: Arc<dyn RateProvider>) -> Self {
        let converter = BatchConverter::new(FormatAllowList::default(), config.limits());
        Self {
            config: Arc::new(config),
            converter: Arc::new(converter),
            units: UnitRegistry::default(),
            rates,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("converter", &self.converter)
            .finish_non_exhaustive()
    }
}
