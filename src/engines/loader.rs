//! Engine loader for initializing engines from configuration

use super::registry::EngineRegistry;
use super::traits::Engine;
use super::{baidu, sogou};
use crate::config::{EngineConfig, Settings};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Loader for initializing engines from configuration
pub struct EngineLoader;

impl EngineLoader {
    /// Load all engines from settings
    pub fn load(settings: &Settings) -> Result<EngineRegistry> {
        let mut registry = EngineRegistry::new();

        for config in &settings.engines {
            if config.disabled {
                info!("Skipping disabled engine: {}", config.name);
                continue;
            }

            match Self::create_engine(config) {
                Ok(engine) if engine.is_disabled() => {
                    info!("Skipping unavailable engine: {}", config.name);
                }
                Ok(engine) => {
                    info!("Loaded engine: {} ({})", config.name, config.engine);
                    registry.register(config.name.clone(), engine);
                }
                Err(e) => {
                    warn!("Failed to load engine {}: {}", config.name, e);
                }
            }
        }

        info!("Loaded {} engines", registry.len());
        Ok(registry)
    }

    /// Create an engine instance from its configuration
    pub fn create_engine(config: &EngineConfig) -> Result<Arc<dyn Engine>> {
        let base_url = config.base_url.clone();
        let engine: Arc<dyn Engine> = match config.engine.as_str() {
            "baidu" => Arc::new(match base_url {
                Some(url) => baidu::Baidu::with_base_url(url),
                None => baidu::Baidu::new(),
            }),
            "sogou" => Arc::new(match base_url {
                Some(url) => sogou::Sogou::with_base_url(url)?,
                None => sogou::Sogou::new()?,
            }),
            other => {
                return Err(crate::Error::UnknownEngine(other.to_string()).into());
            }
        };

        Ok(engine)
    }

    /// Get list of available engine types
    pub fn available_engines() -> Vec<&'static str> {
        vec!["baidu", "sogou"]
    }
}
