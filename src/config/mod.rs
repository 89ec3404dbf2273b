//! Configuration module
//!
//! Handles loading and validating settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use once_cell::sync::OnceCell;
use std::path::Path;

/// Global settings instance
static SETTINGS: OnceCell<Settings> = OnceCell::new();

/// Initialize global settings from a file
pub fn init_from_file<P: AsRef<Path>>(path: P) -> Result<&'static Settings> {
    init(Settings::from_file(path)?)
}

/// Initialize global settings by searching the usual locations
pub fn init_default() -> Result<&'static Settings> {
    init(Settings::load()?)
}

fn init(settings: Settings) -> Result<&'static Settings> {
    SETTINGS
        .set(settings)
        .map_err(|_| anyhow::anyhow!("Settings already initialized"))?;
    get().ok_or_else(|| anyhow::anyhow!("Settings not initialized"))
}

/// Get a reference to the global settings, if initialized
pub fn get() -> Option<&'static Settings> {
    SETTINGS.get()
}

/// Check if settings have been initialized
pub fn is_initialized() -> bool {
    SETTINGS.get().is_some()
}
