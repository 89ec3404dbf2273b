//! Settings structures for search adapter configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable pointing at a settings file
pub const SETTINGS_PATH_ENV: &str = "SEARCH_ADAPTERS_SETTINGS_PATH";

/// Main settings structure, usually read from `settings.yml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub outgoing: OutgoingSettings,
    pub engines: Vec<EngineConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            outgoing: OutgoingSettings::default(),
            engines: default_engines(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Find and load the first settings file available, or fall back to defaults.
    ///
    /// Search order: `$SEARCH_ADAPTERS_SETTINGS_PATH`, `./settings.yml`,
    /// `./config/settings.yml`, `<config dir>/search-adapters/settings.yml`.
    pub fn load() -> Result<Self> {
        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
            candidates.push(PathBuf::from(path));
        }
        candidates.push(PathBuf::from("settings.yml"));
        candidates.push(PathBuf::from("config/settings.yml"));
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join("search-adapters/settings.yml"));
        }

        let mut settings = match candidates.iter().find(|p| p.exists()) {
            Some(path) => {
                info!("Loading settings from: {}", path.display());
                Self::from_file(path)?
            }
            None => {
                info!("No settings file found, using defaults");
                Self::default()
            }
        };
        settings.merge_env();
        Ok(settings)
    }

    /// Merge with environment variables (SEARCH_ADAPTERS_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("SEARCH_ADAPTERS_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("SEARCH_ADAPTERS_REQUEST_TIMEOUT") {
            if let Ok(timeout) = val.parse::<f64>() {
                if timeout > 0.0 {
                    self.outgoing.request_timeout = timeout;
                }
            }
        }
        if let Ok(val) = std::env::var("SEARCH_ADAPTERS_PROXY") {
            self.outgoing.proxies.all = Some(val);
        }
    }

    /// Reject values the HTTP client cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.outgoing.request_timeout > 0.0) {
            anyhow::bail!(crate::Error::Config(format!(
                "outgoing.request_timeout must be > 0, got {}",
                self.outgoing.request_timeout
            )));
        }
        for engine in &self.engines {
            if engine.name.is_empty() || engine.engine.is_empty() {
                anyhow::bail!(crate::Error::Config(
                    "every engine needs both `name` and `engine`".to_string()
                ));
            }
        }
        Ok(())
    }

    /// Get engine config by name
    pub fn get_engine(&self, name: &str) -> Option<&EngineConfig> {
        self.engines.iter().find(|e| e.name == name)
    }

    /// Get all enabled engines
    pub fn enabled_engines(&self) -> Vec<&EngineConfig> {
        self.engines.iter().filter(|e| !e.disabled).collect()
    }
}

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Pool max idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Follow redirects instead of returning them to the engine
    pub follow_redirects: bool,
    /// Fixed user agent (none = random)
    pub useragent: Option<String>,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 5.0,
            pool_maxsize: 20,
            verify_ssl: true,
            follow_redirects: false,
            useragent: None,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Individual engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine name (unique identifier)
    pub name: String,
    /// Built-in engine type to instantiate
    pub engine: String,
    /// Whether engine is disabled
    pub disabled: bool,
    /// Override for the engine's search endpoint
    pub base_url: Option<String>,
    /// Additional engine-specific settings
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl EngineConfig {
    pub fn new(name: impl Into<String>, engine: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            engine: engine.into(),
            ..Default::default()
        }
    }
}

/// Default engine configurations
fn default_engines() -> Vec<EngineConfig> {
    vec![
        EngineConfig::new("baidu", "baidu"),
        EngineConfig::new("sogou", "sogou"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(!settings.general.debug);
        assert!(!settings.outgoing.follow_redirects);
        assert_eq!(settings.engines.len(), 2);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_engine_lookup() {
        let settings = Settings::default();
        let sogou = settings.get_engine("sogou");
        assert!(sogou.is_some());
        assert_eq!(sogou.unwrap().engine, "sogou");
        assert!(settings.get_engine("google").is_none());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
general:
  debug: true
outgoing:
  request_timeout: 2.5
engines:
  - name: baidu
    engine: baidu
    base_url: http://127.0.0.1:9000/s
  - name: sogou
    engine: sogou
    disabled: true
    region_hint: cn
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert!(settings.general.debug);
        assert_eq!(settings.outgoing.request_timeout, 2.5);
        assert_eq!(settings.outgoing.pool_maxsize, 20);
        assert_eq!(
            settings.get_engine("baidu").unwrap().base_url.as_deref(),
            Some("http://127.0.0.1:9000/s")
        );
        let sogou = settings.get_engine("sogou").unwrap();
        assert!(sogou.disabled);
        assert!(sogou.extra.contains_key("region_hint"));
        assert_eq!(settings.enabled_engines().len(), 1);
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let yaml = "outgoing:\n  request_timeout: 0\n";
        assert!(Settings::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_engine_without_type_rejected() {
        let yaml = "engines:\n  - name: lonely\n";
        assert!(Settings::from_yaml(yaml).is_err());
    }
}
