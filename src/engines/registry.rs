//! Engine registry for managing available search engines

use super::traits::Engine;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of loaded engines.
///
/// Built once at startup, then shared read-only (typically behind an `Arc`).
pub struct EngineRegistry {
    /// Engines by name
    engines: HashMap<String, Arc<dyn Engine>>,
    /// Engine names by category, in registration order
    categories: HashMap<String, Vec<String>>,
}

impl EngineRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            engines: HashMap::new(),
            categories: HashMap::new(),
        }
    }

    /// Register an engine under `name`, replacing any previous one
    pub fn register(&mut self, name: impl Into<String>, engine: Arc<dyn Engine>) {
        let name = name.into();
        let category = engine.category().to_string();

        if let Some(previous) = self.engines.insert(name.clone(), engine) {
            let old = previous.category();
            if old == category {
                return;
            }
            if let Some(names) = self.categories.get_mut(old) {
                names.retain(|n| *n != name);
                if names.is_empty() {
                    self.categories.remove(old);
                }
            }
        }

        self.categories.entry(category).or_default().push(name);
    }

    /// Get an engine by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Engine>> {
        self.engines.get(name)
    }

    /// Get all engines in a category
    pub fn get_by_category(&self, category: &str) -> Vec<&Arc<dyn Engine>> {
        self.categories
            .get(category)
            .map(|names| {
                names
                    .iter()
                    .filter_map(|name| self.engines.get(name))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get all engines whose descriptor marks them available
    pub fn enabled(&self) -> Vec<&Arc<dyn Engine>> {
        self.engines.values().filter(|e| !e.is_disabled()).collect()
    }

    /// Get all engine names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.engines.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Check if an engine exists
    pub fn contains(&self, name: &str) -> bool {
        self.engines.contains_key(name)
    }

    /// Get number of registered engines
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}
