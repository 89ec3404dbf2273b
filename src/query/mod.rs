//! Caller-facing search vocabulary
//!
//! Handles the inputs every engine receives regardless of backend:
//! - Time range tokens: `day`, `week`, `month`, `year` (or `d`, `w`, `m`, `y`)
//! - Safe search levels: `on`, `moderate`, `off`
//! - The [`SearchRequest`] bundle passed to `Engine::search`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Time range filter for search results
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[serde(alias = "d")]
    Day,
    #[serde(alias = "w")]
    Week,
    #[serde(alias = "m")]
    Month,
    #[serde(alias = "y")]
    Year,
}

impl TimeRange {
    /// Parse a caller token. Unrecognized tokens mean "no filter".
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "d" | "day" => Some(Self::Day),
            "w" | "week" => Some(Self::Week),
            "m" | "month" => Some(Self::Month),
            "y" | "year" => Some(Self::Year),
            _ => None,
        }
    }

    /// Fixed duration approximation in seconds (30-day month, 365-day year)
    pub const fn as_seconds(&self) -> i64 {
        match self {
            Self::Day => 86_400,
            Self::Week => 604_800,
            Self::Month => 2_592_000,
            Self::Year => 31_536_000,
        }
    }

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Safe search level
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SafeSearch {
    On,
    #[default]
    Moderate,
    Off,
}

impl SafeSearch {
    /// Parse a caller token, falling back to `Moderate`
    pub fn parse(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "on" | "strict" => Self::On,
            "off" => Self::Off,
            _ => Self::Moderate,
        }
    }
}

/// Inputs of a single engine search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Search query string
    pub query: String,
    /// Region/locale token, e.g. `cn-zh`
    pub region: String,
    /// Safe search level
    pub safesearch: SafeSearch,
    /// Time range filter
    pub time_range: Option<TimeRange>,
    /// Page number (1-indexed)
    pub page: u32,
    /// Open engine-specific options
    #[serde(default)]
    pub extra: HashMap<String, serde_json::Value>,
    /// Reference time used for time range bounds
    pub now: DateTime<Utc>,
}

impl SearchRequest {
    /// Create a first-page, unfiltered request stamped with the current time
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            region: "wt-wt".to_string(),
            safesearch: SafeSearch::default(),
            time_range: None,
            page: 1,
            extra: HashMap::new(),
            now: Utc::now(),
        }
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn safesearch(mut self, level: &str) -> Self {
        self.safesearch = SafeSearch::parse(level);
        self
    }

    /// Set the time limit from a caller token; unknown tokens clear it
    pub fn timelimit(mut self, token: &str) -> Self {
        self.time_range = TimeRange::parse(token);
        self
    }

    /// Set the page number, clamped to at least 1
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Pin the reference time
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Reference time as a Unix timestamp
    pub fn timestamp(&self) -> i64 {
        self.now.timestamp()
    }
}
