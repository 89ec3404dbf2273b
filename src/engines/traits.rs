//! Engine traits and types

use super::selectors::SelectorTable;
use crate::error::Result;
use crate::network::{Transport, TransportResponse};
use crate::query::{SearchRequest, TimeRange};
use crate::results::TextResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

/// Ordered request parameters, built fresh for every call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Payload {
    params: Vec<(String, String)>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter (builder style)
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a parameter, replacing an existing value in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.params.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Parameter names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(k, _)| k.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Backend encoding of a time range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFilter {
    /// Duration in seconds, turned into a `[now - span, now]` window
    Span(i64),
    /// Opaque backend token
    Token(&'static str),
}

/// How an engine turns a response body into results
#[derive(Clone)]
pub enum ResponseFormat {
    /// Markup interpreted generically through a selector table
    Selectors(SelectorTable),
    /// Engine-supplied parser for structured bodies
    Custom(fn(&str) -> Vec<TextResult>),
}

impl ResponseFormat {
    pub fn interpret(&self, body: &str) -> Vec<TextResult> {
        match self {
            Self::Selectors(table) => table.extract(body),
            Self::Custom(parse) => parse(body),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Selectors(_) => "selectors",
            Self::Custom(_) => "custom",
        }
    }
}

impl std::fmt::Debug for ResponseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Selectors(table) => f.debug_tuple("Selectors").field(table).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Static engine metadata, read-only once the engine is built
#[derive(Debug, Clone)]
pub struct EngineDescriptor {
    /// Engine name
    pub name: &'static str,
    /// Capability category, e.g. "text"
    pub category: &'static str,
    /// Backend provider name
    pub provider: &'static str,
    /// Whether the engine is unavailable by default
    pub disabled: bool,
    /// Search endpoint
    pub search_url: String,
    /// HTTP method used for the search endpoint
    pub method: HttpMethod,
    /// Results per backend page
    pub results_per_page: u32,
    /// Response interpretation strategy
    pub format: ResponseFormat,
    /// Supported time ranges and their backend encoding
    pub time_ranges: &'static [(TimeRange, TimeFilter)],
}

impl EngineDescriptor {
    /// Backend encoding for a requested time range, if this engine knows it
    pub fn time_filter(&self, range: Option<TimeRange>) -> Option<TimeFilter> {
        let range = range?;
        self.time_ranges
            .iter()
            .find(|(r, _)| *r == range)
            .map(|(_, filter)| *filter)
    }

    pub fn supports_time_range(&self) -> bool {
        !self.time_ranges.is_empty()
    }
}

/// Default success split: 2xx yields the body, anything else yields nothing
pub fn accept_response(engine: &str, response: TransportResponse) -> Option<String> {
    if response.is_success() {
        Some(response.text)
    } else {
        warn!("Engine {} got HTTP {}", engine, response.status);
        None
    }
}

/// Main engine trait that all search engines must implement
///
/// `search` runs `build_payload` → `issue_request` → `extract_results` →
/// `post_extract_results`. Engines override only the stages their backend
/// needs. Nothing below `search` may fail because of a bad body; only
/// transport faults are returned as errors.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Static metadata
    fn descriptor(&self) -> &EngineDescriptor;

    /// Engine name
    fn name(&self) -> &str {
        self.descriptor().name
    }

    /// Capability category
    fn category(&self) -> &str {
        self.descriptor().category
    }

    fn is_disabled(&self) -> bool {
        self.descriptor().disabled
    }

    /// Build backend request parameters. Must not perform I/O.
    fn build_payload(&self, request: &SearchRequest) -> Payload;

    /// Send the request; `None` means no usable response this round
    async fn issue_request(
        &self,
        transport: &dyn Transport,
        payload: &Payload,
    ) -> Result<Option<String>> {
        let descriptor = self.descriptor();
        let response = transport
            .request(descriptor.method, &descriptor.search_url, payload)
            .await?;
        Ok(accept_response(self.name(), response))
    }

    /// Turn a raw body into results, in document order
    fn extract_results(&self, body: &str) -> Vec<TextResult> {
        self.descriptor().format.interpret(body)
    }

    /// Backend-specific normalization of extracted results
    fn post_extract_results(&self, results: Vec<TextResult>) -> Vec<TextResult> {
        results
    }

    /// Run the whole pipeline for one request
    async fn search(
        &self,
        transport: &dyn Transport,
        request: &SearchRequest,
    ) -> Result<Vec<TextResult>> {
        let payload = self.build_payload(request);

        let Some(body) = self.issue_request(transport, &payload).await? else {
            debug!("Engine {} returned no usable response", self.name());
            return Ok(Vec::new());
        };

        let mut results = self.post_extract_results(self.extract_results(&body));
        results.retain(TextResult::is_complete);
        debug!(
            "Engine {} returned {} results for page {} ({} format)",
            self.name(),
            results.len(),
            request.page,
            self.descriptor().format.kind()
        );
        Ok(results)
    }
}
