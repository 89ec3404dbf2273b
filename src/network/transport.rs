//! Transport boundary between engines and the HTTP client

use crate::engines::{HttpMethod, Payload};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Anything that can execute one HTTP request for an engine.
///
/// Implementations must not follow redirects silently if soft-block
/// detection is expected to work, and must not retry: one call, one request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        payload: &Payload,
    ) -> Result<TransportResponse>;
}

/// Raw HTTP response handed back to an engine
#[derive(Debug, Clone, Default)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers, names lowercased
    pub headers: HashMap<String, String>,
    /// Response body as text
    pub text: String,
    /// Final response URL
    pub url: String,
}

impl TransportResponse {
    pub fn new(status: u16, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
            ..Default::default()
        }
    }

    /// Add a header
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Case-insensitive header lookup
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .or_else(|| {
                self.headers
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(name))
                    .map(|(_, v)| v)
            })
            .map(String::as_str)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if response is a redirect carrying a target
    pub fn is_redirect(&self) -> bool {
        matches!(self.status, 301 | 302 | 303 | 307 | 308)
    }

    /// Redirect target, if any
    pub fn location(&self) -> Option<&str> {
        self.get_header("location")
    }
}
