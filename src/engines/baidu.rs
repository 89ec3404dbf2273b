//! Baidu search engine implementation
//!
//! Baidu answers `tn=json` requests with a JSON feed instead of markup, and
//! signals bot suspicion by redirecting to its captcha host rather than
//! returning an error status.

use super::traits::*;
use crate::error::Result;
use crate::network::{Transport, TransportResponse};
use crate::query::{SearchRequest, TimeRange};
use crate::results::{strip_markup, TextResult};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

const SEARCH_URL: &str = "https://www.baidu.com/s";
const RESULTS_PER_PAGE: u32 = 10;

/// Redirect target Baidu uses for its captcha challenge
pub const CAPTCHA_MARKER: &str = "wappass.baidu.com/static/captcha";

const TIME_RANGES: &[(TimeRange, TimeFilter)] = &[
    (TimeRange::Day, TimeFilter::Span(TimeRange::Day.as_seconds())),
    (TimeRange::Week, TimeFilter::Span(TimeRange::Week.as_seconds())),
    (TimeRange::Month, TimeFilter::Span(TimeRange::Month.as_seconds())),
    (TimeRange::Year, TimeFilter::Span(TimeRange::Year.as_seconds())),
];

/// Baidu web search engine
pub struct Baidu {
    descriptor: EngineDescriptor,
}

impl Baidu {
    pub fn new() -> Self {
        Self::with_base_url(SEARCH_URL)
    }

    /// Point the engine at another endpoint (mirror or test server)
    pub fn with_base_url(url: impl Into<String>) -> Self {
        Self {
            descriptor: EngineDescriptor {
                name: "baidu",
                category: "text",
                provider: "baidu",
                disabled: false,
                search_url: url.into(),
                method: HttpMethod::Get,
                results_per_page: RESULTS_PER_PAGE,
                format: ResponseFormat::Custom(parse_feed),
                time_ranges: TIME_RANGES,
            },
        }
    }
}

impl Default for Baidu {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a response is Baidu's soft block: a redirect onto the captcha page
pub fn is_captcha_redirect(response: &TransportResponse) -> bool {
    response.is_redirect()
        && response
            .location()
            .map(|target| target.contains(CAPTCHA_MARKER))
            .unwrap_or(false)
}

/// Parse Baidu's `{"feed": {"entry": [...]}}` envelope.
///
/// Raw control characters are tolerated as whitespace. Anything that still
/// fails to parse yields no results.
fn parse_feed(body: &str) -> Vec<TextResult> {
    let sanitized: String = body
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    let json: Value = match serde_json::from_str(&sanitized) {
        Ok(json) => json,
        Err(e) => {
            debug!("Discarding unparseable baidu feed: {}", e);
            return Vec::new();
        }
    };

    let Some(entries) = json.pointer("/feed/entry").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let title = entry.get("title").and_then(Value::as_str).unwrap_or_default();
            let url = entry.get("url").and_then(Value::as_str).unwrap_or_default();
            if title.is_empty() || url.is_empty() {
                return None;
            }
            let snippet = entry.get("abs").and_then(Value::as_str).unwrap_or_default();

            let result = TextResult::new(strip_markup(title), url, strip_markup(snippet));
            result.is_complete().then_some(result)
        })
        .collect()
}

#[async_trait]
impl Engine for Baidu {
    fn descriptor(&self) -> &EngineDescriptor {
        &self.descriptor
    }

    fn build_payload(&self, request: &SearchRequest) -> Payload {
        let per_page = self.descriptor.results_per_page;
        let offset = u64::from(request.page.saturating_sub(1)) * u64::from(per_page);

        let mut payload = Payload::new()
            .param("wd", &request.query)
            .param("rn", per_page)
            .param("pn", offset)
            .param("tn", "json");

        if let Some(TimeFilter::Span(span)) = self.descriptor.time_filter(request.time_range) {
            let now = request.timestamp();
            payload.insert("gpc", format!("stf={},{}|stftype=1", now - span, now));
        }

        payload
    }

    async fn issue_request(
        &self,
        transport: &dyn Transport,
        payload: &Payload,
    ) -> Result<Option<String>> {
        let response = transport
            .request(self.descriptor.method, &self.descriptor.search_url, payload)
            .await?;

        if is_captcha_redirect(&response) {
            warn!("Engine {} redirected to captcha, skipping", self.name());
            return Ok(None);
        }

        Ok(accept_response(self.name(), response))
    }
}
