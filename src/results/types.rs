//! Result type definitions

use scraper::Html;
use serde::{Deserialize, Serialize};

/// A single normalized text search result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextResult {
    /// Display title
    pub title: String,
    /// Absolute or backend-relative URL
    pub href: String,
    /// Snippet text, empty when the backend gave none
    #[serde(default)]
    pub body: String,
}

impl TextResult {
    /// Create a new result, normalizing every field
    pub fn new(
        title: impl AsRef<str>,
        href: impl AsRef<str>,
        body: impl AsRef<str>,
    ) -> Self {
        Self {
            title: normalize_text(title.as_ref()),
            href: normalize_url(href.as_ref()),
            body: normalize_text(body.as_ref()),
        }
    }

    /// Whether the result carries both a title and a link
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.href.is_empty()
    }
}

/// Collapse whitespace runs into single spaces and trim.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Percent-decode a link and turn spaces into `+`.
///
/// Links whose decoded bytes are not UTF-8 are kept as they came.
pub fn normalize_url(href: &str) -> String {
    let href = href.trim();
    let decoded = urlencoding::decode(href)
        .map(|d| d.into_owned())
        .unwrap_or_else(|_| href.to_string());
    decoded.replace(' ', "+")
}

/// Remove inline markup (e.g. `<em>` highlighting) and decode entities.
pub fn strip_markup(text: &str) -> String {
    if !text.contains('<') && !text.contains('&') {
        return normalize_text(text);
    }
    let fragment = Html::parse_fragment(text);
    normalize_text(&fragment.root_element().text().collect::<String>())
}
