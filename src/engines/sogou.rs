//! Sogou search engine implementation

use super::selectors::{Field, SelectorTable};
use super::traits::*;
use crate::error::Result;
use crate::query::{SearchRequest, TimeRange};
use crate::results::TextResult;

const SEARCH_URL: &str = "https://www.sogou.com/web";

/// Canonical origin for Sogou's relative redirect links
pub const ORIGIN: &str = "https://www.sogou.com";

/// Prefix of Sogou's click-through redirect links
pub const REDIRECT_PREFIX: &str = "/link?url=";

const TIME_RANGES: &[(TimeRange, TimeFilter)] = &[
    (TimeRange::Day, TimeFilter::Token("inttime_day")),
    (TimeRange::Week, TimeFilter::Token("inttime_week")),
    (TimeRange::Month, TimeFilter::Token("inttime_month")),
    (TimeRange::Year, TimeFilter::Token("inttime_year")),
];

/// Sogou web search engine
pub struct Sogou {
    descriptor: EngineDescriptor,
}

impl Sogou {
    pub fn new() -> Result<Self> {
        Self::with_base_url(SEARCH_URL)
    }

    /// Point the engine at another endpoint (mirror or test server)
    pub fn with_base_url(url: impl Into<String>) -> Result<Self> {
        let table = SelectorTable::builder("div.vrwrap")
            .text(Field::Title, "h3.vr-title > a")
            .attr(Field::Href, "h3.vr-title > a", "href")
            .text(
                Field::Body,
                "div.text-layout p.star-wiki, div.fz-mid.space-txt",
            )
            .build()?;

        Ok(Self {
            descriptor: EngineDescriptor {
                name: "sogou",
                category: "text",
                provider: "sogou",
                disabled: false,
                search_url: url.into(),
                method: HttpMethod::Get,
                results_per_page: 10,
                format: ResponseFormat::Selectors(table),
                time_ranges: TIME_RANGES,
            },
        })
    }
}

/// Make a Sogou redirect link absolute; other links pass through
pub fn absolutize(href: &str) -> String {
    if href.starts_with(REDIRECT_PREFIX) {
        format!("{}{}", ORIGIN, href)
    } else {
        href.to_string()
    }
}

impl Engine for Sogou {
    fn descriptor(&self) -> &EngineDescriptor {
        &self.descriptor
    }

    fn build_payload(&self, request: &SearchRequest) -> Payload {
        let mut payload = Payload::new()
            .param("query", &request.query)
            .param("page", request.page);

        if let Some(TimeFilter::Token(token)) = self.descriptor.time_filter(request.time_range) {
            payload.insert("s_from", token);
            payload.insert("tsn", 1);
        }

        payload
    }

    fn post_extract_results(&self, results: Vec<TextResult>) -> Vec<TextResult> {
        results
            .into_iter()
            .map(|mut result| {
                result.href = absolutize(&result.href);
                result
            })
            .filter(TextResult::is_complete)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::traits::tests::MockTransport;
    use super::*;
    use crate::network::TransportResponse;

    const PAGE: &str = r#"
        <html><body>
          <div class="vrwrap">
            <h3 class="vr-title"><a href="/link?url=hedJjaC291">Rust <em>编程</em>语言</a></h3>
            <div class="fz-mid space-txt">A language empowering everyone</div>
          </div>
          <div class="vrwrap">
            <h3 class="vr-title"><a href="https://doc.rust-lang.org/book/">The Book</a></h3>
            <div class="text-layout"><p class="star-wiki">Learn   Rust</p></div>
          </div>
          <div class="vrwrap">
            <h3 class="vr-title"><a href="/link?url=abc"></a></h3>
          </div>
          <div class="vrwrap">
            <div class="fz-mid space-txt">Orphan snippet</div>
          </div>
          <div class="vrwrap">
            <h3 class="vr-title"><span><a href="https://nested.example/">Nested anchor</a></span></h3>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_first_page_payload() {
        let sogou = Sogou::new().unwrap();
        let payload = sogou.build_payload(&SearchRequest::new("cats"));

        assert_eq!(payload.keys().collect::<Vec<_>>(), vec!["query", "page"]);
        assert_eq!(payload.get("query"), Some("cats"));
        assert_eq!(payload.get("page"), Some("1"));
    }

    #[test]
    fn test_time_filter_payload() {
        let sogou = Sogou::new().unwrap();
        let payload = sogou.build_payload(&SearchRequest::new("cats").page(2).timelimit("m"));

        assert_eq!(payload.get("page"), Some("2"));
        assert_eq!(payload.get("s_from"), Some("inttime_month"));
        assert_eq!(payload.get("tsn"), Some("1"));
    }

    #[test]
    fn test_unknown_timelimit_matches_unfiltered() {
        let sogou = Sogou::new().unwrap();
        assert_eq!(
            sogou.build_payload(&SearchRequest::new("cats").timelimit("hour")),
            sogou.build_payload(&SearchRequest::new("cats"))
        );
    }

    #[test]
    fn test_extract_results() {
        let sogou = Sogou::new().unwrap();
        let results = sogou.extract_results(PAGE);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Rust 编程语言");
        assert_eq!(results[0].href, "/link?url=hedJjaC291");
        assert_eq!(results[0].body, "A language empowering everyone");
        assert_eq!(results[1].title, "The Book");
        assert_eq!(results[1].body, "Learn Rust");
    }

    #[test]
    fn test_only_direct_title_anchors_match() {
        let sogou = Sogou::new().unwrap();
        let results = sogou.extract_results(PAGE);
        assert!(results.iter().all(|r| r.href != "https://nested.example/"));
    }

    #[test]
    fn test_redirect_links_made_absolute() {
        let sogou = Sogou::new().unwrap();
        let results = sogou.post_extract_results(vec![
            TextResult::new("Y", "/link?url=http://y", ""),
            TextResult::new("Z", "https://z.example/", ""),
        ]);

        assert_eq!(results[0].href, "https://www.sogou.com/link?url=http://y");
        assert_eq!(results[1].href, "https://z.example/");
    }

    #[test]
    fn test_post_extract_filters_incomplete() {
        let sogou = Sogou::new().unwrap();
        let results = sogou.post_extract_results(vec![
            TextResult::new("", "/link?url=abc", "body"),
            TextResult::new("T", "", "body"),
            TextResult::new("T", "/link?url=abc", ""),
        ]);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_post_extract_is_idempotent() {
        let sogou = Sogou::new().unwrap();
        let once = sogou.post_extract_results(sogou.extract_results(PAGE));
        let twice = sogou.post_extract_results(once.clone());
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn test_search_end_to_end() {
        let sogou = Sogou::new().unwrap();
        let transport = MockTransport::responding(TransportResponse::new(200, PAGE));
        let results = sogou
            .search(&transport, &SearchRequest::new("rust"))
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].href, "https://www.sogou.com/link?url=hedJjaC291");

        let calls = transport.calls.lock().unwrap();
        assert_eq!(calls[0].1, "https://www.sogou.com/web");
    }

    #[tokio::test]
    async fn test_json_body_yields_nothing() {
        let sogou = Sogou::new().unwrap();
        let transport = MockTransport::responding(TransportResponse::new(200, "{\"feed\":{}}"));
        let results = sogou
            .search(&transport, &SearchRequest::new("rust"))
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}
