//! HTTP client for making requests to search backends

use super::transport::{Transport, TransportResponse};
use super::user_agent::{accept_header, accept_language, random_user_agent};
use crate::config::OutgoingSettings;
use crate::engines::{HttpMethod, Payload};
use crate::error::Result;
use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// reqwest wrapper configured for scraping search backends
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
    extra_headers: HashMap<String, String>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let redirect = if settings.follow_redirects {
            Policy::limited(10)
        } else {
            Policy::none()
        };

        let mut builder = Client::builder()
            .timeout(Duration::from_secs_f64(settings.request_timeout))
            .pool_max_idle_per_host(settings.pool_maxsize)
            .redirect(redirect)
            .cookie_store(true)
            .gzip(true)
            .brotli(true);

        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let user_agent = settings
            .useragent
            .clone()
            .unwrap_or_else(|| random_user_agent().to_string());

        Ok(Self {
            client: builder.build()?,
            user_agent,
            extra_headers: settings.extra_headers.clone(),
        })
    }

    /// Current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    async fn parse_response(response: Response) -> Result<TransportResponse> {
        let status = response.status().as_u16();
        let url = response.url().to_string();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.as_str().to_ascii_lowercase(), v.to_string());
            }
        }

        let text = response.text().await?;

        Ok(TransportResponse {
            status,
            headers,
            text,
            url,
        })
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        payload: &Payload,
    ) -> Result<TransportResponse> {
        let mut req_builder = match method {
            HttpMethod::Get => self.client.get(url).query(payload.pairs()),
            HttpMethod::Post => self.client.post(url).form(payload.pairs()),
        };

        req_builder = req_builder
            .header("User-Agent", &self.user_agent)
            .header("Accept", accept_header())
            .header("Accept-Language", accept_language())
            .header("DNT", "1");

        for (key, value) in &self.extra_headers {
            req_builder = req_builder.header(key, value);
        }

        debug!("{:?} {} with {} params", method, url, payload.len());
        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }
}
