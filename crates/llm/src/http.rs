//! Shared HTTP transport for vendor adapters.

use crate::Result;
use reqwest::header::{self, HeaderMap, HeaderName};
use reqwest::{Client, Method};

/// A configured vendor HTTP endpoint: shared client, prebuilt headers, and
/// the endpoint URL.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    /// The HTTP client.
    client: Client,
    /// Request headers (authentication, content-type).
    headers: HeaderMap,
    /// Endpoint URL.
    endpoint: String,
}

impl HttpProvider {
    /// An endpoint authenticated with a `Bearer` token.
    pub fn bearer(client: Client, key: &str, endpoint: &str) -> Result<Self> {
        let mut headers = base_headers();
        headers.insert(header::AUTHORIZATION, format!("Bearer {key}").parse()?);
        Ok(Self {
            client,
            headers,
            endpoint: endpoint.to_owned(),
        })
    }

    /// An endpoint authenticated with a named header (e.g. `x-api-key`).
    pub fn custom_header(
        client: Client,
        name: &'static str,
        value: &str,
        endpoint: &str,
    ) -> Result<Self> {
        let mut headers = base_headers();
        headers.insert(HeaderName::from_static(name), value.parse()?);
        Ok(Self {
            client,
            headers,
            endpoint: endpoint.to_owned(),
        })
    }

    /// Add a fixed header to every request.
    pub fn header(mut self, name: &'static str, value: &str) -> Result<Self> {
        self.headers.insert(HeaderName::from_static(name), value.parse()?);
        Ok(self)
    }

    /// The prebuilt request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Start a POST to the endpoint with the prebuilt headers.
    pub fn post(&self) -> reqwest::RequestBuilder {
        self.client
            .request(Method::POST, &self.endpoint)
            .headers(self.headers.clone())
    }
}

fn base_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));
    headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
    headers
}
