//! reqwest-backed transport

use crate::request::{FetchRequest, Method};
use crate::transport::{FetchResponse, HttpTransport};
use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use std::time::Duration;

/// Transport hitting the network through a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a request timeout
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &FetchRequest) -> anyhow::Result<FetchResponse> {
        let options = &request.options;
        let mut builder = self
            .client
            .request(to_reqwest_method(options.method), &request.url);

        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(directive) = options.cache.header_value() {
            builder = builder.header(reqwest::header::CACHE_CONTROL, directive);
        }
        if let Some(body) = &options.body {
            builder = builder.body(body.clone());
        }

        debug!("{} {}", options.method.as_str(), request.url);
        let response = builder
            .send()
            .await
            .with_context(|| format!("Request to {} failed", request.url))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", request.url))?;

        debug!("{} {} -> {}", options.method.as_str(), request.url, status);
        Ok(FetchResponse { status, body })
    }
}
