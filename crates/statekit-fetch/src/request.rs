//! Request descriptors
//!
//! A slice's `fetch_config` turns a payload into a [`FetchRequest`]. The
//! descriptor is pure data; an [`HttpTransport`](crate::HttpTransport)
//! executes it.

use serde::{Deserialize, Serialize};

/// HTTP method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// HTTP cache directive for the request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheDirective {
    /// Let the transport decide
    #[default]
    Default,
    /// Neither read from nor write to any HTTP cache
    NoStore,
    /// Revalidate before using a cached response
    NoCache,
}

impl CacheDirective {
    /// Value for the `Cache-Control` request header, if any
    pub fn header_value(&self) -> Option<&'static str> {
        match self {
            CacheDirective::Default => None,
            CacheDirective::NoStore => Some("no-store"),
            CacheDirective::NoCache => Some("no-cache"),
        }
    }
}

/// Options part of a request descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    #[serde(default)]
    pub method: Method,
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub cache: CacheDirective,
}

/// Request descriptor: `{ url, options }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub url: String,
    #[serde(default)]
    pub options: RequestOptions,
}

impl FetchRequest {
    /// GET request with default options
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            options: RequestOptions::default(),
        }
    }

    /// POST request with a JSON body
    pub fn post_json(url: impl Into<String>, body: &serde_json::Value) -> Self {
        Self::get(url)
            .method(Method::Post)
            .header("Content-Type", "application/json")
            .body(body.to_string())
    }

    pub fn method(mut self, method: Method) -> Self {
        self.options.method = method;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.options.body = Some(body.into());
        self
    }

    pub fn cache(mut self, cache: CacheDirective) -> Self {
        self.options.cache = cache;
        self
    }
}
