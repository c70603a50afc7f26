//! HTTP transport trait
//!
//! The fetch slice never talks to the network itself: it hands a
//! [`FetchRequest`] to an [`HttpTransport`]. Production code uses
//! [`ReqwestTransport`](crate::ReqwestTransport); tests substitute a stub.

use crate::request::FetchRequest;
use async_trait::async_trait;

/// Raw response from a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP transport trait
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a slice can share one transport
/// across concurrent fetches.
///
/// # Errors
///
/// Return an error only when no response was received (connection refused,
/// timeout, ...). Non-2xx responses are returned as `Ok`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: &FetchRequest) -> anyhow::Result<FetchResponse>;
}
