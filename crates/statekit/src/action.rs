//! Plain actions
//!
//! A plain action is a serializable descriptor: a `type` discriminant, an
//! optional JSON payload and an optional storage key picked up by the
//! persistence middleware.
//!
//! ```text
//! { "type": "photos/fetchSuccess", "payload": [...], "storageKey": "photos" }
//! ```

use crate::error::ActionError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Serializable change descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Discriminant, usually `"{slice}/{case}"`
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,

    /// Key under which the payload is mirrored to durable storage
    #[serde(
        default,
        rename = "storageKey",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_key: Option<String>,
}

impl Action {
    /// Create an action without payload
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: None,
            storage_key: None,
        }
    }

    /// Attach a JSON payload
    pub fn with_payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Attach any serializable payload
    pub fn with_serialized<T: Serialize>(mut self, payload: &T) -> Result<Self, ActionError> {
        let value = serde_json::to_value(payload).map_err(|source| ActionError::EncodePayload {
            kind: self.kind.clone(),
            source,
        })?;
        self.payload = Some(value);
        Ok(self)
    }

    /// Ask the persistence middleware to store the payload under `key`
    pub fn persist_as(mut self, key: impl Into<String>) -> Self {
        self.storage_key = Some(key.into());
        self
    }

    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Decode the payload into `T`
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, ActionError> {
        let payload = self
            .payload
            .as_ref()
            .ok_or_else(|| ActionError::MissingPayload {
                kind: self.kind.clone(),
            })?;

        T::deserialize(payload).map_err(|source| ActionError::InvalidPayload {
            kind: self.kind.clone(),
            source,
        })
    }
}
