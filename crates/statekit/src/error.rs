//! Error types for the state container

use thiserror::Error;

/// Errors raised while assembling a store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Two reducers were registered under the same slice name
    #[error("slice `{0}` is registered more than once")]
    DuplicateSlice(String),
}

/// Errors raised while reading or building an action payload
#[derive(Debug, Error)]
pub enum ActionError {
    /// The action carries no payload
    #[error("action `{kind}` has no payload")]
    MissingPayload { kind: String },

    /// The payload does not match the requested type
    #[error("action `{kind}` has an invalid payload: {source}")]
    InvalidPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    /// The payload could not be encoded as JSON
    #[error("failed to encode payload for `{kind}`: {source}")]
    EncodePayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}
