use thiserror::Error;

/// Why a fetch did not produce data
///
/// The display string is what ends up in the slice's `error` field.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No response was received
    #[error("{0:#}")]
    Transport(anyhow::Error),

    /// Non-2xx response
    #[error("{}", describe_status(*.status, .message.as_deref()))]
    Status { status: u16, message: Option<String> },

    /// The body is not the expected JSON
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

fn describe_status(status: u16, message: Option<&str>) -> String {
    match message {
        Some(message) => message.to_string(),
        None => format!("request failed with status {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_prefers_server_message() {
        let err = FetchError::Status {
            status: 403,
            message: Some("Usuário não possui permissão".to_string()),
        };
        assert_eq!(err.to_string(), "Usuário não possui permissão");
    }

    #[test]
    fn test_status_without_message() {
        let err = FetchError::Status {
            status: 502,
            message: None,
        };
        assert_eq!(err.to_string(), "request failed with status 502");
    }

    #[test]
    fn test_transport_includes_cause_chain() {
        let err = FetchError::Transport(
            anyhow::anyhow!("connection refused").context("Request to http://x failed"),
        );
        assert_eq!(
            err.to_string(),
            "Request to http://x failed: connection refused"
        );
    }
}
