use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{operation}: request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation}: expected {expected} status code, got {status}. Response: {body}")]
    UnexpectedStatus {
        operation: &'static str,
        expected: String,
        status: u16,
        body: String,
    },

    #[error("{operation}: failed to decode response: {source}. Response: {body}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("{kind} fixture body was cancelled")]
    Cancelled { kind: &'static str },

    #[error("invalid base url: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Config(String),
}

impl ContractError {
    /// Status code observed by the failing call, if it got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            ContractError::UnexpectedStatus { status, .. } => Some(*status),
            ContractError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
