//! Error types for the ftrack API client.

use thiserror::Error;

/// A specialized Result type for ftrack client calls.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Errors raised while talking to the ftrack API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// One or more identity values were not provided.
    #[error("missing ftrack configuration: {}", .missing.join(", "))]
    Configuration { missing: Vec<&'static str> },

    /// The server answered with a non-success HTTP status.
    #[error("ftrack API request failed with status {status}: {body}")]
    Transport { status: u16, body: String },

    /// The request never produced a response.
    #[error("ftrack API request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server flagged a single operation of the batch as failed.
    #[error("Operation {index} failed: {message}")]
    Operation {
        index: usize,
        exception: String,
        message: String,
    },

    /// The server rejected the request as a whole.
    #[error("ftrack API rejected the request ({exception}): {message}")]
    Rejected { exception: String, message: String },

    /// An option map would overwrite the action or one of its typed fields.
    #[error("option `{key}` is reserved for {action}")]
    ReservedOption { action: &'static str, key: String },

    /// The response body could not be interpreted as a result array.
    #[error("malformed ftrack API response: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    /// Create a new configuration error listing the missing variables.
    pub fn configuration(missing: Vec<&'static str>) -> Self {
        Self::Configuration { missing }
    }

    /// Create a new malformed-response error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create a new reserved-option error.
    pub fn reserved_option(action: &'static str, key: impl Into<String>) -> Self {
        Self::ReservedOption {
            action,
            key: key.into(),
        }
    }

    /// Index of the failing operation, if this error targets one.
    pub fn operation_index(&self) -> Option<usize> {
        match self {
            Self::Operation { index, .. } => Some(*index),
            _ => None,
        }
    }
}
