//! SDK error types.
//!
//! Every fallible operation in the SDK returns [`SdkError`]. The variants map
//! one-to-one onto the failure categories callers are expected to branch on.

/// SDK errors.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Credentials rejected at login, or the session rejected by an endpoint (HTTP 401).
    #[error("authorization failed: {0}")]
    Authorization(String),

    /// Malformed caller input, HTTP 400 responses, or a call made before authenticating.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The server answered successfully but broke the expected contract.
    #[error("protocol violation: {0}")]
    Protocol(String),

    /// Any other non-success HTTP outcome or network failure.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SdkError {
    /// Creates a validation error with the given message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Prefixes a validation message with `context`; other variants pass through.
    #[must_use]
    pub fn with_context(self, context: &str) -> Self {
        match self {
            Self::Validation(message) => Self::Validation(format!("{}: {}", context, message)),
            other => other,
        }
    }

    /// Returns true for [`SdkError::Authorization`].
    #[must_use]
    pub const fn is_authorization(&self) -> bool {
        matches!(self, Self::Authorization(_))
    }

    /// Returns true for [`SdkError::Validation`].
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true for [`SdkError::Protocol`].
    #[must_use]
    pub const fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }

    /// Returns true for [`SdkError::Transport`].
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns the HTTP status carried by a transport error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation(err.to_string())
    }
}
