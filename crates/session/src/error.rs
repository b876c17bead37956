//! Error surface for the session layer.
//!
//! [`SessionError`] is the typed counterpart of the non-success
//! [`Outcome`](crate::outcome::Outcome) variants, used by the convenience
//! methods on the transport and by resource wrappers built on top of it.

use thiserror::Error;

use crate::outcome::{AuthFailureReason, FailurePayload};

/// Errors surfaced by the session layer.
///
/// The first five variants mirror the transport's outcome taxonomy; the
/// remaining two cover local failures (bad configuration, payloads that do
/// not decode into the caller's type).
#[derive(Debug, Error)]
pub enum SessionError {
    /// Authentication failed. Renewable failures are handled inside the
    /// transport; by the time this error reaches a caller it is terminal.
    #[error("authentication failed: {reason}")]
    Auth {
        /// Machine-readable failure reason from the server.
        reason: AuthFailureReason,
        /// Structured failure payload, if the server supplied one.
        failure: FailurePayload,
    },

    /// The server understood the credential but refused the operation (403).
    #[error("not permitted")]
    Forbidden(FailurePayload),

    /// Request was rejected by the server (4xx other than auth failures),
    /// typically a validation error carrying a field/message map.
    #[error("request rejected with status {status}")]
    Client {
        /// HTTP status code.
        status: u16,
        /// Structured failure payload, if the server supplied one.
        failure: FailurePayload,
    },

    /// The server failed (5xx). Not retried at this layer.
    #[error("server error (status {status})")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Structured failure payload, if the server supplied one.
        failure: FailurePayload,
    },

    /// No response was received (connection failure or request timeout).
    #[error("network error: {0}")]
    Network(String),

    /// A payload could not be serialized or a response could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SessionError {
    /// Structured failure payload attached to this error, if any.
    ///
    /// Useful for feeding [`normalize_failure`](crate::messages::normalize_failure)
    /// when presenting the error to a user.
    #[must_use]
    pub fn failure(&self) -> Option<&FailurePayload> {
        match self {
            Self::Auth { failure, .. }
            | Self::Forbidden(failure)
            | Self::Client { failure, .. }
            | Self::Server { failure, .. } => Some(failure),
            Self::Network(_) | Self::Serialization(_) | Self::Config(_) => None,
        }
    }
}

/// Result type alias for session layer operations.
pub type Result<T> = std::result::Result<T, SessionError>;
