//! Response classification types.
//!
//! Every response the transport receives is folded into an [`Outcome`]: a
//! tagged result derived from the HTTP status code *and* the server-supplied
//! machine-readable failure code, not from the status alone (distinct auth
//! failure reasons share status 401).

use std::collections::BTreeMap;
use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SessionError;

/// Why an authentication failure (HTTP 401) occurred.
///
/// Only [`CredentialExpired`](Self::CredentialExpired) is recoverable by
/// renewing the access credential; every other variant is terminal and
/// requires re-authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailureReason {
    /// A credential was presented but its lifetime has elapsed. Triggers
    /// renewal.
    CredentialExpired,
    /// No credential was presented at all.
    CredentialAbsent,
    /// Any other 401 variant, including an expired renewal credential.
    CredentialInvalid,
}

impl AuthFailureReason {
    /// Wire code used by the server for this reason.
    #[must_use]
    pub fn as_code(self) -> &'static str {
        match self {
            Self::CredentialExpired => "credential-expired",
            Self::CredentialAbsent => "credential-absent",
            Self::CredentialInvalid => "credential-invalid",
        }
    }

    /// Whether this failure can be resolved by renewing the credential.
    #[must_use]
    pub fn is_renewable(self) -> bool {
        matches!(self, Self::CredentialExpired)
    }

    pub(crate) fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("credential-expired") => Self::CredentialExpired,
            Some("credential-absent") => Self::CredentialAbsent,
            _ => Self::CredentialInvalid,
        }
    }
}

impl fmt::Display for AuthFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Structured failure body served by the API on non-2xx responses.
///
/// All fields are optional; validation failures carry a field-to-message map
/// in `errors`, business failures a single `message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailurePayload {
    /// Machine-readable failure code (e.g. `credential-expired`, `G002`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable message chosen by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Per-field validation messages, present on input validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

/// Classified result of sending one request through the transport.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// 2xx response; the decoded JSON body (`Null` for empty bodies).
    Success(Value),
    /// 401 response, classified by the server failure code.
    AuthFailure {
        /// Classified failure reason.
        reason: AuthFailureReason,
        /// Structured failure payload.
        failure: FailurePayload,
    },
    /// 403 response; the caller is authenticated but not permitted.
    Forbidden(FailurePayload),
    /// Any other 4xx response, passed through unchanged to the caller.
    ClientError {
        /// HTTP status code.
        status: u16,
        /// Structured failure payload.
        failure: FailurePayload,
    },
    /// 5xx response, passed through unchanged; no retry at this layer.
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Structured failure payload.
        failure: FailurePayload,
    },
    /// No response was received at all.
    NetworkError(String),
}

impl Outcome {
    /// Classify a non-2xx response from its status code and failure body.
    pub(crate) fn classify(status: StatusCode, failure: FailurePayload) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            let reason = AuthFailureReason::from_code(failure.code.as_deref());
            Self::AuthFailure { reason, failure }
        } else if status == StatusCode::FORBIDDEN {
            Self::Forbidden(failure)
        } else if status.is_server_error() {
            Self::ServerError { status: status.as_u16(), failure }
        } else if status.is_client_error() {
            Self::ClientError { status: status.as_u16(), failure }
        } else {
            Self::NetworkError(format!("unexpected response status {status}"))
        }
    }

    /// Whether this outcome is a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Short tag for structured logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::AuthFailure { .. } => "auth-failure",
            Self::Forbidden(_) => "forbidden",
            Self::ClientError { .. } => "client-error",
            Self::ServerError { .. } => "server-error",
            Self::NetworkError(_) => "network-error",
        }
    }

    /// Convert into a `Result`, mapping every non-success variant onto the
    /// corresponding [`SessionError`].
    ///
    /// # Errors
    /// Returns the error counterpart of any non-success outcome.
    pub fn into_result(self) -> Result<Value, SessionError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::AuthFailure { reason, failure } => Err(SessionError::Auth { reason, failure }),
            Self::Forbidden(failure) => Err(SessionError::Forbidden(failure)),
            Self::ClientError { status, failure } => Err(SessionError::Client { status, failure }),
            Self::ServerError { status, failure } => Err(SessionError::Server { status, failure }),
            Self::NetworkError(message) => Err(SessionError::Network(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for outcome classification.
    use super::*;

    fn payload(code: &str) -> FailurePayload {
        FailurePayload { code: Some(code.to_string()), message: None, errors: None }
    }

    #[test]
    fn expired_code_is_renewable() {
        let outcome = Outcome::classify(StatusCode::UNAUTHORIZED, payload("credential-expired"));
        match outcome {
            Outcome::AuthFailure { reason, .. } => {
                assert_eq!(reason, AuthFailureReason::CredentialExpired);
                assert!(reason.is_renewable());
            }
            other => panic!("expected auth failure, got {other:?}"),
        }
    }

    #[test]
    fn absent_code_is_terminal() {
        let outcome = Outcome::classify(StatusCode::UNAUTHORIZED, payload("credential-absent"));
        match outcome {
            Outcome::AuthFailure { reason, .. } => {
                assert_eq!(reason, AuthFailureReason::CredentialAbsent);
                assert!(!reason.is_renewable());
            }
            other => panic!("expected auth failure, got {other:?}"),
        }
    }

    #[test]
    fn missing_or_unknown_code_maps_to_invalid() {
        let outcome = Outcome::classify(StatusCode::UNAUTHORIZED, FailurePayload::default());
        assert!(matches!(
            outcome,
            Outcome::AuthFailure { reason: AuthFailureReason::CredentialInvalid, .. }
        ));

        let outcome = Outcome::classify(StatusCode::UNAUTHORIZED, payload("something-else"));
        assert!(matches!(
            outcome,
            Outcome::AuthFailure { reason: AuthFailureReason::CredentialInvalid, .. }
        ));
    }

    #[test]
    fn forbidden_and_server_and_client_statuses() {
        assert!(matches!(
            Outcome::classify(StatusCode::FORBIDDEN, FailurePayload::default()),
            Outcome::Forbidden(_)
        ));
        assert!(matches!(
            Outcome::classify(StatusCode::INTERNAL_SERVER_ERROR, FailurePayload::default()),
            Outcome::ServerError { status: 500, .. }
        ));
        assert!(matches!(
            Outcome::classify(StatusCode::NOT_FOUND, FailurePayload::default()),
            Outcome::ClientError { status: 404, .. }
        ));
    }

    #[test]
    fn into_result_maps_variants() {
        assert!(Outcome::Success(Value::Null).into_result().is_ok());

        let err = Outcome::Forbidden(FailurePayload::default())
            .into_result()
            .expect_err("forbidden should map to an error");
        assert!(matches!(err, SessionError::Forbidden(_)));

        let err = Outcome::NetworkError("boom".into())
            .into_result()
            .expect_err("network error should map to an error");
        assert!(matches!(err, SessionError::Network(_)));
    }
}
