//! Failure message normalization.
//!
//! Turns the server's structured failure payloads into user-presentable
//! strings. Validation failures carry a field-to-message map whose messages
//! are the bean-validation defaults (`must not be blank`, ...); those are
//! translated to friendlier wording and prefixed with a caller-supplied
//! field label. Business failures carry a single server-chosen message.
//! Pure functions, consumed by UI code only.

use std::collections::HashMap;

use crate::error::SessionError;
use crate::outcome::FailurePayload;

const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";
const NETWORK_MESSAGE: &str = "Could not reach the server. Check your connection.";
const SERVER_MESSAGE: &str = "The server hit a problem. Please try again later.";
const FORBIDDEN_MESSAGE: &str = "You do not have permission to do that.";
const SESSION_MESSAGE: &str = "Your session has ended. Please log in again.";

/// Translation table for the stock bean-validation messages the backend
/// passes through verbatim.
const VALIDATION_MESSAGES: &[(&str, &str)] = &[
    ("must not be blank", "is required"),
    ("must not be null", "is required"),
    ("must be greater than 0", "must be greater than zero"),
    ("must be a positive number", "must be a positive number"),
    ("must be greater than or equal to 2", "needs at least 2"),
    ("must be a well-formed email address", "is not a valid email address"),
];

fn translate_validation(message: &str) -> &str {
    VALIDATION_MESSAGES
        .iter()
        .find(|entry| entry.0 == message)
        .map_or(message, |entry| entry.1)
}

/// Produce user-facing messages from a failure payload.
///
/// Validation failures yield one line per offending field, labelled through
/// `field_labels` (fields without a label keep their raw name); business
/// failures yield the server's single message; anything else falls back to
/// `default_message`.
#[must_use]
pub fn normalize_failure(
    failure: &FailurePayload,
    field_labels: &HashMap<&str, &str>,
    default_message: &str,
) -> Vec<String> {
    if let Some(errors) = &failure.errors {
        if !errors.is_empty() {
            // BTreeMap iteration gives a stable field order.
            return errors
                .iter()
                .map(|(field, message)| {
                    let label: &str =
                        field_labels.get(field.as_str()).copied().unwrap_or(field.as_str());
                    format!("{label}: {}", translate_validation(message))
                })
                .collect();
        }
    }
    if let Some(message) = &failure.message {
        if !message.is_empty() {
            return vec![message.clone()];
        }
    }
    vec![default_message.to_string()]
}

/// Produce a single user-facing message for any session layer error.
#[must_use]
pub fn describe_error(error: &SessionError) -> String {
    match error {
        SessionError::Auth { .. } => SESSION_MESSAGE.to_string(),
        SessionError::Forbidden(failure) => {
            failure.message.clone().unwrap_or_else(|| FORBIDDEN_MESSAGE.to_string())
        }
        SessionError::Client { failure, .. } => {
            normalize_failure(failure, &HashMap::new(), FALLBACK_MESSAGE).join("\n")
        }
        SessionError::Server { .. } => SERVER_MESSAGE.to_string(),
        SessionError::Network(_) => NETWORK_MESSAGE.to_string(),
        SessionError::Serialization(_) | SessionError::Config(_) => FALLBACK_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for message normalization.
    use std::collections::BTreeMap;

    use super::*;
    use crate::outcome::AuthFailureReason;

    fn labels() -> HashMap<&'static str, &'static str> {
        HashMap::from([("title", "Title"), ("totalPrice", "Total price")])
    }

    #[test]
    fn validation_errors_are_labelled_and_translated() {
        let mut errors = BTreeMap::new();
        errors.insert("title".to_string(), "must not be blank".to_string());
        errors.insert("totalPrice".to_string(), "must be greater than 0".to_string());
        let failure = FailurePayload {
            code: Some("C001".to_string()),
            message: Some("Validation failed".to_string()),
            errors: Some(errors),
        };

        let messages = normalize_failure(&failure, &labels(), "failed");
        assert_eq!(
            messages,
            vec![
                "Title: is required".to_string(),
                "Total price: must be greater than zero".to_string(),
            ]
        );
    }

    #[test]
    fn unmapped_fields_and_messages_pass_through() {
        let mut errors = BTreeMap::new();
        errors.insert("closedAt".to_string(), "must be in the future".to_string());
        let failure = FailurePayload { errors: Some(errors), ..FailurePayload::default() };

        let messages = normalize_failure(&failure, &labels(), "failed");
        assert_eq!(messages, vec!["closedAt: must be in the future".to_string()]);
    }

    #[test]
    fn business_message_used_when_no_field_errors() {
        let failure = FailurePayload {
            code: Some("G002".to_string()),
            message: Some("The group is already full".to_string()),
            errors: None,
        };
        let messages = normalize_failure(&failure, &HashMap::new(), "failed");
        assert_eq!(messages, vec!["The group is already full".to_string()]);
    }

    #[test]
    fn empty_payload_falls_back_to_default() {
        let messages =
            normalize_failure(&FailurePayload::default(), &HashMap::new(), "Could not save");
        assert_eq!(messages, vec!["Could not save".to_string()]);

        let empty_map = FailurePayload {
            code: None,
            message: Some(String::new()),
            errors: Some(BTreeMap::new()),
        };
        let messages = normalize_failure(&empty_map, &HashMap::new(), "Could not save");
        assert_eq!(messages, vec!["Could not save".to_string()]);
    }

    #[test]
    fn describe_error_maps_classes() {
        let auth = SessionError::Auth {
            reason: AuthFailureReason::CredentialInvalid,
            failure: FailurePayload::default(),
        };
        assert_eq!(describe_error(&auth), SESSION_MESSAGE);

        let network = SessionError::Network("connection refused".to_string());
        assert_eq!(describe_error(&network), NETWORK_MESSAGE);

        let server = SessionError::Server { status: 500, failure: FailurePayload::default() };
        assert_eq!(describe_error(&server), SERVER_MESSAGE);

        let client = SessionError::Client {
            status: 404,
            failure: FailurePayload {
                message: Some("Group not found".to_string()),
                ..FailurePayload::default()
            },
        };
        assert_eq!(describe_error(&client), "Group not found");
    }
}
