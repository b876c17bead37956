//! Request descriptors.
//!
//! A [`RequestDescriptor`] names one logical request: method, target path,
//! optional JSON body, and a crate-private `retried` marker set exactly once
//! before a resend. The marker is what prevents a descriptor from ever
//! triggering a second credential renewal.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::SessionError;

/// One logical request travelling through the transport.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    body: Option<Value>,
    retried: bool,
}

impl RequestDescriptor {
    /// Create a descriptor with an arbitrary method and no body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), body: None, retried: false }
    }

    /// GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// POST request without a body (e.g. join/logout style endpoints).
    #[must_use]
    pub fn post_empty(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// PATCH request without a body.
    #[must_use]
    pub fn patch_empty(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// POST request with a JSON body.
    ///
    /// # Errors
    /// Returns [`SessionError::Serialization`] if the body cannot be
    /// serialized to JSON.
    pub fn post<T: Serialize>(path: impl Into<String>, body: &T) -> Result<Self, SessionError> {
        Ok(Self::new(Method::POST, path).with_body(to_value(body)?))
    }

    /// PATCH request with a JSON body.
    ///
    /// # Errors
    /// Returns [`SessionError::Serialization`] if the body cannot be
    /// serialized to JSON.
    pub fn patch<T: Serialize>(path: impl Into<String>, body: &T) -> Result<Self, SessionError> {
        Ok(Self::new(Method::PATCH, path).with_body(to_value(body)?))
    }

    /// Attach a pre-serialized JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Target path, relative to the configured base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// JSON body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Whether this descriptor has already been resent once.
    #[must_use]
    pub fn retried(&self) -> bool {
        self.retried
    }

    /// Mark the descriptor as resent. Called exactly once, before the resend;
    /// a marked descriptor failing with an expired credential again is
    /// treated as terminal.
    pub(crate) fn mark_retried(&mut self) {
        debug_assert!(!self.retried, "descriptor marked retried twice");
        self.retried = true;
    }
}

fn to_value<T: Serialize>(body: &T) -> Result<Value, SessionError> {
    serde_json::to_value(body)
        .map_err(|err| SessionError::Serialization(format!("failed to serialize body: {err}")))
}

#[cfg(test)]
mod tests {
    //! Unit tests for request descriptors.
    use serde_json::json;

    use super::*;

    #[test]
    fn constructors_set_method_and_path() {
        let descriptor = RequestDescriptor::get("/users/me");
        assert_eq!(descriptor.method(), &Method::GET);
        assert_eq!(descriptor.path(), "/users/me");
        assert!(descriptor.body().is_none());
        assert!(!descriptor.retried());
    }

    #[test]
    fn post_serializes_body() {
        let descriptor = RequestDescriptor::post("/split", &json!({ "title": "rice" }))
            .expect("body serializes");
        assert_eq!(descriptor.method(), &Method::POST);
        assert_eq!(descriptor.body(), Some(&json!({ "title": "rice" })));
    }

    #[test]
    fn mark_retried_flips_flag_once() {
        let mut descriptor = RequestDescriptor::get("/split");
        descriptor.mark_retried();
        assert!(descriptor.retried());
    }
}
