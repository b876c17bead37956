//! Registration, login and logout.
//!
//! Login and logout are the two places the session flag is set and cleared
//! deliberately; the transport clears it on its own only when a terminal
//! auth failure ends the session.

use nearsplit_session::{Result, SessionTransport};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::users::UserResponse;

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password; sent over the transport, never stored.
    pub password: String,
}

/// Payload for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Real name.
    pub name: String,
    /// Display nickname.
    pub nickname: String,
}

/// Body of a successful login. The credential itself arrives in a cookie,
/// not in this payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// The logged-in user.
    pub user_response: UserResponse,
}

/// `/auth` endpoints.
pub struct AuthApi<'a> {
    transport: &'a SessionTransport,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(transport: &'a SessionTransport) -> Self {
        Self { transport }
    }

    /// Register a new account. Does not log in.
    ///
    /// # Errors
    /// Any transport error; a taken email arrives as a client error.
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        self.transport.post("/auth/register", request).await
    }

    /// Log in. On success the server sets the credential cookie and this
    /// call sets the session flag.
    ///
    /// # Errors
    /// Any transport error; bad credentials arrive as an auth failure.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let response: LoginResponse = self.transport.post("/auth/login", request).await?;
        self.transport.flag_store().set();
        info!(user_id = response.user_response.id, "session established");
        Ok(response)
    }

    /// Log out. The server discards the credential cookie; the session flag
    /// is cleared even if the call fails, since the local session is over
    /// either way.
    ///
    /// # Errors
    /// Any transport error from the logout call itself.
    pub async fn logout(&self) -> Result<()> {
        let result = self.transport.post_empty::<()>("/auth/logout").await;
        self.transport.flag_store().clear();
        info!("session closed");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_serializes_plain_fields() {
        let request =
            LoginRequest { email: "ana@example.com".to_string(), password: "hunter2".to_string() };
        let body = serde_json::to_value(&request).expect("serializes");
        assert_eq!(
            body,
            serde_json::json!({ "email": "ana@example.com", "password": "hunter2" })
        );
    }

    #[test]
    fn login_response_unwraps_nested_user() {
        let body = serde_json::json!({
            "userResponse": {
                "id": 1,
                "email": "ana@example.com",
                "name": "Ana",
                "nickname": "ana",
                "address": null,
                "location": null,
                "profileImage": null,
                "phone": null,
                "updatedAt": null
            }
        });

        let response: LoginResponse = serde_json::from_value(body).expect("decodes");
        assert_eq!(response.user_response.nickname, "ana");
    }
}
