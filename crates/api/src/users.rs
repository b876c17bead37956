//! Current-user profile endpoints.

use chrono::NaiveDateTime;
use nearsplit_session::{Result, SessionTransport};
use serde::{Deserialize, Serialize};

/// A user as served by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User id.
    pub id: i64,
    /// Login email.
    pub email: String,
    /// Real name.
    pub name: String,
    /// Display nickname.
    pub nickname: String,
    /// Street address, if set.
    pub address: Option<String>,
    /// Geo location string, if set.
    pub location: Option<String>,
    /// Profile image URL, if set.
    pub profile_image: Option<String>,
    /// Phone number, if set.
    pub phone: Option<String>,
    /// Last profile update time.
    pub updated_at: Option<NaiveDateTime>,
}

/// Partial profile update. `None` fields are omitted and left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    /// New nickname.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// New address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// New geo location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// New profile image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    /// New phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// `/users` endpoints.
pub struct UsersApi<'a> {
    transport: &'a SessionTransport,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(transport: &'a SessionTransport) -> Self {
        Self { transport }
    }

    /// Fetch the logged-in user's profile.
    ///
    /// # Errors
    /// Any transport error.
    pub async fn me(&self) -> Result<UserResponse> {
        self.transport.get("/users/me").await
    }

    /// Update the logged-in user's profile.
    ///
    /// # Errors
    /// Any transport error; validation failures arrive as a client error
    /// with per-field messages.
    pub async fn update_me(&self, update: &UserUpdateRequest) -> Result<UserResponse> {
        self.transport.patch("/users/me", update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_response_decodes_camel_case() {
        let body = serde_json::json!({
            "id": 3,
            "email": "ana@example.com",
            "name": "Ana",
            "nickname": "ana",
            "address": null,
            "location": null,
            "profileImage": "https://img.example.com/3.png",
            "phone": null,
            "updatedAt": "2025-06-01T12:30:00"
        });

        let user: UserResponse = serde_json::from_value(body).expect("decodes");
        assert_eq!(user.id, 3);
        assert_eq!(user.profile_image.as_deref(), Some("https://img.example.com/3.png"));
        assert!(user.address.is_none());
        assert!(user.updated_at.is_some());
    }

    #[test]
    fn update_request_omits_unset_fields() {
        let update =
            UserUpdateRequest { nickname: Some("neo".to_string()), ..UserUpdateRequest::default() };
        let body = serde_json::to_value(&update).expect("serializes");
        assert_eq!(body, serde_json::json!({ "nickname": "neo" }));
    }
}
