//! Split-purchase group endpoints.

use chrono::NaiveDateTime;
use nearsplit_session::{Result, SessionTransport};
use serde::{Deserialize, Serialize};

use crate::page::Page;

/// Payload for creating or updating a group.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitGroupRequest {
    /// Group title.
    pub title: String,
    /// Total price to split.
    pub total_price: f64,
    /// Maximum number of participants, host included.
    pub max_participants: u32,
    /// Pickup location as a display string.
    pub pickup_location: String,
    /// Pickup location geo coordinates, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_location_geo: Option<String>,
    /// Deadline for joining.
    pub closed_at: NaiveDateTime,
}

/// One participant within a group detail view.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    /// Participation record id.
    pub id: i64,
    /// Participating user id.
    pub user_id: i64,
    /// Units claimed by this participant.
    pub quantity: u32,
    /// This participant's share of the total price.
    pub share_amount: f64,
    /// Participation state (e.g. `PENDING`, `APPROVED`, `REJECTED`).
    pub status: String,
    /// When the participant applied.
    pub joined_at: NaiveDateTime,
}

/// Full group detail.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitGroupResponse {
    /// Group id.
    pub id: i64,
    /// Group title.
    pub title: String,
    /// Total price to split.
    pub total_price: f64,
    /// Maximum number of participants.
    pub max_participants: u32,
    /// Pickup location display string.
    pub pickup_location: String,
    /// Pickup location geo coordinates, if known.
    pub pickup_location_geo: Option<String>,
    /// Group lifecycle state (e.g. `OPEN`, `CLOSED`, `COMPLETED`).
    pub group_state: String,
    /// Hosting user's id.
    pub host_user_id: i64,
    /// Hosting user's nickname.
    pub host_nickname: String,
    /// Current participant count.
    pub current_participants: u32,
    /// Deadline for joining.
    pub closed_at: NaiveDateTime,
    /// Creation time.
    pub created_at: NaiveDateTime,
    /// Participants, present on the detail endpoint.
    #[serde(default)]
    pub participants: Vec<ParticipantResponse>,
}

/// Compact group row used by list views.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitGroupSummaryResponse {
    /// Group id.
    pub group_id: i64,
    /// Group title.
    pub title: String,
    /// Total price to split.
    pub total_price: f64,
    /// Current participant count.
    pub current_participants: u32,
    /// Maximum number of participants.
    pub max_participants: u32,
    /// Group lifecycle state.
    pub status: String,
    /// Deadline for joining.
    pub closed_at: NaiveDateTime,
    /// Whether the logged-in user hosts this group.
    pub is_host: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ParticipantActionRequest {
    participant_user_id: i64,
}

/// `/split` endpoints.
pub struct GroupsApi<'a> {
    transport: &'a SessionTransport,
}

impl<'a> GroupsApi<'a> {
    pub(crate) fn new(transport: &'a SessionTransport) -> Self {
        Self { transport }
    }

    /// List all open groups, paged.
    ///
    /// # Errors
    /// Any transport error.
    pub async fn list(&self, page: u32, size: u32) -> Result<Page<SplitGroupSummaryResponse>> {
        self.transport.get(&format!("/split?page={page}&size={size}")).await
    }

    /// List the logged-in user's groups (hosted and joined).
    ///
    /// # Errors
    /// Any transport error.
    pub async fn my_groups(&self) -> Result<Vec<SplitGroupSummaryResponse>> {
        self.transport.get("/split/my").await
    }

    /// Fetch one group with its participants.
    ///
    /// # Errors
    /// Any transport error; an unknown id arrives as a client error.
    pub async fn get(&self, group_id: i64) -> Result<SplitGroupResponse> {
        self.transport.get(&format!("/split/{group_id}")).await
    }

    /// Create a group hosted by the logged-in user.
    ///
    /// # Errors
    /// Any transport error; validation failures carry per-field messages.
    pub async fn create(&self, request: &SplitGroupRequest) -> Result<SplitGroupResponse> {
        self.transport.post("/split", request).await
    }

    /// Update a group. Host only.
    ///
    /// # Errors
    /// Any transport error; a non-host caller gets a forbidden error.
    pub async fn update(
        &self,
        group_id: i64,
        request: &SplitGroupRequest,
    ) -> Result<SplitGroupResponse> {
        self.transport.patch(&format!("/split/{group_id}"), request).await
    }

    /// Delete (soft-delete) a group. Host only.
    ///
    /// # Errors
    /// Any transport error.
    pub async fn delete(&self, group_id: i64) -> Result<()> {
        self.transport.delete(&format!("/split/{group_id}")).await
    }

    /// Apply to join a group.
    ///
    /// # Errors
    /// Any transport error; a full group arrives as a client error.
    pub async fn join(&self, group_id: i64) -> Result<()> {
        self.transport.post_empty(&format!("/split/{group_id}/join")).await
    }

    /// Withdraw a join application.
    ///
    /// # Errors
    /// Any transport error.
    pub async fn cancel_join(&self, group_id: i64) -> Result<()> {
        self.transport.delete(&format!("/split/{group_id}/join")).await
    }

    /// Approve a pending participant. Host only.
    ///
    /// # Errors
    /// Any transport error.
    pub async fn approve(&self, group_id: i64, participant_user_id: i64) -> Result<()> {
        let request = ParticipantActionRequest { participant_user_id };
        self.transport.post(&format!("/split/{group_id}/approve"), &request).await
    }

    /// Reject a pending participant. Host only.
    ///
    /// # Errors
    /// Any transport error.
    pub async fn reject(&self, group_id: i64, participant_user_id: i64) -> Result<()> {
        let request = ParticipantActionRequest { participant_user_id };
        self.transport.post(&format!("/split/{group_id}/reject"), &request).await
    }

    /// Current participant count for a group.
    ///
    /// # Errors
    /// Any transport error.
    pub async fn participant_count(&self, group_id: i64) -> Result<u32> {
        self.transport.get(&format!("/split/{group_id}/participants")).await
    }
}
