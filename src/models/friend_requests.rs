use serde::{Deserialize, Serialize};

use super::UserProfile;

/// Lifecycle of a friend request. Transitions only go `Pending -> Accepted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
        }
    }
}

/// Which side of an accepted request the actor was on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionRole {
    Sender,
    Recipient,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct FriendRequestRow {
    pub request_id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub status: RequestStatus,
    pub created_at: String,
    pub updated_at: String,
}

// Request joined with the profile of the counterparty (`other_*` columns).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FriendRequestWithProfileRow {
    pub request_id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub status: RequestStatus,
    pub created_at: String,
    pub updated_at: String,
    pub other_user_id: String,
    pub other_full_name: String,
    pub other_profile_pic: Option<String>,
    pub other_native_language: Option<String>,
    pub other_learning_language: Option<String>,
}

impl FriendRequestWithProfileRow {
    pub fn into_parts(self) -> (FriendRequestRow, UserProfile) {
        let request = FriendRequestRow {
            request_id: self.request_id,
            sender_id: self.sender_id,
            recipient_id: self.recipient_id,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        let profile = UserProfile {
            user_id: self.other_user_id,
            full_name: self.other_full_name,
            profile_pic: self.other_profile_pic,
            native_language: self.other_native_language,
            learning_language: self.other_learning_language,
        };
        (request, profile)
    }
}

/// Orders an unordered pair of user ids as `(low, high)`. Stored as two
/// columns so ids are never concatenated.
pub fn ordered_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
