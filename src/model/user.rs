use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Public profile of a user.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub expertise: Vec<String>,
    /// Communities this user leads
    pub led_community_ids: Vec<i32>,
    /// Alliances this user created
    pub created_alliance_ids: Vec<i32>,
    pub created_at: NaiveDateTime,
}

/// Profile fields a user may change; absent fields are left untouched.
///
/// An empty string clears `photo_url`, `bio` or `location`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileDto {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub location: Option<String>,
    pub expertise: Option<Vec<String>>,
}
