use serde::Serialize;

// View-model row for the recommendations grid (users + derived request flag).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RecommendedUserRow {
    pub user_id: String,
    pub full_name: String,
    pub bio: Option<String>,
    pub profile_pic: Option<String>,
    pub native_language: Option<String>,
    pub learning_language: Option<String>,
    pub location: Option<String>,
    #[sqlx(skip)]
    pub request_sent: bool,
}
