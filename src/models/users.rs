use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UsersRow {
    pub user_id: String,
    pub full_name: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub profile_pic: Option<String>,
    pub native_language: Option<String>,
    pub learning_language: Option<String>,
    pub location: Option<String>,
    pub is_onboarded: bool,
}

/// Write model for the user directory. Only used when seeding users; the
/// connection subsystem itself never creates users.
#[derive(Debug, Clone, Default)]
pub struct NewUser<'a> {
    pub user_id: &'a str,
    pub full_name: &'a str,
    pub email: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub profile_pic: Option<&'a str>,
    pub native_language: Option<&'a str>,
    pub learning_language: Option<&'a str>,
    pub location: Option<&'a str>,
    pub is_onboarded: bool,
}

// Public projection of a partner: what friend lists and request lists expose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct UserProfile {
    pub user_id: String,
    pub full_name: String,
    pub profile_pic: Option<String>,
    pub native_language: Option<String>,
    pub learning_language: Option<String>,
}
