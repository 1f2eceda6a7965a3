pub mod friend_requests;
pub mod users;
