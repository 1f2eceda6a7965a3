pub mod friend_request_repo;
pub mod pool;
pub mod schema;
pub mod user_repo;
