pub mod friend_requests;
pub mod recommended_user;
pub mod users;

pub use friend_requests::{
    ordered_pair, ConnectionRole, FriendRequestRow, FriendRequestWithProfileRow, RequestStatus,
};
pub use recommended_user::RecommendedUserRow;
pub use users::{NewUser, UserProfile, UsersRow};
