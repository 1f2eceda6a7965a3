pub mod friend_graph_service;
pub mod friend_request_service;
pub mod recommendation_service;
