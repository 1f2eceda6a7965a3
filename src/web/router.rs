use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::web::middleware::auth as auth_middleware;
use crate::web::routes::{friend_requests, users};

pub fn build_router(pool: SqlitePool) -> Router {
    let protected_routes = Router::new()
        .route("/api/users/recommendations", get(users::recommendations_handler))
        .route("/api/users/friends", get(users::friends_handler))
        .route(
            "/api/friend-requests",
            get(friend_requests::friend_requests_overview_handler)
                .post(friend_requests::send_friend_request_handler),
        )
        .route(
            "/api/friend-requests/incoming",
            get(friend_requests::incoming_requests_handler),
        )
        .route(
            "/api/friend-requests/outgoing",
            get(friend_requests::outgoing_requests_handler),
        )
        .route(
            "/api/friend-requests/accepted",
            get(friend_requests::accepted_requests_handler),
        )
        .route(
            "/api/friend-requests/:request_id/accept",
            post(friend_requests::accept_friend_request_handler),
        )
        .layer(middleware::from_fn(auth_middleware::require_auth));

    Router::new()
        .merge(protected_routes)
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(pool)
}
