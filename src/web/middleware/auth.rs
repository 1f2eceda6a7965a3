use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// The actor every connection operation runs on behalf of.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: String,
}

#[derive(Deserialize)]
struct JwtPayload {
    sub: String,
}

// Tokens are issued and verified by the auth service; here we only read `sub`.
pub async fn require_auth(mut request: Request, next: Next) -> Response {
    let user_id = extract_token(request.headers()).and_then(|token| subject_from_jwt(&token));

    let Some(id) = user_id else {
        debug!("rejecting request to {} without a usable token", request.uri().path());
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "unauthorized",
                "message": "Unauthorized - Please login",
            })),
        )
            .into_response();
    };

    request.extensions_mut().insert(AuthenticatedUser { id });
    next.run(request).await
}

fn extract_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get(header::COOKIE)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split(';')
                .map(str::trim)
                .find_map(|c| c.strip_prefix("access_token="))
                .map(|t| t.to_string())
        });

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|hv| hv.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
    })
}

fn subject_from_jwt(token: &str) -> Option<String> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let payload_bytes = general_purpose::URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let payload = serde_json::from_slice::<JwtPayload>(&payload_bytes).ok()?;
    let sub = payload.sub.trim();
    if sub.is_empty() {
        return None;
    }
    Some(sub.to_string())
}
