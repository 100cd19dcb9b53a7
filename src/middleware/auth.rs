use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Caller's bearer token, forwarded verbatim to the platform API.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rejects requests without a `Bearer` token and stores the token as a
/// [`BearerToken`] extension. Signature and role checks belong to the platform.
pub async fn require_bearer_auth(mut req: Request, next: Next) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"missing_authorization"})),
        )
            .into_response();
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"bad_authorization"})),
        )
            .into_response();
    };
    let Some(token) = auth_str.strip_prefix("Bearer ").map(str::trim) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"unsupported_scheme"})),
        )
            .into_response();
    };
    if token.is_empty() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"missing_token"})),
        )
            .into_response();
    }

    let token = BearerToken(token.to_string());
    req.extensions_mut().insert(token);
    next.run(req).await
}
