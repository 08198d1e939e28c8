use super::jwt::{JwtAuth, TokenError};
use crate::errors::ErrorResponse;
use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Verified identity attached to request extensions by [`require_auth`].
///
/// Downstream handlers read this, never the raw token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
}

/// Parsed shape of the `Authorization` header.
#[derive(Debug, PartialEq, Eq)]
enum BearerHeader<'a> {
    Missing,
    NotBearer,
    Bearer(&'a str),
}

fn parse_bearer_header(headers: &HeaderMap) -> BearerHeader<'_> {
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        None => BearerHeader::Missing,
        Some(value) => match value.strip_prefix("Bearer ") {
            Some(token) => BearerHeader::Bearer(token),
            None => BearerHeader::NotBearer,
        },
    }
}

fn unauthorized(code: &str, message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: code.to_string(),
            message: message.to_string(),
            details: None,
        }),
    )
        .into_response()
}

/// Bearer-token authentication middleware.
///
/// Validates the `Authorization` header, short-circuiting on the first
/// failure, and inserts [`AuthUser`] into request extensions on success.
/// Every request is re-validated independently; validation results are
/// never cached.
///
/// Rejection codes: `MISSING_AUTH_HEADER`, `INVALID_AUTH_FORMAT`,
/// `INVALID_TOKEN`, `TOKEN_EXPIRED` - all mapped to 401.
pub async fn require_auth(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Response {
    let subject = match parse_bearer_header(request.headers()) {
        BearerHeader::Missing => {
            tracing::debug!("Rejected request without Authorization header");
            return unauthorized("MISSING_AUTH_HEADER", "Authorization header required");
        }
        BearerHeader::NotBearer => {
            tracing::debug!("Rejected Authorization header without Bearer prefix");
            return unauthorized("INVALID_AUTH_FORMAT", "Bearer token required");
        }
        BearerHeader::Bearer(token) => match auth.validate(token) {
            Ok(subject) => subject,
            Err(TokenError::Expired) => {
                tracing::debug!("Rejected expired token");
                return unauthorized("TOKEN_EXPIRED", "Token expired");
            }
            Err(e) => {
                tracing::debug!("Rejected invalid token: {}", e);
                return unauthorized("INVALID_TOKEN", "Invalid token");
            }
        },
    };

    request.extensions_mut().insert(AuthUser { id: subject });
    next.run(request).await
}
