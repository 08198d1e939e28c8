use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use axum_helpers::ValidatedJson;
use std::sync::Arc;

use crate::error::UserResult;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Create the public authentication router (no bearer token required)
pub fn auth_router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(shared_service)
}

/// Register a new user
///
/// POST /auth/register
async fn register<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> UserResult<impl IntoResponse> {
    let response = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in with email and password
///
/// POST /auth/login
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<AuthResponse>> {
    let response = service.login(input).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserRepository;
    use axum::body::Body;
    use axum::http::Request;
    use axum_helpers::{JwtAuth, JwtConfig};
    use tower::ServiceExt;

    const TEST_SECRET: &str = "test-secret-key-0123456789abcdef";

    fn app() -> Router {
        let jwt = JwtAuth::new(&JwtConfig::new(TEST_SECRET));
        auth_router(UserService::new(InMemoryUserRepository::new(), jwt))
    }

    fn json_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const REGISTER_BODY: &str =
        r#"{"email":"test@example.com","name":"Test User","password":"pw12345678"}"#;

    #[tokio::test]
    async fn test_register_returns_201_with_token() {
        let app = app();

        let response = app
            .oneshot(json_request("/register", REGISTER_BODY))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["user"]["email"], "test@example.com");
        assert!(json["token"].as_str().unwrap().contains('.'));
        assert!(json["user"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_register_duplicate_is_409() {
        let app = app();

        let response = app
            .clone()
            .oneshot(json_request("/register", REGISTER_BODY))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(json_request("/register", REGISTER_BODY))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_register_invalid_email_is_400() {
        let app = app();

        let response = app
            .oneshot(json_request(
                "/register",
                r#"{"email":"nope","name":"Test User","password":"pw12345678"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_short_password_is_400() {
        let app = app();

        let response = app
            .oneshot(json_request(
                "/register",
                r#"{"email":"test@example.com","name":"Test User","password":"short"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_flow() {
        let app = app();

        app.clone()
            .oneshot(json_request("/register", REGISTER_BODY))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "/login",
                r#"{"email":"test@example.com","password":"pw12345678"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(json_request(
                "/login",
                r#"{"email":"test@example.com","password":"other1234"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
