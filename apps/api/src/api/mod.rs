use axum::{Router, middleware};
use axum_helpers::{JwtAuth, require_auth};
use domain_users::{PostgresUserRepository, UserService, auth_handlers, handlers};

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Registration and login are public; everything under /users requires
/// a valid bearer token.
pub fn routes(service: UserService<PostgresUserRepository>, jwt_auth: JwtAuth) -> Router {
    let protected_users = handlers::router(service.clone())
        .layer(middleware::from_fn_with_state(jwt_auth, require_auth));

    Router::new()
        .nest("/auth", auth_handlers::auth_router(service))
        .nest("/users", protected_users)
}
