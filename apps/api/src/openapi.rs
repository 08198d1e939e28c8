use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(
        axum_helpers::ErrorResponse,
        domain_users::AuthResponse,
        domain_users::LoginRequest,
        domain_users::PaginationMeta,
        domain_users::RegisterRequest,
        domain_users::UpdateUser,
        domain_users::UserListResponse,
        domain_users::UserResponse,
    )),
    info(
        title = "Identity API",
        version = "0.1.0",
        description = "Identity and access API: registration, login, and user management"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "User management (bearer token required)")
    )
)]
pub struct ApiDoc;
