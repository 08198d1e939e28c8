//! # Axum Helpers
//!
//! A collection of utilities, middleware, and helpers for building Axum web applications.
//!
//! ## Modules
//!
//! - **[`auth`]**: stateless JWT token issuance/validation and the bearer-token
//!   authentication middleware
//! - **[`server`]**: router assembly, health endpoint, graceful shutdown
//! - **[`errors`]**: structured error responses
//! - **[`extractors`]**: custom extractors (validated JSON)

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod health;
pub mod server;
pub mod shutdown;

// Re-export auth types
pub use auth::{AuthUser, Claims, JwtAuth, JwtConfig, TokenError, TOKEN_TTL, require_auth};

// Re-export server types
pub use server::{create_app, create_router};
pub use shutdown::shutdown_signal;

// Re-export error types
pub use errors::ErrorResponse;

// Re-export extractors
pub use extractors::ValidatedJson;
