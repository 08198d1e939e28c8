//! Authentication and authorization module.
//!
//! This module provides:
//! - Stateless JWT token issuance and validation (HS256 only)
//! - Bearer-token authentication middleware for protected routes
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtConfig, JwtAuth, require_auth};
//! use core_config::FromEnv;
//!
//! // Load config and create auth instance
//! let config = JwtConfig::from_env()?;
//! let auth = JwtAuth::new(&config);
//!
//! // Protect routes with the auth middleware
//! let protected = Router::new()
//!     .route("/api/protected", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, require_auth));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

// Re-export commonly used types
pub use config::JwtConfig;
pub use jwt::{Claims, JwtAuth, TokenError, TOKEN_TTL};
pub use middleware::{AuthUser, require_auth};
