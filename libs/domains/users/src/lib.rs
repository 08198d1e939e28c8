//! Users Domain
//!
//! This module provides a complete domain implementation for identity management.
//!
//! # Features
//!
//! - Registration and login with Argon2 password hashing
//! - Bearer token issuance on register/login
//! - User CRUD operations with paginated listing
//! - Email uniqueness (case-insensitive)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, password hashing, token issuance
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{
//!     auth_handlers, handlers,
//!     repository::InMemoryUserRepository,
//!     service::UserService,
//! };
//!
//! let jwt = JwtAuth::new(&JwtConfig::new("a-secret-of-at-least-32-characters!!"));
//! let service = UserService::new(InMemoryUserRepository::new(), jwt);
//!
//! let public = auth_handlers::auth_router(service.clone());
//! let protected = handlers::router(service);
//! ```

pub mod auth_handlers;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres_repository_impl;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use models::{
    AuthResponse, LoginRequest, NewUser, Pagination, PaginationMeta, RegisterRequest, UpdateUser,
    User, UserListResponse, UserResponse,
};
pub use postgres_repository_impl::PostgresUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::{UserService, hash_password, verify_password};
