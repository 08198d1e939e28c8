use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_helpers::JwtAuth;
use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{
    AuthResponse, LoginRequest, NewUser, Pagination, PaginationMeta, RegisterRequest, UpdateUser,
    UserListResponse, UserResponse,
};
use crate::repository::UserRepository;

/// Largest page size a client can request
const MAX_PAGE_LIMIT: i64 = 100;

/// Hash a password with Argon2 and a per-password random salt.
///
/// The returned PHC string embeds the salt and cost parameters, so
/// verification needs nothing beyond the hash itself.
pub fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

/// Verify a password against a stored PHC hash string
pub fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
        }
    }

    /// Register a new user and issue a bearer token
    pub async fn register(&self, input: RegisterRequest) -> UserResult<AuthResponse> {
        self.validate_password(&input.password)?;

        let email = normalize_email(&input.email);

        // Early check for a friendlier error; the store's unique
        // constraint is still authoritative under concurrency.
        if self.repository.get_by_email(&email).await?.is_some() {
            return Err(UserError::DuplicateEmail(email));
        }

        let password_hash = hash_password(&input.password)?;

        let created = self
            .repository
            .create(NewUser {
                email,
                name: input.name,
                password_hash,
            })
            .await?;

        let token = self
            .jwt
            .issue(created.id)
            .map_err(|e| UserError::Internal(format!("Token issuance failed: {}", e)))?;

        tracing::info!(user_id = created.id, "Registered user");

        Ok(AuthResponse {
            user: created.into(),
            token,
        })
    }

    /// Verify credentials and issue a bearer token.
    ///
    /// An unknown email and a wrong password produce the same error so
    /// the response does not reveal which accounts exist.
    pub async fn login(&self, input: LoginRequest) -> UserResult<AuthResponse> {
        let email = normalize_email(&input.email);

        let user = self
            .repository
            .get_by_email(&email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        let token = self
            .jwt
            .issue(user.id)
            .map_err(|e| UserError::Internal(format!("Token issuance failed: {}", e)))?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: i64) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(user.into())
    }

    /// Update a user
    pub async fn update_user(&self, id: i64, input: UpdateUser) -> UserResult<UserResponse> {
        if let Some(ref password) = input.password {
            self.validate_password(password)?;
        }

        let mut user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        let new_password_hash = match input.password {
            Some(ref password) => Some(hash_password(password)?),
            None => None,
        };

        // Check for duplicate email if email is being changed
        if let Some(ref new_email) = input.email {
            let new_email = normalize_email(new_email);
            if new_email != user.email && self.repository.get_by_email(&new_email).await?.is_some()
            {
                return Err(UserError::DuplicateEmail(new_email));
            }
        }

        user.apply_update(input, new_password_hash);

        let updated = self.repository.update(user).await?;
        Ok(updated.into())
    }

    /// Delete a user
    pub async fn delete_user(&self, id: i64) -> UserResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(UserError::NotFound(id));
        }

        tracing::info!(user_id = id, "Deleted user");
        Ok(())
    }

    /// List users, newest first, with normalized pagination
    pub async fn list_users(&self, pagination: Pagination) -> UserResult<UserListResponse> {
        let page = if pagination.page <= 0 {
            1
        } else {
            pagination.page
        };
        let limit = match pagination.limit {
            l if l <= 0 => 20,
            l if l > MAX_PAGE_LIMIT => MAX_PAGE_LIMIT,
            l => l,
        };
        // page is caller-supplied; saturate instead of overflowing on huge values
        let offset = page.saturating_sub(1).saturating_mul(limit);

        let total = self.repository.count().await?;
        let users = self.repository.list(offset as u64, limit as u64).await?;

        let total_pages = (total + limit - 1) / limit;

        Ok(UserListResponse {
            data: users.into_iter().map(|u| u.into()).collect(),
            pagination: PaginationMeta {
                page,
                limit,
                total,
                total_pages,
            },
        })
    }

    fn validate_password(&self, password: &str) -> UserResult<()> {
        if password.len() < 8 {
            return Err(UserError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        if password.len() > 128 {
            return Err(UserError::Validation(
                "Password cannot exceed 128 characters".to_string(),
            ));
        }

        Ok(())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
