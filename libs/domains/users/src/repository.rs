use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};

/// Repository trait for User persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, assigning id and timestamps
    async fn create(&self, user: NewUser) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>>;

    /// Get a user by email
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Update an existing user
    async fn update(&self, user: User) -> UserResult<User>;

    /// Delete a user by ID, returning whether a row was removed
    async fn delete(&self, id: i64) -> UserResult<bool>;

    /// List users ordered by created_at descending
    async fn list(&self, offset: u64, limit: u64) -> UserResult<Vec<User>>;

    /// Count total users (for pagination)
    async fn count(&self) -> UserResult<i64>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> UserResult<User> {
        // Duplicate check happens under the write lock so that two
        // concurrent creates with the same email cannot both succeed.
        let mut users = self.users.write().await;

        let email_exists = users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email));

        if email_exists {
            return Err(UserError::DuplicateEmail(user.email));
        }

        let now = chrono::Utc::now();
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };

        users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        let user = users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned();
        Ok(user)
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id));
        }

        // Check for duplicate email (excluding the user being updated)
        let email_exists = users
            .values()
            .any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(&user.email));

        if email_exists {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        let mut users = self.users.write().await;

        if users.remove(&id).is_some() {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list(&self, offset: u64, limit: u64) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();

        // Newest first; id breaks ties for users created in the same instant
        result.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let result: Vec<User> = result
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        Ok(result)
    }

    async fn count(&self) -> UserResult<i64> {
        let users = self.users.read().await;
        Ok(users.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str, name: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: name.to_string(),
            password_hash: "hashed_password".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let repo = InMemoryUserRepository::new();

        let created = repo
            .create(new_user("test@example.com", "Test User"))
            .await
            .unwrap();
        assert_eq!(created.email, "test@example.com");
        assert!(created.id >= 1);

        let fetched = repo.get_by_id(created.id).await.unwrap();
        assert!(fetched.is_some());
        assert_eq!(fetched.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_get_by_email_case_insensitive() {
        let repo = InMemoryUserRepository::new();

        repo.create(new_user("test@example.com", "Test User"))
            .await
            .unwrap();

        let fetched = repo.get_by_email("test@example.com").await.unwrap();
        assert!(fetched.is_some());

        let fetched = repo.get_by_email("TEST@EXAMPLE.COM").await.unwrap();
        assert!(fetched.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_error() {
        let repo = InMemoryUserRepository::new();

        repo.create(new_user("test@example.com", "User 1"))
            .await
            .unwrap();

        let result = repo.create(new_user("test@example.com", "User 2")).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_concurrent_create_same_email_single_winner() {
        let repo = InMemoryUserRepository::new();

        let r1 = repo.clone();
        let r2 = repo.clone();

        let (a, b) = tokio::join!(
            tokio::spawn(async move { r1.create(new_user("race@example.com", "A")).await }),
            tokio::spawn(async move { r2.create(new_user("race@example.com", "B")).await }),
        );

        let results = [a.unwrap(), b.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_rejects_email_taken_by_other_user() {
        let repo = InMemoryUserRepository::new();

        repo.create(new_user("first@example.com", "First"))
            .await
            .unwrap();
        let second = repo
            .create(new_user("second@example.com", "Second"))
            .await
            .unwrap();

        let mut changed = second.clone();
        changed.email = "first@example.com".to_string();

        let result = repo.update(changed).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repo = InMemoryUserRepository::new();

        let user = User {
            id: 999,
            email: "ghost@example.com".to_string(),
            name: "Ghost".to_string(),
            password_hash: "hash".to_string(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let result = repo.update(user).await;
        assert!(matches!(result, Err(UserError::NotFound(999))));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryUserRepository::new();

        let created = repo
            .create(new_user("test@example.com", "Test User"))
            .await
            .unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first_with_pagination() {
        let repo = InMemoryUserRepository::new();

        for i in 0..5 {
            repo.create(new_user(&format!("user{}@example.com", i), "User"))
                .await
                .unwrap();
        }

        let page = repo.list(0, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        // Most recently created user comes first
        assert_eq!(page[0].email, "user4@example.com");
        assert_eq!(page[1].email, "user3@example.com");

        let page = repo.list(4, 2).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].email, "user0@example.com");

        assert_eq!(repo.count().await.unwrap(), 5);
    }
}
