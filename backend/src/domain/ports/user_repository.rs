//! Port abstraction for user persistence adapters.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Error, NewUser, Role, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

impl From<UserPersistenceError> for Error {
    fn from(err: UserPersistenceError) -> Self {
        match err {
            UserPersistenceError::Connection { message } => Error::service_unavailable(message),
            UserPersistenceError::Query { message } => Error::internal(message),
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user, assigning its identifier and creation time.
    async fn insert(&self, new_user: NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Return every registered user.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Count all registered users.
    async fn count(&self) -> Result<i64, UserPersistenceError>;

    /// Count registered users holding the given role.
    async fn count_by_role(&self, role: Role) -> Result<i64, UserPersistenceError>;
}

/// In-memory user store for tests.
#[derive(Debug, Default)]
pub struct FixtureUserRepository {
    rows: Mutex<Vec<User>>,
}

impl FixtureUserRepository {
    fn rows(&self) -> MutexGuard<'_, Vec<User>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert(&self, new_user: NewUser) -> Result<User, UserPersistenceError> {
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            phone: new_user.phone,
            role: new_user.role,
            created_at: Utc::now(),
            last_login: None,
        };
        self.rows().push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.rows().iter().find(|user| user.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.rows().iter().find(|user| user.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.rows().clone())
    }

    async fn count(&self) -> Result<i64, UserPersistenceError> {
        Ok(self.rows().len() as i64)
    }

    async fn count_by_role(&self, role: Role) -> Result<i64, UserPersistenceError> {
        Ok(self.rows().iter().filter(|user| user.role == role).count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            name: "Ada Lovelace".to_owned(),
            email: email.to_owned(),
            phone: None,
            role,
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_creation_time() {
        let repo = FixtureUserRepository::default();
        let user = repo
            .insert(new_user("ada@example.com", Role::Patient))
            .await
            .expect("insert");

        assert_eq!(user.email, "ada@example.com");
        assert!(user.last_login.is_none());
        let found = repo.find_by_id(user.id).await.expect("find");
        assert_eq!(found, Some(user));
    }

    #[tokio::test]
    async fn lookups_return_none_for_unknown_keys() {
        let repo = FixtureUserRepository::default();
        assert_eq!(repo.find_by_id(Uuid::new_v4()).await.expect("find"), None);
        assert_eq!(
            repo.find_by_email("nobody@example.com").await.expect("find"),
            None
        );
    }

    #[tokio::test]
    async fn role_counts_are_filtered() {
        let repo = FixtureUserRepository::default();
        repo.insert(new_user("a@example.com", Role::Patient))
            .await
            .expect("insert");
        repo.insert(new_user("b@example.com", Role::Doctor))
            .await
            .expect("insert");
        repo.insert(new_user("c@example.com", Role::Doctor))
            .await
            .expect("insert");

        assert_eq!(repo.count().await.expect("count"), 3);
        assert_eq!(repo.count_by_role(Role::Doctor).await.expect("count"), 2);
        assert_eq!(repo.count_by_role(Role::Nurse).await.expect("count"), 0);
    }

    #[test]
    fn persistence_errors_map_onto_domain_codes() {
        let err: Error = UserPersistenceError::connection("pool exhausted").into();
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);

        let err: Error = UserPersistenceError::query("bad statement").into();
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
