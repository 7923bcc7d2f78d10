//! Diesel-backed `UserRepository` adapter.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, Role, User};

use super::diesel_helpers::{collect_rows, diesel_error_message, pool_error_message};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// PostgreSQL-backed user repository.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, new_user: NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserPersistenceError::connection(pool_error_message(err)))?;

        let row = NewUserRow {
            id: Uuid::new_v4(),
            name: &new_user.name,
            email: &new_user.email,
            phone: new_user.phone.as_deref(),
            role: new_user.role.as_str(),
            created_at: Utc::now(),
        };
        let stored: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| UserPersistenceError::query(diesel_error_message(err, "insert user")))?;

        stored.into_domain().map_err(UserPersistenceError::query)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserPersistenceError::connection(pool_error_message(err)))?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                UserPersistenceError::query(diesel_error_message(err, "find user by id"))
            })?;

        row.map(UserRow::into_domain)
            .transpose()
            .map_err(UserPersistenceError::query)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserPersistenceError::connection(pool_error_message(err)))?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                UserPersistenceError::query(diesel_error_message(err, "find user by email"))
            })?;

        row.map(UserRow::into_domain)
            .transpose()
            .map_err(UserPersistenceError::query)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserPersistenceError::connection(pool_error_message(err)))?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| UserPersistenceError::query(diesel_error_message(err, "list users")))?;

        collect_rows(
            rows.into_iter().map(UserRow::into_domain),
            UserPersistenceError::query,
        )
    }

    async fn count(&self) -> Result<i64, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserPersistenceError::connection(pool_error_message(err)))?;

        users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| UserPersistenceError::query(diesel_error_message(err, "count users")))
    }

    async fn count_by_role(&self, role: Role) -> Result<i64, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserPersistenceError::connection(pool_error_message(err)))?;

        users::table
            .filter(users::role.eq(role.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                UserPersistenceError::query(diesel_error_message(err, "count users by role"))
            })
    }
}
