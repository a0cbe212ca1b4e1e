use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use keyward_application::{TenantScopedQuery, UserRepository};
use keyward_core::{AppError, AppResult, TenantId, UserId};
use keyward_domain::{EmailAddress, User};

use crate::postgres_errors::{map_read_error, map_write_error, page_bounds, stored_text};

use super::PostgresDirectoryRepository;

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    tenant_id: Uuid,
    email: String,
    first_name: String,
    last_name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> AppResult<Self> {
        Ok(Self {
            user_id: UserId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            email: EmailAddress::new(row.email).map_err(|error| {
                AppError::Internal(format!("stored column 'users.email' is invalid: {error}"))
            })?,
            first_name: stored_text("users.first_name", row.first_name)?,
            last_name: stored_text("users.last_name", row.last_name)?,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresDirectoryRepository {
    async fn insert_user(&self, user: User) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (
                id, tenant_id, email, first_name, last_name, is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, tenant_id, email, first_name, last_name, is_active, created_at, updated_at
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.tenant_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| map_write_error(error, "create user"))?;

        row.try_into()
    }

    async fn find_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, tenant_id, email, first_name, last_name, is_active, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_read_error(error, "find user"))?
        .map(User::try_from)
        .transpose()
    }

    async fn list_users(&self, query: TenantScopedQuery) -> AppResult<Vec<User>> {
        let (offset, limit) = page_bounds(query.page);
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, tenant_id, email, first_name, last_name, is_active, created_at, updated_at
            FROM users
            WHERE ($1::uuid IS NULL OR tenant_id = $1)
              AND ($2 OR is_active)
            ORDER BY email, id
            OFFSET $3
            LIMIT $4
            "#,
        )
        .bind(query.tenant_id.map(|tenant_id| tenant_id.as_uuid()))
        .bind(query.include_inactive)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| map_read_error(error, "list users"))?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn list_users_by_ids(&self, user_ids: &[UserId]) -> AppResult<Vec<User>> {
        let ids: Vec<Uuid> = user_ids.iter().map(UserId::as_uuid).collect();
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, tenant_id, email, first_name, last_name, is_active, created_at, updated_at
            FROM users
            WHERE id = ANY($1)
            ORDER BY email, id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| map_read_error(error, "load users by id"))?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update_user(&self, user: User) -> AppResult<User> {
        sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET email = $2, first_name = $3, last_name = $4, is_active = $5, updated_at = $6
            WHERE id = $1
            RETURNING id, tenant_id, email, first_name, last_name, is_active, created_at, updated_at
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.is_active)
        .bind(user.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_write_error(error, "update user"))?
        .ok_or_else(|| AppError::NotFound(format!("user '{}' does not exist", user.user_id)))?
        .try_into()
    }
}
