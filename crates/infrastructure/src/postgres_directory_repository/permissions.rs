use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use keyward_application::{PermissionQuery, PermissionRepository};
use keyward_core::{AppError, AppResult, PermissionId};
use keyward_domain::Permission;

use crate::postgres_errors::{map_read_error, map_write_error, page_bounds, stored_text};

use super::PostgresDirectoryRepository;

#[derive(Debug, FromRow)]
struct PermissionRow {
    id: Uuid,
    name: String,
    resource: String,
    action: String,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PermissionRow> for Permission {
    type Error = AppError;

    fn try_from(row: PermissionRow) -> AppResult<Self> {
        Ok(Self {
            permission_id: PermissionId::from_uuid(row.id),
            name: stored_text("permissions.name", row.name)?,
            resource: stored_text("permissions.resource", row.resource)?,
            action: stored_text("permissions.action", row.action)?,
            description: row.description,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl PermissionRepository for PostgresDirectoryRepository {
    async fn insert_permission(&self, permission: Permission) -> AppResult<Permission> {
        let row = sqlx::query_as::<_, PermissionRow>(
            r#"
            INSERT INTO permissions (
                id, name, resource, action, description, is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, resource, action, description, is_active, created_at, updated_at
            "#,
        )
        .bind(permission.permission_id.as_uuid())
        .bind(permission.name.as_str())
        .bind(permission.resource.as_str())
        .bind(permission.action.as_str())
        .bind(permission.description.as_deref())
        .bind(permission.is_active)
        .bind(permission.created_at)
        .bind(permission.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| map_write_error(error, "create permission"))?;

        row.try_into()
    }

    async fn find_permission(
        &self,
        permission_id: PermissionId,
    ) -> AppResult<Option<Permission>> {
        sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name, resource, action, description, is_active, created_at, updated_at
            FROM permissions
            WHERE id = $1
            "#,
        )
        .bind(permission_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_read_error(error, "find permission"))?
        .map(Permission::try_from)
        .transpose()
    }

    async fn list_permissions(&self, query: PermissionQuery) -> AppResult<Vec<Permission>> {
        let (offset, limit) = page_bounds(query.page);
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name, resource, action, description, is_active, created_at, updated_at
            FROM permissions
            WHERE ($1::text IS NULL OR resource = $1)
              AND ($2 OR is_active)
            ORDER BY resource, action, id
            OFFSET $3
            LIMIT $4
            "#,
        )
        .bind(query.resource.as_deref())
        .bind(query.include_inactive)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| map_read_error(error, "list permissions"))?;

        rows.into_iter().map(Permission::try_from).collect()
    }

    async fn list_permissions_by_ids(
        &self,
        permission_ids: &[PermissionId],
    ) -> AppResult<Vec<Permission>> {
        let ids: Vec<Uuid> = permission_ids.iter().map(PermissionId::as_uuid).collect();
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name, resource, action, description, is_active, created_at, updated_at
            FROM permissions
            WHERE id = ANY($1)
            ORDER BY resource, action, id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| map_read_error(error, "load permissions by id"))?;

        rows.into_iter().map(Permission::try_from).collect()
    }

    async fn update_permission(&self, permission: Permission) -> AppResult<Permission> {
        sqlx::query_as::<_, PermissionRow>(
            r#"
            UPDATE permissions
            SET name = $2, resource = $3, action = $4, description = $5, is_active = $6,
                updated_at = $7
            WHERE id = $1
            RETURNING id, name, resource, action, description, is_active, created_at, updated_at
            "#,
        )
        .bind(permission.permission_id.as_uuid())
        .bind(permission.name.as_str())
        .bind(permission.resource.as_str())
        .bind(permission.action.as_str())
        .bind(permission.description.as_deref())
        .bind(permission.is_active)
        .bind(permission.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_write_error(error, "update permission"))?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "permission '{}' does not exist",
                permission.permission_id
            ))
        })?
        .try_into()
    }
}
