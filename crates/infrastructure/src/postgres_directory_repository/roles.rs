use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use keyward_application::{RoleRepository, TenantScopedQuery};
use keyward_core::{AppError, AppResult, RoleId, TenantId};
use keyward_domain::Role;

use crate::postgres_errors::{map_read_error, map_write_error, page_bounds, stored_text};

use super::PostgresDirectoryRepository;

#[derive(Debug, FromRow)]
struct RoleRow {
    id: Uuid,
    tenant_id: Uuid,
    name: String,
    description: Option<String>,
    is_system_role: bool,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RoleRow> for Role {
    type Error = AppError;

    fn try_from(row: RoleRow) -> AppResult<Self> {
        Ok(Self {
            role_id: RoleId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            name: stored_text("roles.name", row.name)?,
            description: row.description,
            is_system_role: row.is_system_role,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl RoleRepository for PostgresDirectoryRepository {
    async fn insert_role(&self, role: Role) -> AppResult<Role> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            INSERT INTO roles (
                id, tenant_id, name, description, is_system_role, is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, tenant_id, name, description, is_system_role, is_active, created_at, updated_at
            "#,
        )
        .bind(role.role_id.as_uuid())
        .bind(role.tenant_id.as_uuid())
        .bind(role.name.as_str())
        .bind(role.description.as_deref())
        .bind(role.is_system_role)
        .bind(role.is_active)
        .bind(role.created_at)
        .bind(role.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| map_write_error(error, "create role"))?;

        row.try_into()
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, tenant_id, name, description, is_system_role, is_active, created_at, updated_at
            FROM roles
            WHERE id = $1
            "#,
        )
        .bind(role_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_read_error(error, "find role"))?
        .map(Role::try_from)
        .transpose()
    }

    async fn list_roles(&self, query: TenantScopedQuery) -> AppResult<Vec<Role>> {
        let (offset, limit) = page_bounds(query.page);
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, tenant_id, name, description, is_system_role, is_active, created_at, updated_at
            FROM roles
            WHERE ($1::uuid IS NULL OR tenant_id = $1)
              AND ($2 OR is_active)
            ORDER BY name, id
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
        .map_err(|error| map_read_error(error, "list roles"))?;

        rows.into_iter().map(Role::try_from).collect()
    }

    async fn list_roles_by_ids(&self, role_ids: &[RoleId]) -> AppResult<Vec<Role>> {
        let ids: Vec<Uuid> = role_ids.iter().map(RoleId::as_uuid).collect();
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, tenant_id, name, description, is_system_role, is_active, created_at, updated_at
            FROM roles
            WHERE id = ANY($1)
            ORDER BY name, id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| map_read_error(error, "load roles by id"))?;

        rows.into_iter().map(Role::try_from).collect()
    }

    async fn update_role(&self, role: Role) -> AppResult<Role> {
        // is_system_role is fixed at creation and never written here.
        sqlx::query_as::<_, RoleRow>(
            r#"
            UPDATE roles
            SET name = $2, description = $3, is_active = $4, updated_at = $5
            WHERE id = $1
            RETURNING id, tenant_id, name, description, is_system_role, is_active, created_at, updated_at
            "#,
        )
        .bind(role.role_id.as_uuid())
        .bind(role.name.as_str())
        .bind(role.description.as_deref())
        .bind(role.is_active)
        .bind(role.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_write_error(error, "update role"))?
        .ok_or_else(|| AppError::NotFound(format!("role '{}' does not exist", role.role_id)))?
        .try_into()
    }
}
