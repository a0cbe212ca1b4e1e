use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use keyward_application::{TenantQuery, TenantRepository};
use keyward_core::{AppError, AppResult, TenantId};
use keyward_domain::Tenant;

use crate::postgres_errors::{map_read_error, map_write_error, page_bounds, stored_text};

use super::PostgresDirectoryRepository;

#[derive(Debug, FromRow)]
struct TenantRow {
    id: Uuid,
    name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TenantRow> for Tenant {
    type Error = AppError;

    fn try_from(row: TenantRow) -> AppResult<Self> {
        Ok(Self {
            tenant_id: TenantId::from_uuid(row.id),
            name: stored_text("tenants.name", row.name)?,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl TenantRepository for PostgresDirectoryRepository {
    async fn insert_tenant(&self, tenant: Tenant) -> AppResult<Tenant> {
        let row = sqlx::query_as::<_, TenantRow>(
            r#"
            INSERT INTO tenants (id, name, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, is_active, created_at, updated_at
            "#,
        )
        .bind(tenant.tenant_id.as_uuid())
        .bind(tenant.name.as_str())
        .bind(tenant.is_active)
        .bind(tenant.created_at)
        .bind(tenant.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| map_write_error(error, "create tenant"))?;

        row.try_into()
    }

    async fn find_tenant(&self, tenant_id: TenantId) -> AppResult<Option<Tenant>> {
        sqlx::query_as::<_, TenantRow>(
            r#"
            SELECT id, name, is_active, created_at, updated_at
            FROM tenants
            WHERE id = $1
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_read_error(error, "find tenant"))?
        .map(Tenant::try_from)
        .transpose()
    }

    async fn list_tenants(&self, query: TenantQuery) -> AppResult<Vec<Tenant>> {
        let (offset, limit) = page_bounds(query.page);
        let rows = sqlx::query_as::<_, TenantRow>(
            r#"
            SELECT id, name, is_active, created_at, updated_at
            FROM tenants
            WHERE $1 OR is_active
            ORDER BY name, id
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(query.include_inactive)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| map_read_error(error, "list tenants"))?;

        rows.into_iter().map(Tenant::try_from).collect()
    }

    async fn update_tenant(&self, tenant: Tenant) -> AppResult<Tenant> {
        sqlx::query_as::<_, TenantRow>(
            r#"
            UPDATE tenants
            SET name = $2, is_active = $3, updated_at = $4
            WHERE id = $1
            RETURNING id, name, is_active, created_at, updated_at
            "#,
        )
        .bind(tenant.tenant_id.as_uuid())
        .bind(tenant.name.as_str())
        .bind(tenant.is_active)
        .bind(tenant.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_write_error(error, "update tenant"))?
        .ok_or_else(|| AppError::NotFound(format!("tenant '{}' does not exist", tenant.tenant_id)))?
        .try_into()
    }
}
