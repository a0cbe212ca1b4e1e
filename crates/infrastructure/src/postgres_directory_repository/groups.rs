use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use keyward_application::{GroupRepository, TenantScopedQuery};
use keyward_core::{AppError, AppResult, GroupId, TenantId};
use keyward_domain::Group;

use crate::postgres_errors::{map_read_error, map_write_error, page_bounds, stored_text};

use super::PostgresDirectoryRepository;

#[derive(Debug, FromRow)]
struct GroupRow {
    id: Uuid,
    tenant_id: Uuid,
    name: String,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<GroupRow> for Group {
    type Error = AppError;

    fn try_from(row: GroupRow) -> AppResult<Self> {
        Ok(Self {
            group_id: GroupId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            name: stored_text("groups.name", row.name)?,
            description: row.description,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl GroupRepository for PostgresDirectoryRepository {
    async fn insert_group(&self, group: Group) -> AppResult<Group> {
        let row = sqlx::query_as::<_, GroupRow>(
            r#"
            INSERT INTO groups (id, tenant_id, name, description, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, tenant_id, name, description, is_active, created_at, updated_at
            "#,
        )
        .bind(group.group_id.as_uuid())
        .bind(group.tenant_id.as_uuid())
        .bind(group.name.as_str())
        .bind(group.description.as_deref())
        .bind(group.is_active)
        .bind(group.created_at)
        .bind(group.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| map_write_error(error, "create group"))?;

        row.try_into()
    }

    async fn find_group(&self, group_id: GroupId) -> AppResult<Option<Group>> {
        sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT id, tenant_id, name, description, is_active, created_at, updated_at
            FROM groups
            WHERE id = $1
            "#,
        )
        .bind(group_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_read_error(error, "find group"))?
        .map(Group::try_from)
        .transpose()
    }

    async fn list_groups(&self, query: TenantScopedQuery) -> AppResult<Vec<Group>> {
        let (offset, limit) = page_bounds(query.page);
        let rows = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT id, tenant_id, name, description, is_active, created_at, updated_at
            FROM groups
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
        .map_err(|error| map_read_error(error, "list groups"))?;

        rows.into_iter().map(Group::try_from).collect()
    }

    async fn list_groups_by_ids(&self, group_ids: &[GroupId]) -> AppResult<Vec<Group>> {
        let ids: Vec<Uuid> = group_ids.iter().map(GroupId::as_uuid).collect();
        let rows = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT id, tenant_id, name, description, is_active, created_at, updated_at
            FROM groups
            WHERE id = ANY($1)
            ORDER BY name, id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| map_read_error(error, "load groups by id"))?;

        rows.into_iter().map(Group::try_from).collect()
    }

    async fn update_group(&self, group: Group) -> AppResult<Group> {
        sqlx::query_as::<_, GroupRow>(
            r#"
            UPDATE groups
            SET name = $2, description = $3, is_active = $4, updated_at = $5
            WHERE id = $1
            RETURNING id, tenant_id, name, description, is_active, created_at, updated_at
            "#,
        )
        .bind(group.group_id.as_uuid())
        .bind(group.name.as_str())
        .bind(group.description.as_deref())
        .bind(group.is_active)
        .bind(group.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_write_error(error, "update group"))?
        .ok_or_else(|| AppError::NotFound(format!("group '{}' does not exist", group.group_id)))?
        .try_into()
    }
}
