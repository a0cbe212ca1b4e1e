use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use keyward_application::{
    AssignmentQuery, AssignmentRepository, AssignmentRequest, AssignmentWrite,
};
use keyward_core::{AppError, AppResult, AssignmentId, UserId};
use keyward_domain::{Assignment, AssignmentKind, EndpointKind};

use crate::postgres_errors::{map_read_error, map_write_error};


/// PostgreSQL-backed repository for the six assignment edge tables.
#[derive(Clone)]
pub struct PostgresAssignmentRepository {
    pool: PgPool,
}

impl PostgresAssignmentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Table and endpoint columns backing one assignment kind.
struct EdgeTable {
    table: &'static str,
    source_column: &'static str,
    target_column: &'static str,
}

impl EdgeTable {
    fn for_kind(kind: AssignmentKind) -> Self {
        let (table, source_column, target_column) = match kind {
            AssignmentKind::UserRole => ("user_roles", "user_id", "role_id"),
            AssignmentKind::UserPermission => ("user_permissions", "user_id", "permission_id"),
            AssignmentKind::RolePermission => ("role_permissions", "role_id", "permission_id"),
            AssignmentKind::UserGroup => ("group_members", "user_id", "group_id"),
            AssignmentKind::GroupRole => ("group_roles", "group_id", "role_id"),
            AssignmentKind::GroupPermission => ("group_permissions", "group_id", "permission_id"),
        };

        Self {
            table,
            source_column,
            target_column,
        }
    }

    fn returning(&self) -> String {
        format!(
            "id, {} AS source_id, {} AS target_id, is_active, assigned_at, assigned_by",
            self.source_column, self.target_column
        )
    }
}

#[derive(Debug, FromRow)]
struct AssignmentRow {
    id: Uuid,
    source_id: Uuid,
    target_id: Uuid,
    is_active: bool,
    assigned_at: DateTime<Utc>,
    assigned_by: Option<Uuid>,
}

impl AssignmentRow {
    fn into_assignment(self, kind: AssignmentKind) -> Assignment {
        Assignment {
            assignment_id: AssignmentId::from_uuid(self.id),
            kind,
            source_id: self.source_id,
            target_id: self.target_id,
            is_active: self.is_active,
            assigned_at: self.assigned_at,
            assigned_by: self.assigned_by.map(UserId::from_uuid),
        }
    }
}

/// Share-locks an endpoint row, and its tenant row when tenant scoped, until
/// the transaction ends. Fails with `NotFound` unless both are active.
async fn lock_live_endpoint(
    transaction: &mut Transaction<'_, Postgres>,
    kind: EndpointKind,
    id: Uuid,
) -> AppResult<()> {
    let sql = match kind {
        EndpointKind::User => {
            "SELECT e.is_active AND t.is_active FROM users e \
             JOIN tenants t ON t.id = e.tenant_id WHERE e.id = $1 FOR SHARE OF e, t"
        }
        EndpointKind::Role => {
            "SELECT e.is_active AND t.is_active FROM roles e \
             JOIN tenants t ON t.id = e.tenant_id WHERE e.id = $1 FOR SHARE OF e, t"
        }
        EndpointKind::Group => {
            "SELECT e.is_active AND t.is_active FROM groups e \
             JOIN tenants t ON t.id = e.tenant_id WHERE e.id = $1 FOR SHARE OF e, t"
        }
        EndpointKind::Permission => "SELECT is_active FROM permissions WHERE id = $1 FOR SHARE",
    };

    let is_live = sqlx::query_scalar::<_, bool>(sql)
        .bind(id)
        .fetch_optional(&mut **transaction)
        .await
        .map_err(|error| map_read_error(error, &format!("lock {}", kind.as_str())))?;

    match is_live {
        Some(true) => Ok(()),
        Some(false) => Err(AppError::NotFound(format!(
            "{} '{id}' or its tenant is inactive",
            kind.as_str()
        ))),
        None => Err(AppError::NotFound(format!(
            "{} '{id}' does not exist",
            kind.as_str()
        ))),
    }
}

#[async_trait]
impl AssignmentRepository for PostgresAssignmentRepository {
    async fn write_assignment(
        &self,
        request: AssignmentRequest,
        assigned_at: DateTime<Utc>,
    ) -> AppResult<AssignmentWrite> {
        let kind = request.kind;
        let edge = EdgeTable::for_kind(kind);
        let assigned_by = request.assigned_by.map(|user_id| user_id.as_uuid());
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to begin transaction: {error}"))
        })?;

        lock_live_endpoint(&mut transaction, kind.source(), request.source_id).await?;
        lock_live_endpoint(&mut transaction, kind.target(), request.target_id).await?;

        let select_sql = format!(
            "SELECT {} FROM {} WHERE {} = $1 AND {} = $2 FOR UPDATE",
            edge.returning(),
            edge.table,
            edge.source_column,
            edge.target_column
        );
        let existing = sqlx::query_as::<_, AssignmentRow>(select_sql.as_str())
            .bind(request.source_id)
            .bind(request.target_id)
            .fetch_optional(&mut *transaction)
            .await
            .map_err(|error| map_read_error(error, &format!("find {kind} assignment")))?;

        let outcome = match existing {
            Some(row) if row.is_active => AssignmentWrite::AlreadyActive(row.into_assignment(kind)),
            Some(row) => {
                let update_sql = format!(
                    "UPDATE {} SET is_active = TRUE, assigned_by = $2, assigned_at = $3 \
                     WHERE id = $1 RETURNING {}",
                    edge.table,
                    edge.returning()
                );
                let row = sqlx::query_as::<_, AssignmentRow>(update_sql.as_str())
                    .bind(row.id)
                    .bind(assigned_by)
                    .bind(assigned_at)
                    .fetch_one(&mut *transaction)
                    .await
                    .map_err(|error| {
                        map_write_error(error, &format!("reactivate {kind} assignment"))
                    })?;
                debug!(kind = kind.as_str(), assignment_id = %row.id, "assignment reactivated");
                AssignmentWrite::Reactivated(row.into_assignment(kind))
            }
            None => {
                let insert_sql = format!(
                    "INSERT INTO {} (id, {}, {}, is_active, assigned_at, assigned_by) \
                     VALUES ($1, $2, $3, TRUE, $4, $5) RETURNING {}",
                    edge.table,
                    edge.source_column,
                    edge.target_column,
                    edge.returning()
                );
                let row = sqlx::query_as::<_, AssignmentRow>(insert_sql.as_str())
                    .bind(AssignmentId::new().as_uuid())
                    .bind(request.source_id)
                    .bind(request.target_id)
                    .bind(assigned_at)
                    .bind(assigned_by)
                    .fetch_one(&mut *transaction)
                    .await
                    .map_err(|error| map_write_error(error, &format!("create {kind} assignment")))?;
                debug!(
                    kind = kind.as_str(),
                    source_id = %row.source_id,
                    target_id = %row.target_id,
                    "assignment created"
                );
                AssignmentWrite::Created(row.into_assignment(kind))
            }
        };

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(outcome)
    }

    async fn deactivate_assignment(
        &self,
        kind: AssignmentKind,
        source_id: Uuid,
        target_id: Uuid,
    ) -> AppResult<Option<Assignment>> {
        let edge = EdgeTable::for_kind(kind);
        let sql = format!(
            "UPDATE {} SET is_active = FALSE WHERE {} = $1 AND {} = $2 AND is_active RETURNING {}",
            edge.table,
            edge.source_column,
            edge.target_column,
            edge.returning()
        );

        let row = sqlx::query_as::<_, AssignmentRow>(sql.as_str())
            .bind(source_id)
            .bind(target_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| map_write_error(error, &format!("remove {kind} assignment")))?;

        if row.is_some() {
            debug!(kind = kind.as_str(), %source_id, %target_id, "assignment removed");
        }
        Ok(row.map(|row| row.into_assignment(kind)))
    }

    async fn list_assignments(&self, query: AssignmentQuery) -> AppResult<Vec<Assignment>> {
        let kind = query.kind;
        let edge = EdgeTable::for_kind(kind);
        let sql = format!(
            "SELECT {} FROM {} \
             WHERE ($1::uuid[] IS NULL OR {} = ANY($1)) \
               AND ($2::uuid[] IS NULL OR {} = ANY($2)) \
               AND (NOT $3 OR is_active) \
             ORDER BY assigned_at DESC, id",
            edge.returning(),
            edge.table,
            edge.source_column,
            edge.target_column
        );

        let rows = sqlx::query_as::<_, AssignmentRow>(sql.as_str())
            .bind(query.source_ids)
            .bind(query.target_ids)
            .bind(query.active_only)
            .fetch_all(&self.pool)
            .await
            .map_err(|error| map_read_error(error, &format!("list {kind} assignments")))?;

        Ok(rows
            .into_iter()
            .map(|row| row.into_assignment(kind))
            .collect())
    }
}
