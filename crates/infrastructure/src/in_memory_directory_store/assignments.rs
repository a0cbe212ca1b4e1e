use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use keyward_application::{
    AssignmentQuery, AssignmentRepository, AssignmentRequest, AssignmentWrite,
};
use keyward_core::{AppError, AppResult, GroupId, PermissionId, RoleId, TenantId, UserId};
use keyward_domain::{Assignment, AssignmentKind, EndpointKind};

use super::InMemoryDirectoryStore;

#[async_trait]
impl AssignmentRepository for InMemoryDirectoryStore {
    async fn write_assignment(
        &self,
        request: AssignmentRequest,
        assigned_at: DateTime<Utc>,
    ) -> AppResult<AssignmentWrite> {
        let key = (request.kind, request.source_id, request.target_id);
        let mut assignments = self.assignments.write().await;
        self.require_live_endpoint(request.kind.source(), request.source_id)
            .await?;
        self.require_live_endpoint(request.kind.target(), request.target_id)
            .await?;

        if let Some(edge) = assignments.get_mut(&key) {
            if edge.is_active {
                return Ok(AssignmentWrite::AlreadyActive(edge.clone()));
            }

            edge.reactivate(request.assigned_by, assigned_at);
            debug!(
                kind = request.kind.as_str(),
                assignment_id = %edge.assignment_id,
                "assignment reactivated"
            );
            return Ok(AssignmentWrite::Reactivated(edge.clone()));
        }

        let mut edge = Assignment::new(
            request.kind,
            request.source_id,
            request.target_id,
            request.assigned_by,
        );
        edge.assigned_at = assigned_at;
        debug!(
            kind = request.kind.as_str(),
            source_id = %request.source_id,
            target_id = %request.target_id,
            "assignment created"
        );
        assignments.insert(key, edge.clone());
        Ok(AssignmentWrite::Created(edge))
    }

    async fn deactivate_assignment(
        &self,
        kind: AssignmentKind,
        source_id: Uuid,
        target_id: Uuid,
    ) -> AppResult<Option<Assignment>> {
        let mut assignments = self.assignments.write().await;
        let Some(edge) = assignments
            .get_mut(&(kind, source_id, target_id))
            .filter(|edge| edge.is_active)
        else {
            return Ok(None);
        };

        edge.is_active = false;
        debug!(kind = kind.as_str(), %source_id, %target_id, "assignment removed");
        Ok(Some(edge.clone()))
    }

    async fn list_assignments(&self, query: AssignmentQuery) -> AppResult<Vec<Assignment>> {
        let mut values: Vec<Assignment> = self
            .assignments
            .read()
            .await
            .values()
            .filter(|edge| query.matches(edge))
            .cloned()
            .collect();
        values.sort_by(|left, right| {
            right
                .assigned_at
                .cmp(&left.assigned_at)
                .then(left.assignment_id.cmp(&right.assignment_id))
        });

        Ok(values)
    }
}

impl InMemoryDirectoryStore {
    /// Fails with `NotFound` unless the endpoint exists, is active and sits in
    /// an active tenant. Each map guard is released before the next is taken.
    async fn require_live_endpoint(&self, kind: EndpointKind, id: Uuid) -> AppResult<()> {
        let state: Option<(bool, Option<TenantId>)> = match kind {
            EndpointKind::User => self
                .users
                .read()
                .await
                .get(&UserId::from_uuid(id))
                .map(|user| (user.is_active, Some(user.tenant_id))),
            EndpointKind::Role => self
                .roles
                .read()
                .await
                .get(&RoleId::from_uuid(id))
                .map(|role| (role.is_active, Some(role.tenant_id))),
            EndpointKind::Group => self
                .groups
                .read()
                .await
                .get(&GroupId::from_uuid(id))
                .map(|group| (group.is_active, Some(group.tenant_id))),
            EndpointKind::Permission => self
                .permissions
                .read()
                .await
                .get(&PermissionId::from_uuid(id))
                .map(|permission| (permission.is_active, None)),
        };

        let tenant_id = match state {
            None => {
                return Err(AppError::NotFound(format!(
                    "{} '{id}' does not exist",
                    kind.as_str()
                )));
            }
            Some((false, _)) => {
                return Err(AppError::NotFound(format!(
                    "{} '{id}' is inactive",
                    kind.as_str()
                )));
            }
            Some((true, tenant_id)) => tenant_id,
        };

        if let Some(tenant_id) = tenant_id {
            let tenant_is_active = self
                .tenants
                .read()
                .await
                .get(&tenant_id)
                .is_some_and(|tenant| tenant.is_active);
            if !tenant_is_active {
                return Err(AppError::NotFound(format!(
                    "{} '{id}' belongs to inactive tenant '{tenant_id}'",
                    kind.as_str()
                )));
            }
        }

        Ok(())
    }
}
