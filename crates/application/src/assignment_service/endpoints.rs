use uuid::Uuid;

use keyward_core::{AppError, AppResult, GroupId, PermissionId, RoleId, TenantId, UserId};
use keyward_domain::{EndpointKind, Lifecycle, ensure_active};

use super::AssignmentService;

/// Minimal view of an assignment endpoint used by precondition checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Endpoint {
    pub kind: EndpointKind,
    pub id: Uuid,
    pub tenant_id: Option<TenantId>,
}

impl AssignmentService {
    /// Loads an endpoint that must exist, be active and, when tenant scoped,
    /// sit in an active tenant.
    pub(super) async fn require_active_endpoint(
        &self,
        kind: EndpointKind,
        id: Uuid,
    ) -> AppResult<Endpoint> {
        let tenant_id = match kind {
            EndpointKind::User => {
                let user = self
                    .repositories
                    .users
                    .find_user(UserId::from_uuid(id))
                    .await?;
                require_active(kind, id, user.as_ref())?;
                user.map(|user| user.tenant_id)
            }
            EndpointKind::Role => {
                let role = self
                    .repositories
                    .roles
                    .find_role(RoleId::from_uuid(id))
                    .await?;
                require_active(kind, id, role.as_ref())?;
                role.map(|role| role.tenant_id)
            }
            EndpointKind::Group => {
                let group = self
                    .repositories
                    .groups
                    .find_group(GroupId::from_uuid(id))
                    .await?;
                require_active(kind, id, group.as_ref())?;
                group.map(|group| group.tenant_id)
            }
            EndpointKind::Permission => {
                let permission = self
                    .repositories
                    .permissions
                    .find_permission(PermissionId::from_uuid(id))
                    .await?;
                require_active(kind, id, permission.as_ref())?;
                None
            }
        };

        if let Some(tenant_id) = tenant_id {
            let tenant = self.repositories.tenants.find_tenant(tenant_id).await?;
            let tenant_is_active = tenant.as_ref().is_some_and(|tenant| tenant.is_active);
            if !tenant_is_active {
                return Err(AppError::NotFound(format!(
                    "{} '{id}' belongs to inactive tenant '{tenant_id}'",
                    kind.as_str()
                )));
            }
        }

        Ok(Endpoint {
            kind,
            id,
            tenant_id,
        })
    }

    /// Fails with `NotFound` when the anchor of a listing query does not exist.
    pub(super) async fn require_existing_endpoint(
        &self,
        kind: EndpointKind,
        id: Uuid,
    ) -> AppResult<()> {
        let exists = match kind {
            EndpointKind::User => self
                .repositories
                .users
                .find_user(UserId::from_uuid(id))
                .await?
                .is_some(),
            EndpointKind::Role => self
                .repositories
                .roles
                .find_role(RoleId::from_uuid(id))
                .await?
                .is_some(),
            EndpointKind::Group => self
                .repositories
                .groups
                .find_group(GroupId::from_uuid(id))
                .await?
                .is_some(),
            EndpointKind::Permission => self
                .repositories
                .permissions
                .find_permission(PermissionId::from_uuid(id))
                .await?
                .is_some(),
        };

        if exists {
            Ok(())
        } else {
            Err(not_found(kind, id))
        }
    }
}

fn require_active<E: Lifecycle>(kind: EndpointKind, id: Uuid, entity: Option<&E>) -> AppResult<()> {
    match entity {
        Some(entity) => ensure_active(entity),
        None => Err(not_found(kind, id)),
    }
}

fn not_found(kind: EndpointKind, id: Uuid) -> AppError {
    AppError::NotFound(format!("{} '{id}' does not exist", kind.as_str()))
}
