use uuid::Uuid;

use keyward_core::{AppResult, GroupId, PermissionId, RoleId, UserId};
use keyward_domain::{Assignment, AssignmentKind, EndpointKind, Group, Permission, Role, User};

use crate::assignment_ports::AssignmentQuery;

use super::AssignmentService;

/// Audit listing parameters for raw edge rows of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentHistoryQuery {
    /// Relationship kind.
    pub kind: AssignmentKind,
    /// Restricts results to one source.
    pub source_id: Option<Uuid>,
    /// Restricts results to one target.
    pub target_id: Option<Uuid>,
    /// Includes soft-removed edges when set.
    pub include_inactive: bool,
}

impl AssignmentService {
    /// Lists raw edge rows, including soft-removed ones on request.
    pub async fn list_assignments(
        &self,
        query: AssignmentHistoryQuery,
    ) -> AppResult<Vec<Assignment>> {
        self.assignments
            .list_assignments(AssignmentQuery {
                kind: query.kind,
                source_ids: query.source_id.map(|id| vec![id]),
                target_ids: query.target_id.map(|id| vec![id]),
                active_only: !query.include_inactive,
            })
            .await
    }

    /// Active roles directly assigned to a user.
    pub async fn list_user_roles(&self, user_id: UserId) -> AppResult<Vec<Role>> {
        let role_ids = self
            .active_targets(AssignmentKind::UserRole, user_id.as_uuid())
            .await?;
        let roles = self
            .repositories
            .roles
            .list_roles_by_ids(&ids_as(&role_ids, RoleId::from_uuid))
            .await?;

        Ok(roles.into_iter().filter(|role| role.is_active).collect())
    }

    /// Active groups a user belongs to.
    pub async fn list_user_groups(&self, user_id: UserId) -> AppResult<Vec<Group>> {
        let group_ids = self
            .active_targets(AssignmentKind::UserGroup, user_id.as_uuid())
            .await?;
        let groups = self
            .repositories
            .groups
            .list_groups_by_ids(&ids_as(&group_ids, GroupId::from_uuid))
            .await?;

        Ok(groups.into_iter().filter(|group| group.is_active).collect())
    }

    /// Active permissions granted directly to a user.
    pub async fn list_user_permissions(&self, user_id: UserId) -> AppResult<Vec<Permission>> {
        let permission_ids = self
            .active_targets(AssignmentKind::UserPermission, user_id.as_uuid())
            .await?;
        self.active_permissions(&permission_ids).await
    }

    /// Active members of a group.
    pub async fn list_group_users(&self, group_id: GroupId) -> AppResult<Vec<User>> {
        self.require_existing_endpoint(EndpointKind::Group, group_id.as_uuid())
            .await?;
        let edges = self
            .assignments
            .list_assignments(AssignmentQuery::active_to(
                AssignmentKind::UserGroup,
                vec![group_id.as_uuid()],
            ))
            .await?;
        let user_ids: Vec<UserId> = edges
            .iter()
            .map(|edge| UserId::from_uuid(edge.source_id))
            .collect();
        let users = self.repositories.users.list_users_by_ids(&user_ids).await?;

        Ok(users.into_iter().filter(|user| user.is_active).collect())
    }

    /// Active roles assigned to a group.
    pub async fn list_group_roles(&self, group_id: GroupId) -> AppResult<Vec<Role>> {
        let role_ids = self
            .active_targets(AssignmentKind::GroupRole, group_id.as_uuid())
            .await?;
        let roles = self
            .repositories
            .roles
            .list_roles_by_ids(&ids_as(&role_ids, RoleId::from_uuid))
            .await?;

        Ok(roles.into_iter().filter(|role| role.is_active).collect())
    }

    /// Active permissions granted directly to a group.
    pub async fn list_group_permissions(&self, group_id: GroupId) -> AppResult<Vec<Permission>> {
        let permission_ids = self
            .active_targets(AssignmentKind::GroupPermission, group_id.as_uuid())
            .await?;
        self.active_permissions(&permission_ids).await
    }

    /// Active permissions carried by a role.
    pub async fn list_role_permissions(&self, role_id: RoleId) -> AppResult<Vec<Permission>> {
        let permission_ids = self
            .active_targets(AssignmentKind::RolePermission, role_id.as_uuid())
            .await?;
        self.active_permissions(&permission_ids).await
    }

    async fn active_targets(&self, kind: AssignmentKind, source_id: Uuid) -> AppResult<Vec<Uuid>> {
        self.require_existing_endpoint(kind.source(), source_id)
            .await?;
        let edges = self
            .assignments
            .list_assignments(AssignmentQuery::active_from(kind, vec![source_id]))
            .await?;

        Ok(edges.into_iter().map(|edge| edge.target_id).collect())
    }

    async fn active_permissions(&self, permission_ids: &[Uuid]) -> AppResult<Vec<Permission>> {
        let mut permissions = self
            .repositories
            .permissions
            .list_permissions_by_ids(&ids_as(permission_ids, PermissionId::from_uuid))
            .await?;
        permissions.retain(|permission| permission.is_active);
        permissions.sort_by(|left, right| {
            (left.resource.as_str(), left.action.as_str())
                .cmp(&(right.resource.as_str(), right.action.as_str()))
        });

        Ok(permissions)
    }
}

fn ids_as<T>(ids: &[Uuid], convert: fn(Uuid) -> T) -> Vec<T> {
    ids.iter().copied().map(convert).collect()
}
