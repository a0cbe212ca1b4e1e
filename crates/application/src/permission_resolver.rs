use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use uuid::Uuid;

use keyward_core::{AppError, AppResult, GroupId, PermissionId, RoleId, TenantId, UserId};
use keyward_domain::{
    AssignmentKind, EffectivePermission, GrantSource, Lifecycle, Permission, User,
};

use crate::assignment_ports::{AssignmentQuery, AssignmentRepository};
use crate::directory_ports::DirectoryRepositories;

#[cfg(test)]
mod tests;

/// Read-only query service computing the permissions a user holds through
/// direct, role and group grants.
#[derive(Clone)]
pub struct PermissionResolver {
    repositories: DirectoryRepositories,
    assignments: Arc<dyn AssignmentRepository>,
}

impl PermissionResolver {
    /// Creates a new resolver from required dependencies.
    #[must_use]
    pub fn new(
        repositories: DirectoryRepositories,
        assignments: Arc<dyn AssignmentRepository>,
    ) -> Self {
        Self {
            repositories,
            assignments,
        }
    }

    /// Returns the deduplicated effective permission set ordered by resource and action.
    pub async fn resolve_effective_permissions(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<Permission>> {
        Ok(self
            .explain_effective_permissions(user_id)
            .await?
            .into_iter()
            .map(|effective| effective.permission)
            .collect())
    }

    /// Returns the effective permission set with every grant path that reaches each entry.
    ///
    /// Inactive users and users of inactive tenants hold no permissions. Only
    /// active edges to active roles, groups and permissions contribute, and roles
    /// or groups outside the user's tenant are ignored.
    pub async fn explain_effective_permissions(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<EffectivePermission>> {
        let user = self
            .repositories
            .users
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))?;

        if !self.is_resolvable(&user).await? {
            return Ok(Vec::new());
        }

        let mut grants = GrantCollector::default();

        for permission_id in self
            .active_targets(AssignmentKind::UserPermission, vec![user_id.as_uuid()])
            .await?
            .into_values()
            .flatten()
        {
            grants.add(permission_id, GrantSource::Direct);
        }

        let direct_roles = self
            .tenant_roles(
                user.tenant_id,
                self.active_targets(AssignmentKind::UserRole, vec![user_id.as_uuid()])
                    .await?
                    .into_values()
                    .flatten(),
            )
            .await?;
        let groups = self
            .tenant_groups(
                user.tenant_id,
                self.active_targets(AssignmentKind::UserGroup, vec![user_id.as_uuid()])
                    .await?
                    .into_values()
                    .flatten(),
            )
            .await?;

        let group_uuids: Vec<Uuid> = groups.iter().map(GroupId::as_uuid).collect();
        for (group_id, permission_ids) in self
            .active_targets(AssignmentKind::GroupPermission, group_uuids.clone())
            .await?
        {
            let group_id = GroupId::from_uuid(group_id);
            for permission_id in permission_ids {
                grants.add(permission_id, GrantSource::Group { group_id });
            }
        }

        let group_roles = self
            .active_targets(AssignmentKind::GroupRole, group_uuids)
            .await?;
        let group_role_ids = self
            .tenant_roles(user.tenant_id, group_roles.values().flatten().copied())
            .await?;

        // Every path by which the user reaches each role.
        let mut role_paths: BTreeMap<RoleId, BTreeSet<GrantSource>> = BTreeMap::new();
        for role_id in &direct_roles {
            role_paths
                .entry(*role_id)
                .or_default()
                .insert(GrantSource::Role { role_id: *role_id });
        }
        for (group_id, role_ids) in &group_roles {
            let group_id = GroupId::from_uuid(*group_id);
            for role_id in role_ids.iter().copied().map(RoleId::from_uuid) {
                if group_role_ids.contains(&role_id) {
                    role_paths
                        .entry(role_id)
                        .or_default()
                        .insert(GrantSource::GroupRole { group_id, role_id });
                }
            }
        }

        let role_uuids: Vec<Uuid> = role_paths.keys().map(RoleId::as_uuid).collect();
        for (role_id, permission_ids) in self
            .active_targets(AssignmentKind::RolePermission, role_uuids)
            .await?
        {
            let Some(paths) = role_paths.get(&RoleId::from_uuid(role_id)) else {
                continue;
            };
            for permission_id in permission_ids {
                for source in paths {
                    grants.add(permission_id, *source);
                }
            }
        }

        self.materialize(grants).await
    }

    /// Returns whether the user currently holds `action` on `resource`.
    pub async fn has_permission(
        &self,
        user_id: UserId,
        resource: &str,
        action: &str,
    ) -> AppResult<bool> {
        let permissions = self.resolve_effective_permissions(user_id).await?;
        Ok(permissions
            .iter()
            .any(|permission| permission.grants(resource, action)))
    }

    /// Fails with `Forbidden` unless the user holds `action` on `resource`.
    pub async fn require_permission(
        &self,
        user_id: UserId,
        resource: &str,
        action: &str,
    ) -> AppResult<()> {
        if self.has_permission(user_id, resource, action).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "user '{user_id}' is missing permission '{resource}:{action}'"
        )))
    }

    async fn is_resolvable(&self, user: &User) -> AppResult<bool> {
        if !user.is_active {
            return Ok(false);
        }

        Ok(self
            .repositories
            .tenants
            .find_tenant(user.tenant_id)
            .await?
            .is_some_and(|tenant| tenant.is_active))
    }

    /// Active edge targets grouped by source.
    async fn active_targets(
        &self,
        kind: AssignmentKind,
        source_ids: Vec<Uuid>,
    ) -> AppResult<HashMap<Uuid, Vec<Uuid>>> {
        if source_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let edges = self
            .assignments
            .list_assignments(AssignmentQuery::active_from(kind, source_ids))
            .await?;

        let mut targets: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for edge in edges {
            targets
                .entry(edge.source_id)
                .or_default()
                .push(edge.target_id);
        }

        Ok(targets)
    }

    async fn tenant_roles(
        &self,
        tenant_id: TenantId,
        role_ids: impl Iterator<Item = Uuid>,
    ) -> AppResult<BTreeSet<RoleId>> {
        let role_ids = unique_ids(role_ids, RoleId::from_uuid);
        if role_ids.is_empty() {
            return Ok(BTreeSet::new());
        }

        let roles = self.repositories.roles.list_roles_by_ids(&role_ids).await?;
        Ok(active_in_tenant(roles, tenant_id, |role| {
            (role.tenant_id, role.role_id)
        }))
    }

    async fn tenant_groups(
        &self,
        tenant_id: TenantId,
        group_ids: impl Iterator<Item = Uuid>,
    ) -> AppResult<BTreeSet<GroupId>> {
        let group_ids = unique_ids(group_ids, GroupId::from_uuid);
        if group_ids.is_empty() {
            return Ok(BTreeSet::new());
        }

        let groups = self
            .repositories
            .groups
            .list_groups_by_ids(&group_ids)
            .await?;
        Ok(active_in_tenant(groups, tenant_id, |group| {
            (group.tenant_id, group.group_id)
        }))
    }

    async fn materialize(&self, grants: GrantCollector) -> AppResult<Vec<EffectivePermission>> {
        if grants.sources.is_empty() {
            return Ok(Vec::new());
        }

        let permission_ids: Vec<PermissionId> = grants.sources.keys().copied().collect();
        let permissions = self
            .repositories
            .permissions
            .list_permissions_by_ids(&permission_ids)
            .await?;

        let mut effective: Vec<EffectivePermission> = permissions
            .into_iter()
            .filter(|permission| permission.is_active)
            .filter_map(|permission| {
                let sources = grants.sources.get(&permission.permission_id)?.clone();
                Some(EffectivePermission {
                    permission,
                    sources,
                })
            })
            .collect();
        effective.sort_by(|left, right| {
            (
                left.permission.resource.as_str(),
                left.permission.action.as_str(),
                left.permission.permission_id,
            )
                .cmp(&(
                    right.permission.resource.as_str(),
                    right.permission.action.as_str(),
                    right.permission.permission_id,
                ))
        });

        Ok(effective)
    }
}

fn unique_ids<Id: Ord>(ids: impl Iterator<Item = Uuid>, wrap: fn(Uuid) -> Id) -> Vec<Id> {
    ids.map(wrap)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Keeps the identifiers of active records owned by `tenant_id`.
fn active_in_tenant<E, Id>(
    records: Vec<E>,
    tenant_id: TenantId,
    owner_and_id: impl Fn(&E) -> (TenantId, Id),
) -> BTreeSet<Id>
where
    E: Lifecycle,
    Id: Ord,
{
    records
        .iter()
        .filter(|record| record.is_active())
        .filter_map(|record| {
            let (owner, id) = owner_and_id(record);
            (owner == tenant_id).then_some(id)
        })
        .collect()
}

/// Grant paths keyed by permission identifier, which deduplicates the union.
#[derive(Default)]
struct GrantCollector {
    sources: BTreeMap<PermissionId, BTreeSet<GrantSource>>,
}

impl GrantCollector {
    fn add(&mut self, permission_id: Uuid, source: GrantSource) {
        self.sources
            .entry(PermissionId::from_uuid(permission_id))
            .or_default()
            .insert(source);
    }
}
