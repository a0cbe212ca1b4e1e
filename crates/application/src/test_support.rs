use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use keyward_core::{AppError, AppResult, GroupId, PermissionId, RoleId, TenantId, UserId};
use keyward_domain::{
    Assignment, AssignmentKind, EndpointKind, Group, Permission, Role, Tenant, User,
};

use crate::{
    AssignmentQuery, AssignmentRepository, AssignmentRequest, AssignmentService,
    AssignmentWrite, CreateGroupInput,
    CreatePermissionInput, CreateRoleInput, CreateTenantInput, CreateUserInput,
    DirectoryRepositories, DirectoryService, GroupRepository, PermissionQuery,
    PermissionRepository, PermissionResolver, RoleRepository, TenantQuery, TenantRepository,
    TenantScopedQuery, UserRepository,
};

/// Map-backed fake for every repository port.
#[derive(Default)]
pub(crate) struct FakeDirectory {
    tenants: Mutex<HashMap<TenantId, Tenant>>,
    users: Mutex<HashMap<UserId, User>>,
    roles: Mutex<HashMap<RoleId, Role>>,
    groups: Mutex<HashMap<GroupId, Group>>,
    permissions: Mutex<HashMap<PermissionId, Permission>>,
    assignments: Mutex<Vec<Assignment>>,
    /// Makes the next edge insert fail as if a concurrent writer won the pair.
    pub(crate) conflict_on_next_insert: Mutex<bool>,
}

#[async_trait]
impl TenantRepository for FakeDirectory {
    async fn insert_tenant(&self, tenant: Tenant) -> AppResult<Tenant> {
        let mut tenants = self.tenants.lock().await;
        if tenants.values().any(|stored| stored.name == tenant.name) {
            return Err(AppError::Conflict(format!(
                "tenant '{}' already exists",
                tenant.name
            )));
        }
        tenants.insert(tenant.tenant_id, tenant.clone());
        Ok(tenant)
    }

    async fn find_tenant(&self, tenant_id: TenantId) -> AppResult<Option<Tenant>> {
        Ok(self.tenants.lock().await.get(&tenant_id).cloned())
    }

    async fn list_tenants(&self, query: TenantQuery) -> AppResult<Vec<Tenant>> {
        let mut tenants: Vec<Tenant> = self
            .tenants
            .lock()
            .await
            .values()
            .filter(|tenant| query.include_inactive || tenant.is_active)
            .cloned()
            .collect();
        tenants.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(query.page.apply(tenants))
    }

    async fn update_tenant(&self, tenant: Tenant) -> AppResult<Tenant> {
        self.tenants
            .lock()
            .await
            .insert(tenant.tenant_id, tenant.clone());
        Ok(tenant)
    }
}

#[async_trait]
impl UserRepository for FakeDirectory {
    async fn insert_user(&self, user: User) -> AppResult<User> {
        let mut users = self.users.lock().await;
        if users
            .values()
            .any(|stored| stored.tenant_id == user.tenant_id && stored.email == user.email)
        {
            return Err(AppError::Conflict(format!(
                "user '{}' already exists",
                user.email.as_str()
            )));
        }
        users.insert(user.user_id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.lock().await.get(&user_id).cloned())
    }

    async fn list_users(&self, query: TenantScopedQuery) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .lock()
            .await
            .values()
            .filter(|user| query.admits(user.tenant_id, user.is_active))
            .cloned()
            .collect();
        users.sort_by(|left, right| left.email.as_str().cmp(right.email.as_str()));
        Ok(query.page.apply(users))
    }

    async fn list_users_by_ids(&self, user_ids: &[UserId]) -> AppResult<Vec<User>> {
        let users = self.users.lock().await;
        Ok(user_ids
            .iter()
            .filter_map(|user_id| users.get(user_id).cloned())
            .collect())
    }

    async fn update_user(&self, user: User) -> AppResult<User> {
        self.users.lock().await.insert(user.user_id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl RoleRepository for FakeDirectory {
    async fn insert_role(&self, role: Role) -> AppResult<Role> {
        let mut roles = self.roles.lock().await;
        if roles
            .values()
            .any(|stored| stored.tenant_id == role.tenant_id && stored.name == role.name)
        {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists",
                role.name
            )));
        }
        roles.insert(role.role_id, role.clone());
        Ok(role)
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        Ok(self.roles.lock().await.get(&role_id).cloned())
    }

    async fn list_roles(&self, query: TenantScopedQuery) -> AppResult<Vec<Role>> {
        let mut roles: Vec<Role> = self
            .roles
            .lock()
            .await
            .values()
            .filter(|role| query.admits(role.tenant_id, role.is_active))
            .cloned()
            .collect();
        roles.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(query.page.apply(roles))
    }

    async fn list_roles_by_ids(&self, role_ids: &[RoleId]) -> AppResult<Vec<Role>> {
        let roles = self.roles.lock().await;
        Ok(role_ids
            .iter()
            .filter_map(|role_id| roles.get(role_id).cloned())
            .collect())
    }

    async fn update_role(&self, role: Role) -> AppResult<Role> {
        self.roles.lock().await.insert(role.role_id, role.clone());
        Ok(role)
    }
}

#[async_trait]
impl GroupRepository for FakeDirectory {
    async fn insert_group(&self, group: Group) -> AppResult<Group> {
        let mut groups = self.groups.lock().await;
        if groups
            .values()
            .any(|stored| stored.tenant_id == group.tenant_id && stored.name == group.name)
        {
            return Err(AppError::Conflict(format!(
                "group '{}' already exists",
                group.name
            )));
        }
        groups.insert(group.group_id, group.clone());
        Ok(group)
    }

    async fn find_group(&self, group_id: GroupId) -> AppResult<Option<Group>> {
        Ok(self.groups.lock().await.get(&group_id).cloned())
    }

    async fn list_groups(&self, query: TenantScopedQuery) -> AppResult<Vec<Group>> {
        let mut groups: Vec<Group> = self
            .groups
            .lock()
            .await
            .values()
            .filter(|group| query.admits(group.tenant_id, group.is_active))
            .cloned()
            .collect();
        groups.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(query.page.apply(groups))
    }

    async fn list_groups_by_ids(&self, group_ids: &[GroupId]) -> AppResult<Vec<Group>> {
        let groups = self.groups.lock().await;
        Ok(group_ids
            .iter()
            .filter_map(|group_id| groups.get(group_id).cloned())
            .collect())
    }

    async fn update_group(&self, group: Group) -> AppResult<Group> {
        self.groups
            .lock()
            .await
            .insert(group.group_id, group.clone());
        Ok(group)
    }
}

#[async_trait]
impl PermissionRepository for FakeDirectory {
    async fn insert_permission(&self, permission: Permission) -> AppResult<Permission> {
        let mut permissions = self.permissions.lock().await;
        if permissions.values().any(|stored| {
            stored.name == permission.name
                || (stored.resource == permission.resource && stored.action == permission.action)
        }) {
            return Err(AppError::Conflict(format!(
                "permission '{}' already exists",
                permission.name
            )));
        }
        permissions.insert(permission.permission_id, permission.clone());
        Ok(permission)
    }

    async fn find_permission(
        &self,
        permission_id: PermissionId,
    ) -> AppResult<Option<Permission>> {
        Ok(self.permissions.lock().await.get(&permission_id).cloned())
    }

    async fn list_permissions(&self, query: PermissionQuery) -> AppResult<Vec<Permission>> {
        let mut permissions: Vec<Permission> = self
            .permissions
            .lock()
            .await
            .values()
            .filter(|permission| query.admits(permission.resource.as_str(), permission.is_active))
            .cloned()
            .collect();
        permissions.sort_by(|left, right| {
            (&left.resource, &left.action).cmp(&(&right.resource, &right.action))
        });
        Ok(query.page.apply(permissions))
    }

    async fn list_permissions_by_ids(
        &self,
        permission_ids: &[PermissionId],
    ) -> AppResult<Vec<Permission>> {
        let permissions = self.permissions.lock().await;
        Ok(permission_ids
            .iter()
            .filter_map(|permission_id| permissions.get(permission_id).cloned())
            .collect())
    }

    async fn update_permission(&self, permission: Permission) -> AppResult<Permission> {
        self.permissions
            .lock()
            .await
            .insert(permission.permission_id, permission.clone());
        Ok(permission)
    }
}

#[async_trait]
impl AssignmentRepository for FakeDirectory {
    async fn write_assignment(
        &self,
        request: AssignmentRequest,
        assigned_at: DateTime<Utc>,
    ) -> AppResult<AssignmentWrite> {
        let mut conflict = self.conflict_on_next_insert.lock().await;
        let mut assignments = self.assignments.lock().await;
        self.check_endpoint(request.kind.source(), request.source_id)
            .await?;
        self.check_endpoint(request.kind.target(), request.target_id)
            .await?;

        if let Some(edge) = assignments.iter_mut().find(|edge| {
            edge.kind == request.kind
                && edge.source_id == request.source_id
                && edge.target_id == request.target_id
        }) {
            if edge.is_active {
                return Ok(AssignmentWrite::AlreadyActive(edge.clone()));
            }
            edge.reactivate(request.assigned_by, assigned_at);
            return Ok(AssignmentWrite::Reactivated(edge.clone()));
        }

        if *conflict {
            *conflict = false;
            return Err(AppError::Conflict("edge pair already exists".to_owned()));
        }

        let mut edge = Assignment::new(
            request.kind,
            request.source_id,
            request.target_id,
            request.assigned_by,
        );
        edge.assigned_at = assigned_at;
        assignments.push(edge.clone());
        Ok(AssignmentWrite::Created(edge))
    }

    async fn deactivate_assignment(
        &self,
        kind: AssignmentKind,
        source_id: Uuid,
        target_id: Uuid,
    ) -> AppResult<Option<Assignment>> {
        let mut assignments = self.assignments.lock().await;
        let Some(edge) = assignments.iter_mut().find(|edge| {
            edge.kind == kind
                && edge.source_id == source_id
                && edge.target_id == target_id
                && edge.is_active
        }) else {
            return Ok(None);
        };
        edge.is_active = false;
        Ok(Some(edge.clone()))
    }

    async fn list_assignments(&self, query: AssignmentQuery) -> AppResult<Vec<Assignment>> {
        Ok(self
            .assignments
            .lock()
            .await
            .iter()
            .filter(|edge| query.matches(edge))
            .cloned()
            .collect())
    }
}

impl FakeDirectory {
    async fn check_endpoint(&self, kind: EndpointKind, id: Uuid) -> AppResult<()> {
        let state = match kind {
            EndpointKind::User => self
                .users
                .lock()
                .await
                .get(&UserId::from_uuid(id))
                .map(|user| (user.is_active, Some(user.tenant_id))),
            EndpointKind::Role => self
                .roles
                .lock()
                .await
                .get(&RoleId::from_uuid(id))
                .map(|role| (role.is_active, Some(role.tenant_id))),
            EndpointKind::Group => self
                .groups
                .lock()
                .await
                .get(&GroupId::from_uuid(id))
                .map(|group| (group.is_active, Some(group.tenant_id))),
            EndpointKind::Permission => self
                .permissions
                .lock()
                .await
                .get(&PermissionId::from_uuid(id))
                .map(|permission| (permission.is_active, None)),
        };

        let tenant_is_active = match state {
            None | Some((false, _)) => false,
            Some((true, None)) => true,
            Some((true, Some(tenant_id))) => self
                .tenants
                .lock()
                .await
                .get(&tenant_id)
                .is_some_and(|tenant| tenant.is_active),
        };

        if tenant_is_active {
            Ok(())
        } else {
            Err(AppError::NotFound(format!(
                "{} '{id}' is missing or inactive",
                kind.as_str()
            )))
        }
    }
}

/// Services wired against one shared fake store.
pub(crate) struct Harness {
    pub(crate) store: Arc<FakeDirectory>,
    pub(crate) directory: DirectoryService,
    pub(crate) assignments: AssignmentService,
    pub(crate) resolver: PermissionResolver,
}

impl Harness {
    pub(crate) fn new() -> Self {
        let store = Arc::new(FakeDirectory::default());
        let repositories = DirectoryRepositories::from_store(store.clone());

        Self {
            directory: DirectoryService::new(repositories.clone()),
            assignments: AssignmentService::new(repositories.clone(), store.clone()),
            resolver: PermissionResolver::new(repositories, store.clone()),
            store,
        }
    }

    pub(crate) async fn tenant(&self, name: &str) -> Tenant {
        self.directory
            .create_tenant(CreateTenantInput {
                name: name.to_owned(),
            })
            .await
            .unwrap_or_else(|_| unreachable!())
    }

    pub(crate) async fn user(&self, tenant_id: TenantId, email: &str) -> User {
        self.directory
            .create_user(CreateUserInput {
                tenant_id,
                email: email.to_owned(),
                first_name: "Test".to_owned(),
                last_name: "User".to_owned(),
            })
            .await
            .unwrap_or_else(|_| unreachable!())
    }

    pub(crate) async fn role(&self, tenant_id: TenantId, name: &str, is_system_role: bool) -> Role {
        self.directory
            .create_role(CreateRoleInput {
                tenant_id,
                name: name.to_owned(),
                description: None,
                is_system_role,
            })
            .await
            .unwrap_or_else(|_| unreachable!())
    }

    pub(crate) async fn group(&self, tenant_id: TenantId, name: &str) -> Group {
        self.directory
            .create_group(CreateGroupInput {
                tenant_id,
                name: name.to_owned(),
                description: None,
            })
            .await
            .unwrap_or_else(|_| unreachable!())
    }

    pub(crate) async fn permission(&self, resource: &str, action: &str) -> Permission {
        self.directory
            .create_permission(CreatePermissionInput {
                name: format!("{resource}.{action}"),
                resource: resource.to_owned(),
                action: action.to_owned(),
                description: None,
            })
            .await
            .unwrap_or_else(|_| unreachable!())
    }
}
