use std::collections::HashMap;

use async_trait::async_trait;

use keyward_application::{
    GroupRepository, PermissionQuery, PermissionRepository, RoleRepository, TenantQuery,
    TenantRepository, TenantScopedQuery, UserRepository,
};
use keyward_core::{AppError, AppResult, GroupId, PermissionId, RoleId, TenantId, UserId};
use keyward_domain::{Group, Permission, Role, Tenant, User};

use super::InMemoryDirectoryStore;

fn tenant_name_taken(tenants: &HashMap<TenantId, Tenant>, tenant: &Tenant) -> bool {
    tenants
        .values()
        .any(|stored| stored.tenant_id != tenant.tenant_id && stored.name == tenant.name)
}

fn user_email_taken(users: &HashMap<UserId, User>, user: &User) -> bool {
    users.values().any(|stored| {
        stored.user_id != user.user_id
            && stored.tenant_id == user.tenant_id
            && stored.email == user.email
    })
}

fn role_name_taken(roles: &HashMap<RoleId, Role>, role: &Role) -> bool {
    roles.values().any(|stored| {
        stored.role_id != role.role_id
            && stored.tenant_id == role.tenant_id
            && stored.name == role.name
    })
}

fn group_name_taken(groups: &HashMap<GroupId, Group>, group: &Group) -> bool {
    groups.values().any(|stored| {
        stored.group_id != group.group_id
            && stored.tenant_id == group.tenant_id
            && stored.name == group.name
    })
}

fn permission_taken(
    permissions: &HashMap<PermissionId, Permission>,
    permission: &Permission,
) -> Option<AppError> {
    permissions
        .values()
        .filter(|stored| stored.permission_id != permission.permission_id)
        .find_map(|stored| {
            if stored.name == permission.name {
                Some(AppError::Conflict(format!(
                    "permission name '{}' already exists",
                    permission.name
                )))
            } else if stored.resource == permission.resource && stored.action == permission.action
            {
                Some(AppError::Conflict(format!(
                    "permission for '{}:{}' already exists",
                    permission.resource, permission.action
                )))
            } else {
                None
            }
        })
}

#[async_trait]
impl TenantRepository for InMemoryDirectoryStore {
    async fn insert_tenant(&self, tenant: Tenant) -> AppResult<Tenant> {
        let mut tenants = self.tenants.write().await;
        if tenants.contains_key(&tenant.tenant_id) || tenant_name_taken(&tenants, &tenant) {
            return Err(AppError::Conflict(format!(
                "tenant '{}' already exists",
                tenant.name
            )));
        }

        tenants.insert(tenant.tenant_id, tenant.clone());
        Ok(tenant)
    }

    async fn find_tenant(&self, tenant_id: TenantId) -> AppResult<Option<Tenant>> {
        Ok(self.tenants.read().await.get(&tenant_id).cloned())
    }

    async fn list_tenants(&self, query: TenantQuery) -> AppResult<Vec<Tenant>> {
        let mut values: Vec<Tenant> = self
            .tenants
            .read()
            .await
            .values()
            .filter(|tenant| query.include_inactive || tenant.is_active)
            .cloned()
            .collect();
        values.sort_by(|left, right| {
            (&left.name, left.tenant_id).cmp(&(&right.name, right.tenant_id))
        });

        Ok(query.page.apply(values))
    }

    async fn update_tenant(&self, tenant: Tenant) -> AppResult<Tenant> {
        let mut tenants = self.tenants.write().await;
        if !tenants.contains_key(&tenant.tenant_id) {
            return Err(AppError::NotFound(format!(
                "tenant '{}' does not exist",
                tenant.tenant_id
            )));
        }
        if tenant_name_taken(&tenants, &tenant) {
            return Err(AppError::Conflict(format!(
                "tenant '{}' already exists",
                tenant.name
            )));
        }

        tenants.insert(tenant.tenant_id, tenant.clone());
        Ok(tenant)
    }
}

#[async_trait]
impl UserRepository for InMemoryDirectoryStore {
    async fn insert_user(&self, user: User) -> AppResult<User> {
        if !self.tenants.read().await.contains_key(&user.tenant_id) {
            return Err(AppError::NotFound(format!(
                "tenant '{}' does not exist",
                user.tenant_id
            )));
        }

        let mut users = self.users.write().await;
        if users.contains_key(&user.user_id) || user_email_taken(&users, &user) {
            return Err(AppError::Conflict(format!(
                "user '{}' already exists in tenant '{}'",
                user.email.as_str(),
                user.tenant_id
            )));
        }

        users.insert(user.user_id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn list_users(&self, query: TenantScopedQuery) -> AppResult<Vec<User>> {
        let mut values: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .filter(|user| query.admits(user.tenant_id, user.is_active))
            .cloned()
            .collect();
        values.sort_by(|left, right| {
            (left.email.as_str(), left.user_id).cmp(&(right.email.as_str(), right.user_id))
        });

        Ok(query.page.apply(values))
    }

    async fn list_users_by_ids(&self, user_ids: &[UserId]) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(user_ids
            .iter()
            .filter_map(|user_id| users.get(user_id).cloned())
            .collect())
    }

    async fn update_user(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.user_id) {
            return Err(AppError::NotFound(format!(
                "user '{}' does not exist",
                user.user_id
            )));
        }
        if user_email_taken(&users, &user) {
            return Err(AppError::Conflict(format!(
                "user '{}' already exists in tenant '{}'",
                user.email.as_str(),
                user.tenant_id
            )));
        }

        users.insert(user.user_id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl RoleRepository for InMemoryDirectoryStore {
    async fn insert_role(&self, role: Role) -> AppResult<Role> {
        if !self.tenants.read().await.contains_key(&role.tenant_id) {
            return Err(AppError::NotFound(format!(
                "tenant '{}' does not exist",
                role.tenant_id
            )));
        }

        let mut roles = self.roles.write().await;
        if roles.contains_key(&role.role_id) || role_name_taken(&roles, &role) {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists in tenant '{}'",
                role.name, role.tenant_id
            )));
        }

        roles.insert(role.role_id, role.clone());
        Ok(role)
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        Ok(self.roles.read().await.get(&role_id).cloned())
    }

    async fn list_roles(&self, query: TenantScopedQuery) -> AppResult<Vec<Role>> {
        let mut values: Vec<Role> = self
            .roles
            .read()
            .await
            .values()
            .filter(|role| query.admits(role.tenant_id, role.is_active))
            .cloned()
            .collect();
        values.sort_by(|left, right| (&left.name, left.role_id).cmp(&(&right.name, right.role_id)));

        Ok(query.page.apply(values))
    }

    async fn list_roles_by_ids(&self, role_ids: &[RoleId]) -> AppResult<Vec<Role>> {
        let roles = self.roles.read().await;
        Ok(role_ids
            .iter()
            .filter_map(|role_id| roles.get(role_id).cloned())
            .collect())
    }

    async fn update_role(&self, role: Role) -> AppResult<Role> {
        let mut roles = self.roles.write().await;
        let Some(stored) = roles.get(&role.role_id) else {
            return Err(AppError::NotFound(format!(
                "role '{}' does not exist",
                role.role_id
            )));
        };
        if role_name_taken(&roles, &role) {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists in tenant '{}'",
                role.name, role.tenant_id
            )));
        }

        let role = Role {
            is_system_role: stored.is_system_role,
            ..role
        };
        roles.insert(role.role_id, role.clone());
        Ok(role)
    }
}

#[async_trait]
impl GroupRepository for InMemoryDirectoryStore {
    async fn insert_group(&self, group: Group) -> AppResult<Group> {
        if !self.tenants.read().await.contains_key(&group.tenant_id) {
            return Err(AppError::NotFound(format!(
                "tenant '{}' does not exist",
                group.tenant_id
            )));
        }

        let mut groups = self.groups.write().await;
        if groups.contains_key(&group.group_id) || group_name_taken(&groups, &group) {
            return Err(AppError::Conflict(format!(
                "group '{}' already exists in tenant '{}'",
                group.name, group.tenant_id
            )));
        }

        groups.insert(group.group_id, group.clone());
        Ok(group)
    }

    async fn find_group(&self, group_id: GroupId) -> AppResult<Option<Group>> {
        Ok(self.groups.read().await.get(&group_id).cloned())
    }

    async fn list_groups(&self, query: TenantScopedQuery) -> AppResult<Vec<Group>> {
        let mut values: Vec<Group> = self
            .groups
            .read()
            .await
            .values()
            .filter(|group| query.admits(group.tenant_id, group.is_active))
            .cloned()
            .collect();
        values.sort_by(|left, right| {
            (&left.name, left.group_id).cmp(&(&right.name, right.group_id))
        });

        Ok(query.page.apply(values))
    }

    async fn list_groups_by_ids(&self, group_ids: &[GroupId]) -> AppResult<Vec<Group>> {
        let groups = self.groups.read().await;
        Ok(group_ids
            .iter()
            .filter_map(|group_id| groups.get(group_id).cloned())
            .collect())
    }

    async fn update_group(&self, group: Group) -> AppResult<Group> {
        let mut groups = self.groups.write().await;
        if !groups.contains_key(&group.group_id) {
            return Err(AppError::NotFound(format!(
                "group '{}' does not exist",
                group.group_id
            )));
        }
        if group_name_taken(&groups, &group) {
            return Err(AppError::Conflict(format!(
                "group '{}' already exists in tenant '{}'",
                group.name, group.tenant_id
            )));
        }

        groups.insert(group.group_id, group.clone());
        Ok(group)
    }
}

#[async_trait]
impl PermissionRepository for InMemoryDirectoryStore {
    async fn insert_permission(&self, permission: Permission) -> AppResult<Permission> {
        let mut permissions = self.permissions.write().await;
        if let Some(conflict) = permission_taken(&permissions, &permission) {
            return Err(conflict);
        }

        permissions.insert(permission.permission_id, permission.clone());
        Ok(permission)
    }

    async fn find_permission(
        &self,
        permission_id: PermissionId,
    ) -> AppResult<Option<Permission>> {
        Ok(self.permissions.read().await.get(&permission_id).cloned())
    }

    async fn list_permissions(&self, query: PermissionQuery) -> AppResult<Vec<Permission>> {
        let mut values: Vec<Permission> = self
            .permissions
            .read()
            .await
            .values()
            .filter(|permission| query.admits(permission.resource.as_str(), permission.is_active))
            .cloned()
            .collect();
        values.sort_by(|left, right| {
            (&left.resource, &left.action, left.permission_id).cmp(&(
                &right.resource,
                &right.action,
                right.permission_id,
            ))
        });

        Ok(query.page.apply(values))
    }

    async fn list_permissions_by_ids(
        &self,
        permission_ids: &[PermissionId],
    ) -> AppResult<Vec<Permission>> {
        let permissions = self.permissions.read().await;
        Ok(permission_ids
            .iter()
            .filter_map(|permission_id| permissions.get(permission_id).cloned())
            .collect())
    }

    async fn update_permission(&self, permission: Permission) -> AppResult<Permission> {
        let mut permissions = self.permissions.write().await;
        if !permissions.contains_key(&permission.permission_id) {
            return Err(AppError::NotFound(format!(
                "permission '{}' does not exist",
                permission.permission_id
            )));
        }
        if let Some(conflict) = permission_taken(&permissions, &permission) {
            return Err(conflict);
        }

        permissions.insert(permission.permission_id, permission.clone());
        Ok(permission)
    }
}
