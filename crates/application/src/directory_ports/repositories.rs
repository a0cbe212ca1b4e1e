use std::sync::Arc;

use async_trait::async_trait;

use keyward_core::{AppResult, GroupId, PermissionId, RoleId, TenantId, UserId};
use keyward_domain::{Group, Permission, Role, Tenant, User};

use super::queries::{PermissionQuery, TenantQuery, TenantScopedQuery};

/// Repository port for tenants.
#[async_trait]
pub trait TenantRepository: Send + Sync {
    /// Inserts a tenant. Fails with `Conflict` when the name is taken.
    async fn insert_tenant(&self, tenant: Tenant) -> AppResult<Tenant>;

    /// Finds a tenant by identifier regardless of state.
    async fn find_tenant(&self, tenant_id: TenantId) -> AppResult<Option<Tenant>>;

    /// Lists tenants ordered by name.
    async fn list_tenants(&self, query: TenantQuery) -> AppResult<Vec<Tenant>>;

    /// Persists a modified tenant.
    async fn update_tenant(&self, tenant: Tenant) -> AppResult<Tenant>;
}

/// Repository port for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user. Fails with `Conflict` when the email is taken in the tenant.
    async fn insert_user(&self, user: User) -> AppResult<User>;

    /// Finds a user by identifier regardless of state.
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<User>>;

    /// Lists users ordered by email.
    async fn list_users(&self, query: TenantScopedQuery) -> AppResult<Vec<User>>;

    /// Loads the users with the given identifiers regardless of state.
    async fn list_users_by_ids(&self, user_ids: &[UserId]) -> AppResult<Vec<User>>;

    /// Persists a modified user.
    async fn update_user(&self, user: User) -> AppResult<User>;
}

/// Repository port for roles.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Inserts a role. Fails with `Conflict` when the name is taken in the tenant.
    async fn insert_role(&self, role: Role) -> AppResult<Role>;

    /// Finds a role by identifier regardless of state.
    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>>;

    /// Lists roles ordered by name.
    async fn list_roles(&self, query: TenantScopedQuery) -> AppResult<Vec<Role>>;

    /// Loads the roles with the given identifiers regardless of state.
    async fn list_roles_by_ids(&self, role_ids: &[RoleId]) -> AppResult<Vec<Role>>;

    /// Persists a modified role.
    async fn update_role(&self, role: Role) -> AppResult<Role>;
}

/// Repository port for groups.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Inserts a group. Fails with `Conflict` when the name is taken in the tenant.
    async fn insert_group(&self, group: Group) -> AppResult<Group>;

    /// Finds a group by identifier regardless of state.
    async fn find_group(&self, group_id: GroupId) -> AppResult<Option<Group>>;

    /// Lists groups ordered by name.
    async fn list_groups(&self, query: TenantScopedQuery) -> AppResult<Vec<Group>>;

    /// Loads the groups with the given identifiers regardless of state.
    async fn list_groups_by_ids(&self, group_ids: &[GroupId]) -> AppResult<Vec<Group>>;

    /// Persists a modified group.
    async fn update_group(&self, group: Group) -> AppResult<Group>;
}

/// Repository port for permissions.
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Inserts a permission. Fails with `Conflict` when the name or the
    /// resource/action pair is taken.
    async fn insert_permission(&self, permission: Permission) -> AppResult<Permission>;

    /// Finds a permission by identifier regardless of state.
    async fn find_permission(&self, permission_id: PermissionId)
    -> AppResult<Option<Permission>>;

    /// Lists permissions ordered by resource and action.
    async fn list_permissions(&self, query: PermissionQuery) -> AppResult<Vec<Permission>>;

    /// Loads the permissions with the given identifiers regardless of state.
    async fn list_permissions_by_ids(
        &self,
        permission_ids: &[PermissionId],
    ) -> AppResult<Vec<Permission>>;

    /// Persists a modified permission.
    async fn update_permission(&self, permission: Permission) -> AppResult<Permission>;
}

/// Entity repositories shared by the directory, assignment and resolver services.
#[derive(Clone)]
pub struct DirectoryRepositories {
    /// Tenant storage.
    pub tenants: Arc<dyn TenantRepository>,
    /// User storage.
    pub users: Arc<dyn UserRepository>,
    /// Role storage.
    pub roles: Arc<dyn RoleRepository>,
    /// Group storage.
    pub groups: Arc<dyn GroupRepository>,
    /// Permission storage.
    pub permissions: Arc<dyn PermissionRepository>,
}

impl DirectoryRepositories {
    /// Uses one store for every entity repository.
    #[must_use]
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: TenantRepository
            + UserRepository
            + RoleRepository
            + GroupRepository
            + PermissionRepository
            + 'static,
    {
        Self {
            tenants: store.clone(),
            users: store.clone(),
            roles: store.clone(),
            groups: store.clone(),
            permissions: store,
        }
    }
}
