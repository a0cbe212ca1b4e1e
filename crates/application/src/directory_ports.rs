mod inputs;
mod queries;
mod repositories;

pub use inputs::{
    CreateGroupInput, CreatePermissionInput, CreateRoleInput, CreateTenantInput, CreateUserInput,
    UpdateGroupInput, UpdatePermissionInput, UpdateRoleInput, UpdateTenantInput, UpdateUserInput,
};
pub use queries::{PermissionQuery, TenantQuery, TenantScopedQuery};
pub use repositories::{
    DirectoryRepositories, GroupRepository, PermissionRepository, RoleRepository,
    TenantRepository, UserRepository,
};
