mod conversions;
mod types;

pub use types::{
    CreateGroupRequest, CreatePermissionRequest, CreateRoleRequest, CreateTenantRequest,
    CreateUserRequest, GroupResponse, PermissionResponse, RoleResponse, TenantResponse,
    UpdateGroupRequest, UpdatePermissionRequest, UpdateRoleRequest, UpdateTenantRequest,
    UpdateUserRequest, UserResponse,
};
