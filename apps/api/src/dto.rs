mod access;
mod assignments;
mod common;
mod directory;

pub use access::{
    AuthorizationResponse, AuthorizeParams, EffectivePermissionResponse,
    EffectivePermissionsParams, EffectivePermissionsResponse,
};
pub use assignments::{AssignRequest, AssignmentHistoryParams, AssignmentResponse};
pub use common::{HealthResponse, ListParams, PermissionListParams};
pub use directory::{
    CreateGroupRequest, CreatePermissionRequest, CreateRoleRequest, CreateTenantRequest,
    CreateUserRequest, GroupResponse, PermissionResponse, RoleResponse, TenantResponse,
    UpdateGroupRequest, UpdatePermissionRequest, UpdateRoleRequest, UpdateTenantRequest,
    UpdateUserRequest, UserResponse,
};
