use keyward_application::{
    CreateGroupInput, CreatePermissionInput, CreateRoleInput, CreateTenantInput, CreateUserInput,
    UpdateGroupInput, UpdatePermissionInput, UpdateRoleInput, UpdateTenantInput, UpdateUserInput,
};
use keyward_core::TenantId;
use keyward_domain::{Group, Permission, Role, Tenant, User};

use super::types::{
    CreateGroupRequest, CreatePermissionRequest, CreateRoleRequest, CreateTenantRequest,
    CreateUserRequest, GroupResponse, PermissionResponse, RoleResponse, TenantResponse,
    UpdateGroupRequest, UpdatePermissionRequest, UpdateRoleRequest, UpdateTenantRequest,
    UpdateUserRequest, UserResponse,
};

impl From<Tenant> for TenantResponse {
    fn from(value: Tenant) -> Self {
        Self {
            tenant_id: value.tenant_id.as_uuid(),
            name: value.name.into(),
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            user_id: value.user_id.as_uuid(),
            tenant_id: value.tenant_id.as_uuid(),
            email: value.email.as_str().to_owned(),
            first_name: value.first_name.into(),
            last_name: value.last_name.into(),
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<Role> for RoleResponse {
    fn from(value: Role) -> Self {
        Self {
            role_id: value.role_id.as_uuid(),
            tenant_id: value.tenant_id.as_uuid(),
            name: value.name.into(),
            description: value.description,
            is_system_role: value.is_system_role,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<Group> for GroupResponse {
    fn from(value: Group) -> Self {
        Self {
            group_id: value.group_id.as_uuid(),
            tenant_id: value.tenant_id.as_uuid(),
            name: value.name.into(),
            description: value.description,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<Permission> for PermissionResponse {
    fn from(value: Permission) -> Self {
        Self {
            permission_id: value.permission_id.as_uuid(),
            name: value.name.into(),
            resource: value.resource.into(),
            action: value.action.into(),
            description: value.description,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<CreateTenantRequest> for CreateTenantInput {
    fn from(value: CreateTenantRequest) -> Self {
        Self { name: value.name }
    }
}

impl From<UpdateTenantRequest> for UpdateTenantInput {
    fn from(value: UpdateTenantRequest) -> Self {
        Self {
            name: value.name,
            is_active: value.is_active,
        }
    }
}

impl From<CreateUserRequest> for CreateUserInput {
    fn from(value: CreateUserRequest) -> Self {
        Self {
            tenant_id: TenantId::from_uuid(value.tenant_id),
            email: value.email,
            first_name: value.first_name,
            last_name: value.last_name,
        }
    }
}

impl From<UpdateUserRequest> for UpdateUserInput {
    fn from(value: UpdateUserRequest) -> Self {
        Self {
            email: value.email,
            first_name: value.first_name,
            last_name: value.last_name,
            is_active: value.is_active,
        }
    }
}

impl From<CreateRoleRequest> for CreateRoleInput {
    fn from(value: CreateRoleRequest) -> Self {
        Self {
            tenant_id: TenantId::from_uuid(value.tenant_id),
            name: value.name,
            description: value.description,
            is_system_role: value.is_system_role,
        }
    }
}

impl From<UpdateRoleRequest> for UpdateRoleInput {
    fn from(value: UpdateRoleRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
            is_active: value.is_active,
        }
    }
}

impl From<CreateGroupRequest> for CreateGroupInput {
    fn from(value: CreateGroupRequest) -> Self {
        Self {
            tenant_id: TenantId::from_uuid(value.tenant_id),
            name: value.name,
            description: value.description,
        }
    }
}

impl From<UpdateGroupRequest> for UpdateGroupInput {
    fn from(value: UpdateGroupRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
            is_active: value.is_active,
        }
    }
}

impl From<CreatePermissionRequest> for CreatePermissionInput {
    fn from(value: CreatePermissionRequest) -> Self {
        Self {
            name: value.name,
            resource: value.resource,
            action: value.action,
            description: value.description,
        }
    }
}

impl From<UpdatePermissionRequest> for UpdatePermissionInput {
    fn from(value: UpdatePermissionRequest) -> Self {
        Self {
            name: value.name,
            resource: value.resource,
            action: value.action,
            description: value.description,
            is_active: value.is_active,
        }
    }
}
