use keyward_core::TenantId;

/// Input payload for creating a tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTenantInput {
    /// Globally unique tenant name.
    pub name: String,
}

/// Partial tenant update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTenantInput {
    /// New tenant name.
    pub name: Option<String>,
    /// Requested active flag.
    pub is_active: Option<bool>,
}

/// Input payload for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserInput {
    /// Owning tenant, which must be active.
    pub tenant_id: TenantId,
    /// Email address, unique within the tenant.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Partial user update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserInput {
    /// New email address.
    pub email: Option<String>,
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// Requested active flag.
    pub is_active: Option<bool>,
}

/// Input payload for creating a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Owning tenant, which must be active.
    pub tenant_id: TenantId,
    /// Role name, unique within the tenant.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Marks the role as protected from deactivation and deletion.
    pub is_system_role: bool,
}

/// Partial role update. The system flag cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRoleInput {
    /// New role name.
    pub name: Option<String>,
    /// New description; a blank value clears it.
    pub description: Option<String>,
    /// Requested active flag.
    pub is_active: Option<bool>,
}

/// Input payload for creating a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGroupInput {
    /// Owning tenant, which must be active.
    pub tenant_id: TenantId,
    /// Group name, unique within the tenant.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Partial group update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateGroupInput {
    /// New group name.
    pub name: Option<String>,
    /// New description; a blank value clears it.
    pub description: Option<String>,
    /// Requested active flag.
    pub is_active: Option<bool>,
}

/// Input payload for creating a permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePermissionInput {
    /// Globally unique permission name.
    pub name: String,
    /// Guarded resource.
    pub resource: String,
    /// Allowed action.
    pub action: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Partial permission update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePermissionInput {
    /// New permission name.
    pub name: Option<String>,
    /// New resource.
    pub resource: Option<String>,
    /// New action.
    pub action: Option<String>,
    /// New description; a blank value clears it.
    pub description: Option<String>,
    /// Requested active flag.
    pub is_active: Option<bool>,
}
