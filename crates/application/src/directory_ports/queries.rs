use keyward_core::{PageRequest, TenantId};

/// Listing parameters for tenants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TenantQuery {
    /// Includes soft-deleted tenants when set.
    pub include_inactive: bool,
    /// Offset pagination bounds.
    pub page: PageRequest,
}

/// Listing parameters for users, roles and groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TenantScopedQuery {
    /// Restricts results to one tenant.
    pub tenant_id: Option<TenantId>,
    /// Includes soft-deleted records when set.
    pub include_inactive: bool,
    /// Offset pagination bounds.
    pub page: PageRequest,
}

impl TenantScopedQuery {
    /// Returns whether a record with the given scope and state passes the filter.
    #[must_use]
    pub fn admits(&self, tenant_id: TenantId, is_active: bool) -> bool {
        (self.include_inactive || is_active)
            && self.tenant_id.is_none_or(|expected| expected == tenant_id)
    }
}

/// Listing parameters for permissions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionQuery {
    /// Restricts results to one resource.
    pub resource: Option<String>,
    /// Includes soft-deleted permissions when set.
    pub include_inactive: bool,
    /// Offset pagination bounds.
    pub page: PageRequest,
}

impl PermissionQuery {
    /// Returns whether a permission with the given resource and state passes the filter.
    #[must_use]
    pub fn admits(&self, resource: &str, is_active: bool) -> bool {
        (self.include_inactive || is_active)
            && self
                .resource
                .as_deref()
                .is_none_or(|expected| expected == resource)
    }
}
