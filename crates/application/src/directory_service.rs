use keyward_core::{AppError, AppResult, TenantId};
use keyward_domain::{Tenant, ensure_active};

use crate::directory_ports::DirectoryRepositories;

mod groups;
mod permissions;
mod roles;
mod tenants;
mod users;


/// Application service for tenant, user, role, group and permission records.
#[derive(Clone)]
pub struct DirectoryService {
    repositories: DirectoryRepositories,
}

impl DirectoryService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(repositories: DirectoryRepositories) -> Self {
        Self { repositories }
    }

    /// Loads a tenant that must exist and be active before children are created under it.
    async fn require_active_tenant(&self, tenant_id: TenantId) -> AppResult<Tenant> {
        let tenant = self
            .repositories
            .tenants
            .find_tenant(tenant_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("tenant '{tenant_id}' does not exist")))?;

        ensure_active(&tenant)?;
        Ok(tenant)
    }
}
