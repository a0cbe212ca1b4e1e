use chrono::Utc;

use keyward_core::{AppError, AppResult, TenantId};
use keyward_domain::{Lifecycle, Tenant, ensure_deletable, plan_transition};

use crate::directory_ports::{CreateTenantInput, TenantQuery, UpdateTenantInput};

use super::DirectoryService;

impl DirectoryService {
    /// Creates an active tenant.
    pub async fn create_tenant(&self, input: CreateTenantInput) -> AppResult<Tenant> {
        let tenant = Tenant::new(input.name)?;
        self.repositories.tenants.insert_tenant(tenant).await
    }

    /// Returns a tenant by identifier, including soft-deleted tenants.
    pub async fn get_tenant(&self, tenant_id: TenantId) -> AppResult<Tenant> {
        self.repositories
            .tenants
            .find_tenant(tenant_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("tenant '{tenant_id}' does not exist")))
    }

    /// Lists tenants.
    pub async fn list_tenants(&self, query: TenantQuery) -> AppResult<Vec<Tenant>> {
        self.repositories.tenants.list_tenants(query).await
    }

    /// Applies a partial update, including reactivation or deactivation.
    pub async fn update_tenant(
        &self,
        tenant_id: TenantId,
        input: UpdateTenantInput,
    ) -> AppResult<Tenant> {
        let mut tenant = self.get_tenant(tenant_id).await?;
        let transition = plan_transition(&tenant, input.is_active)?;
        let now = Utc::now();

        if let Some(name) = input.name {
            tenant.name = Tenant::validate_name(name)?;
        }
        transition.apply(&mut tenant, now);
        tenant.updated_at = now;

        self.repositories.tenants.update_tenant(tenant).await
    }

    /// Soft deletes a tenant. Users, roles and groups under it are left untouched.
    pub async fn soft_delete_tenant(&self, tenant_id: TenantId) -> AppResult<Tenant> {
        let mut tenant = self.get_tenant(tenant_id).await?;
        ensure_deletable(&tenant)?;
        tenant.set_active(false, Utc::now());

        self.repositories.tenants.update_tenant(tenant).await
    }
}
