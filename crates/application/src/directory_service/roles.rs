use chrono::Utc;

use keyward_core::{AppError, AppResult, RoleId};
use keyward_domain::{Lifecycle, Role, ensure_deletable, normalize_description, plan_transition};

use crate::directory_ports::{CreateRoleInput, TenantScopedQuery, UpdateRoleInput};

use super::DirectoryService;

impl DirectoryService {
    /// Creates an active role inside an active tenant.
    pub async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role> {
        let role = Role::new(
            input.tenant_id,
            input.name,
            input.description,
            input.is_system_role,
        )?;
        self.require_active_tenant(role.tenant_id).await?;

        self.repositories.roles.insert_role(role).await
    }

    /// Returns a role by identifier, including soft-deleted roles.
    pub async fn get_role(&self, role_id: RoleId) -> AppResult<Role> {
        self.repositories
            .roles
            .find_role(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))
    }

    /// Lists roles.
    pub async fn list_roles(&self, query: TenantScopedQuery) -> AppResult<Vec<Role>> {
        self.repositories.roles.list_roles(query).await
    }

    /// Applies a partial update. System roles reject deactivation.
    pub async fn update_role(&self, role_id: RoleId, input: UpdateRoleInput) -> AppResult<Role> {
        let mut role = self.get_role(role_id).await?;
        let transition = plan_transition(&role, input.is_active)?;
        let now = Utc::now();

        if let Some(name) = input.name {
            role.name = Role::validate_name(name)?;
        }
        if input.description.is_some() {
            role.description = normalize_description(input.description);
        }
        transition.apply(&mut role, now);
        role.updated_at = now;

        self.repositories.roles.update_role(role).await
    }

    /// Soft deletes a role. System roles are rejected with `Forbidden`.
    pub async fn soft_delete_role(&self, role_id: RoleId) -> AppResult<Role> {
        let mut role = self.get_role(role_id).await?;
        ensure_deletable(&role)?;
        role.set_active(false, Utc::now());

        self.repositories.roles.update_role(role).await
    }
}
