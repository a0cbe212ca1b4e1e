use chrono::Utc;

use keyward_core::{AppError, AppResult, PermissionId};
use keyward_domain::{
    Lifecycle, Permission, ensure_deletable, normalize_description, plan_transition,
};

use crate::directory_ports::{CreatePermissionInput, PermissionQuery, UpdatePermissionInput};

use super::DirectoryService;

impl DirectoryService {
    /// Creates an active permission.
    pub async fn create_permission(&self, input: CreatePermissionInput) -> AppResult<Permission> {
        let permission = Permission::new(
            input.name,
            input.resource,
            input.action,
            input.description,
        )?;
        self.repositories
            .permissions
            .insert_permission(permission)
            .await
    }

    /// Returns a permission by identifier, including soft-deleted permissions.
    pub async fn get_permission(&self, permission_id: PermissionId) -> AppResult<Permission> {
        self.repositories
            .permissions
            .find_permission(permission_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("permission '{permission_id}' does not exist"))
            })
    }

    /// Lists permissions, optionally for one resource.
    pub async fn list_permissions(&self, query: PermissionQuery) -> AppResult<Vec<Permission>> {
        let query = PermissionQuery {
            resource: query
                .resource
                .map(|resource| resource.trim().to_owned())
                .filter(|resource| !resource.is_empty()),
            ..query
        };
        self.repositories.permissions.list_permissions(query).await
    }

    /// Applies a partial update.
    pub async fn update_permission(
        &self,
        permission_id: PermissionId,
        input: UpdatePermissionInput,
    ) -> AppResult<Permission> {
        let mut permission = self.get_permission(permission_id).await?;
        let transition = plan_transition(&permission, input.is_active)?;
        let now = Utc::now();

        if let Some(name) = input.name {
            permission.name = Permission::validate_name(name)?;
        }
        if let Some(resource) = input.resource {
            permission.resource = Permission::validate_resource(resource)?;
        }
        if let Some(action) = input.action {
            permission.action = Permission::validate_action(action)?;
        }
        if input.description.is_some() {
            permission.description = normalize_description(input.description);
        }
        transition.apply(&mut permission, now);
        permission.updated_at = now;

        self.repositories
            .permissions
            .update_permission(permission)
            .await
    }

    /// Soft deletes a permission. Edges pointing at it stop contributing to resolution.
    pub async fn soft_delete_permission(
        &self,
        permission_id: PermissionId,
    ) -> AppResult<Permission> {
        let mut permission = self.get_permission(permission_id).await?;
        ensure_deletable(&permission)?;
        permission.set_active(false, Utc::now());

        self.repositories
            .permissions
            .update_permission(permission)
            .await
    }
}
