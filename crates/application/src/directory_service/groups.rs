use chrono::Utc;

use keyward_core::{AppError, AppResult, GroupId};
use keyward_domain::{Group, Lifecycle, ensure_deletable, normalize_description, plan_transition};

use crate::directory_ports::{CreateGroupInput, TenantScopedQuery, UpdateGroupInput};

use super::DirectoryService;

impl DirectoryService {
    /// Creates an active group inside an active tenant.
    pub async fn create_group(&self, input: CreateGroupInput) -> AppResult<Group> {
        let group = Group::new(input.tenant_id, input.name, input.description)?;
        self.require_active_tenant(group.tenant_id).await?;

        self.repositories.groups.insert_group(group).await
    }

    /// Returns a group by identifier, including soft-deleted groups.
    pub async fn get_group(&self, group_id: GroupId) -> AppResult<Group> {
        self.repositories
            .groups
            .find_group(group_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("group '{group_id}' does not exist")))
    }

    /// Lists groups.
    pub async fn list_groups(&self, query: TenantScopedQuery) -> AppResult<Vec<Group>> {
        self.repositories.groups.list_groups(query).await
    }

    /// Applies a partial update.
    pub async fn update_group(
        &self,
        group_id: GroupId,
        input: UpdateGroupInput,
    ) -> AppResult<Group> {
        let mut group = self.get_group(group_id).await?;
        let transition = plan_transition(&group, input.is_active)?;
        let now = Utc::now();

        if let Some(name) = input.name {
            group.name = Group::validate_name(name)?;
        }
        if input.description.is_some() {
            group.description = normalize_description(input.description);
        }
        transition.apply(&mut group, now);
        group.updated_at = now;

        self.repositories.groups.update_group(group).await
    }

    /// Soft deletes a group.
    pub async fn soft_delete_group(&self, group_id: GroupId) -> AppResult<Group> {
        let mut group = self.get_group(group_id).await?;
        ensure_deletable(&group)?;
        group.set_active(false, Utc::now());

        self.repositories.groups.update_group(group).await
    }
}
