use chrono::Utc;

use keyward_core::{AppError, AppResult, UserId};
use keyward_domain::{EmailAddress, Lifecycle, User, ensure_deletable, plan_transition};

use crate::directory_ports::{CreateUserInput, TenantScopedQuery, UpdateUserInput};

use super::DirectoryService;

impl DirectoryService {
    /// Creates an active user inside an active tenant.
    pub async fn create_user(&self, input: CreateUserInput) -> AppResult<User> {
        let user = User::new(
            input.tenant_id,
            input.email,
            input.first_name,
            input.last_name,
        )?;
        self.require_active_tenant(user.tenant_id).await?;

        self.repositories.users.insert_user(user).await
    }

    /// Returns a user by identifier, including soft-deleted users.
    pub async fn get_user(&self, user_id: UserId) -> AppResult<User> {
        self.repositories
            .users
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))
    }

    /// Lists users.
    pub async fn list_users(&self, query: TenantScopedQuery) -> AppResult<Vec<User>> {
        self.repositories.users.list_users(query).await
    }

    /// Applies a partial update.
    pub async fn update_user(&self, user_id: UserId, input: UpdateUserInput) -> AppResult<User> {
        let mut user = self.get_user(user_id).await?;
        let transition = plan_transition(&user, input.is_active)?;
        let now = Utc::now();

        if let Some(email) = input.email {
            user.email = EmailAddress::new(email)?;
        }
        if let Some(first_name) = input.first_name {
            user.first_name = User::validate_first_name(first_name)?;
        }
        if let Some(last_name) = input.last_name {
            user.last_name = User::validate_last_name(last_name)?;
        }
        transition.apply(&mut user, now);
        user.updated_at = now;

        self.repositories.users.update_user(user).await
    }

    /// Soft deletes a user. Existing assignment edges stay in place.
    pub async fn soft_delete_user(&self, user_id: UserId) -> AppResult<User> {
        let mut user = self.get_user(user_id).await?;
        ensure_deletable(&user)?;
        user.set_active(false, Utc::now());

        self.repositories.users.update_user(user).await
    }
}
