use chrono::{DateTime, Utc};
use keyward_core::{AppResult, NonEmptyString, RoleId, TenantId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lifecycle::Lifecycle;
use crate::{NAME_MAX_LENGTH, normalize_description};

/// Named bundle of permissions within one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Stable role identifier.
    pub role_id: RoleId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Role name, unique within the tenant.
    pub name: NonEmptyString,
    /// Optional free-text description.
    pub description: Option<String>,
    /// System roles can never be deactivated or deleted. Fixed at creation.
    pub is_system_role: bool,
    /// Soft-delete flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Creates a new active role.
    pub fn new(
        tenant_id: TenantId,
        name: impl Into<String>,
        description: Option<String>,
        is_system_role: bool,
    ) -> AppResult<Self> {
        let now = Utc::now();
        Ok(Self {
            role_id: RoleId::new(),
            tenant_id,
            name: Self::validate_name(name)?,
            description: normalize_description(description),
            is_system_role,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validates a role name.
    pub fn validate_name(name: impl Into<String>) -> AppResult<NonEmptyString> {
        NonEmptyString::bounded("role name", name, NAME_MAX_LENGTH)
    }
}

impl Lifecycle for Role {
    const LABEL: &'static str = "role";

    fn record_id(&self) -> Uuid {
        self.role_id.as_uuid()
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, is_active: bool, at: DateTime<Utc>) {
        self.is_active = is_active;
        self.updated_at = at;
    }

    fn is_protected(&self) -> bool {
        self.is_system_role
    }
}

#[cfg(test)]
mod tests {
    use keyward_core::TenantId;

    use super::Role;

    #[test]
    fn blank_description_is_dropped() {
        let role = Role::new(TenantId::new(), "auditor", Some("   ".to_owned()), false)
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(role.description, None);
        assert!(role.is_active);
    }

    #[test]
    fn role_name_over_limit_is_rejected() {
        let result = Role::new(TenantId::new(), "r".repeat(101), None, false);
        assert!(result.is_err());
    }
}
