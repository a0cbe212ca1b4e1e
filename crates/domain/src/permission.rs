use chrono::{DateTime, Utc};
use keyward_core::{AppResult, NonEmptyString, PermissionId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lifecycle::Lifecycle;
use crate::{NAME_MAX_LENGTH, normalize_description};

/// Maximum length, in characters, of a permission action.
pub const ACTION_MAX_LENGTH: usize = 50;

/// Tenant-agnostic grant of one action on one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Stable permission identifier.
    pub permission_id: PermissionId,
    /// Globally unique permission name.
    pub name: NonEmptyString,
    /// Guarded resource, for example `users`.
    pub resource: NonEmptyString,
    /// Allowed action on the resource, for example `read`.
    pub action: NonEmptyString,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Soft-delete flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Permission {
    /// Creates a new active permission.
    pub fn new(
        name: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
        description: Option<String>,
    ) -> AppResult<Self> {
        let now = Utc::now();
        Ok(Self {
            permission_id: PermissionId::new(),
            name: Self::validate_name(name)?,
            resource: Self::validate_resource(resource)?,
            action: Self::validate_action(action)?,
            description: normalize_description(description),
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validates a permission name.
    pub fn validate_name(name: impl Into<String>) -> AppResult<NonEmptyString> {
        NonEmptyString::bounded("permission name", name, NAME_MAX_LENGTH)
    }

    /// Validates a permission resource.
    pub fn validate_resource(resource: impl Into<String>) -> AppResult<NonEmptyString> {
        NonEmptyString::bounded("resource", resource, NAME_MAX_LENGTH)
    }

    /// Validates a permission action.
    pub fn validate_action(action: impl Into<String>) -> AppResult<NonEmptyString> {
        NonEmptyString::bounded("action", action, ACTION_MAX_LENGTH)
    }

    /// Returns whether this permission grants `action` on `resource`.
    #[must_use]
    pub fn grants(&self, resource: &str, action: &str) -> bool {
        self.resource.as_str() == resource && self.action.as_str() == action
    }
}

impl Lifecycle for Permission {
    const LABEL: &'static str = "permission";

    fn record_id(&self) -> Uuid {
        self.permission_id.as_uuid()
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, is_active: bool, at: DateTime<Utc>) {
        self.is_active = is_active;
        self.updated_at = at;
    }
}
