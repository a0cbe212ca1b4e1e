use chrono::{DateTime, Utc};
use keyward_core::{AppResult, GroupId, NonEmptyString, TenantId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lifecycle::Lifecycle;
use crate::{NAME_MAX_LENGTH, normalize_description};

/// Collection of users that receives roles and permissions as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Stable group identifier.
    pub group_id: GroupId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Group name, unique within the tenant.
    pub name: NonEmptyString,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Soft-delete flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Creates a new active group.
    pub fn new(
        tenant_id: TenantId,
        name: impl Into<String>,
        description: Option<String>,
    ) -> AppResult<Self> {
        let now = Utc::now();
        Ok(Self {
            group_id: GroupId::new(),
            tenant_id,
            name: Self::validate_name(name)?,
            description: normalize_description(description),
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validates a group name.
    pub fn validate_name(name: impl Into<String>) -> AppResult<NonEmptyString> {
        NonEmptyString::bounded("group name", name, NAME_MAX_LENGTH)
    }
}

impl Lifecycle for Group {
    const LABEL: &'static str = "group";

    fn record_id(&self) -> Uuid {
        self.group_id.as_uuid()
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, is_active: bool, at: DateTime<Utc>) {
        self.is_active = is_active;
        self.updated_at = at;
    }
}
