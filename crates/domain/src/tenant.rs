use chrono::{DateTime, Utc};
use keyward_core::{AppResult, NonEmptyString, TenantId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lifecycle::Lifecycle;

/// Maximum length, in characters, of a tenant name.
pub const TENANT_NAME_MAX_LENGTH: usize = 255;

/// Isolation boundary owning users, roles and groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// Stable tenant identifier.
    pub tenant_id: TenantId,
    /// Globally unique tenant name.
    pub name: NonEmptyString,
    /// Soft-delete flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    /// Creates a new active tenant.
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let now = Utc::now();
        Ok(Self {
            tenant_id: TenantId::new(),
            name: Self::validate_name(name)?,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validates a tenant name.
    pub fn validate_name(name: impl Into<String>) -> AppResult<NonEmptyString> {
        NonEmptyString::bounded("tenant name", name, TENANT_NAME_MAX_LENGTH)
    }
}

impl Lifecycle for Tenant {
    const LABEL: &'static str = "tenant";

    fn record_id(&self) -> Uuid {
        self.tenant_id.as_uuid()
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, is_active: bool, at: DateTime<Utc>) {
        self.is_active = is_active;
        self.updated_at = at;
    }
}
