use keyward_domain::{EffectivePermission, GrantSource, Permission};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PermissionResponse;

/// Query string for the effective permission listing.
#[derive(Debug, Default, Deserialize)]
pub struct EffectivePermissionsParams {
    #[serde(default)]
    pub explain: bool,
}

/// One permission in a user's effective set.
#[derive(Debug, Serialize)]
pub struct EffectivePermissionResponse {
    #[serde(flatten)]
    pub permission: PermissionResponse,
    /// Grant paths, present only when an explanation was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<GrantSource>>,
}

impl From<Permission> for EffectivePermissionResponse {
    fn from(value: Permission) -> Self {
        Self {
            permission: PermissionResponse::from(value),
            sources: None,
        }
    }
}

impl From<EffectivePermission> for EffectivePermissionResponse {
    fn from(value: EffectivePermission) -> Self {
        Self {
            permission: PermissionResponse::from(value.permission),
            sources: Some(value.sources.into_iter().collect()),
        }
    }
}

/// Effective permission set of one user.
#[derive(Debug, Serialize)]
pub struct EffectivePermissionsResponse {
    pub user_id: Uuid,
    pub permissions: Vec<EffectivePermissionResponse>,
}

/// Query string for a single authorization check.
#[derive(Debug, Deserialize)]
pub struct AuthorizeParams {
    pub resource: String,
    pub action: String,
}

/// Outcome of an authorization check.
#[derive(Debug, Serialize)]
pub struct AuthorizationResponse {
    pub user_id: Uuid,
    pub resource: String,
    pub action: String,
    pub allowed: bool,
}
