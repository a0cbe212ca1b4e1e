use std::str::FromStr;

use chrono::{DateTime, Utc};
use keyward_core::{AppError, AssignmentId, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity kinds that may appear at either end of an assignment edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointKind {
    /// A user account.
    User,
    /// A role.
    Role,
    /// A group.
    Group,
    /// A permission.
    Permission,
}

impl EndpointKind {
    /// Returns a stable label for this endpoint kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Role => "role",
            Self::Group => "group",
            Self::Permission => "permission",
        }
    }

    /// Returns whether records of this kind belong to a tenant.
    #[must_use]
    pub fn is_tenant_scoped(&self) -> bool {
        !matches!(self, Self::Permission)
    }
}

/// The six many-to-many relationships managed as assignment edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentKind {
    /// User -> Role.
    UserRole,
    /// User -> Permission (direct grant).
    UserPermission,
    /// Role -> Permission.
    RolePermission,
    /// User -> Group membership.
    UserGroup,
    /// Group -> Role.
    GroupRole,
    /// Group -> Permission.
    GroupPermission,
}

impl AssignmentKind {
    /// Returns a stable storage value for this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserRole => "user_role",
            Self::UserPermission => "user_permission",
            Self::RolePermission => "role_permission",
            Self::UserGroup => "user_group",
            Self::GroupRole => "group_role",
            Self::GroupPermission => "group_permission",
        }
    }

    /// Returns all assignment kinds.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[AssignmentKind] = &[
            AssignmentKind::UserRole,
            AssignmentKind::UserPermission,
            AssignmentKind::RolePermission,
            AssignmentKind::UserGroup,
            AssignmentKind::GroupRole,
            AssignmentKind::GroupPermission,
        ];

        ALL
    }

    /// Entity kind on the source side of the edge.
    #[must_use]
    pub fn source(&self) -> EndpointKind {
        match self {
            Self::UserRole | Self::UserPermission | Self::UserGroup => EndpointKind::User,
            Self::RolePermission => EndpointKind::Role,
            Self::GroupRole | Self::GroupPermission => EndpointKind::Group,
        }
    }

    /// Entity kind on the target side of the edge.
    #[must_use]
    pub fn target(&self) -> EndpointKind {
        match self {
            Self::UserRole | Self::GroupRole => EndpointKind::Role,
            Self::UserPermission | Self::RolePermission | Self::GroupPermission => {
                EndpointKind::Permission
            }
            Self::UserGroup => EndpointKind::Group,
        }
    }

    /// Both endpoints must share a tenant when both are tenant scoped.
    #[must_use]
    pub fn requires_same_tenant(&self) -> bool {
        self.source().is_tenant_scoped() && self.target().is_tenant_scoped()
    }
}

impl std::fmt::Display for AssignmentKind {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for AssignmentKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user_role" => Ok(Self::UserRole),
            "user_permission" => Ok(Self::UserPermission),
            "role_permission" => Ok(Self::RolePermission),
            "user_group" => Ok(Self::UserGroup),
            "group_role" => Ok(Self::GroupRole),
            "group_permission" => Ok(Self::GroupPermission),
            _ => Err(AppError::Validation(format!(
                "unknown assignment kind '{value}'"
            ))),
        }
    }
}

/// One assignment edge row. At most one row exists per (kind, source, target).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Edge identifier, stable across removal and reactivation.
    pub assignment_id: AssignmentId,
    /// Relationship kind.
    pub kind: AssignmentKind,
    /// Identifier of the source endpoint.
    pub source_id: Uuid,
    /// Identifier of the target endpoint.
    pub target_id: Uuid,
    /// Soft-removal flag.
    pub is_active: bool,
    /// Time of the latest assignment or reactivation.
    pub assigned_at: DateTime<Utc>,
    /// User who performed the latest assignment, when known.
    pub assigned_by: Option<UserId>,
}

impl Assignment {
    /// Creates a new active edge stamped with the current time.
    #[must_use]
    pub fn new(
        kind: AssignmentKind,
        source_id: Uuid,
        target_id: Uuid,
        assigned_by: Option<UserId>,
    ) -> Self {
        Self {
            assignment_id: AssignmentId::new(),
            kind,
            source_id,
            target_id,
            is_active: true,
            assigned_at: Utc::now(),
            assigned_by,
        }
    }

    /// Marks the edge active again and refreshes its assignment metadata.
    pub fn reactivate(&mut self, assigned_by: Option<UserId>, at: DateTime<Utc>) {
        self.is_active = true;
        self.assigned_by = assigned_by;
        self.assigned_at = at;
    }
}
