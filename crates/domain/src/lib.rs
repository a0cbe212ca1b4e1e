//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod assignment;
mod grant;
mod group;
mod lifecycle;
mod permission;
mod role;
mod tenant;
mod user;

pub use assignment::{Assignment, AssignmentKind, EndpointKind};
pub use grant::{EffectivePermission, GrantSource};
pub use group::Group;
pub use lifecycle::{
    Lifecycle, LifecycleState, LifecycleTransition, ensure_active, ensure_deletable,
    plan_transition,
};
pub use permission::{ACTION_MAX_LENGTH, Permission};
pub use role::Role;
pub use tenant::{TENANT_NAME_MAX_LENGTH, Tenant};
pub use user::{EmailAddress, User};

/// Maximum length, in characters, of entity names and permission resources.
pub const NAME_MAX_LENGTH: usize = 100;

/// Trims an optional free-text description, treating blank input as absent.
#[must_use]
pub fn normalize_description(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
