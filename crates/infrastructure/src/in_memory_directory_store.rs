use std::collections::HashMap;

use tokio::sync::RwLock;

use keyward_core::{GroupId, PermissionId, RoleId, TenantId, UserId};
use keyward_domain::{Assignment, AssignmentKind, Group, Permission, Role, Tenant, User};
use uuid::Uuid;

mod assignments;
mod entities;

#[cfg(test)]
mod tests;

/// In-memory implementation of every directory and assignment port.
///
/// Uniqueness rules are checked while holding the write lock of the affected
/// map, so concurrent inserts of the same key cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryDirectoryStore {
    tenants: RwLock<HashMap<TenantId, Tenant>>,
    users: RwLock<HashMap<UserId, User>>,
    roles: RwLock<HashMap<RoleId, Role>>,
    groups: RwLock<HashMap<GroupId, Group>>,
    permissions: RwLock<HashMap<PermissionId, Permission>>,
    assignments: RwLock<HashMap<(AssignmentKind, Uuid, Uuid), Assignment>>,
}

impl InMemoryDirectoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
