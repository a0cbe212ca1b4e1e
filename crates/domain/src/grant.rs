use std::collections::BTreeSet;

use keyward_core::{GroupId, RoleId};
use serde::{Deserialize, Serialize};

use crate::Permission;

/// Path through which a user receives a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GrantSource {
    /// Direct user -> permission edge.
    Direct,
    /// User -> role -> permission.
    Role {
        /// Role carrying the permission.
        role_id: RoleId,
    },
    /// User -> group -> permission.
    Group {
        /// Group carrying the permission.
        group_id: GroupId,
    },
    /// User -> group -> role -> permission.
    GroupRole {
        /// Group the user belongs to.
        group_id: GroupId,
        /// Role assigned to the group.
        role_id: RoleId,
    },
}

/// A permission in a user's effective set together with every path that grants it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectivePermission {
    /// The granted permission.
    pub permission: Permission,
    /// Distinct grant paths, ordered.
    pub sources: BTreeSet<GrantSource>,
}
