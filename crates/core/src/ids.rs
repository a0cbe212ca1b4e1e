use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppError;

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID value.
            #[must_use]
            pub fn from_uuid(value: Uuid) -> Self {
                Self(value)
            }

            /// Returns the underlying UUID value.
            #[must_use]
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(value.trim()).map(Self).map_err(|error| {
                    AppError::Validation(format!(
                        concat!("invalid ", $label, " identifier '{}': {}"),
                        value, error
                    ))
                })
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

uuid_identifier!(
    /// Tenant identifier used as the partition key for tenant-scoped records.
    TenantId,
    "tenant"
);
uuid_identifier!(
    /// Unique identifier for a user record.
    UserId,
    "user"
);
uuid_identifier!(
    /// Unique identifier for a role record.
    RoleId,
    "role"
);
uuid_identifier!(
    /// Unique identifier for a group record.
    GroupId,
    "group"
);
uuid_identifier!(
    /// Unique identifier for a permission record.
    PermissionId,
    "permission"
);
uuid_identifier!(
    /// Unique identifier for an assignment edge row.
    AssignmentId,
    "assignment"
);

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{RoleId, TenantId};

    #[test]
    fn tenant_id_formats_as_uuid() {
        let tenant_id = TenantId::new();
        assert_eq!(tenant_id.to_string().len(), 36);
    }

    #[test]
    fn identifier_parses_its_display_value() {
        let role_id = RoleId::new();
        let parsed = RoleId::from_str(role_id.to_string().as_str());
        assert!(matches!(parsed, Ok(value) if value == role_id));
    }

    #[test]
    fn malformed_identifier_is_a_validation_error() {
        let parsed = RoleId::from_str("not-a-uuid");
        assert!(matches!(
            parsed,
            Err(crate::AppError::Validation(message)) if message.starts_with("invalid role identifier")
        ));
    }
}
