//! Shared primitives for all Rust crates in Keyward.

#![forbid(unsafe_code)]

/// Strongly typed record identifiers.
pub mod ids;
/// Offset pagination bounds shared by list queries.
pub mod pagination;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use ids::{AssignmentId, GroupId, PermissionId, RoleId, TenantId, UserId};
pub use pagination::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, PageRequest};

/// Result type used across Keyward crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
///
/// Surrounding whitespace is trimmed before storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Creates a validated non-empty string bounded by `max_chars` characters.
    pub fn bounded(field: &str, value: impl Into<String>, max_chars: usize) -> AppResult<Self> {
        let value = Self::new(value)
            .map_err(|_| AppError::Validation(format!("{field} must not be empty")))?;

        if value.0.chars().count() > max_chars {
            return Err(AppError::Validation(format!(
                "{field} must not exceed {max_chars} characters"
            )));
        }

        Ok(value)
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::fmt::Display for NonEmptyString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist or is inactive where active state is required.
    #[error("not found: {0}")]
    NotFound(String),

    /// Endpoints of an assignment belong to different tenants.
    #[error("tenant mismatch: {0}")]
    TenantMismatch(String),

    /// An active assignment already exists for the requested pair.
    #[error("already assigned: {0}")]
    AlreadyAssigned(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Operation is blocked by lifecycle or authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::{AppError, NonEmptyString};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(result.is_err());
    }

    #[test]
    fn non_empty_string_trims_value() {
        let value = NonEmptyString::new("  admin ").unwrap_or_else(|_| unreachable!());
        assert_eq!(value.as_str(), "admin");
    }

    #[test]
    fn bounded_string_rejects_long_values() {
        let result = NonEmptyString::bounded("role name", "x".repeat(101), 100);
        assert!(matches!(result, Err(AppError::Validation(message)) if message.contains("100")));

        let accepted = NonEmptyString::bounded("role name", "x".repeat(100), 100);
        assert!(accepted.is_ok());
    }

    #[test]
    fn bounded_string_names_the_field_when_empty() {
        let result = NonEmptyString::bounded("group name", " ", 100);
        assert!(
            matches!(result, Err(AppError::Validation(message)) if message == "group name must not be empty")
        );
    }
}
