//! User domain types and validation rules.

use chrono::{DateTime, Utc};
use keyward_core::{AppError, AppResult, NonEmptyString, TenantId, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::NAME_MAX_LENGTH;
use crate::lifecycle::Lifecycle;

/// Maximum length of an email address (RFC 5321 path limit).
const EMAIL_MAX_LENGTH: usize = 254;

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Performs basic structural validation: non-empty, contains exactly one `@`,
    /// local part and domain are non-empty, domain contains at least one `.`.
    /// The stored value is lowercased.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let normalized = value.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if domain.contains('@') {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if normalized.chars().count() > EMAIL_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "email address must not exceed {EMAIL_MAX_LENGTH} characters"
            )));
        }

        Ok(Self(normalized))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Person account inside one tenant. Credential material lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable user identifier.
    pub user_id: UserId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Email address, unique within the tenant.
    pub email: EmailAddress,
    /// Given name.
    pub first_name: NonEmptyString,
    /// Family name.
    pub last_name: NonEmptyString,
    /// Soft-delete flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user.
    pub fn new(
        tenant_id: TenantId,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> AppResult<Self> {
        let now = Utc::now();
        Ok(Self {
            user_id: UserId::new(),
            tenant_id,
            email: EmailAddress::new(email)?,
            first_name: Self::validate_first_name(first_name)?,
            last_name: Self::validate_last_name(last_name)?,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validates a given name.
    pub fn validate_first_name(value: impl Into<String>) -> AppResult<NonEmptyString> {
        NonEmptyString::bounded("first name", value, NAME_MAX_LENGTH)
    }

    /// Validates a family name.
    pub fn validate_last_name(value: impl Into<String>) -> AppResult<NonEmptyString> {
        NonEmptyString::bounded("last name", value, NAME_MAX_LENGTH)
    }
}

impl Lifecycle for User {
    const LABEL: &'static str = "user";

    fn record_id(&self) -> Uuid {
        self.user_id.as_uuid()
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, is_active: bool, at: DateTime<Utc>) {
        self.is_active = is_active;
        self.updated_at = at;
    }
}

#[cfg(test)]
mod tests {
    use keyward_core::TenantId;

    use super::{EmailAddress, User};

    #[test]
    fn valid_email_is_accepted() {
        let email = EmailAddress::new("USER@Example.COM");
        assert!(email.is_ok());
        assert_eq!(
            email.unwrap_or_else(|_| panic!("test")).as_str(),
            "user@example.com"
        );
    }

    #[test]
    fn email_without_at_is_rejected() {
        assert!(EmailAddress::new("noatsign").is_err());
    }

    #[test]
    fn email_with_two_at_signs_is_rejected() {
        assert!(EmailAddress::new("a@b@example.com").is_err());
    }

    #[test]
    fn email_without_domain_dot_is_rejected() {
        assert!(EmailAddress::new("user@nodot").is_err());
    }

    #[test]
    fn empty_email_is_rejected() {
        assert!(EmailAddress::new("").is_err());
    }

    #[test]
    fn new_user_requires_names() {
        assert!(User::new(TenantId::new(), "ada@example.com", "Ada", "Lovelace").is_ok());
        assert!(User::new(TenantId::new(), "ada@example.com", " ", "Lovelace").is_err());
    }
}
