use chrono::{DateTime, Utc};
use glasspane_core::{AccountId, AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::liveness::Liveness;

/// Validated tenant subdomain: lowercase ASCII letters, digits and hyphens,
/// never starting or ending with a hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subdomain(String);

impl Subdomain {
    /// Creates a validated subdomain.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into().trim().to_lowercase();

        if value.is_empty() {
            return Err(AppError::Validation(
                "subdomain must not be empty".to_owned(),
            ));
        }

        if value.len() > 63 {
            return Err(AppError::Validation(
                "subdomain must not exceed 63 characters".to_owned(),
            ));
        }

        if value.starts_with('-') || value.ends_with('-') {
            return Err(AppError::Validation(
                "subdomain must not start or end with a hyphen".to_owned(),
            ));
        }

        if !value
            .chars()
            .all(|character| character.is_ascii_lowercase() || character.is_ascii_digit() || character == '-')
        {
            return Err(AppError::Validation(
                "subdomain may only contain lowercase letters, digits and hyphens".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the validated subdomain string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Tenant account record. Root admins belong to no account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    name: NonEmptyString,
    subdomain: Subdomain,
    active: bool,
    deleted_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Creates a validated account record.
    pub fn new(
        id: AccountId,
        name: impl Into<String>,
        subdomain: impl Into<String>,
        active: bool,
        deleted_at: Option<DateTime<Utc>>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            subdomain: Subdomain::new(subdomain)?,
            active,
            deleted_at,
        })
    }

    /// Returns the account id.
    #[must_use]
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Returns the account display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the unique tenant subdomain.
    #[must_use]
    pub fn subdomain(&self) -> &Subdomain {
        &self.subdomain
    }
}

impl Liveness for Account {
    fn active(&self) -> bool {
        self.active
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

#[cfg(test)]
mod tests {
    use super::Subdomain;

    #[test]
    fn subdomain_is_lowercased() {
        let subdomain = Subdomain::new("Acme").unwrap_or_else(|_| unreachable!());
        assert_eq!(subdomain.as_str(), "acme");
    }

    #[test]
    fn subdomain_rejects_leading_hyphen() {
        assert!(Subdomain::new("-acme").is_err());
    }

    #[test]
    fn subdomain_rejects_invalid_characters() {
        assert!(Subdomain::new("acme.corp").is_err());
    }

    #[test]
    fn subdomain_rejects_empty_value() {
        assert!(Subdomain::new("  ").is_err());
    }
}
