use chrono::{DateTime, Utc};
use glasspane_core::{AccountId, AppResult, NonEmptyString, UserId};
use serde::{Deserialize, Serialize};

use crate::liveness::Liveness;

/// Stored user record.
///
/// `account_id` is nullable by design: only root admins carry no account.
/// That pairing is a business rule enforced at role-assignment time (see
/// [`crate::validate_role_assignment`]), not a schema constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    id: UserId,
    account_id: Option<AccountId>,
    email: NonEmptyString,
    active: bool,
    deleted_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Creates a validated user record.
    pub fn new(
        id: UserId,
        account_id: Option<AccountId>,
        email: impl Into<String>,
        active: bool,
        deleted_at: Option<DateTime<Utc>>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            account_id,
            email: NonEmptyString::new(email)?,
            active,
            deleted_at,
        })
    }

    /// Returns the user id.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the owning account, if the user belongs to a tenant.
    #[must_use]
    pub fn account_id(&self) -> Option<AccountId> {
        self.account_id
    }

    /// Returns the login email.
    #[must_use]
    pub fn email(&self) -> &NonEmptyString {
        &self.email
    }
}

impl Liveness for UserRecord {
    fn active(&self) -> bool {
        self.active
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

#[cfg(test)]
mod tests {
    use glasspane_core::{AccountId, UserId};

    use crate::Liveness;

    use super::UserRecord;

    #[test]
    fn user_record_rejects_empty_email() {
        let record = UserRecord::new(UserId::new(1), Some(AccountId::new(1)), " ", true, None);
        assert!(record.is_err());
    }

    #[test]
    fn inactive_user_is_not_live() {
        let record = UserRecord::new(UserId::new(1), None, "root@glasspane.io", false, None)
            .unwrap_or_else(|_| unreachable!());
        assert!(!record.is_live());
    }
}
