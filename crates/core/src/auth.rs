use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Unique identifier for a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    /// Creates a user identifier from a stored key.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying key value.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Authenticated caller passed in by the external token-verification layer.
///
/// Carries only the user id. Roles and tenant scope are never trusted from
/// the caller; the access resolver re-derives both from the store on every
/// check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    user_id: UserId,
}

impl CallerIdentity {
    /// Creates a caller identity from a verified user id.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Returns the verified user id.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}
