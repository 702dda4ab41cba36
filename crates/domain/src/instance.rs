use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use glasspane_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::liveness::Liveness;

/// Unique identifier for an analytics backend instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(i64);

impl InstanceId {
    /// Creates an instance identifier from a stored key.
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

impl Display for InstanceId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// External analytics backend serving one or more tenants.
///
/// The service credential itself lives in the secrets layer; the record only
/// carries a reference to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    id: InstanceId,
    name: NonEmptyString,
    base_url: Url,
    credential_ref: NonEmptyString,
    active: bool,
    deleted_at: Option<DateTime<Utc>>,
}

impl Instance {
    /// Creates a validated instance record.
    pub fn new(
        id: InstanceId,
        name: impl Into<String>,
        base_url: impl AsRef<str>,
        credential_ref: impl Into<String>,
        active: bool,
        deleted_at: Option<DateTime<Utc>>,
    ) -> AppResult<Self> {
        let base_url = Url::parse(base_url.as_ref())
            .map_err(|error| AppError::Validation(format!("invalid instance base url: {error}")))?;

        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            base_url,
            credential_ref: NonEmptyString::new(credential_ref)?,
            active,
            deleted_at,
        })
    }

    /// Returns the instance id.
    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Returns the instance display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the service credential reference.
    #[must_use]
    pub fn credential_ref(&self) -> &NonEmptyString {
        &self.credential_ref
    }
}

impl Liveness for Instance {
    fn active(&self) -> bool {
        self.active
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

#[cfg(test)]
mod tests {
    use super::{Instance, InstanceId};

    #[test]
    fn instance_rejects_malformed_base_url() {
        let instance = Instance::new(
            InstanceId::new(1),
            "Primary",
            "not a url",
            "vault:superset/primary",
            true,
            None,
        );
        assert!(instance.is_err());
    }

    #[test]
    fn instance_accepts_https_base_url() {
        let instance = Instance::new(
            InstanceId::new(1),
            "Primary",
            "https://superset.internal.example.com",
            "vault:superset/primary",
            true,
            None,
        );
        assert!(instance.is_ok());
    }
}
