//! Bridge rows connecting tenants to instances, workspaces and dashboards.
//!
//! These carry no behavior beyond liveness; they exist so adapters and tests
//! share one representation of the link tables. Parents are never cascade
//! deleted, so a live bridge row grants nothing once any ancestor dies.

use chrono::{DateTime, Utc};
use glasspane_core::{AccountId, UserId};
use serde::{Deserialize, Serialize};

use crate::catalog::{DashboardId, WorkspaceId};
use crate::instance::InstanceId;
use crate::liveness::Liveness;
use crate::role::RoleName;

/// Account↔Instance link: the tenant's data is served by this backend.
/// Unique per (account, instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInstanceLink {
    /// Linked account.
    pub account_id: AccountId,
    /// Linked instance.
    pub instance_id: InstanceId,
    /// Active flag.
    pub active: bool,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Liveness for AccountInstanceLink {
    fn active(&self) -> bool {
        self.active
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

/// AccountInstance↔Workspace link: the workspace is enabled for this
/// tenant-instance pairing. The pivot root admins use to control which
/// workspaces a tenant may use at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceEnablement {
    /// Account side of the enabled pairing.
    pub account_id: AccountId,
    /// Instance side of the enabled pairing.
    pub instance_id: InstanceId,
    /// Enabled workspace.
    pub workspace_id: WorkspaceId,
    /// Active flag.
    pub active: bool,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Liveness for WorkspaceEnablement {
    fn active(&self) -> bool {
        self.active
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

/// Explicit dashboard grant to a single user. The only mechanism by which
/// a regular (non-admin) user gains dashboard visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardGrant {
    /// Grantee.
    pub user_id: UserId,
    /// Granted dashboard.
    pub dashboard_id: DashboardId,
    /// Active flag.
    pub active: bool,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Liveness for DashboardGrant {
    fn active(&self) -> bool {
        self.active
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

/// User↔Role bridge row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    /// Assigned user.
    pub user_id: UserId,
    /// Assigned role.
    pub role: RoleName,
    /// Active flag.
    pub active: bool,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Liveness for RoleAssignment {
    fn active(&self) -> bool {
        self.active
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}
