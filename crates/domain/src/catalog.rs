//! Workspace, report and dashboard catalog entities.
//!
//! Workspaces are global groupings; a tenant only sees one through an
//! explicit enablement link (see [`crate::WorkspaceEnablement`]). Reports
//! belong to exactly one workspace and dashboards to exactly one report.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use glasspane_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::liveness::Liveness;

/// Unique identifier for a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkspaceId(i64);

impl WorkspaceId {
    /// Creates a workspace identifier from a stored key.
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

impl Display for WorkspaceId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Named grouping of reports, shared across tenants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    id: WorkspaceId,
    name: NonEmptyString,
    active: bool,
    deleted_at: Option<DateTime<Utc>>,
}

impl Workspace {
    /// Creates a validated workspace record.
    pub fn new(
        id: WorkspaceId,
        name: impl Into<String>,
        active: bool,
        deleted_at: Option<DateTime<Utc>>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            active,
            deleted_at,
        })
    }

    /// Returns the workspace id.
    #[must_use]
    pub fn id(&self) -> WorkspaceId {
        self.id
    }

    /// Returns the workspace name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }
}

impl Liveness for Workspace {
    fn active(&self) -> bool {
        self.active
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

/// Unique identifier for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReportId(i64);

impl ReportId {
    /// Creates a report identifier from a stored key.
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

impl Display for ReportId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Report grouping dashboards inside one workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    id: ReportId,
    workspace_id: WorkspaceId,
    name: NonEmptyString,
    active: bool,
    deleted_at: Option<DateTime<Utc>>,
}

impl Report {
    /// Creates a validated report record.
    pub fn new(
        id: ReportId,
        workspace_id: WorkspaceId,
        name: impl Into<String>,
        active: bool,
        deleted_at: Option<DateTime<Utc>>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            workspace_id,
            name: NonEmptyString::new(name)?,
            active,
            deleted_at,
        })
    }

    /// Returns the report id.
    #[must_use]
    pub fn id(&self) -> ReportId {
        self.id
    }

    /// Returns the owning workspace id.
    #[must_use]
    pub fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the report name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }
}

impl Liveness for Report {
    fn active(&self) -> bool {
        self.active
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

/// Unique identifier for a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DashboardId(i64);

impl DashboardId {
    /// Creates a dashboard identifier from a stored key.
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

impl Display for DashboardId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Dashboard record pointing at an instance-side dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    id: DashboardId,
    report_id: ReportId,
    name: NonEmptyString,
    external_dashboard_id: NonEmptyString,
    embed_id: Option<NonEmptyString>,
    active: bool,
    deleted_at: Option<DateTime<Utc>>,
}

impl Dashboard {
    /// Creates a validated dashboard record.
    pub fn new(
        id: DashboardId,
        report_id: ReportId,
        name: impl Into<String>,
        external_dashboard_id: impl Into<String>,
        embed_id: Option<String>,
        active: bool,
        deleted_at: Option<DateTime<Utc>>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            report_id,
            name: NonEmptyString::new(name)?,
            external_dashboard_id: NonEmptyString::new(external_dashboard_id)?,
            embed_id: embed_id.map(NonEmptyString::new).transpose()?,
            active,
            deleted_at,
        })
    }

    /// Returns the dashboard id.
    #[must_use]
    pub fn id(&self) -> DashboardId {
        self.id
    }

    /// Returns the owning report id.
    #[must_use]
    pub fn report_id(&self) -> ReportId {
        self.report_id
    }

    /// Returns the dashboard name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the instance-side dashboard identifier.
    #[must_use]
    pub fn external_dashboard_id(&self) -> &NonEmptyString {
        &self.external_dashboard_id
    }

    /// Returns the embed identifier, if one was provisioned.
    #[must_use]
    pub fn embed_id(&self) -> Option<&NonEmptyString> {
        self.embed_id.as_ref()
    }
}

impl Liveness for Dashboard {
    fn active(&self) -> bool {
        self.active
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

#[cfg(test)]
mod tests {
    use super::{Dashboard, DashboardId, ReportId};

    #[test]
    fn dashboard_rejects_empty_external_id() {
        let dashboard = Dashboard::new(
            DashboardId::new(1),
            ReportId::new(1),
            "Revenue",
            "",
            None,
            true,
            None,
        );
        assert!(dashboard.is_err());
    }

    #[test]
    fn dashboard_embed_id_is_optional() {
        let dashboard = Dashboard::new(
            DashboardId::new(1),
            ReportId::new(1),
            "Revenue",
            "superset-41",
            None,
            true,
            None,
        );
        assert!(dashboard.is_ok());
    }
}
