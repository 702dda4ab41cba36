//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod account;
mod catalog;
mod instance;
mod links;
mod liveness;
mod role;
mod user;

pub use account::{Account, Subdomain};
pub use catalog::{Dashboard, DashboardId, Report, ReportId, Workspace, WorkspaceId};
pub use instance::{Instance, InstanceId};
pub use links::{AccountInstanceLink, DashboardGrant, RoleAssignment, WorkspaceEnablement};
pub use liveness::Liveness;
pub use role::{AccessRole, RoleName, validate_role_assignment};
pub use user::UserRecord;
