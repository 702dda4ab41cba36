//! Application services and ports.

#![forbid(unsafe_code)]

mod access_ports;
mod access_service;

pub use access_ports::{AccessRepository, DashboardContext, GrantRepository};
pub use access_service::{AccessService, TenantScope};
pub use glasspane_domain::validate_role_assignment;
