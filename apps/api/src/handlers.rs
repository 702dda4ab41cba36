pub mod assignments;
pub mod dashboards;
pub mod health;
