pub mod config;
pub mod dashboard;
pub mod page;
pub mod studymate_client;
pub mod types;
pub mod validation;

pub use config::Config;
pub use dashboard::{Action, LiveDashboard};
pub use types::DashboardError;
