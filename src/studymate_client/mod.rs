pub mod api;
mod client;
pub mod helpers;
pub mod models;

use async_trait::async_trait;

use crate::types::DashboardError;

use api::{CountResponse, OnlineStudentsResponse, PingResponse, StatsResponse};

pub use client::StudyMateClient;
pub use models::{CardKind, CountBucket, LabelTable, OnlineStudent, StatsSnapshot};

#[cfg(test)]
use mockall::automock;

/// Resources exposed through a count-only endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountResource {
    Subjects,
    Notes,
}

/// The StudyMate study API as consumed by the dashboard.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StudyMateApi: Send + Sync + 'static {
    /// Aggregate counters for every dashboard card.
    async fn fetch_stats(&self) -> Result<StatsResponse, DashboardError>;

    /// Students active in the last few minutes.
    async fn fetch_online_students(&self) -> Result<OnlineStudentsResponse, DashboardError>;

    async fn fetch_count(&self, resource: CountResource) -> Result<CountResponse, DashboardError>;

    /// Refresh the current user's activity timestamp.
    async fn ping(&self) -> Result<PingResponse, DashboardError>;
}
