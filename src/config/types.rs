use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the live dashboard session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub endpoints: Endpoints,

    #[serde(default)]
    pub listing_pages: ListingPages,

    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,

    #[serde(default = "default_alert_animation_ms")]
    pub alert_animation_ms: u64,

    /// Heartbeat interval for the `ping/` endpoint; no heartbeat when unset.
    #[serde(default)]
    pub ping_interval_ms: Option<u64>,

    #[serde(default)]
    pub stale_responses: StaleResponsePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_base: default_api_base(),
            update_interval_ms: default_update_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            endpoints: Endpoints::default(),
            listing_pages: ListingPages::default(),
            transition_ms: default_transition_ms(),
            alert_animation_ms: default_alert_animation_ms(),
            ping_interval_ms: None,
            stale_responses: StaleResponsePolicy::default(),
        }
    }
}

/// Relative endpoint paths, resolved against `base_url` + `api_base`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Endpoints {
    #[serde(default = "default_stats_endpoint")]
    pub stats: String,
    #[serde(default = "default_materias_endpoint")]
    pub materias: String,
    #[serde(default = "default_notes_endpoint")]
    pub notes: String,
    #[serde(default = "default_online_endpoint")]
    pub online: String,
    #[serde(default = "default_ping_endpoint")]
    pub ping: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            stats: default_stats_endpoint(),
            materias: default_materias_endpoint(),
            notes: default_notes_endpoint(),
            online: default_online_endpoint(),
            ping: default_ping_endpoint(),
        }
    }
}

/// Pages the subjects/notes popups navigate to when there is something to list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingPages {
    #[serde(default = "default_materias_page")]
    pub materias: String,
    #[serde(default = "default_notes_page")]
    pub notes: String,
}

impl Default for ListingPages {
    fn default() -> Self {
        Self {
            materias: default_materias_page(),
            notes: default_notes_page(),
        }
    }
}

/// What to do with a popup response when a newer request for the same popup
/// was issued while it was in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StaleResponsePolicy {
    /// Whatever arrives last is rendered, regardless of request order.
    #[default]
    RenderLatestArrival,
    /// Responses belonging to a superseded request are dropped.
    DiscardSuperseded,
}

impl Config {
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn alert_animation(&self) -> Duration {
        Duration::from_millis(self.alert_animation_ms)
    }

    pub fn ping_interval(&self) -> Option<Duration> {
        self.ping_interval_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_api_base() -> String {
    "/study/api/".to_string()
}

fn default_update_interval_ms() -> u64 {
    3000
}

fn default_request_timeout_secs() -> u64 {
    8
}

fn default_transition_ms() -> u64 {
    300
}

fn default_alert_animation_ms() -> u64 {
    300
}

fn default_stats_endpoint() -> String {
    "stats/".to_string()
}

fn default_materias_endpoint() -> String {
    "materias_count/".to_string()
}

fn default_notes_endpoint() -> String {
    "notes_count/".to_string()
}

fn default_online_endpoint() -> String {
    "online_students/".to_string()
}

fn default_ping_endpoint() -> String {
    "ping/".to_string()
}

fn default_materias_page() -> String {
    "/materias/".to_string()
}

fn default_notes_page() -> String {
    "/notes/".to_string()
}
