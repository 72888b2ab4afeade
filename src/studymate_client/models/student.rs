use crate::studymate_client::api::StudentEntry;
use crate::studymate_client::helpers::format_online_duration;

/// An online student ready for display in the popup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnlineStudent {
    pub name: String,
    pub online_duration_text: String,
}

impl OnlineStudent {
    /// Prefers the server-formatted duration, falling back to the login time.
    pub fn from_entry(entry: &StudentEntry) -> Self {
        let online_duration_text = entry
            .tempo_texto
            .clone()
            .filter(|text| !text.trim().is_empty())
            .or_else(|| entry.last_login.as_deref().map(format_online_duration))
            .unwrap_or_default();

        Self {
            name: entry.username.clone(),
            online_duration_text,
        }
    }

    pub fn status_line(&self) -> String {
        if self.online_duration_text.is_empty() {
            "🟢 Online".to_string()
        } else {
            format!("🟢 Online - {}", self.online_duration_text)
        }
    }
}
