use chrono::{DateTime, Utc};

/// Relative "online for" text from an RFC 3339 login timestamp.
pub fn format_online_duration(iso_time: &str) -> String {
    format_online_duration_at(iso_time, Utc::now())
}

pub fn format_online_duration_at(iso_time: &str, now: DateTime<Utc>) -> String {
    match DateTime::parse_from_rfc3339(iso_time) {
        Ok(parsed) => {
            let duration = now.signed_duration_since(parsed.with_timezone(&Utc));
            if duration.num_seconds() < 60 {
                "agora mesmo".to_string()
            } else if duration.num_minutes() < 60 {
                format!("há {} min", duration.num_minutes())
            } else if duration.num_hours() < 24 {
                format!("há {} h", duration.num_hours())
            } else {
                format!("há {} d", duration.num_days())
            }
        }
        Err(_) => iso_time.to_string(),
    }
}

/// Leading integer of a displayed count, 0 when there is none.
pub fn parse_displayed_count(text: &str) -> u64 {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
