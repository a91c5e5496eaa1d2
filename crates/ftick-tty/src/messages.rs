//! Where the ticker's messages come from.
//!
//! Without explicit messages the host scrolls the dashboard lane: a weather
//! line, the local time, a thank-you per supporter, and the group invite.
//! The time entry changes once a minute, which remounts the ticker.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local, Timelike};

use crate::error::{HostError, Result};

/// Shown until a weather reading is available.
pub const WEATHER_PLACEHOLDER: &str = "WEATHER SYNCING…";

/// Supporters thanked in the default lane.
pub const SUPPORTERS: [&str; 6] = [
    "Illumi",
    "Nagi-san",
    "bread",
    "Lady Faya",
    "Kisne",
    "Moon Foxy",
];

pub const JOIN_LINE: &str = "JOIN THE GROUP → GLITCH.8936";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSource {
    /// A list that never changes.
    Fixed(Vec<String>),
    /// The dashboard lane, rebuilt from the wall clock.
    Dashboard,
}

impl MessageSource {
    /// Messages as of `now`.
    pub fn messages_at(&self, now: &DateTime<Local>) -> Vec<String> {
        match self {
            Self::Fixed(messages) => messages.clone(),
            Self::Dashboard => dashboard_lane(now.hour(), now.minute()),
        }
    }

    /// Whether the list depends on the time of day.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

/// `TIME HH:MM`, zero padded.
pub fn time_message(hour: u32, minute: u32) -> String {
    format!("TIME {hour:02}:{minute:02}")
}

/// The default dashboard lane for the given local time.
pub fn dashboard_lane(hour: u32, minute: u32) -> Vec<String> {
    let mut lane = Vec::with_capacity(SUPPORTERS.len() + 3);
    lane.push(WEATHER_PLACEHOLDER.to_string());
    lane.push(time_message(hour, minute));
    lane.extend(SUPPORTERS.iter().map(|name| format!("THANKS, {name}")));
    lane.push(JOIN_LINE.to_string());
    lane
}

/// Read one message per line, trimming whitespace and skipping blank lines.
pub fn load_messages_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| HostError::MessagesFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_messages(&content))
}

pub fn parse_messages(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn dashboard_lane_order() {
        let lane = dashboard_lane(9, 5);
        assert_eq!(lane.len(), 9);
        assert_eq!(lane[0], "WEATHER SYNCING…");
        assert_eq!(lane[1], "TIME 09:05");
        assert_eq!(lane[2], "THANKS, Illumi");
        assert_eq!(lane[7], "THANKS, Moon Foxy");
        assert_eq!(lane[8], "JOIN THE GROUP → GLITCH.8936");
    }

    #[test]
    fn dashboard_source_follows_clock() {
        let source = MessageSource::Dashboard;
        let morning = Local.with_ymd_and_hms(2024, 3, 1, 7, 59, 30).unwrap();
        let later = Local.with_ymd_and_hms(2024, 3, 1, 8, 0, 1).unwrap();
        assert!(source.is_live());
        assert_eq!(source.messages_at(&morning)[1], "TIME 07:59");
        assert_eq!(source.messages_at(&later)[1], "TIME 08:00");
    }

    #[test]
    fn fixed_source_ignores_clock() {
        let source = MessageSource::Fixed(vec!["A".into(), "B".into()]);
        let now = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert!(!source.is_live());
        assert_eq!(source.messages_at(&now), vec!["A", "B"]);
    }

    #[test]
    fn parse_skips_blank_lines_and_trims() {
        let parsed = parse_messages("  FIRST \n\n\tSECOND\r\n   \nTHIRD");
        assert_eq!(parsed, vec!["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn duplicates_are_kept() {
        assert_eq!(parse_messages("A\nA\n"), vec!["A", "A"]);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        let error = load_messages_file(&path).unwrap_err();
        assert!(matches!(error, HostError::MessagesFile { .. }));
        assert!(error.to_string().contains("nope.txt"));
    }
}
