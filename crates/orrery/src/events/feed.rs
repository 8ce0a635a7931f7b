//! Event feed seam plus the tabular parser for feed text.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::events::builtin::fallback_events;
use crate::events::types::CelestialEvent;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Feed I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Feed transport error: {0}")]
    Transport(String),
    #[error("Feed timed out after {0:?}")]
    Timeout(Duration),
}

/// Source of tabular event text (one header line, then data rows)
#[async_trait]
pub trait EventFeed: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self) -> Result<String, FeedError>;
}

/// Reads the event table from a local CSV file
pub struct FileEventFeed {
    path: PathBuf,
}

impl FileEventFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EventFeed for FileEventFeed {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self) -> Result<String, FeedError> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}

lazy_static! {
    static ref RA_PATTERN: Regex =
        Regex::new(r"^\d{1,2}h\s?\d{1,2}(\.\d+)?m$").expect("valid RA pattern");
    static ref DEC_PATTERN: Regex =
        Regex::new(r"^[+-]?\d{1,2}(°|\s)\s?\d{1,2}'?$").expect("valid Dec pattern");
}

/// Accepts RFC 3339 plus a few spreadsheet date layouts (all read as UTC)
pub fn parse_event_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

fn clean(field: &str) -> &str {
    let field = field.trim();
    let field = field.strip_prefix('"').unwrap_or(field);
    let field = field.strip_suffix('"').unwrap_or(field);
    field.trim()
}

fn optional(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

fn validated(field: &str, pattern: &Regex, label: &str, row: usize) -> Option<String> {
    let value = optional(field)?;
    if pattern.is_match(&value) {
        Some(value)
    } else {
        log::debug!("Row {}: dropping malformed {} {:?}", row, label, value);
        None
    }
}

/// Parse feed text into events.
///
/// Columns are `date,name,object,mag,ra,dec,notes`. The first line is a
/// header; blank lines are ignored and rows with an unreadable date are
/// skipped. Row numbers count non-blank data lines from zero.
pub fn parse_event_csv(text: &str) -> Vec<CelestialEvent> {
    let mut events = Vec::new();

    let rows = text.lines().skip(1).filter(|line| !line.trim().is_empty());
    for (idx, line) in rows.enumerate() {
        let parts: Vec<&str> = line.split(',').map(clean).collect();
        let field = |i: usize| parts.get(i).copied().unwrap_or("");

        let Some(date) = parse_event_date(field(0)) else {
            log::warn!("Skipping event row {}: unreadable date {:?}", idx, field(0));
            continue;
        };

        let raw_name = field(1);
        let name = if raw_name.is_empty() {
            "Observation"
        } else {
            raw_name
        };
        let object = field(2);
        let notes = field(6);
        let lowered = raw_name.to_lowercase();

        events.push(CelestialEvent {
            id: format!("remote-{}", idx),
            name: name.to_string(),
            date,
            description: format!("A {} event involving {}.", raw_name, object),
            significance: notes.to_string(),
            event_type: if raw_name.is_empty() {
                "Celestial Interaction".to_string()
            } else {
                raw_name.to_string()
            },
            object: object.to_string(),
            magnitude: optional(field(3)),
            right_ascension: validated(field(4), &RA_PATTERN, "RA", idx),
            declination: validated(field(5), &DEC_PATTERN, "Dec", idx),
            notes: optional(notes),
            link: None,
            is_major: lowered.contains("alignment") || lowered.contains("eclipse"),
        });
    }

    events
}

/// Fetch and parse events, falling back to the compiled-in list.
///
/// Any feed error or an empty parse keeps the fallback list.
pub async fn load_events(feed: &dyn EventFeed, timeout: Duration) -> Vec<CelestialEvent> {
    let text = match tokio::time::timeout(timeout, feed.fetch()).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            log::warn!("Event feed '{}' failed, using fallback data: {}", feed.name(), e);
            return fallback_events().to_vec();
        }
        Err(_) => {
            log::warn!(
                "Event feed '{}' failed, using fallback data: {}",
                feed.name(),
                FeedError::Timeout(timeout)
            );
            return fallback_events().to_vec();
        }
    };

    let parsed = parse_event_csv(&text);
    if parsed.is_empty() {
        log::info!("Event feed '{}' had no usable rows, keeping fallback data", feed.name());
        return fallback_events().to_vec();
    }
    log::info!("Loaded {} events from feed '{}'", parsed.len(), feed.name());
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_formats() {
        assert!(parse_event_date("2026-03-08T00:00:00Z").is_some());
        assert!(parse_event_date("2026-03-08").is_some());
        assert!(parse_event_date("2026/03/08").is_some());
        assert!(parse_event_date("03/08/2026").is_some());
        assert!(parse_event_date("2026-03-08T19:13").is_some());
        assert!(parse_event_date("soon").is_none());
        assert!(parse_event_date("").is_none());
    }

    #[test]
    fn test_clean_strips_outer_quotes() {
        assert_eq!(clean(" \"Venus\" "), "Venus");
        assert_eq!(clean("plain"), "plain");
    }

    #[test]
    fn test_coordinate_patterns() {
        assert!(RA_PATTERN.is_match("07h 25m"));
        assert!(RA_PATTERN.is_match("7h25.5m"));
        assert!(!RA_PATTERN.is_match("north"));
        assert!(DEC_PATTERN.is_match("+22 15"));
        assert!(DEC_PATTERN.is_match("-02°10'"));
        assert!(!DEC_PATTERN.is_match("+22"));
    }
}
