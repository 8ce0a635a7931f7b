use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dated sky event shown in the observation log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialEvent {
    pub id: String,
    pub name: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub significance: String,
    #[serde(rename = "type")]
    pub event_type: String,
    /// Object(s) involved, "/"-separated ("Venus/Saturn")
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub magnitude: Option<String>,
    #[serde(default)]
    pub right_ascension: Option<String>,
    #[serde(default)]
    pub declination: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub is_major: bool,
}

impl CelestialEvent {
    /// Absolute distance from `time`, in milliseconds
    pub fn distance_ms(&self, time: DateTime<Utc>) -> i64 {
        (self.date - time).num_milliseconds().abs()
    }

    /// Prompt sent to the advisory service when this event is inspected
    pub fn advisory_query(&self) -> String {
        format!(
            "Analyze the historical significance of {} involving {} on {}.",
            self.name,
            if self.object.is_empty() { "the sky" } else { &self.object },
            self.date.format("%Y-%m-%d")
        )
    }
}
