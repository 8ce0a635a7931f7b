use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::zodiac;

/// Angular position of a body at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Zodiac segment index (0-11); `None` when the instant was unusable
    pub segment_index: Option<u8>,
    /// Whole degrees within the segment (0-29)
    pub degree_in_segment: u8,
    /// Longitude normalized to [0, 360)
    pub absolute_degree: f64,
}

impl BodyPosition {
    /// Sentinel returned for instants that cannot be placed on the wheel
    pub const UNKNOWN: BodyPosition = BodyPosition {
        segment_index: None,
        degree_in_segment: 0,
        absolute_degree: 0.0,
    };

    pub fn is_known(&self) -> bool {
        self.segment_index.is_some()
    }

    /// Segment name, or "?" for the sentinel
    pub fn segment_name(&self) -> &'static str {
        self.segment_index
            .and_then(zodiac::segment)
            .map(|s| s.name.as_str())
            .unwrap_or("?")
    }

    /// Short label such as "8° PIS"
    pub fn short_label(&self) -> String {
        let name: String = self.segment_name().chars().take(3).collect();
        format!("{}° {}", self.degree_in_segment, name.to_uppercase())
    }
}

/// One body's computed state for a tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyState {
    pub name: String,
    pub position: BodyPosition,
}

/// Positions of every catalog body at a single instant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkySnapshot {
    pub time: DateTime<Utc>,
    pub bodies: Vec<BodyState>,
    /// Light-source longitude used for the phase glyph
    pub light_degree: f64,
}

impl SkySnapshot {
    pub fn get(&self, name: &str) -> Option<&BodyState> {
        self.bodies.iter().find(|b| b.name == name)
    }
}
