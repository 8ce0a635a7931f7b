use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ephemeris::engine::{normalize360, MILLIS_PER_DAY};

/// Independent light-source longitude with its own anchor.
///
/// Only used to pick the phase glyph of the fastest body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightSource {
    pub anchor: DateTime<Utc>,
    pub anchor_degree: f64,
    pub daily_speed: f64,
}

impl LightSource {
    pub fn new(anchor: DateTime<Utc>, anchor_degree: f64, daily_speed: f64) -> Self {
        Self {
            anchor,
            anchor_degree,
            daily_speed,
        }
    }

    pub fn degree_at(&self, time: DateTime<Utc>) -> f64 {
        let days = (time - self.anchor).num_milliseconds() as f64 / MILLIS_PER_DAY;
        let raw = self.anchor_degree + self.daily_speed * days;
        if raw.is_finite() {
            normalize360(raw)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LunarPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl LunarPhase {
    /// Phase from the body's elongation ahead of the light source
    pub fn from_longitudes(body_degree: f64, light_degree: f64) -> Self {
        let diff = normalize360(body_degree - light_degree);
        match diff {
            d if !(22.5..337.5).contains(&d) => LunarPhase::New,
            d if d < 67.5 => LunarPhase::WaxingCrescent,
            d if d < 112.5 => LunarPhase::FirstQuarter,
            d if d < 157.5 => LunarPhase::WaxingGibbous,
            d if d < 202.5 => LunarPhase::Full,
            d if d < 247.5 => LunarPhase::WaningGibbous,
            d if d < 292.5 => LunarPhase::LastQuarter,
            _ => LunarPhase::WaningCrescent,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            LunarPhase::New => "🌑",
            LunarPhase::WaxingCrescent => "🌒",
            LunarPhase::FirstQuarter => "🌓",
            LunarPhase::WaxingGibbous => "🌔",
            LunarPhase::Full => "🌕",
            LunarPhase::WaningGibbous => "🌖",
            LunarPhase::LastQuarter => "🌗",
            LunarPhase::WaningCrescent => "🌘",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_bins() {
        assert_eq!(LunarPhase::from_longitudes(10.0, 0.0), LunarPhase::New);
        assert_eq!(LunarPhase::from_longitudes(350.0, 0.0), LunarPhase::New);
        assert_eq!(LunarPhase::from_longitudes(45.0, 0.0), LunarPhase::WaxingCrescent);
        assert_eq!(LunarPhase::from_longitudes(180.0, 0.0), LunarPhase::Full);
        assert_eq!(LunarPhase::from_longitudes(0.0, 90.0), LunarPhase::LastQuarter);
        assert_eq!(LunarPhase::from_longitudes(300.0, 0.0), LunarPhase::WaningCrescent);
    }

    #[test]
    fn test_light_source_moves_one_degree_per_day() {
        let anchor = DateTime::from_timestamp(1_766_275_200, 0).unwrap_or_default();
        let light = LightSource::new(anchor, 270.0, 1.0);
        let later = anchor + chrono::Duration::days(100);
        assert!((light.degree_at(later) - 10.0).abs() < 1e-9);
    }
}
