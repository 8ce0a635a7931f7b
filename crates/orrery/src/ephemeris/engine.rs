//! Constant-angular-velocity position model.
//!
//! Every body moves around the wheel at its tabulated daily speed, anchored
//! at a shared reference epoch. This is deliberately not an orbital model.

use chrono::{DateTime, Utc};

use crate::catalog::{zodiac, BodyCatalog, CelestialBody};
use crate::ephemeris::phase::LightSource;
use crate::ephemeris::types::{BodyPosition, BodyState, SkySnapshot};

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Normalize an angle to [0, 360)
pub fn normalize360(degrees: f64) -> f64 {
    ((degrees % 360.0) + 360.0) % 360.0
}

/// Maps simulated time to angular positions
#[derive(Debug, Clone)]
pub struct PositionEngine {
    epoch: DateTime<Utc>,
}

impl PositionEngine {
    pub fn new(epoch: DateTime<Utc>) -> Self {
        Self { epoch }
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    /// Fractional days between the epoch and `time` (negative before the epoch)
    pub fn elapsed_days(&self, time: DateTime<Utc>) -> f64 {
        (time - self.epoch).num_milliseconds() as f64 / MILLIS_PER_DAY
    }

    /// Tabulated longitude of a body at the epoch
    pub fn base_degree(body: &CelestialBody) -> f64 {
        let index = zodiac::segment_index(&body.reference_segment).unwrap_or_else(|| {
            log::debug!(
                "Unknown segment {:?} for {}, anchoring at 0",
                body.reference_segment,
                body.name
            );
            0
        });
        index as f64 * zodiac::SEGMENT_WIDTH + body.reference_degree
    }

    /// Position of `body` at `time`
    pub fn position(&self, body: &CelestialBody, time: DateTime<Utc>) -> BodyPosition {
        let raw = Self::base_degree(body) + body.daily_speed * self.elapsed_days(time);
        position_from_degree(raw)
    }

    /// Position of `body` at a Unix millisecond timestamp.
    ///
    /// Timestamps outside chrono's representable range give the sentinel.
    pub fn position_at_millis(&self, body: &CelestialBody, millis: i64) -> BodyPosition {
        match DateTime::from_timestamp_millis(millis) {
            Some(time) => self.position(body, time),
            None => BodyPosition::UNKNOWN,
        }
    }

    /// Compute every catalog body plus the light source at `time`
    pub fn snapshot(
        &self,
        catalog: &BodyCatalog,
        light: &LightSource,
        time: DateTime<Utc>,
    ) -> SkySnapshot {
        let bodies = catalog
            .iter()
            .map(|body| BodyState {
                name: body.name.clone(),
                position: self.position(body, time),
            })
            .collect();

        SkySnapshot {
            time,
            bodies,
            light_degree: light.degree_at(time),
        }
    }
}

/// Build a position from an unnormalized longitude
pub fn position_from_degree(raw: f64) -> BodyPosition {
    if !raw.is_finite() {
        return BodyPosition::UNKNOWN;
    }
    let absolute = normalize360(raw);
    let segment = ((absolute / zodiac::SEGMENT_WIDTH).floor() as u8).min(11);
    BodyPosition {
        segment_index: Some(segment),
        degree_in_segment: (absolute % zodiac::SEGMENT_WIDTH).floor() as u8,
        absolute_degree: absolute,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize360_range() {
        assert_eq!(normalize360(0.0), 0.0);
        assert_eq!(normalize360(360.0), 0.0);
        assert!((normalize360(-30.0) - 330.0).abs() < 1e-9);
        assert!((normalize360(725.0) - 5.0).abs() < 1e-9);
        let tiny = normalize360(-1e-18);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_non_finite_degree_is_sentinel() {
        assert_eq!(position_from_degree(f64::NAN), BodyPosition::UNKNOWN);
        assert_eq!(position_from_degree(f64::INFINITY), BodyPosition::UNKNOWN);
    }

    #[test]
    fn test_position_from_degree_splits_segment() {
        let pos = position_from_degree(338.7);
        assert_eq!(pos.segment_index, Some(11));
        assert_eq!(pos.degree_in_segment, 8);
    }
}
