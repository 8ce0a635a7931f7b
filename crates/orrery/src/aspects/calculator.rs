use crate::aspects::types::{AspectRecord, AspectSet, AspectSettings, OrbRule, PairKey};
use crate::ephemeris::types::SkySnapshot;

/// Pairwise aspect detector
pub struct AspectDetector {
    settings: AspectSettings,
}

impl AspectDetector {
    pub fn new() -> Self {
        Self::with_settings(AspectSettings::default())
    }

    pub fn with_settings(settings: AspectSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AspectSettings {
        &self.settings
    }

    /// Shortest angular distance between two longitudes, in [0, 180]
    pub fn circular_distance(a: f64, b: f64) -> f64 {
        let diff = (a - b).abs() % 360.0;
        diff.min(360.0 - diff)
    }

    /// First rule whose orb contains `distance`
    pub fn classify(&self, distance: f64) -> Option<&OrbRule> {
        if !distance.is_finite() {
            return None;
        }
        self.settings.rules.iter().find(|rule| rule.matches(distance))
    }

    /// Classify every unordered pair in the snapshot.
    ///
    /// Bodies with an unknown position are left out.
    pub fn detect(&self, snapshot: &SkySnapshot) -> AspectSet {
        let bodies: Vec<_> = snapshot
            .bodies
            .iter()
            .filter(|b| b.position.is_known())
            .filter(|b| {
                self.settings.include_bodies.is_empty()
                    || self.settings.include_bodies.iter().any(|n| n == &b.name)
            })
            .collect();

        let mut records = Vec::new();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let a = bodies[i];
                let b = bodies[j];
                let lon_a = a.position.absolute_degree;
                let lon_b = b.position.absolute_degree;
                let distance = Self::circular_distance(lon_a, lon_b);

                if let Some(rule) = self.classify(distance) {
                    records.push(AspectRecord {
                        key: PairKey::new(&a.name, &b.name),
                        body_a: a.name.clone(),
                        body_b: b.name.clone(),
                        distance,
                        kind: rule.kind,
                        color: rule.color.clone(),
                        meaning: format!("Interaction: {} and {}", a.name, b.name),
                    });
                }
            }
        }

        AspectSet { records }
    }
}

impl Default for AspectDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::types::AspectKind;

    #[test]
    fn test_circular_distance_wraps() {
        assert!((AspectDetector::circular_distance(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((AspectDetector::circular_distance(0.0, 180.0) - 180.0).abs() < 1e-9);
        assert!((AspectDetector::circular_distance(720.0, 0.0)).abs() < 1e-9);
    }

    #[test]
    fn test_orb_boundaries_are_strict() {
        let detector = AspectDetector::new();
        assert!(detector.classify(6.0).is_none());
        assert_eq!(detector.classify(5.99).map(|r| r.kind), Some(AspectKind::Conjunction));
        assert!(detector.classify(115.0).is_none());
        assert_eq!(detector.classify(86.5).map(|r| r.kind), Some(AspectKind::Square));
        assert!(detector.classify(f64::NAN).is_none());
    }
}
