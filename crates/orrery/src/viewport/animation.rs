//! Camera transitions
//!
//! A transition interpolates between two transforms in view space: the model
//! point under the viewport centre moves linearly and the scale moves
//! geometrically, so a focal point stays put while zooming. Endpoints are
//! returned exactly.

use std::time::Duration;

use crate::rendering::primitives::Point;
use crate::viewport::transform::ViewportTransform;

/// Easing curves used by camera transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    CubicInOut,
    ExpInOut,
}

impl Easing {
    /// Map linear progress in [0, 1] to eased progress
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
                }
            }
            Easing::ExpInOut => {
                let t = t * 2.0;
                if t <= 1.0 {
                    tpmt(1.0 - t) / 2.0
                } else {
                    (2.0 - tpmt(t - 1.0)) / 2.0
                }
            }
        }
    }
}

/// 2^(-10x) rescaled so that tpmt(0) = 1 and tpmt(1) = 0
fn tpmt(x: f64) -> f64 {
    (2f64.powf(-10.0 * x) - 0.0009765625) * 1.0009775171065494
}

/// An in-flight camera transition
#[derive(Debug, Clone)]
pub struct Transition {
    from: ViewportTransform,
    to: ViewportTransform,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
    viewport_center: Point,
}

impl Transition {
    pub fn new(
        from: ViewportTransform,
        to: ViewportTransform,
        duration: Duration,
        easing: Easing,
        viewport_center: Point,
    ) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
            viewport_center,
        }
    }

    pub fn target(&self) -> ViewportTransform {
        self.to
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress in [0, 1]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advance by `dt` and return the transform for the new instant
    pub fn advance(&mut self, dt: Duration) -> ViewportTransform {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.current()
    }

    /// Transform at the current progress
    pub fn current(&self) -> ViewportTransform {
        let t = self.progress();
        if t >= 1.0 {
            return self.to;
        }
        if t <= 0.0 {
            return self.from;
        }
        interpolate(&self.from, &self.to, self.easing.apply(t), self.viewport_center)
    }
}

/// View-space interpolation between two transforms at eased progress `e`
pub fn interpolate(
    from: &ViewportTransform,
    to: &ViewportTransform,
    e: f64,
    viewport_center: Point,
) -> ViewportTransform {
    let c0 = from.invert(viewport_center);
    let c1 = to.invert(viewport_center);
    let center = c0.lerp(&c1, e);
    let scale = from.scale * (to.scale / from.scale).powf(e);
    ViewportTransform::centered_on(center, scale, viewport_center)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::CubicInOut, Easing::ExpInOut] {
            assert!(easing.apply(0.0).abs() < 1e-12);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12);
            assert!((easing.apply(0.5) - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_exp_easing_is_monotonic() {
        let mut last = 0.0;
        for i in 1..=100 {
            let v = Easing::ExpInOut.apply(i as f64 / 100.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_transition_reaches_target_exactly() {
        let center = Point::new(500.0, 500.0);
        let from = ViewportTransform::new(0.0, 0.0, 0.8);
        let to = ViewportTransform::centered_on(Point::new(700.0, 300.0), 5.5, center);
        let mut transition =
            Transition::new(from, to, Duration::from_millis(1800), Easing::ExpInOut, center);
        transition.advance(Duration::from_millis(900));
        assert!(!transition.is_finished());
        let end = transition.advance(Duration::from_millis(2000));
        assert!(transition.is_finished());
        assert_eq!(end, to);
    }

    #[test]
    fn test_focal_point_stays_centered_when_only_zooming() {
        let center = Point::new(500.0, 500.0);
        let focal = Point::new(420.0, 610.0);
        let from = ViewportTransform::centered_on(focal, 1.0, center);
        let to = ViewportTransform::centered_on(focal, 8.0, center);
        for step in 1..10 {
            let t = interpolate(&from, &to, step as f64 / 10.0, center);
            assert!(t.invert(center).distance(&focal) < 1e-9);
        }
    }
}
