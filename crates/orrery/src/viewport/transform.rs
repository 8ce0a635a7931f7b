use serde::{Deserialize, Serialize};

use crate::rendering::primitives::Point;

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 20.0;

pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        1.0
    }
}

/// Camera transform: `view = model * scale + translate`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewportTransform {
    pub const IDENTITY: ViewportTransform = ViewportTransform {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    /// Scale is clamped into [MIN_SCALE, MAX_SCALE]
    pub fn new(x: f64, y: f64, scale: f64) -> Self {
        Self {
            x,
            y,
            scale: clamp_scale(scale),
        }
    }

    /// Transform that puts `point` at `viewport_center` at `scale`
    pub fn centered_on(point: Point, scale: f64, viewport_center: Point) -> Self {
        let scale = clamp_scale(scale);
        Self {
            x: viewport_center.x - point.x * scale,
            y: viewport_center.y - point.y * scale,
            scale,
        }
    }

    pub fn apply(&self, model: Point) -> Point {
        Point::new(model.x * self.scale + self.x, model.y * self.scale + self.y)
    }

    pub fn invert(&self, view: Point) -> Point {
        Point::new((view.x - self.x) / self.scale, (view.y - self.y) / self.scale)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            scale: self.scale,
        }
    }

    /// Rescale by `factor` keeping the view-space point `anchor` fixed
    pub fn scaled_about(&self, factor: f64, anchor: Point) -> Self {
        let model = self.invert(anchor);
        let scale = clamp_scale(self.scale * factor);
        Self {
            x: anchor.x - model.x * scale,
            y: anchor.y - model.y * scale,
            scale,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.scale.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_invert() {
        let t = ViewportTransform::new(-120.0, 40.0, 2.5);
        let p = Point::new(321.0, 77.0);
        let back = t.invert(t.apply(p));
        assert!(back.distance(&p) < 1e-9);
    }

    #[test]
    fn test_scaled_about_keeps_anchor() {
        let t = ViewportTransform::new(10.0, 20.0, 1.0);
        let anchor = Point::new(500.0, 500.0);
        let before = t.invert(anchor);
        let after = t.scaled_about(1.5, anchor).invert(anchor);
        assert!(before.distance(&after) < 1e-9);
    }

    #[test]
    fn test_scale_clamped() {
        assert_eq!(ViewportTransform::new(0.0, 0.0, 100.0).scale, MAX_SCALE);
        assert_eq!(ViewportTransform::new(0.0, 0.0, 0.0).scale, MIN_SCALE);
    }
}
