use std::time::Duration;

use crate::rendering::primitives::Point;
use crate::viewport::animation::{Easing, Transition};
use crate::viewport::focus::{FocusCommand, FocusRequest};
use crate::viewport::transform::ViewportTransform;

/// Viewport pixel width below which the narrow default scale applies
pub const NARROW_BREAKPOINT_PX: f64 = 768.0;
pub const NARROW_DEFAULT_SCALE: f64 = 0.35;
pub const WIDE_DEFAULT_SCALE: f64 = 0.8;

pub const ZOOM_IN_FACTOR: f64 = 1.5;
pub const ZOOM_OUT_FACTOR: f64 = 0.6;

const ZOOM_DURATION: Duration = Duration::from_millis(600);
const FOCUS_DURATION: Duration = Duration::from_millis(1800);
const RECENTER_DURATION: Duration = Duration::from_millis(2200);

/// Owns the camera transform.
///
/// Writers: `zoom_by`, `recenter` and `focus` start a transition and replace
/// any in-flight one. Gestures write the transform directly and cancel the
/// in-flight transition. `tick` only writes while a transition exists.
#[derive(Debug, Clone)]
pub struct ViewportController {
    transform: ViewportTransform,
    transition: Option<Transition>,
    /// Model viewport size (view-space units)
    model_width: f64,
    model_height: f64,
    /// Physical viewport width in pixels, only used for the breakpoint
    viewport_width_px: f64,
}

impl ViewportController {
    pub fn new(model_width: f64, model_height: f64, viewport_width_px: f64) -> Self {
        let mut controller = Self {
            transform: ViewportTransform::IDENTITY,
            transition: None,
            model_width,
            model_height,
            viewport_width_px,
        };
        controller.transform = controller.default_transform();
        controller
    }

    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    pub fn viewport_center(&self) -> Point {
        Point::new(self.model_width / 2.0, self.model_height / 2.0)
    }

    pub fn viewport_width_px(&self) -> f64 {
        self.viewport_width_px
    }

    pub fn set_viewport_width(&mut self, width_px: f64) {
        self.viewport_width_px = width_px;
    }

    pub fn default_scale(&self) -> f64 {
        if self.viewport_width_px < NARROW_BREAKPOINT_PX {
            NARROW_DEFAULT_SCALE
        } else {
            WIDE_DEFAULT_SCALE
        }
    }

    /// Untranslated transform at the breakpoint default scale
    pub fn default_transform(&self) -> ViewportTransform {
        ViewportTransform::new(0.0, 0.0, self.default_scale())
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    fn start(&mut self, to: ViewportTransform, duration: Duration, easing: Easing) {
        if !to.is_finite() {
            log::warn!("Ignoring non-finite camera target {:?}", to);
            return;
        }
        if self.transition.is_some() {
            log::debug!("Replacing in-flight camera transition");
        }
        self.transition = Some(Transition::new(
            self.transform,
            to,
            duration,
            easing,
            self.viewport_center(),
        ));
    }

    /// Scale about the viewport centre
    pub fn zoom_by(&mut self, factor: f64) {
        let to = self.transform.scaled_about(factor, self.viewport_center());
        self.start(to, ZOOM_DURATION, Easing::CubicInOut);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(ZOOM_IN_FACTOR);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(ZOOM_OUT_FACTOR);
    }

    pub fn recenter(&mut self) {
        let to = self.default_transform();
        self.start(to, RECENTER_DURATION, Easing::ExpInOut);
    }

    /// Put `point` (model space) at the viewport centre at `scale`
    pub fn focus(&mut self, point: Point, scale: f64) {
        let to = ViewportTransform::centered_on(point, scale, self.viewport_center());
        self.start(to, FOCUS_DURATION, Easing::ExpInOut);
    }

    pub fn apply(&mut self, command: FocusCommand) {
        match command {
            FocusCommand::Focus(FocusRequest { point, scale }) => self.focus(point, scale),
            FocusCommand::Recenter => self.recenter(),
            FocusCommand::Skip => {}
        }
    }

    /// Drag gesture, in view-space units. Non-finite deltas are ignored.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            log::warn!("Ignoring non-finite pan ({}, {})", dx, dy);
            return;
        }
        self.cancel();
        self.transform = self.transform.translated(dx, dy);
    }

    /// Wheel/pinch gesture about a view-space anchor
    pub fn zoom_at(&mut self, factor: f64, anchor: Point) {
        if !factor.is_finite() || factor <= 0.0 || !anchor.is_finite() {
            log::warn!("Ignoring zoom by {} about {:?}", factor, anchor);
            return;
        }
        self.cancel();
        self.transform = self.transform.scaled_about(factor, anchor);
    }

    pub fn set_transform(&mut self, transform: ViewportTransform) {
        if !transform.is_finite() {
            log::warn!("Ignoring non-finite camera transform {:?}", transform);
            return;
        }
        self.cancel();
        self.transform = ViewportTransform::new(transform.x, transform.y, transform.scale);
    }

    /// Drop the in-flight transition, keeping the current transform
    pub fn cancel(&mut self) {
        self.transition = None;
    }

    /// Advance one frame. Returns whether a transition is still running.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };
        self.transform = transition.advance(dt);
        if transition.is_finished() {
            self.transition = None;
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_default_scale() {
        assert_eq!(ViewportController::new(1000.0, 1000.0, 767.0).default_scale(), 0.35);
        assert_eq!(ViewportController::new(1000.0, 1000.0, 768.0).default_scale(), 0.8);
    }

    #[test]
    fn test_tick_without_transition_is_noop() {
        let mut vc = ViewportController::new(1000.0, 1000.0, 1200.0);
        let before = vc.transform();
        assert!(!vc.tick(Duration::from_millis(16)));
        assert_eq!(vc.transform(), before);
    }
}
