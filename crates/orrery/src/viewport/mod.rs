pub mod animation;
pub mod controller;
pub mod focus;
pub mod transform;

pub use animation::{Easing, Transition};
pub use controller::{ViewportController, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
pub use focus::{focus_for, FocusCommand, FocusContext, FocusRequest, FocusScales};
pub use transform::{ViewportTransform, MAX_SCALE, MIN_SCALE};
