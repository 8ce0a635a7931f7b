//! Simulated time: the cursor window, autoplay presets and the epoch countdown.

pub mod clock;
pub mod countdown;

pub use clock::{PlayState, SimulationClock, SpeedMode, TimeWindow};
pub use countdown::Countdown;
