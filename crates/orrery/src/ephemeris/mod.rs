pub mod engine;
pub mod phase;
pub mod types;

pub use engine::{normalize360, position_from_degree, PositionEngine, MILLIS_PER_DAY};
pub use phase::{LightSource, LunarPhase};
pub use types::{BodyPosition, BodyState, SkySnapshot};
