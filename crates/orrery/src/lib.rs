pub mod advisory;
pub mod aspects;
pub mod catalog;
pub mod ephemeris;
pub mod events;
pub mod layout;
pub mod observatory;
pub mod rendering;
pub mod selection;
pub mod timeline;
pub mod viewport;

#[cfg(feature = "tile-rendering")]
pub mod tile;

pub use aspects::{AspectDetector, AspectKind, AspectRecord, AspectSet, PairKey};
pub use catalog::{builtin_catalog, BodyCatalog, CelestialBody, RadialTrack};
pub use ephemeris::{normalize360, BodyPosition, PositionEngine, SkySnapshot};
pub use observatory::{Command, Observatory, ObservatorySettings};
pub use selection::{Selection, SelectionState};
pub use timeline::{SimulationClock, SpeedMode, TimeWindow};
pub use viewport::{ViewportController, ViewportTransform};

#[cfg(feature = "tile-rendering")]
pub use tile::draw_chart;
