pub mod calculator;
pub mod types;

pub use calculator::AspectDetector;
pub use types::{AspectKind, AspectRecord, AspectSet, AspectSettings, OrbRule, PairKey};
