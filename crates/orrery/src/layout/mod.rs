pub mod wheel;

pub use wheel::{build_zodiac_wedges, SegmentWedge, WheelGeometry};
