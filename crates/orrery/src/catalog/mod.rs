pub mod bodies;
pub mod loader;
pub mod zodiac;

pub use bodies::{builtin_catalog, BodyCatalog, CelestialBody, RadialTrack};
pub use loader::{load_body_catalog_from_json, load_body_catalog_from_path, CatalogError};
pub use zodiac::{segment, segment_index, zodiac, Element, Modality, ZodiacSegment};
