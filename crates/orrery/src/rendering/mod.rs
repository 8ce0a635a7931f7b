pub mod primitives;
pub mod reconcile;
pub mod scene;
pub mod spec;
pub mod visual_config;

pub use primitives::{Color, Point, Shape, Stroke, TextAnchor};
pub use reconcile::{Delta, Keyed, KeyedLayer, Presence};
pub use scene::{HitTarget, LinkPrimitive, MarkerPrimitive, RayPrimitive, RenderLayer, SceneDelta};
pub use spec::{AspectMetadata, BodyMetadata, ChartMetadata, ChartSpec};
pub use visual_config::{MarkerStyle, VisualConfig};
