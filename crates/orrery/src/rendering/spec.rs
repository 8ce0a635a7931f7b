use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rendering::primitives::{Color, Point, Shape};
use crate::viewport::ViewportTransform;

/// Per-body entry in the chart metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyMetadata {
    pub name: String,
    /// Short position label ("8° PIS")
    pub label: String,
    pub absolute_degree: f64,
    pub focused: bool,
}

/// Per-aspect entry in the chart metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AspectMetadata {
    pub key: String,
    pub kind: String,
    pub distance: f64,
}

/// Chart metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartMetadata {
    pub time: Option<DateTime<Utc>>,
    pub selection: String,
    pub bodies: Vec<BodyMetadata>,
    pub aspects: Vec<AspectMetadata>,
}

/// Chart specification - declarative description of chart to render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    /// Camera transform to apply to every shape
    pub transform: ViewportTransform,
    pub background_color: Color,
    pub shapes: Vec<Shape>,
    pub metadata: ChartMetadata,
}

impl ChartSpec {
    /// Create a new empty chart spec
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            center: Point::new(width / 2.0, height / 2.0),
            transform: ViewportTransform::IDENTITY,
            background_color: Color::BLACK,
            shapes: Vec::new(),
            metadata: ChartMetadata::default(),
        }
    }
}
