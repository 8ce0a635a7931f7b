//! Wheel geometry: polar placement of segments and bodies in model space.
//!
//! Angles are measured clockwise from 12 o'clock, so 0° sits at the top
//! of the wheel and 90° at the right.

use serde::{Deserialize, Serialize};

use crate::catalog::{zodiac, CelestialBody, RadialTrack, ZodiacSegment};
use crate::ephemeris::normalize360;
use crate::ephemeris::BodyPosition;
use crate::rendering::primitives::Point;

/// Fixed radii and model size of the wheel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelGeometry {
    pub width: f64,
    pub height: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            inner_radius: 425.0,
            outer_radius: 480.0,
        }
    }
}

impl WheelGeometry {
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Radius of a body track, measured inwards from the zodiac ring
    pub fn track_radius(&self, track: RadialTrack) -> f64 {
        match track {
            RadialTrack::Outer => self.inner_radius - 85.0,
            RadialTrack::Middle => self.inner_radius - 210.0,
            RadialTrack::Inner => self.inner_radius - 290.0,
        }
    }

    /// Midline of the zodiac ring
    pub fn zodiac_mid_radius(&self) -> f64 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    /// Polar to cartesian around the wheel centre
    pub fn polar(&self, degree: f64, radius: f64) -> Point {
        let angle = normalize360(degree).to_radians();
        let center = self.center();
        Point::new(
            center.x + radius * angle.sin(),
            center.y - radius * angle.cos(),
        )
    }

    /// Model position of a body at its computed longitude
    pub fn body_point(&self, body: &CelestialBody, position: &BodyPosition) -> Point {
        self.polar(position.absolute_degree, self.track_radius(body.track))
    }

    /// Angular midpoint of a segment on the zodiac ring midline
    pub fn segment_mid_point(&self, index: u8) -> Point {
        let mid = index as f64 * zodiac::SEGMENT_WIDTH + zodiac::SEGMENT_WIDTH / 2.0;
        self.polar(mid, self.zodiac_mid_radius())
    }

    /// The zero-degree origin mark, drawn inside the zodiac ring
    pub fn origin_mark(&self) -> Point {
        self.polar(0.0, self.inner_radius - 50.0)
    }

    /// Angle of `point` around the centre, clockwise from the top
    pub fn angle_of(&self, point: &Point) -> f64 {
        let center = self.center();
        normalize360((point.x - center.x).atan2(center.y - point.y).to_degrees())
    }
}

/// One static zodiac ring wedge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentWedge {
    pub index: u8,
    pub name: String,
    pub symbol: String,
    pub start_degree: f64,
    pub end_degree: f64,
    /// Glyph anchor on the ring midline
    pub label_point: Point,
}

impl SegmentWedge {
    /// Whether `point` lies inside this wedge's annulus sector
    pub fn contains(&self, geometry: &WheelGeometry, point: &Point) -> bool {
        let r = geometry.center().distance(point);
        if r < geometry.inner_radius || r > geometry.outer_radius {
            return false;
        }
        let angle = geometry.angle_of(point);
        angle >= self.start_degree && angle < self.end_degree
    }
}

/// Build the 12 static zodiac wedges
pub fn build_zodiac_wedges(geometry: &WheelGeometry) -> Vec<SegmentWedge> {
    zodiac::zodiac()
        .iter()
        .map(|segment: &ZodiacSegment| SegmentWedge {
            index: segment.index,
            name: segment.name.clone(),
            symbol: segment.symbol.clone(),
            start_degree: segment.start_degree(),
            end_degree: segment.end_degree(),
            label_point: geometry.segment_mid_point(segment.index),
        })
        .collect()
}
