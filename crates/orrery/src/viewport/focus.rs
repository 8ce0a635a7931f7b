//! Selection to camera target mapping.
//!
//! `focus_for` is a pure function of the selection and the current sky; it is
//! called once per selection change.

use serde::{Deserialize, Serialize};

use crate::catalog::BodyCatalog;
use crate::ephemeris::SkySnapshot;
use crate::events::CelestialEvent;
use crate::layout::WheelGeometry;
use crate::rendering::primitives::Point;
use crate::selection::Selection;

/// Target point (model space) and scale for one focus transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusRequest {
    pub point: Point,
    pub scale: f64,
}

/// What the camera should do after a selection change
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusCommand {
    Focus(FocusRequest),
    Recenter,
    /// Selected id is not in the current data
    Skip,
}

/// Target scale per selection kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusScales {
    pub body: f64,
    pub segment: f64,
    pub aspect: f64,
    pub event_body: f64,
    pub event_origin: f64,
    pub event_default: f64,
}

impl Default for FocusScales {
    fn default() -> Self {
        Self {
            body: 5.5,
            segment: 3.5,
            aspect: 3.2,
            event_body: 4.0,
            event_origin: 5.0,
            event_default: 2.0,
        }
    }
}

/// Data a focus target is computed from
pub struct FocusContext<'a> {
    pub geometry: &'a WheelGeometry,
    pub catalog: &'a BodyCatalog,
    pub snapshot: &'a SkySnapshot,
    pub events: &'a [CelestialEvent],
    /// Event id that focuses the zero-degree origin mark
    pub origin_event_id: &'a str,
    pub scales: &'a FocusScales,
}

impl FocusContext<'_> {
    /// Current model position of a named body
    pub fn body_point(&self, name: &str) -> Option<Point> {
        let body = self.catalog.get(name)?;
        let state = self.snapshot.get(name)?;
        if !state.position.is_known() {
            return None;
        }
        Some(self.geometry.body_point(body, &state.position))
    }
}

pub fn focus_for(selection: &Selection, ctx: &FocusContext<'_>) -> FocusCommand {
    let scales = ctx.scales;
    let request = |point: Point, scale: f64| FocusCommand::Focus(FocusRequest { point, scale });

    match selection {
        Selection::None => FocusCommand::Recenter,
        Selection::Body(name) => match ctx.body_point(name) {
            Some(point) => request(point, scales.body),
            None => FocusCommand::Skip,
        },
        Selection::ZodiacSegment(index) if (*index as usize) < crate::catalog::zodiac::SEGMENT_COUNT => {
            request(ctx.geometry.segment_mid_point(*index), scales.segment)
        }
        Selection::ZodiacSegment(_) => FocusCommand::Skip,
        Selection::Aspect(key) => match (ctx.body_point(&key.first), ctx.body_point(&key.second)) {
            (Some(a), Some(b)) => request(a.midpoint(&b), scales.aspect),
            _ => FocusCommand::Skip,
        },
        Selection::Event(id) => {
            let Some(event) = ctx.events.iter().find(|e| &e.id == id) else {
                return FocusCommand::Skip;
            };
            let matched = ctx
                .catalog
                .match_object(&event.object)
                .and_then(|body| ctx.body_point(&body.name));
            if let Some(point) = matched {
                request(point, scales.event_body)
            } else if event.id == ctx.origin_event_id {
                request(ctx.geometry.origin_mark(), scales.event_origin)
            } else {
                request(ctx.geometry.center(), scales.event_default)
            }
        }
    }
}
