//! The render layer: turns the current sky into keyed, drawable primitives
//! and maps pointer input back to selections.

use std::time::Duration;

use crate::aspects::{AspectKind, AspectSet, PairKey};
use crate::catalog::BodyCatalog;
use crate::ephemeris::{LunarPhase, SkySnapshot};
use crate::layout::{build_zodiac_wedges, SegmentWedge, WheelGeometry};
use crate::rendering::primitives::{Color, Point, Shape, Stroke, TextAnchor};
use crate::rendering::reconcile::{Delta, KeyedLayer};
use crate::rendering::spec::{AspectMetadata, BodyMetadata, ChartSpec};
use crate::rendering::visual_config::{MarkerStyle, VisualConfig};
use crate::selection::{Selection, SelectionState};
use crate::viewport::ViewportTransform;

/// Extra pick tolerance around thin aspect lines, in model units
const LINE_PICK_SLACK: f64 = 4.0;

/// Drawable body marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPrimitive {
    pub name: String,
    pub center: Point,
    pub color: Color,
    pub style: MarkerStyle,
    pub focused: bool,
    pub fill: Color,
    pub stroke: Color,
    pub symbol: String,
    pub symbol_color: Color,
    pub symbol_offset: f64,
    pub label: String,
    pub absolute_degree: f64,
}

/// Drawable aspect link between two markers
#[derive(Debug, Clone, PartialEq)]
pub struct LinkPrimitive {
    pub kind: AspectKind,
    pub from: Point,
    pub to: Point,
    pub color: Color,
    pub width: f64,
    pub dash: Option<[f64; 2]>,
    pub distance: f64,
}

/// Cosmetic light band from the light body to the centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayPrimitive {
    pub from: Point,
    pub to: Point,
}

/// Result of mapping a pointer position onto the scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Body(String),
    Aspect(PairKey),
    Segment(u8),
    Background,
}

impl HitTarget {
    /// Selection a click on this target produces; background clears
    pub fn to_selection(&self) -> Selection {
        match self {
            HitTarget::Body(name) => Selection::Body(name.clone()),
            HitTarget::Aspect(key) => Selection::Aspect(key.clone()),
            HitTarget::Segment(index) => Selection::ZodiacSegment(*index),
            HitTarget::Background => Selection::None,
        }
    }
}

/// Deltas produced by one scene update
#[derive(Debug, Clone, Default)]
pub struct SceneDelta {
    pub markers: Delta<String>,
    pub links: Delta<PairKey>,
}

pub struct RenderLayer {
    geometry: WheelGeometry,
    visual: VisualConfig,
    wedges: Vec<SegmentWedge>,
    markers: KeyedLayer<String, MarkerPrimitive>,
    links: KeyedLayer<PairKey, LinkPrimitive>,
    ray: Option<RayPrimitive>,
    transform: ViewportTransform,
    snapshot_time: Option<chrono::DateTime<chrono::Utc>>,
    selection_label: String,
}

impl RenderLayer {
    pub fn new(geometry: WheelGeometry) -> Self {
        Self::with_config(geometry, VisualConfig::default())
    }

    pub fn with_config(geometry: WheelGeometry, visual: VisualConfig) -> Self {
        let wedges = build_zodiac_wedges(&geometry);
        Self {
            markers: KeyedLayer::new(visual.fade),
            links: KeyedLayer::new(visual.fade),
            geometry,
            visual,
            wedges,
            ray: None,
            transform: ViewportTransform::IDENTITY,
            snapshot_time: None,
            selection_label: Selection::None.to_string(),
        }
    }

    pub fn geometry(&self) -> &WheelGeometry {
        &self.geometry
    }

    pub fn wedges(&self) -> &[SegmentWedge] {
        &self.wedges
    }

    pub fn markers(&self) -> &KeyedLayer<String, MarkerPrimitive> {
        &self.markers
    }

    pub fn links(&self) -> &KeyedLayer<PairKey, LinkPrimitive> {
        &self.links
    }

    pub fn ray(&self) -> Option<&RayPrimitive> {
        self.ray.as_ref()
    }

    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: ViewportTransform) {
        self.transform = transform;
    }

    /// Reconcile markers, links and the ray against the current sky.
    ///
    /// Bodies with an unknown position are not drawn; links whose bodies are
    /// missing are skipped.
    pub fn update(
        &mut self,
        catalog: &BodyCatalog,
        snapshot: &SkySnapshot,
        aspects: &AspectSet,
        selection: &SelectionState,
    ) -> SceneDelta {
        let phase_body = catalog.fastest().map(|b| b.name.clone());
        let visual = &self.visual;
        let geometry = &self.geometry;

        let mut points: Vec<(String, Point)> = Vec::new();
        let mut marker_data = Vec::new();
        for body in catalog.iter() {
            let Some(state) = snapshot.get(&body.name) else {
                continue;
            };
            if !state.position.is_known() {
                continue;
            }
            let center = geometry.body_point(body, &state.position);
            points.push((body.name.clone(), center));

            let color = Color::from_hex_or(&body.color, Color::WHITE);
            let focused = selection.is_focused_body(&body.name);
            let multiplier = if body.is_primary { 1.0 } else { visual.secondary_scale };
            let symbol = if phase_body.as_deref() == Some(body.name.as_str()) {
                LunarPhase::from_longitudes(state.position.absolute_degree, snapshot.light_degree)
                    .glyph()
                    .to_string()
            } else {
                body.symbol.clone()
            };

            let marker = MarkerPrimitive {
                name: body.name.clone(),
                center,
                color,
                style: if focused {
                    visual.focused_marker
                } else {
                    visual.ambient_marker.scaled(multiplier)
                },
                focused,
                fill: if focused { color } else { visual.ambient_fill },
                stroke: if focused { visual.focused_stroke } else { color },
                symbol,
                symbol_color: if focused { visual.focused_symbol } else { color },
                symbol_offset: visual.symbol_offset * multiplier,
                label: state.position.short_label(),
                absolute_degree: state.position.absolute_degree,
            };
            marker_data.push((body.name.clone(), marker));
        }

        let point_of = |name: &str| points.iter().find(|(n, _)| n == name).map(|(_, p)| *p);
        let link_data: Vec<(PairKey, LinkPrimitive)> = aspects
            .iter()
            .filter_map(|record| {
                let from = point_of(record.body_a.as_str())?;
                let to = point_of(record.body_b.as_str())?;
                let conjunction = record.kind == AspectKind::Conjunction;
                Some((
                    record.key.clone(),
                    LinkPrimitive {
                        kind: record.kind,
                        from,
                        to,
                        color: Color::from_hex_or(&record.color, Color::WHITE),
                        width: if conjunction {
                            visual.conjunction_width
                        } else {
                            visual.aspect_width
                        },
                        dash: if conjunction { None } else { Some(visual.aspect_dash) },
                        distance: record.distance,
                    },
                ))
            })
            .collect();

        self.ray = catalog
            .light_body
            .as_deref()
            .and_then(point_of)
            .map(|from| RayPrimitive {
                from,
                to: geometry.center(),
            });

        self.snapshot_time = Some(snapshot.time);
        self.selection_label = selection.current().to_string();

        SceneDelta {
            markers: self.markers.reconcile(marker_data),
            links: self.links.reconcile(link_data),
        }
    }

    /// Step enter/exit fades. Returns whether any fade is still running.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let markers = self.markers.advance(dt);
        let links = self.links.advance(dt);
        markers || links
    }

    pub fn is_animating(&self) -> bool {
        self.markers.is_fading() || self.links.is_fading()
    }

    /// Map a view-space pointer position to the topmost hit target.
    ///
    /// Order: markers (topmost first), aspect lines, zodiac wedges, then
    /// the background. Items fading out are not hittable.
    pub fn hit_test(&self, view_point: Point) -> HitTarget {
        let p = self.transform.invert(view_point);
        if !p.is_finite() {
            return HitTarget::Background;
        }

        for (name, item) in self.markers.live().rev() {
            if item.value.center.distance(&p) <= item.value.style.base_radius {
                return HitTarget::Body(name.clone());
            }
        }

        for (key, item) in self.links.live().rev() {
            let link = &item.value;
            let reach = link.width / 2.0 + LINE_PICK_SLACK;
            if distance_to_segment(&p, &link.from, &link.to) <= reach {
                return HitTarget::Aspect(key.clone());
            }
        }

        for wedge in &self.wedges {
            if wedge.contains(&self.geometry, &p) {
                return HitTarget::Segment(wedge.index);
            }
        }

        HitTarget::Background
    }

    /// Export the scene as a declarative chart spec
    pub fn chart_spec(&self) -> ChartSpec {
        let visual = &self.visual;
        let center = self.geometry.center();
        let mut spec = ChartSpec::new(self.geometry.width, self.geometry.height);
        spec.transform = self.transform;
        spec.background_color = visual.background_color;

        for wedge in &self.wedges {
            spec.shapes.push(Shape::Wedge {
                center,
                radius_inner: self.geometry.inner_radius,
                radius_outer: self.geometry.outer_radius,
                start_angle: wedge.start_degree,
                end_angle: wedge.end_degree,
                fill: Some(visual.wedge_fill),
                stroke: Some(Stroke::solid(visual.wedge_stroke, visual.wedge_stroke_width)),
                opacity: visual.wedge_opacity,
            });
            spec.shapes.push(Shape::Text {
                position: Point::new(wedge.label_point.x, wedge.label_point.y + 10.0),
                content: wedge.symbol.clone(),
                size: visual.wedge_label_size,
                color: visual.wedge_label_color,
                anchor: TextAnchor::Middle,
                opacity: 1.0,
            });
        }

        if let Some(ray) = &self.ray {
            spec.shapes.push(Shape::Line {
                from: ray.from,
                to: ray.to,
                stroke: Stroke::solid(visual.ray_color, visual.ray_width),
                opacity: visual.ray_opacity,
            });
            spec.shapes.push(Shape::Circle {
                center: ray.to,
                radius: visual.ray_core_radius,
                fill: Some(visual.ray_color),
                stroke: None,
                opacity: visual.ray_core_opacity,
            });
        }

        for (key, item) in self.links.iter() {
            let link = &item.value;
            let stroke = match link.dash {
                Some(dash) => Stroke::dashed(link.color, link.width, &dash),
                None => Stroke::solid(link.color, link.width),
            };
            spec.shapes.push(Shape::Line {
                from: link.from,
                to: link.to,
                stroke,
                opacity: visual.aspect_opacity * item.opacity,
            });
            if item.is_live() {
                spec.metadata.aspects.push(AspectMetadata {
                    key: key.to_string(),
                    kind: link.kind.name().to_string(),
                    distance: link.distance,
                });
            }
        }

        for (_, item) in self.markers.iter() {
            let m = &item.value;
            spec.shapes.push(Shape::Circle {
                center: m.center,
                radius: m.style.glow_radius,
                fill: Some(m.color),
                stroke: None,
                opacity: m.style.glow_opacity * item.opacity,
            });
            spec.shapes.push(Shape::Circle {
                center: m.center,
                radius: m.style.base_radius,
                fill: Some(m.fill),
                stroke: Some(Stroke::solid(m.stroke, m.style.base_stroke_width)),
                opacity: item.opacity,
            });
            spec.shapes.push(Shape::Text {
                position: Point::new(m.center.x, m.center.y + m.symbol_offset),
                content: m.symbol.clone(),
                size: m.style.symbol_size,
                color: m.symbol_color,
                anchor: TextAnchor::Middle,
                opacity: item.opacity,
            });
            if item.is_live() {
                spec.metadata.bodies.push(BodyMetadata {
                    name: m.name.clone(),
                    label: m.label.clone(),
                    absolute_degree: m.absolute_degree,
                    focused: m.focused,
                });
            }
        }

        spec.metadata.time = self.snapshot_time;
        spec.metadata.selection = self.selection_label.clone();
        spec
    }
}

/// Shortest distance from `p` to the segment `a`-`b`
fn distance_to_segment(p: &Point, a: &Point, b: &Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(&a.lerp(b, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((distance_to_segment(&Point::new(5.0, 3.0), &a, &b) - 3.0).abs() < 1e-9);
        assert!((distance_to_segment(&Point::new(-4.0, 3.0), &a, &b) - 5.0).abs() < 1e-9);
        assert!((distance_to_segment(&Point::new(1.0, 1.0), &a, &a) - 2f64.sqrt()).abs() < 1e-9);
    }
}
