use std::time::Duration;

use orrery::aspects::{AspectDetector, AspectKind, AspectSet, PairKey};
use orrery::catalog::builtin_catalog;
use orrery::ephemeris::{LightSource, LunarPhase, PositionEngine, SkySnapshot};
use orrery::layout::WheelGeometry;
use orrery::rendering::{HitTarget, Point, Presence, RenderLayer, Shape};
use orrery::selection::{Selection, SelectionState};
use orrery::timeline::TimeWindow;
use orrery::viewport::ViewportTransform;

const FADE: Duration = Duration::from_millis(300);

fn sky() -> SkySnapshot {
    let window = TimeWindow::default();
    let engine = PositionEngine::new(window.epoch);
    let light = LightSource::new(window.start, 270.0, 1.0);
    engine.snapshot(builtin_catalog(), &light, window.epoch)
}

fn layer_with(selection: &SelectionState) -> (RenderLayer, SkySnapshot, AspectSet) {
    let snapshot = sky();
    let aspects = AspectDetector::new().detect(&snapshot);
    let mut layer = RenderLayer::new(WheelGeometry::default());
    layer.update(builtin_catalog(), &snapshot, &aspects, selection);
    (layer, snapshot, aspects)
}

fn body_point(snapshot: &SkySnapshot, name: &str) -> Point {
    WheelGeometry::default().body_point(
        builtin_catalog().get(name).unwrap(),
        &snapshot.get(name).unwrap().position,
    )
}

#[test]
fn test_update_builds_every_marker_and_link() {
    let (layer, snapshot, aspects) = layer_with(&SelectionState::new());
    assert_eq!(layer.markers().len(), 10);
    assert_eq!(layer.links().len(), aspects.len());
    assert_eq!(layer.wedges().len(), 12);

    let ray = layer.ray().unwrap();
    assert!(ray.from.distance(&body_point(&snapshot, "Sun")) < 1e-9);
    assert_eq!(ray.to, Point::new(500.0, 500.0));
}

#[test]
fn test_link_styles_by_kind() {
    let (layer, _, _) = layer_with(&SelectionState::new());
    let conj = &layer.links().get(&PairKey::new("Mars", "Pluto")).unwrap().value;
    assert_eq!(conj.kind, AspectKind::Conjunction);
    assert_eq!(conj.width, 14.0);
    assert!(conj.dash.is_none());

    let square = &layer.links().get(&PairKey::new("Mercury", "Uranus")).unwrap().value;
    assert_eq!(square.width, 3.0);
    assert_eq!(square.dash, Some([10.0, 10.0]));
}

#[test]
fn test_fastest_body_shows_phase_glyph() {
    let (layer, snapshot, _) = layer_with(&SelectionState::new());
    let moon = &layer.markers().get(&"Moon".to_string()).unwrap().value;
    let expected = LunarPhase::from_longitudes(
        snapshot.get("Moon").unwrap().position.absolute_degree,
        snapshot.light_degree,
    );
    assert_eq!(expected, LunarPhase::WaxingGibbous);
    assert_eq!(moon.symbol, "🌔");

    let sun = &layer.markers().get(&"Sun".to_string()).unwrap().value;
    assert_eq!(sun.symbol, "☉");
}

#[test]
fn test_secondary_markers_are_smaller() {
    let (layer, _, _) = layer_with(&SelectionState::new());
    let sun = &layer.markers().get(&"Sun".to_string()).unwrap().value;
    let mars = &layer.markers().get(&"Mars".to_string()).unwrap().value;
    assert_eq!(sun.style.base_radius, 38.0);
    assert!((mars.style.base_radius - 38.0 * 0.45).abs() < 1e-9);
    assert!(!sun.focused);
}

#[test]
fn test_hovered_and_selected_bodies_are_focused() {
    let mut selection = SelectionState::new();
    selection.hover(Some("Mars".to_string()));
    selection.select(Selection::Body("Venus".to_string()));
    let (layer, _, _) = layer_with(&selection);

    for name in ["Mars", "Venus"] {
        let marker = &layer.markers().get(&name.to_string()).unwrap().value;
        assert!(marker.focused, "{}", name);
        assert_eq!(marker.style.base_radius, 48.0);
        assert_eq!(marker.fill, marker.color);
    }
    let jupiter = &layer.markers().get(&"Jupiter".to_string()).unwrap().value;
    assert!(!jupiter.focused);
}

#[test]
fn test_hit_test_targets() {
    let (layer, snapshot, _) = layer_with(&SelectionState::new());

    let sun = body_point(&snapshot, "Sun");
    assert_eq!(layer.hit_test(sun), HitTarget::Body("Sun".to_string()));

    let mid = body_point(&snapshot, "Mercury").midpoint(&body_point(&snapshot, "Uranus"));
    assert_eq!(
        layer.hit_test(mid),
        HitTarget::Aspect(PairKey::new("Mercury", "Uranus"))
    );

    let ring = WheelGeometry::default().polar(15.0, 452.5);
    assert_eq!(layer.hit_test(ring), HitTarget::Segment(0));

    assert_eq!(layer.hit_test(Point::new(990.0, 10.0)), HitTarget::Background);
}

#[test]
fn test_hit_test_respects_transform() {
    let (mut layer, snapshot, _) = layer_with(&SelectionState::new());
    let transform = ViewportTransform::new(100.0, -50.0, 2.0);
    layer.set_transform(transform);

    let sun = body_point(&snapshot, "Sun");
    assert_eq!(
        layer.hit_test(transform.apply(sun)),
        HitTarget::Body("Sun".to_string())
    );
    assert_eq!(
        layer.hit_test(transform.apply(WheelGeometry::default().polar(105.0, 452.5))),
        HitTarget::Segment(3)
    );
}

#[test]
fn test_hit_targets_map_to_selections() {
    assert_eq!(HitTarget::Background.to_selection(), Selection::None);
    assert_eq!(
        HitTarget::Segment(4).to_selection(),
        Selection::ZodiacSegment(4)
    );
    assert_eq!(
        HitTarget::Body("Moon".to_string()).to_selection(),
        Selection::Body("Moon".to_string())
    );
}

#[test]
fn test_enter_then_exit_fades() {
    let (mut layer, snapshot, _) = layer_with(&SelectionState::new());
    assert!(layer.is_animating());
    let sun = layer.markers().get(&"Sun".to_string()).unwrap();
    assert_eq!(sun.presence, Presence::Entering);
    assert_eq!(sun.opacity, 0.0);
    let sun_id = sun.id;

    assert!(!layer.advance(FADE));
    assert!(!layer.is_animating());
    let sun = layer.markers().get(&"Sun".to_string()).unwrap();
    assert_eq!(sun.opacity, 1.0);

    let delta = layer.update(
        builtin_catalog(),
        &snapshot,
        &AspectSet::default(),
        &SelectionState::new(),
    );
    assert_eq!(delta.links.exited.len(), 5);
    assert_eq!(delta.markers.updated.len(), 10);
    assert!(delta.markers.entered.is_empty());
    assert_eq!(layer.markers().get(&"Sun".to_string()).unwrap().id, sun_id);

    // Exiting links stay drawable but are no longer hittable
    let mid = body_point(&snapshot, "Mercury").midpoint(&body_point(&snapshot, "Uranus"));
    assert_eq!(layer.links().len(), 5);
    assert_ne!(
        layer.hit_test(mid),
        HitTarget::Aspect(PairKey::new("Mercury", "Uranus"))
    );

    assert!(layer.advance(Duration::from_millis(150)));
    assert!(!layer.advance(Duration::from_millis(200)));
    assert!(layer.links().is_empty());
}

#[test]
fn test_chart_spec_export() {
    let (layer, _, aspects) = layer_with(&SelectionState::new());
    let spec = layer.chart_spec();
    assert_eq!(spec.width, 1000.0);
    assert_eq!(spec.metadata.bodies.len(), 10);
    assert_eq!(spec.metadata.aspects.len(), aspects.len());
    assert_eq!(spec.metadata.selection, Selection::None.to_string());

    let wedges = spec
        .shapes
        .iter()
        .filter(|s| matches!(s, Shape::Wedge { .. }))
        .count();
    assert_eq!(wedges, 12);

    let json = serde_json::to_string(&spec).unwrap();
    assert!(json.contains("\"bodies\""));
    let back: orrery::rendering::ChartSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(back.shapes.len(), spec.shapes.len());
}
