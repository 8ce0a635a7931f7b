//! Observatory session: wires the clock, position model, aspect detection,
//! selection, camera and render layer together behind one command surface.
//!
//! Every mutation goes through [`Observatory::handle`], [`Observatory::on_clock_tick`]
//! or [`Observatory::on_frame`], all called from a single loop.

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::advisory;
use crate::aspects::{AspectDetector, AspectSet, AspectSettings};
use crate::catalog::{zodiac, BodyCatalog};
use crate::ephemeris::{LightSource, PositionEngine, SkySnapshot};
use crate::events::{self, CelestialEvent};
use crate::layout::WheelGeometry;
use crate::rendering::{ChartSpec, HitTarget, Point, RenderLayer, VisualConfig};
use crate::selection::{Selection, SelectionChange, SelectionState};
use crate::timeline::{Countdown, SimulationClock, SpeedMode, TimeWindow};
use crate::viewport::{focus_for, FocusCommand, FocusContext, FocusScales, ViewportController};

/// Default id of the event that focuses the zero-degree origin
pub const DEFAULT_ORIGIN_EVENT_ID: &str = "great-align";

#[derive(Debug, Clone)]
pub struct ObservatorySettings {
    pub window: TimeWindow,
    pub viewport_width_px: f64,
    pub speed: SpeedMode,
    pub autoplay: bool,
    pub origin_event_id: String,
    pub light_source: LightSource,
    pub aspects: AspectSettings,
    pub focus_scales: FocusScales,
    pub geometry: WheelGeometry,
    pub visual: VisualConfig,
}

impl Default for ObservatorySettings {
    fn default() -> Self {
        let window = TimeWindow::default();
        Self {
            light_source: LightSource::new(window.start, 270.0, 1.0),
            window,
            viewport_width_px: 1280.0,
            speed: SpeedMode::default(),
            autoplay: false,
            origin_event_id: DEFAULT_ORIGIN_EVENT_ID.to_string(),
            aspects: AspectSettings::default(),
            focus_scales: FocusScales::default(),
            geometry: WheelGeometry::default(),
            visual: VisualConfig::default(),
        }
    }
}

/// User-facing commands
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Select(Selection),
    Clear,
    Hover(Option<String>),
    ZoomIn,
    ZoomOut,
    Recenter,
    Play,
    Pause,
    TogglePlay,
    SetSpeed(SpeedMode),
    ScrubTo(DateTime<Utc>),
    JumpToEvent(String),
    /// Drag by a view-space offset
    Pan { dx: f64, dy: f64 },
    /// Wheel/pinch zoom about a view-space point
    ZoomAt { factor: f64, x: f64, y: f64 },
    /// Pointer click at a view-space point
    Click { x: f64, y: f64 },
    Resize { width_px: f64 },
}

pub struct Observatory {
    catalog: BodyCatalog,
    engine: PositionEngine,
    light: LightSource,
    detector: AspectDetector,
    clock: SimulationClock,
    selection: SelectionState,
    viewport: ViewportController,
    render: RenderLayer,
    geometry: WheelGeometry,
    events: Vec<CelestialEvent>,
    origin_event_id: String,
    focus_scales: FocusScales,
    snapshot: SkySnapshot,
    aspects: AspectSet,
}

impl Observatory {
    pub fn new(catalog: BodyCatalog, settings: ObservatorySettings) -> Self {
        let engine = PositionEngine::new(settings.window.epoch);
        let mut clock = SimulationClock::new(settings.window);
        clock.set_speed(settings.speed);
        if settings.autoplay {
            clock.play();
        }
        let detector = AspectDetector::with_settings(settings.aspects);
        let snapshot = engine.snapshot(&catalog, &settings.light_source, clock.cursor());
        let aspects = detector.detect(&snapshot);
        let geometry = settings.geometry;
        let viewport =
            ViewportController::new(geometry.width, geometry.height, settings.viewport_width_px);

        let mut observatory = Self {
            catalog,
            engine,
            light: settings.light_source,
            detector,
            clock,
            selection: SelectionState::new(),
            viewport,
            render: RenderLayer::with_config(geometry, settings.visual),
            geometry,
            events: events::fallback_events().to_vec(),
            origin_event_id: settings.origin_event_id,
            focus_scales: settings.focus_scales,
            snapshot,
            aspects,
        };
        observatory.refresh_scene();
        observatory.sync_transform();
        log::info!(
            "Observatory ready: {} bodies, cursor {}",
            observatory.catalog.len(),
            observatory.clock.cursor()
        );
        observatory
    }

    pub fn catalog(&self) -> &BodyCatalog {
        &self.catalog
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn render_layer(&self) -> &RenderLayer {
        &self.render
    }

    pub fn snapshot(&self) -> &SkySnapshot {
        &self.snapshot
    }

    pub fn aspects(&self) -> &AspectSet {
        &self.aspects
    }

    pub fn events(&self) -> &[CelestialEvent] {
        &self.events
    }

    /// Replace the event list (e.g. after a feed load)
    pub fn set_events(&mut self, events: Vec<CelestialEvent>) {
        log::debug!("Event list replaced ({} events)", events.len());
        self.events = events;
    }

    /// Whether frame ticks are needed (camera transition or fades)
    pub fn is_animating(&self) -> bool {
        self.viewport.is_animating() || self.render.is_animating()
    }

    /// Apply one command. Returns the selection change it caused, if any.
    pub fn handle(&mut self, command: Command) -> Option<SelectionChange> {
        let change = match command {
            Command::Select(selection) => self.select(selection),
            Command::Clear => self.select(Selection::None),
            Command::Hover(body) => {
                if self.selection.hover(body) {
                    self.refresh_scene();
                }
                None
            }
            Command::ZoomIn => {
                self.viewport.zoom_in();
                None
            }
            Command::ZoomOut => {
                self.viewport.zoom_out();
                None
            }
            Command::Recenter => {
                self.viewport.recenter();
                None
            }
            Command::Play => {
                self.clock.play();
                None
            }
            Command::Pause => {
                self.clock.pause();
                None
            }
            Command::TogglePlay => {
                self.clock.toggle();
                None
            }
            Command::SetSpeed(speed) => {
                self.clock.set_speed(speed);
                None
            }
            Command::ScrubTo(time) => {
                self.clock.scrub_to(time);
                self.recompute();
                None
            }
            Command::JumpToEvent(id) => self.jump_to_event(&id),
            Command::Pan { dx, dy } => {
                self.viewport.pan_by(dx, dy);
                None
            }
            Command::ZoomAt { factor, x, y } => {
                self.viewport.zoom_at(factor, Point::new(x, y));
                None
            }
            Command::Click { x, y } => {
                let target = self.render.hit_test(Point::new(x, y));
                log::debug!("Click at ({:.1}, {:.1}) hit {:?}", x, y, target);
                self.select(target.to_selection())
            }
            Command::Resize { width_px } => {
                self.viewport.set_viewport_width(width_px);
                None
            }
        };
        self.sync_transform();
        change
    }

    /// Autoplay timer callback. Returns false when paused.
    pub fn on_clock_tick(&mut self) -> bool {
        if !self.clock.tick() {
            return false;
        }
        self.recompute();
        true
    }

    /// Animation frame callback. Returns whether more frames are needed.
    pub fn on_frame(&mut self, dt: Duration) -> bool {
        self.viewport.tick(dt);
        self.render.advance(dt);
        self.sync_transform();
        self.is_animating()
    }

    pub fn hit_test(&self, x: f64, y: f64) -> HitTarget {
        self.render.hit_test(Point::new(x, y))
    }

    pub fn chart_spec(&self) -> ChartSpec {
        self.render.chart_spec()
    }

    /// Events within the observation window of the cursor
    pub fn observations(&self) -> Vec<&CelestialEvent> {
        events::observations_near(&self.events, self.clock.cursor())
    }

    pub fn primary_near_event(&self) -> Option<&CelestialEvent> {
        events::primary_near_event(&self.events, self.clock.cursor())
    }

    /// Wall-clock countdown to the epoch
    pub fn countdown(&self) -> Option<Countdown> {
        Countdown::from_now(self.engine.epoch())
    }

    /// Prompt for the advisory service: the user's own question, or a prompt
    /// about the current selection when the question is blank.
    pub fn advisory_prompt(&self, question: &str) -> Option<String> {
        let question = question.trim();
        if question.is_empty() {
            self.advisory_query()
        } else {
            Some(question.to_string())
        }
    }

    /// Advisory prompt for the current selection
    pub fn advisory_query(&self) -> Option<String> {
        match self.selection.current() {
            Selection::None => None,
            Selection::Body(name) => {
                let body = self.catalog.get(name)?;
                let label = self.snapshot.get(name)?.position.short_label();
                Some(advisory::body_query(body, &label))
            }
            Selection::ZodiacSegment(index) => zodiac::segment(*index).map(advisory::segment_query),
            Selection::Aspect(key) => self.aspects.get(key).map(advisory::aspect_query),
            Selection::Event(id) => self
                .events
                .iter()
                .find(|e| &e.id == id)
                .map(|e| e.advisory_query()),
        }
    }

    fn select(&mut self, selection: Selection) -> Option<SelectionChange> {
        let change = self.selection.select(selection)?;
        let command = self.focus_command();
        if command == FocusCommand::Skip {
            log::debug!("No focus target for {}", change.current);
        }
        self.viewport.apply(command);
        self.refresh_scene();
        Some(change)
    }

    fn jump_to_event(&mut self, id: &str) -> Option<SelectionChange> {
        let Some(date) = self.events.iter().find(|e| e.id == id).map(|e| e.date) else {
            log::debug!("Unknown event id {:?}", id);
            return None;
        };
        self.clock.jump_to(date);
        self.recompute();
        self.select(Selection::Event(id.to_string()))
    }

    fn focus_command(&self) -> FocusCommand {
        let ctx = FocusContext {
            geometry: &self.geometry,
            catalog: &self.catalog,
            snapshot: &self.snapshot,
            events: &self.events,
            origin_event_id: &self.origin_event_id,
            scales: &self.focus_scales,
        };
        focus_for(self.selection.current(), &ctx)
    }

    fn recompute(&mut self) {
        self.snapshot = self
            .engine
            .snapshot(&self.catalog, &self.light, self.clock.cursor());
        self.aspects = self.detector.detect(&self.snapshot);
        self.refresh_scene();
    }

    fn refresh_scene(&mut self) {
        let delta = self
            .render
            .update(&self.catalog, &self.snapshot, &self.aspects, &self.selection);
        if !delta.links.entered.is_empty() || !delta.links.exited.is_empty() {
            log::debug!(
                "Aspect links at {}: +{} -{}",
                self.snapshot.time,
                delta.links.entered.len(),
                delta.links.exited.len()
            );
        }
        if !delta.markers.entered.is_empty() || !delta.markers.exited.is_empty() {
            log::debug!(
                "Body markers: +{} -{}",
                delta.markers.entered.len(),
                delta.markers.exited.len()
            );
        }
    }

    fn sync_transform(&mut self) {
        self.render.set_transform(self.viewport.transform());
    }
}
