use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unix seconds for 2025-12-21T00:00Z
const DEFAULT_START: i64 = 1_766_275_200;
/// Unix seconds for 2026-12-21T00:00Z
const DEFAULT_END: i64 = 1_797_811_200;
/// Unix seconds for 2026-02-27T07:05Z
const DEFAULT_EPOCH: i64 = 1_772_175_900;

/// Closed simulation window plus the reference epoch of the position model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub epoch: DateTime<Utc>,
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            start: DateTime::from_timestamp(DEFAULT_START, 0).unwrap_or_default(),
            end: DateTime::from_timestamp(DEFAULT_END, 0).unwrap_or_default(),
            epoch: DateTime::from_timestamp(DEFAULT_EPOCH, 0).unwrap_or_default(),
        }
    }
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, epoch: DateTime<Utc>) -> Self {
        if end < start {
            log::warn!("Time window end precedes start, swapping");
            return Self {
                start: end,
                end: start,
                epoch,
            };
        }
        Self { start, end, epoch }
    }

    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        time >= self.start && time <= self.end
    }

    pub fn clamp(&self, time: DateTime<Utc>) -> DateTime<Utc> {
        time.clamp(self.start, self.end)
    }

    /// Fraction of the window elapsed at `time`, in [0, 1]
    pub fn progress(&self, time: DateTime<Utc>) -> f64 {
        let span = (self.end - self.start).num_milliseconds();
        if span <= 0 {
            return 0.0;
        }
        let offset = (self.clamp(time) - self.start).num_milliseconds();
        offset as f64 / span as f64
    }

    /// Instant at fraction `fraction` of the window (clamped to [0, 1])
    pub fn at_progress(&self, fraction: f64) -> DateTime<Utc> {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let span = (self.end - self.start).num_milliseconds() as f64;
        self.start + Duration::milliseconds((span * fraction).round() as i64)
    }
}

/// Autoplay speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeedMode {
    SuperSlow,
    Slow,
    #[default]
    Standard,
    Fast,
}

impl SpeedMode {
    pub const ALL: [SpeedMode; 4] = [
        SpeedMode::SuperSlow,
        SpeedMode::Slow,
        SpeedMode::Standard,
        SpeedMode::Fast,
    ];

    /// Wall-clock interval between autoplay ticks
    pub fn interval(&self) -> std::time::Duration {
        let ms = match self {
            SpeedMode::SuperSlow => 1000,
            SpeedMode::Slow => 200,
            SpeedMode::Standard => 50,
            SpeedMode::Fast => 16,
        };
        std::time::Duration::from_millis(ms)
    }

    /// Simulated time advanced per tick (0.3 h, 1.8 h, 7.2 h, 50.4 h)
    pub fn step(&self) -> Duration {
        let minutes = match self {
            SpeedMode::SuperSlow => 18,
            SpeedMode::Slow => 108,
            SpeedMode::Standard => 432,
            SpeedMode::Fast => 3024,
        };
        Duration::minutes(minutes)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpeedMode::SuperSlow => "super-slow",
            SpeedMode::Slow => "slow",
            SpeedMode::Standard => "standard",
            SpeedMode::Fast => "fast",
        }
    }
}

impl fmt::Display for SpeedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SpeedMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "super-slow" | "superslow" => Ok(SpeedMode::SuperSlow),
            "slow" => Ok(SpeedMode::Slow),
            "standard" | "normal" => Ok(SpeedMode::Standard),
            "fast" => Ok(SpeedMode::Fast),
            other => Err(format!("unknown speed mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayState {
    Playing,
    Paused,
}

/// The time cursor and its autoplay state.
///
/// The cursor only moves through `tick`, `scrub_to` and `jump_to`, and it
/// never leaves the window.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    window: TimeWindow,
    cursor: DateTime<Utc>,
    state: PlayState,
    speed: SpeedMode,
}

impl SimulationClock {
    /// Paused at the epoch (clamped into the window)
    pub fn new(window: TimeWindow) -> Self {
        Self {
            cursor: window.clamp(window.epoch),
            window,
            state: PlayState::Paused,
            speed: SpeedMode::default(),
        }
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    pub fn cursor(&self) -> DateTime<Utc> {
        self.cursor
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    pub fn speed(&self) -> SpeedMode {
        self.speed
    }

    pub fn play(&mut self) {
        self.state = PlayState::Playing;
    }

    pub fn pause(&mut self) {
        self.state = PlayState::Paused;
    }

    pub fn toggle(&mut self) {
        self.state = match self.state {
            PlayState::Playing => PlayState::Paused,
            PlayState::Paused => PlayState::Playing,
        };
    }

    pub fn set_speed(&mut self, speed: SpeedMode) {
        if speed != self.speed {
            log::debug!("Speed mode {} -> {}", self.speed, speed);
        }
        self.speed = speed;
    }

    /// Advance one autoplay step. Returns false when paused.
    ///
    /// Stepping past the end lands exactly on the start.
    pub fn tick(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        let next = self.cursor + self.speed.step();
        self.cursor = if next > self.window.end {
            self.window.start
        } else {
            next
        };
        true
    }

    /// Pause autoplay, then move the cursor (clamped)
    pub fn scrub_to(&mut self, time: DateTime<Utc>) {
        self.pause();
        self.cursor = self.window.clamp(time);
    }

    /// Move the cursor (clamped) without touching play state
    pub fn jump_to(&mut self, time: DateTime<Utc>) {
        self.cursor = self.window.clamp(time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_bounds() {
        let window = TimeWindow::default();
        assert_eq!(window.start.to_rfc3339(), "2025-12-21T00:00:00+00:00");
        assert_eq!(window.end.to_rfc3339(), "2026-12-21T00:00:00+00:00");
        assert_eq!(window.epoch.to_rfc3339(), "2026-02-27T07:05:00+00:00");
    }

    #[test]
    fn test_speed_steps_in_hours() {
        assert_eq!(SpeedMode::SuperSlow.step().num_minutes(), 18);
        assert_eq!(SpeedMode::Standard.step().num_minutes() as f64 / 60.0, 7.2);
        assert_eq!(SpeedMode::Fast.step().num_minutes() as f64 / 60.0, 50.4);
    }

    #[test]
    fn test_speed_parse() {
        assert_eq!("super_slow".parse::<SpeedMode>(), Ok(SpeedMode::SuperSlow));
        assert_eq!("FAST".parse::<SpeedMode>(), Ok(SpeedMode::Fast));
        assert!("warp".parse::<SpeedMode>().is_err());
    }

    #[test]
    fn test_progress_round_trip_endpoints() {
        let window = TimeWindow::default();
        assert_eq!(window.at_progress(0.0), window.start);
        assert_eq!(window.at_progress(1.0), window.end);
        assert_eq!(window.progress(window.end + Duration::days(3)), 1.0);
    }
}
