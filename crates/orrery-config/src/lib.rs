use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Relative locations tried for `observatory.toml`, from the workspace root
/// and from inside `apps/observatory`.
pub const CONFIG_PATHS: [&str; 2] = ["configs/observatory.toml", "../../configs/observatory.toml"];

/// Resolved settings for one observatory session
#[derive(Debug, Clone, PartialEq)]
pub struct ObservatoryConfig {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub epoch: DateTime<Utc>,
    pub viewport_width_px: f64,
    /// Speed preset name ("super-slow", "slow", "standard", "fast")
    pub speed: String,
    pub autoplay: bool,
    pub origin_event_id: String,
    pub log_level: String,
    /// JSON body catalog; the compiled-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,
    /// Local CSV event feed; the compiled-in events are used when unset
    pub feed_path: Option<PathBuf>,
    pub feed_timeout: Duration,
}

impl Default for ObservatoryConfig {
    fn default() -> Self {
        Self {
            window_start: utc(2025, 12, 21, 0, 0),
            window_end: utc(2026, 12, 21, 0, 0),
            epoch: utc(2026, 2, 27, 7, 5),
            viewport_width_px: 1280.0,
            speed: "standard".to_string(),
            autoplay: false,
            origin_event_id: "great-align".to_string(),
            log_level: "info".to_string(),
            catalog_path: None,
            feed_path: None,
            feed_timeout: Duration::from_secs(10),
        }
    }
}

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default, Deserialize)]
struct WindowToml {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    epoch: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ViewToml {
    viewport_width_px: Option<f64>,
    speed: Option<String>,
    autoplay: Option<bool>,
    origin_event_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EventsToml {
    feed_path: Option<PathBuf>,
    feed_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    log_level: Option<String>,
    #[serde(default)]
    catalog_path: Option<PathBuf>,
    #[serde(default)]
    window: WindowToml,
    #[serde(default)]
    view: ViewToml,
    #[serde(default)]
    events: EventsToml,
}

/// Try the common relative paths for `configs/observatory.toml`.
pub fn read_observatory_toml_text() -> anyhow::Result<(PathBuf, String)> {
    for p in &CONFIG_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok((PathBuf::from(p), c));
        }
    }
    anyhow::bail!("Could not load observatory.toml from {:?}", CONFIG_PATHS);
}

/// Parse config text; missing keys keep their defaults.
pub fn parse_observatory_config(text: &str) -> anyhow::Result<ObservatoryConfig> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse observatory.toml: {e}"))?;
    let defaults = ObservatoryConfig::default();

    let config = ObservatoryConfig {
        window_start: root.window.start.unwrap_or(defaults.window_start),
        window_end: root.window.end.unwrap_or(defaults.window_end),
        epoch: root.window.epoch.unwrap_or(defaults.epoch),
        viewport_width_px: root.view.viewport_width_px.unwrap_or(defaults.viewport_width_px),
        speed: root.view.speed.unwrap_or(defaults.speed),
        autoplay: root.view.autoplay.unwrap_or(defaults.autoplay),
        origin_event_id: root.view.origin_event_id.unwrap_or(defaults.origin_event_id),
        log_level: root.log_level.unwrap_or(defaults.log_level),
        catalog_path: root.catalog_path,
        feed_path: root.events.feed_path,
        feed_timeout: root
            .events
            .feed_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.feed_timeout),
    };
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ObservatoryConfig) -> anyhow::Result<()> {
    if config.window_end <= config.window_start {
        anyhow::bail!(
            "window.end ({}) must be after window.start ({})",
            config.window_end,
            config.window_start
        );
    }
    if !config.viewport_width_px.is_finite() || config.viewport_width_px <= 0.0 {
        anyhow::bail!(
            "view.viewport_width_px must be a positive number, got {}",
            config.viewport_width_px
        );
    }
    if config.feed_timeout.is_zero() {
        anyhow::bail!("events.feed_timeout_ms must be greater than zero");
    }
    Ok(())
}

/// Resolve a config-relative path against the directory the config was read from
pub fn resolve_relative(config_path: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    // configs/observatory.toml -> paths are relative to the workspace root
    config_path
        .parent()
        .and_then(|configs| configs.parent())
        .map(|root| root.join(path))
        .unwrap_or_else(|| path.to_path_buf())
}

/// Load the config from disk, falling back to defaults when no file exists.
///
/// A file that exists but fails to parse is an error.
pub fn load_observatory_config() -> anyhow::Result<ObservatoryConfig> {
    let (path, text) = match read_observatory_toml_text() {
        Ok(found) => found,
        Err(_) => return Ok(ObservatoryConfig::default()),
    };
    let mut config = parse_observatory_config(&text)?;
    config.catalog_path = config
        .catalog_path
        .map(|p| resolve_relative(&path, &p));
    config.feed_path = config.feed_path.map(|p| resolve_relative(&path, &p));
    Ok(config)
}
