mod console;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use orrery::advisory::{Archivist, UnconfiguredAdvisor};
use orrery::catalog::{builtin_catalog, load_body_catalog_from_path, BodyCatalog};
use orrery::ephemeris::LightSource;
use orrery::events::{load_events, CelestialEvent, FileEventFeed};
use orrery::observatory::{Observatory, ObservatorySettings};
use orrery::timeline::{SpeedMode, TimeWindow};
use orrery_config::ObservatoryConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{interval, Interval, MissedTickBehavior};

use console::ConsoleInput;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Completions delivered to the main loop
enum AppEvent {
    Line(String),
    InputClosed,
    Events(Vec<CelestialEvent>),
    Advice { query: String, text: Option<String> },
}

fn main() -> anyhow::Result<()> {
    let config = orrery_config::load_observatory_config()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;
    runtime.block_on(run(config))
}

fn load_catalog(config: &ObservatoryConfig) -> BodyCatalog {
    match &config.catalog_path {
        Some(path) => match load_body_catalog_from_path(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::warn!("{:#}; using the built-in catalog", e);
                builtin_catalog().clone()
            }
        },
        None => builtin_catalog().clone(),
    }
}

fn settings_from(config: &ObservatoryConfig) -> ObservatorySettings {
    let window = TimeWindow::new(config.window_start, config.window_end, config.epoch);
    let speed = config.speed.parse::<SpeedMode>().unwrap_or_else(|e| {
        log::warn!("{}; using {}", e, SpeedMode::default());
        SpeedMode::default()
    });
    ObservatorySettings {
        light_source: LightSource::new(window.start, 270.0, 1.0),
        window,
        viewport_width_px: config.viewport_width_px,
        speed,
        autoplay: config.autoplay,
        origin_event_id: config.origin_event_id.clone(),
        ..ObservatorySettings::default()
    }
}

fn autoplay_timer(speed: SpeedMode) -> Interval {
    let mut timer = interval(speed.interval());
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    timer
}

fn spawn_console(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(AppEvent::Line(line)).is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    let _ = tx.send(AppEvent::InputClosed);
                    break;
                }
                Err(e) => {
                    log::error!("Console read failed: {}", e);
                    let _ = tx.send(AppEvent::InputClosed);
                    break;
                }
            }
        }
    });
}

fn spawn_feed(config: &ObservatoryConfig, tx: mpsc::UnboundedSender<AppEvent>) {
    let Some(path) = config.feed_path.clone() else {
        log::info!("No event feed configured, using built-in events");
        return;
    };
    let timeout = config.feed_timeout;
    tokio::spawn(async move {
        let feed = FileEventFeed::new(path);
        let events = load_events(&feed, timeout).await;
        let _ = tx.send(AppEvent::Events(events));
    });
}

fn print_status(obs: &Observatory) {
    let clock = obs.clock();
    println!(
        "{} | {:?} at {} | selection {}",
        clock.cursor().format("%Y-%m-%d %H:%M UTC"),
        clock.state(),
        clock.speed(),
        obs.selection().current()
    );
    for state in &obs.snapshot().bodies {
        println!("  {:<8} {}", state.name, state.position.short_label());
    }
    for record in obs.aspects().iter() {
        println!("  {} {} ({:.1}°)", record.key, record.kind.name(), record.distance);
    }
    if let Some(event) = obs.primary_near_event() {
        println!("  nearest event: {} ({})", event.name, event.date.format("%Y-%m-%d"));
    }
    match obs.countdown() {
        Some(countdown) => println!("  epoch in {}", countdown),
        None => println!("  epoch has passed"),
    }
}

fn print_events(obs: &Observatory) {
    let near = obs.observations();
    if near.is_empty() {
        println!("No events within the observation window");
    }
    for event in near {
        let marker = if event.is_major { "*" } else { " " };
        println!(
            "{} {} {:<24} {} [{}]",
            marker,
            event.date.format("%Y-%m-%d"),
            event.id,
            event.name,
            event.object
        );
    }
}

async fn run(config: ObservatoryConfig) -> anyhow::Result<()> {
    let catalog = load_catalog(&config);
    let mut obs = Observatory::new(catalog, settings_from(&config));
    let archivist = Arc::new(Archivist::new(UnconfiguredAdvisor));

    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    spawn_console(tx.clone());
    spawn_feed(&config, tx.clone());

    let mut timer_speed = obs.clock().speed();
    let mut autoplay = autoplay_timer(timer_speed);
    let mut frames = interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    println!("{}", console::HELP);
    loop {
        if obs.clock().speed() != timer_speed {
            timer_speed = obs.clock().speed();
            autoplay = autoplay_timer(timer_speed);
        }
        let playing = obs.clock().is_playing();
        let animating = obs.is_animating();

        tokio::select! {
            _ = autoplay.tick(), if playing => {
                obs.on_clock_tick();
            }
            _ = frames.tick(), if animating => {
                obs.on_frame(FRAME_INTERVAL);
            }
            event = rx.recv() => {
                let Some(event) = event else { break };
                match event {
                    AppEvent::Line(line) => match console::parse_line(&line) {
                        Ok(None) => {}
                        Ok(Some(ConsoleInput::Observatory(command))) => {
                            if let Some(change) = obs.handle(command) {
                                println!("selected {}", change.current);
                            }
                        }
                        Ok(Some(ConsoleInput::Status)) => print_status(&obs),
                        Ok(Some(ConsoleInput::Events)) => print_events(&obs),
                        Ok(Some(ConsoleInput::Ask(question))) => match obs.advisory_prompt(&question) {
                            Some(query) => {
                                let archivist = Arc::clone(&archivist);
                                let tx = tx.clone();
                                tokio::spawn(async move {
                                    let text = archivist.consult(&query).await;
                                    let _ = tx.send(AppEvent::Advice { query, text });
                                });
                            }
                            None => println!("Ask a question or select something first"),
                        },
                        Ok(Some(ConsoleInput::Dump)) => {
                            match serde_json::to_string_pretty(&obs.chart_spec()) {
                                Ok(json) => println!("{}", json),
                                Err(e) => log::error!("Failed to serialize chart: {}", e),
                            }
                        }
                        Ok(Some(ConsoleInput::Help)) => println!("{}", console::HELP),
                        Ok(Some(ConsoleInput::Quit)) => break,
                        Err(message) => println!("{}", message),
                    },
                    AppEvent::InputClosed => {
                        log::info!("Console closed");
                        break;
                    }
                    AppEvent::Events(events) => obs.set_events(events),
                    AppEvent::Advice { query, text } => {
                        log::debug!("Advisory answered: {}", query);
                        if let Some(text) = text {
                            println!("{}", text);
                        }
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted");
                break;
            }
        }
    }

    log::info!("Observatory shut down at {}", obs.clock().cursor());
    Ok(())
}
