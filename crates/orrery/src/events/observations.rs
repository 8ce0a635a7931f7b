use chrono::{DateTime, Duration, Utc};

use crate::events::types::CelestialEvent;

/// Half-width of the observation window around the cursor
pub fn observation_window() -> Duration {
    Duration::days(45)
}

/// Events strictly within the window around `time`, ordered by date
pub fn observations_near(events: &[CelestialEvent], time: DateTime<Utc>) -> Vec<&CelestialEvent> {
    let window = observation_window().num_milliseconds();
    let mut near: Vec<&CelestialEvent> = events
        .iter()
        .filter(|event| event.distance_ms(time) < window)
        .collect();
    near.sort_by_key(|event| event.date);
    near
}

/// Nearest event to `time`: searched among observations first, then among
/// all events when the window is empty. Ties keep the earlier entry.
pub fn primary_near_event(events: &[CelestialEvent], time: DateTime<Utc>) -> Option<&CelestialEvent> {
    let near = observations_near(events, time);
    if near.is_empty() {
        nearest(events.iter(), time)
    } else {
        nearest(near.into_iter(), time)
    }
}

fn nearest<'a>(
    candidates: impl Iterator<Item = &'a CelestialEvent>,
    time: DateTime<Utc>,
) -> Option<&'a CelestialEvent> {
    candidates.fold(None, |best: Option<&'a CelestialEvent>, event| match best {
        Some(b) if b.distance_ms(time) <= event.distance_ms(time) => Some(b),
        _ => Some(event),
    })
}
