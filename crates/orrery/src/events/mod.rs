pub mod builtin;
pub mod feed;
pub mod observations;
pub mod types;

pub use builtin::fallback_events;
pub use feed::{load_events, parse_event_csv, parse_event_date, EventFeed, FeedError, FileEventFeed};
pub use observations::{observation_window, observations_near, primary_near_event};
pub use types::CelestialEvent;
