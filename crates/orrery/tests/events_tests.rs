use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use orrery::events::{
    fallback_events, load_events, observations_near, parse_event_csv, primary_near_event,
    CelestialEvent, EventFeed, FeedError, FileEventFeed,
};

const FEED_TEXT: &str = "\
date,name,object,mag,ra,dec,notes
2026-03-20,Equinox Alignment,Sun,,,,Cardinal point
\"2026-04-02\",\"Conjunction\",\"Mars/Jupiter\",\"1.2\",\"03h 14m\",\"+18 05\",\"Close pair\"

not-a-date,Broken,Moon,,,,
2026-05-05,,Moon,,bogus,+91x,
";

struct StaticFeed(&'static str);

#[async_trait]
impl EventFeed for StaticFeed {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self) -> Result<String, FeedError> {
        Ok(self.0.to_string())
    }
}

struct FailingFeed;

#[async_trait]
impl EventFeed for FailingFeed {
    fn name(&self) -> &str {
        "failing"
    }

    async fn fetch(&self) -> Result<String, FeedError> {
        Err(FeedError::Transport("connection refused".to_string()))
    }
}

struct SlowFeed;

#[async_trait]
impl EventFeed for SlowFeed {
    fn name(&self) -> &str {
        "slow"
    }

    async fn fetch(&self) -> Result<String, FeedError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(FEED_TEXT.to_string())
    }
}

fn ids(events: &[CelestialEvent]) -> Vec<&str> {
    events.iter().map(|e| e.id.as_str()).collect()
}

#[test]
fn test_parse_feed_rows() {
    let events = parse_event_csv(FEED_TEXT);
    assert_eq!(ids(&events), vec!["remote-0", "remote-1", "remote-3"]);

    let equinox = &events[0];
    assert_eq!(equinox.name, "Equinox Alignment");
    assert_eq!(equinox.event_type, "Equinox Alignment");
    assert!(equinox.is_major);
    assert_eq!(equinox.date, Utc.with_ymd_and_hms(2026, 3, 20, 0, 0, 0).unwrap());
    assert_eq!(equinox.notes.as_deref(), Some("Cardinal point"));
    assert!(equinox.magnitude.is_none());

    let conj = &events[1];
    assert_eq!(conj.object, "Mars/Jupiter");
    assert_eq!(conj.magnitude.as_deref(), Some("1.2"));
    assert_eq!(conj.right_ascension.as_deref(), Some("03h 14m"));
    assert_eq!(conj.declination.as_deref(), Some("+18 05"));
    assert!(!conj.is_major);
    assert_eq!(conj.description, "A Conjunction event involving Mars/Jupiter.");
}

#[test]
fn test_unnamed_row_defaults() {
    let events = parse_event_csv(FEED_TEXT);
    let unnamed = events.iter().find(|e| e.id == "remote-3").unwrap();
    assert_eq!(unnamed.name, "Observation");
    assert_eq!(unnamed.event_type, "Celestial Interaction");
    assert!(unnamed.right_ascension.is_none());
    assert!(unnamed.declination.is_none());
}

#[test]
fn test_header_only_parses_to_nothing() {
    assert!(parse_event_csv("date,name,object,mag,ra,dec,notes\n").is_empty());
    assert!(parse_event_csv("").is_empty());
}

#[tokio::test]
async fn test_feed_success_replaces_fallback() {
    let events = load_events(&StaticFeed(FEED_TEXT), Duration::from_secs(5)).await;
    assert_eq!(events.len(), 3);
}

#[tokio::test]
async fn test_feed_failure_keeps_fallback() {
    let events = load_events(&FailingFeed, Duration::from_secs(5)).await;
    assert_eq!(ids(&events), ids(fallback_events()));
}

#[tokio::test]
async fn test_empty_feed_keeps_fallback() {
    let feed = StaticFeed("date,name,object,mag,ra,dec,notes\nnope,,,,,,\n");
    let events = load_events(&feed, Duration::from_secs(5)).await;
    assert_eq!(events.len(), fallback_events().len());
}

#[tokio::test(start_paused = true)]
async fn test_slow_feed_times_out() {
    let events = load_events(&SlowFeed, Duration::from_secs(2)).await;
    assert_eq!(ids(&events), ids(fallback_events()));
}

#[tokio::test]
async fn test_file_feed() {
    let path = std::env::temp_dir().join(format!("orrery-feed-{}.csv", std::process::id()));
    tokio::fs::write(&path, FEED_TEXT).await.unwrap();
    let events = load_events(&FileEventFeed::new(&path), Duration::from_secs(5)).await;
    tokio::fs::remove_file(&path).await.unwrap();
    assert_eq!(events.len(), 3);

    let missing = FileEventFeed::new(std::env::temp_dir().join("orrery-no-such-feed.csv"));
    let events = load_events(&missing, Duration::from_secs(5)).await;
    assert_eq!(events.len(), fallback_events().len());
}

#[test]
fn test_observations_within_window() {
    let events = fallback_events();
    let cursor = Utc.with_ymd_and_hms(2026, 2, 27, 7, 5, 0).unwrap();
    let near = observations_near(events, cursor);
    assert_eq!(
        near.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(),
        vec!["great-align", "venus-saturn-conj-26"]
    );
    // Jan 10 is 48 days before the cursor
    assert!(near.iter().all(|e| e.id != "jupiter-opp-26"));
    for pair in near.windows(2) {
        assert!(pair[0].date <= pair[1].date);
    }
}

#[test]
fn test_primary_near_event() {
    let events = fallback_events();
    let cursor = Utc.with_ymd_and_hms(2026, 3, 5, 0, 0, 0).unwrap();
    assert_eq!(
        primary_near_event(events, cursor).map(|e| e.id.as_str()),
        Some("venus-saturn-conj-26")
    );

    // Outside every window the nearest event overall is used
    let late = Utc.with_ymd_and_hms(2027, 6, 1, 0, 0, 0).unwrap();
    assert!(observations_near(events, late).is_empty());
    assert_eq!(
        primary_near_event(events, late).map(|e| e.id.as_str()),
        Some("geminids-26")
    );

    assert!(primary_near_event(&[], late).is_none());
}
