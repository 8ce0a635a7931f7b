use chrono::{DateTime, Utc};
use lazy_static::lazy_static;

use crate::events::types::CelestialEvent;

struct Row {
    id: &'static str,
    name: &'static str,
    object: &'static str,
    date: &'static str,
    event_type: &'static str,
    mag: Option<&'static str>,
    ra: Option<&'static str>,
    dec: Option<&'static str>,
    description: &'static str,
    significance: &'static str,
    notes: &'static str,
    link: &'static str,
    is_major: bool,
}

const ROWS: &[Row] = &[
    Row {
        id: "jupiter-opp-26",
        name: "Opposition of Jupiter",
        object: "Jupiter",
        date: "2026-01-10T00:00:00Z",
        event_type: "Opposition",
        mag: Some("-2.7"),
        ra: Some("07h 25m"),
        dec: Some("+22 15"),
        description: "Jupiter at its brightest and closest for the year.",
        significance: "Brightest of the year; currently in Gemini.",
        notes: "Exceptional clarity for observing the Jovian moons from Glastonbury.",
        link: "https://en.wikipedia.org/wiki/Opposition_(astronomy)",
        is_major: false,
    },
    Row {
        id: "great-align",
        name: "The Great Alignment",
        object: "Multi-Planet",
        date: "2026-02-27T07:05:00Z",
        event_type: "Alignment",
        mag: None,
        ra: None,
        dec: None,
        description: "A profound convergence of the Sun, Mercury, Venus, Saturn, and Neptune at 0° Aries.",
        significance: "Cardinal reset of time. The birth of the highest spiritual love.",
        notes: "Saturn and Neptune meet at the world point, signaling a generational shift.",
        link: "https://www.astrology.com/aspects/conjunction",
        is_major: true,
    },
    Row {
        id: "venus-saturn-conj-26",
        name: "Conjunction of Venus & Saturn",
        object: "Venus/Saturn",
        date: "2026-03-08T00:00:00Z",
        event_type: "Conjunction",
        mag: Some("-3.9"),
        ra: Some("00h 15m"),
        dec: Some("-02 10"),
        description: "A very close pairing of Venus and Saturn.",
        significance: "Close pairing 0.3 deg.",
        notes: "Harmonious beauty meets structural time in the early degrees of Aries.",
        link: "https://en.wikipedia.org/wiki/Conjunction_(astronomy)",
        is_major: false,
    },
    Row {
        id: "venus-jupiter-conj-26",
        name: "Conjunction of Venus & Jupiter",
        object: "Venus/Jupiter",
        date: "2026-06-09T00:00:00Z",
        event_type: "Conjunction",
        mag: Some("-4.0"),
        ra: Some("07h 52m"),
        dec: Some("+22 28"),
        description: "The two brightest planets meet in a spectacular display.",
        significance: "Brightest conjunction of 2026.",
        notes: "The \"Greater and Lesser Benefics\" combine their influence.",
        link: "https://en.wikipedia.org/wiki/Conjunction_(astronomy)",
        is_major: false,
    },
    Row {
        id: "solar-eclipse-26",
        name: "Solar Eclipse",
        object: "Sun/Moon",
        date: "2026-08-12T19:13:00Z",
        event_type: "Eclipse",
        mag: Some("0.93"),
        ra: Some("09h 31m"),
        dec: Some("+14 48"),
        description: "Deep partial solar eclipse visible across much of Europe.",
        significance: "93% coverage at 19:13 BST.",
        notes: "A powerful moment of solar obscuration, visible from the Tor.",
        link: "https://en.wikipedia.org/wiki/Solar_eclipse_of_August_12,_2026",
        is_major: true,
    },
    Row {
        id: "perseids-26",
        name: "Perseid Meteor Shower",
        object: "Perseids",
        date: "2026-08-13T00:00:00Z",
        event_type: "Meteor",
        mag: Some("2.0"),
        ra: Some("03h 04m"),
        dec: Some("+58 00"),
        description: "Annual peak of the Perseid meteor stream.",
        significance: "Perfect dark skies; 100/hr.",
        notes: "A visual symphony of cosmic debris burning up in the atmosphere.",
        link: "https://en.wikipedia.org/wiki/Perseids",
        is_major: false,
    },
    Row {
        id: "saturn-opp-26",
        name: "Opposition of Saturn",
        object: "Saturn",
        date: "2026-10-04T00:00:00Z",
        event_type: "Opposition",
        mag: Some("0.5"),
        ra: Some("00h 52m"),
        dec: Some("-02 10"),
        description: "Saturn directly opposite the Sun.",
        significance: "Edge-on rings; visible all night.",
        notes: "The rings are nearly invisible, emphasizing the starkness of Chronos.",
        link: "https://en.wikipedia.org/wiki/Opposition_(astronomy)",
        is_major: false,
    },
    Row {
        id: "geminids-26",
        name: "Geminid Meteor Shower",
        object: "Geminids",
        date: "2026-12-14T00:00:00Z",
        event_type: "Meteor",
        mag: Some("1.8"),
        ra: Some("07h 28m"),
        dec: Some("+32 00"),
        description: "The strongest meteor shower of 2026.",
        significance: "Strongest shower of 2026.",
        notes: "Radiating from Gemini, a grand finale for the archival year.",
        link: "https://en.wikipedia.org/wiki/Geminids",
        is_major: false,
    },
];

lazy_static! {
    static ref FALLBACK: Vec<CelestialEvent> = ROWS
        .iter()
        .filter_map(|row| {
            let date = DateTime::parse_from_rfc3339(row.date)
                .map(|d| d.with_timezone(&Utc))
                .ok()?;
            Some(CelestialEvent {
                id: row.id.to_string(),
                name: row.name.to_string(),
                date,
                description: row.description.to_string(),
                significance: row.significance.to_string(),
                event_type: row.event_type.to_string(),
                object: row.object.to_string(),
                magnitude: row.mag.map(str::to_string),
                right_ascension: row.ra.map(str::to_string),
                declination: row.dec.map(str::to_string),
                notes: Some(row.notes.to_string()),
                link: Some(row.link.to_string()),
                is_major: row.is_major,
            })
        })
        .collect();
}

/// Compiled-in event list used when no feed is available
pub fn fallback_events() -> &'static [CelestialEvent] {
    &FALLBACK
}
