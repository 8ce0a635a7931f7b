use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Concentric ring a body marker is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadialTrack {
    /// Primary bodies, nearest the zodiac ring
    Outer,
    /// Secondary bodies
    Middle,
    /// Near-stationary slow bodies, kept apart from the rest
    Inner,
}

/// Immutable catalog entry for a tracked body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CelestialBody {
    pub name: String,
    pub symbol: String,
    /// Zodiac segment name at the reference epoch
    pub reference_segment: String,
    /// Degree within `reference_segment` at the reference epoch
    pub reference_degree: f64,
    /// Constant angular speed, degrees per day
    pub daily_speed: f64,
    pub track: RadialTrack,
    /// Hex display color ("#rrggbb")
    pub color: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub house: Option<u8>,
    #[serde(default)]
    pub qualities: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub long_description: Option<String>,
}

/// The full set of bodies plus the body acting as light source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyCatalog {
    pub bodies: Vec<CelestialBody>,
    /// Name of the body the cosmetic light ray is cast from
    #[serde(default)]
    pub light_body: Option<String>,
}

impl BodyCatalog {
    pub fn get(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }

    /// Body with the highest absolute daily speed (gets the phase glyph)
    pub fn fastest(&self) -> Option<&CelestialBody> {
        self.bodies
            .iter()
            .filter(|b| b.daily_speed.is_finite())
            .max_by(|a, b| a.daily_speed.abs().total_cmp(&b.daily_speed.abs()))
    }

    /// Find the tracked body an event's object string refers to.
    ///
    /// Only the first `/`-separated token is considered and the match is a
    /// substring test in either direction ("Venus/Saturn" -> Venus).
    pub fn match_object(&self, object: &str) -> Option<&CelestialBody> {
        let token = object.split('/').next().unwrap_or("").trim();
        if token.is_empty() {
            return None;
        }
        self.bodies
            .iter()
            .find(|b| b.name.contains(token) || token.contains(b.name.as_str()))
    }
}

#[allow(clippy::too_many_arguments)]
fn body(
    name: &str,
    symbol: &str,
    segment: &str,
    degree: f64,
    daily_speed: f64,
    track: RadialTrack,
    color: &str,
    is_primary: bool,
    house: u8,
    qualities: &[&str],
    description: &str,
    long_description: &str,
) -> CelestialBody {
    CelestialBody {
        name: name.to_string(),
        symbol: symbol.to_string(),
        reference_segment: segment.to_string(),
        reference_degree: degree,
        daily_speed,
        track,
        color: color.to_string(),
        is_primary,
        house: Some(house),
        qualities: qualities.iter().map(|q| q.to_string()).collect(),
        description: description.to_string(),
        long_description: Some(long_description.to_string()),
    }
}

lazy_static! {
    static ref BUILTIN: BodyCatalog = BodyCatalog {
        bodies: vec![
            body("Sun", "☉", "Pisces", 8.0, 1.0, RadialTrack::Outer, "#fbbf24", true, 12,
                &["Vitality", "Sovereignty"], "The Solar King.",
                "Primary source of vitality and consciousness. In late February 2026, it approaches the vernal origin."),
            body("Moon", "☾", "Cancer", 14.0, 13.18, RadialTrack::Outer, "#f1f5f9", true, 4,
                &["Tide", "Memory"], "Exalted Governor.",
                "Subconscious rhythms and emotional tides. Its rapid movement shifts the local mood daily."),
            body("Mercury", "☿", "Aquarius", 28.0, 1.2, RadialTrack::Middle, "#94a3b8", false, 11,
                &["Intellect", "Bridge"], "The Messenger.",
                "Governor of communication and logical processing, currently transiting the final degrees of Aquarius."),
            body("Venus", "♀", "Aquarius", 21.0, 1.15, RadialTrack::Middle, "#f472b6", false, 11,
                &["Value", "Harmony"], "The Harmonizer.",
                "Archetype of attraction and aesthetic value, seeking social cohesion in the air sign Aquarius."),
            body("Mars", "♂", "Capricorn", 29.0, 0.52, RadialTrack::Middle, "#ef4444", false, 10,
                &["Will", "Drive"], "The Warrior.",
                "Exalted in Capricorn, Mars provides disciplined ambition and precise execution of goals."),
            body("Jupiter", "♃", "Cancer", 17.0, 0.08, RadialTrack::Middle, "#fb923c", false, 4,
                &["Expansion", "Abundance"], "The Great Benefactor.",
                "Retrograde and exalted in Cancer, Jupiter expands our capacity for emotional wisdom and ancestral connection."),
            body("Saturn", "♄", "Aries", 0.0, 0.033, RadialTrack::Outer, "#64748b", true, 1,
                &["Structure", "Time"], "Master Architect.",
                "Entering Aries to begin a new 29-year cycle, Saturn structures the raw impulse of existence."),
            body("Neptune", "♆", "Aries", 0.0, 0.006, RadialTrack::Outer, "#38bdf8", true, 1,
                &["Vision", "Transcendence"], "The Seer.",
                "Neptune at 0° Aries dissolves old boundaries to invite a new spiritual vision for humanity."),
            body("Uranus", "♅", "Taurus", 27.0, 0.01, RadialTrack::Inner, "#2dd4bf", false, 2,
                &["Innovation", "Shock"], "The Awakener.",
                "Uranus continues its radical disruption of Taurus, changing our relationship with earth and value."),
            body("Pluto", "♇", "Aquarius", 4.0, 0.004, RadialTrack::Inner, "#a855f7", false, 11,
                &["Power", "Metamorphosis"], "The Transformer.",
                "Pluto in Aquarius signals a generational shift toward collective power and technological evolution."),
        ],
        light_body: Some("Sun".to_string()),
    };
}

/// Compiled-in body catalog
pub fn builtin_catalog() -> &'static BodyCatalog {
    &BUILTIN
}
