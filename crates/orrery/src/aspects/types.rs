use serde::{Deserialize, Serialize};
use std::fmt;

/// Angular relationship kinds, in default priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectKind {
    Conjunction,
    Trine,
    Square,
    Opposition,
}

impl AspectKind {
    pub fn name(&self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Trine => "trine",
            AspectKind::Square => "square",
            AspectKind::Opposition => "opposition",
        }
    }

    /// Exact separation for this kind (0, 90, 120, 180)
    pub fn exact_angle(&self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Trine => 120.0,
            AspectKind::Square => 90.0,
            AspectKind::Opposition => 180.0,
        }
    }

    pub fn default_color(&self) -> &'static str {
        match self {
            AspectKind::Conjunction => "#fbbf24",
            AspectKind::Trine => "#60a5fa",
            AspectKind::Square | AspectKind::Opposition => "#f87171",
        }
    }
}

/// Order-independent key for a pair of bodies.
///
/// The two names are stored sorted so `("Sun", "Moon")` and `("Moon", "Sun")`
/// produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey {
    pub first: String,
    pub second: String,
}

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self {
                first: a.to_string(),
                second: b.to_string(),
            }
        } else {
            Self {
                first: b.to_string(),
                second: a.to_string(),
            }
        }
    }

    /// Parse the "first-second" display form; the halves are re-sorted
    pub fn parse(text: &str) -> Option<Self> {
        let (a, b) = text.split_once('-')?;
        let (a, b) = (a.trim(), b.trim());
        if a.is_empty() || b.is_empty() {
            return None;
        }
        Some(Self::new(a, b))
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

/// One classified pair at the current instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectRecord {
    pub key: PairKey,
    pub body_a: String,
    pub body_b: String,
    /// Circular distance in [0, 180]
    pub distance: f64,
    pub kind: AspectKind,
    /// Hex display color
    pub color: String,
    pub meaning: String,
}

/// One entry of the ordered classification table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbRule {
    pub kind: AspectKind,
    /// Strict tolerance around the exact angle
    pub orb: f64,
    pub color: String,
}

impl OrbRule {
    pub fn new(kind: AspectKind, orb: f64) -> Self {
        Self {
            kind,
            orb,
            color: kind.default_color().to_string(),
        }
    }

    pub fn matches(&self, distance: f64) -> bool {
        (distance - self.kind.exact_angle()).abs() < self.orb
    }
}

/// Settings for aspect detection; rules are tried in order, first match wins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AspectSettings {
    pub rules: Vec<OrbRule>,
    /// Restrict detection to these bodies (empty means all)
    #[serde(default)]
    pub include_bodies: Vec<String>,
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self {
            rules: vec![
                OrbRule::new(AspectKind::Conjunction, 6.0),
                OrbRule::new(AspectKind::Trine, 5.0),
                OrbRule::new(AspectKind::Square, 4.0),
                OrbRule::new(AspectKind::Opposition, 4.0),
            ],
            include_bodies: Vec::new(),
        }
    }
}

/// Every classified pair at one instant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AspectSet {
    pub records: Vec<AspectRecord>,
}

impl AspectSet {
    pub fn get(&self, key: &PairKey) -> Option<&AspectRecord> {
        self.records.iter().find(|r| &r.key == key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AspectRecord> {
        self.records.iter()
    }
}
