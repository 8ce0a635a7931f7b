use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Width of every zodiac segment in degrees
pub const SEGMENT_WIDTH: f64 = 30.0;

/// Number of segments around the wheel
pub const SEGMENT_COUNT: usize = 12;

/// Classical element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

/// Modality (cardinal / fixed / mutable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

/// One of the twelve fixed 30° partitions of the wheel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZodiacSegment {
    /// Position in the fixed circular order (0 = Aries)
    pub index: u8,
    pub name: String,
    pub symbol: String,
    pub element: Element,
    pub modality: Modality,
    pub house_number: u8,
    pub ruling_body: String,
    pub house_meaning: String,
    /// Short descriptive text
    pub wisdom: String,
}

impl ZodiacSegment {
    /// Start longitude of this segment
    pub fn start_degree(&self) -> f64 {
        self.index as f64 * SEGMENT_WIDTH
    }

    /// End longitude of this segment (exclusive)
    pub fn end_degree(&self) -> f64 {
        (self.index as f64 + 1.0) * SEGMENT_WIDTH
    }
}

/// (name, symbol, element, modality, ruler, house meaning, wisdom)
const SEGMENTS: [(&str, &str, Element, Modality, &str, &str, &str); SEGMENT_COUNT] = [
    ("Aries", "♈", Element::Fire, Modality::Cardinal, "Mars", "Action", "Origin Point."),
    ("Taurus", "♉", Element::Earth, Modality::Fixed, "Venus", "Value", "Sustaining."),
    ("Gemini", "♊", Element::Air, Modality::Mutable, "Mercury", "Communication", "Information."),
    ("Cancer", "♋", Element::Water, Modality::Cardinal, "Moon", "Nurturance", "Source."),
    ("Leo", "♌", Element::Fire, Modality::Fixed, "Sun", "Sovereignty", "Authority."),
    ("Virgo", "♍", Element::Earth, Modality::Mutable, "Mercury", "Service", "Refinement."),
    ("Libra", "♎", Element::Air, Modality::Cardinal, "Venus", "Balance", "Mirror."),
    ("Scorpio", "♏", Element::Water, Modality::Fixed, "Pluto", "Flux", "Death/Rebirth."),
    ("Sagittarius", "♐", Element::Fire, Modality::Mutable, "Jupiter", "Quest", "Meaning."),
    ("Capricorn", "♑", Element::Earth, Modality::Cardinal, "Saturn", "Structure", "Time."),
    ("Aquarius", "♒", Element::Air, Modality::Fixed, "Uranus", "Vision", "Unification."),
    ("Pisces", "♓", Element::Water, Modality::Mutable, "Neptune", "Return", "Dissolution."),
];

lazy_static! {
    static ref ZODIAC: Vec<ZodiacSegment> = SEGMENTS
        .iter()
        .enumerate()
        .map(|(i, (name, symbol, element, modality, ruler, meaning, wisdom))| ZodiacSegment {
            index: i as u8,
            name: name.to_string(),
            symbol: symbol.to_string(),
            element: *element,
            modality: *modality,
            house_number: i as u8 + 1,
            ruling_body: ruler.to_string(),
            house_meaning: meaning.to_string(),
            wisdom: wisdom.to_string(),
        })
        .collect();
}

/// The static zodiac, in fixed circular order
pub fn zodiac() -> &'static [ZodiacSegment] {
    &ZODIAC
}

/// Look up a segment by index (0-11)
pub fn segment(index: u8) -> Option<&'static ZodiacSegment> {
    ZODIAC.get(index as usize)
}

/// Resolve a segment name (case-insensitive) to its index
pub fn segment_index(name: &str) -> Option<u8> {
    ZODIAC
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
        .map(|s| s.index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zodiac_order_and_width() {
        let signs = zodiac();
        assert_eq!(signs.len(), 12);
        assert_eq!(signs[0].name, "Aries");
        assert_eq!(signs[11].name, "Pisces");
        assert_eq!(signs[9].start_degree(), 270.0);
        assert_eq!(signs[9].end_degree(), 300.0);
    }

    #[test]
    fn test_segment_index_lookup() {
        assert_eq!(segment_index("capricorn"), Some(9));
        assert_eq!(segment_index("Pisces"), Some(11));
        assert_eq!(segment_index("Ophiuchus"), None);
    }
}
