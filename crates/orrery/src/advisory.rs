//! Natural-language advisory seam.
//!
//! The service itself lives elsewhere; this module only defines the trait and
//! the wrapper that guarantees callers always get displayable text.

use async_trait::async_trait;
use thiserror::Error;

use crate::aspects::AspectRecord;
use crate::catalog::{CelestialBody, ZodiacSegment};

/// Shown whenever the advisory service cannot answer
pub const FALLBACK_ADVICE: &str = "The records are currently obscured by solar interference. The ledger remains intact, but the analysis is pending.";

#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("Advisory service is not configured")]
    Unconfigured,
    #[error("Advisory request failed: {0}")]
    Request(String),
    #[error("Advisory service returned no text")]
    Empty,
}

#[async_trait]
pub trait Advisor: Send + Sync {
    async fn insight(&self, query: &str) -> Result<String, AdvisoryError>;
}

/// Advisor used when no service is wired in
pub struct UnconfiguredAdvisor;

#[async_trait]
impl Advisor for UnconfiguredAdvisor {
    async fn insight(&self, _query: &str) -> Result<String, AdvisoryError> {
        Err(AdvisoryError::Unconfigured)
    }
}

/// Wraps an advisor: blank queries are ignored and any failure becomes the
/// fixed fallback text. No retries.
pub struct Archivist<A: Advisor> {
    advisor: A,
}

impl<A: Advisor> Archivist<A> {
    pub fn new(advisor: A) -> Self {
        Self { advisor }
    }

    pub async fn consult(&self, query: &str) -> Option<String> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        match self.advisor.insight(query).await {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                log::warn!("Advisory failed: {}", AdvisoryError::Empty);
                Some(FALLBACK_ADVICE.to_string())
            }
            Err(e) => {
                log::warn!("Advisory failed: {}", e);
                Some(FALLBACK_ADVICE.to_string())
            }
        }
    }
}

pub fn body_query(body: &CelestialBody, label: &str) -> String {
    format!(
        "Provide deep historical context for {} at {} and how it interacts with the current sky.",
        body.name, label
    )
}

pub fn segment_query(segment: &ZodiacSegment) -> String {
    format!(
        "Describe the historical significance of bodies transiting {} and the themes of its house.",
        segment.name
    )
}

pub fn aspect_query(record: &AspectRecord) -> String {
    format!(
        "Analyze the historical precedents of a {} between {} and {}.",
        record.kind.name(),
        record.body_a,
        record.body_b
    )
}
