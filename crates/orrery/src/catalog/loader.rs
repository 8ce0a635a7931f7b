use crate::catalog::bodies::BodyCatalog;
use crate::catalog::zodiac::segment_index;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a body catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    #[error("Catalog must contain at least one body")]
    Empty,
    #[error("Duplicate body name: {0}")]
    DuplicateName(String),
    #[error("Unknown zodiac segment {segment:?} for body {body}")]
    UnknownSegment { body: String, segment: String },
    #[error("Invalid field value for {body}: {message}")]
    InvalidFieldValue { body: String, message: String },
}

/// Load a body catalog from a JSON string
pub fn load_body_catalog_from_json(json: &str) -> Result<BodyCatalog, CatalogError> {
    let catalog: BodyCatalog =
        serde_json::from_str(json).map_err(|e| CatalogError::InvalidJson(e.to_string()))?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Load a body catalog from a JSON file on disk
pub fn load_body_catalog_from_path(path: &Path) -> anyhow::Result<BodyCatalog> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read catalog {}: {e}", path.display()))?;
    let catalog = load_body_catalog_from_json(&text)?;
    log::info!("Loaded {} bodies from {}", catalog.len(), path.display());
    Ok(catalog)
}

fn validate_catalog(catalog: &BodyCatalog) -> Result<(), CatalogError> {
    if catalog.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut seen = HashSet::new();
    for body in &catalog.bodies {
        if body.name.trim().is_empty() {
            return Err(CatalogError::InvalidFieldValue {
                body: body.name.clone(),
                message: "name must be a non-empty string".to_string(),
            });
        }
        if !seen.insert(body.name.as_str()) {
            return Err(CatalogError::DuplicateName(body.name.clone()));
        }
        if segment_index(&body.reference_segment).is_none() {
            return Err(CatalogError::UnknownSegment {
                body: body.name.clone(),
                segment: body.reference_segment.clone(),
            });
        }
        if !(0.0..30.0).contains(&body.reference_degree) {
            return Err(CatalogError::InvalidFieldValue {
                body: body.name.clone(),
                message: format!(
                    "reference_degree must be in [0, 30), got {}",
                    body.reference_degree
                ),
            });
        }
        if !body.daily_speed.is_finite() {
            return Err(CatalogError::InvalidFieldValue {
                body: body.name.clone(),
                message: "daily_speed must be finite".to_string(),
            });
        }
    }

    if let Some(light) = &catalog.light_body {
        if catalog.get(light).is_none() {
            return Err(CatalogError::InvalidFieldValue {
                body: light.clone(),
                message: "light_body does not name a catalog body".to_string(),
            });
        }
    }

    Ok(())
}
