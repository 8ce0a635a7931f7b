use orrery::catalog::{
    builtin_catalog, load_body_catalog_from_json, load_body_catalog_from_path, segment_index,
    zodiac, CatalogError, RadialTrack,
};

const CATALOG_JSON: &str = r##"{
  "bodies": [
    {
      "name": "Sun", "symbol": "☉", "reference_segment": "Pisces",
      "reference_degree": 8.0, "daily_speed": 1.0, "track": "outer",
      "color": "#fbbf24", "is_primary": true
    },
    {
      "name": "Moon", "symbol": "☾", "reference_segment": "Cancer",
      "reference_degree": 14.0, "daily_speed": 13.18, "track": "outer",
      "color": "#f1f5f9"
    }
  ],
  "light_body": "Sun"
}"##;

#[test]
fn test_load_valid_catalog() {
    let catalog = load_body_catalog_from_json(CATALOG_JSON).unwrap();
    assert_eq!(catalog.len(), 2);
    let moon = catalog.get("Moon").unwrap();
    assert_eq!(moon.track, RadialTrack::Outer);
    assert!(!moon.is_primary);
    assert!(moon.qualities.is_empty());
    assert_eq!(catalog.light_body.as_deref(), Some("Sun"));
}

#[test]
fn test_rejects_bad_catalogs() {
    assert!(matches!(
        load_body_catalog_from_json("{"),
        Err(CatalogError::InvalidJson(_))
    ));
    assert!(matches!(
        load_body_catalog_from_json(r#"{"bodies": []}"#),
        Err(CatalogError::Empty)
    ));

    let duplicate = CATALOG_JSON.replace("\"Moon\"", "\"Sun\"");
    assert!(matches!(
        load_body_catalog_from_json(&duplicate),
        Err(CatalogError::DuplicateName(name)) if name == "Sun"
    ));

    let unknown = CATALOG_JSON.replace("Cancer", "Ophiuchus");
    assert!(matches!(
        load_body_catalog_from_json(&unknown),
        Err(CatalogError::UnknownSegment { .. })
    ));

    let degree = CATALOG_JSON.replace("14.0", "31.0");
    assert!(matches!(
        load_body_catalog_from_json(&degree),
        Err(CatalogError::InvalidFieldValue { .. })
    ));

    let light = CATALOG_JSON.replace("\"light_body\": \"Sun\"", "\"light_body\": \"Vega\"");
    assert!(matches!(
        load_body_catalog_from_json(&light),
        Err(CatalogError::InvalidFieldValue { .. })
    ));
}

#[test]
fn test_load_from_path() {
    let path = std::env::temp_dir().join(format!("orrery-catalog-{}.json", std::process::id()));
    std::fs::write(&path, CATALOG_JSON).unwrap();
    let catalog = load_body_catalog_from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(catalog.len(), 2);

    assert!(load_body_catalog_from_path(&path).is_err());
}

#[test]
fn test_builtin_catalog_round_trips_through_loader() {
    let json = serde_json::to_string(builtin_catalog()).unwrap();
    let catalog = load_body_catalog_from_json(&json).unwrap();
    assert_eq!(catalog.len(), builtin_catalog().len());
}

#[test]
fn test_zodiac_order() {
    let segments = zodiac();
    assert_eq!(segments.len(), 12);
    for (i, segment) in segments.iter().enumerate() {
        assert_eq!(segment.index as usize, i);
        assert_eq!(segment.start_degree(), i as f64 * 30.0);
        assert_eq!(segment_index(&segment.name), Some(segment.index));
    }
    assert_eq!(segment_index("pisces"), Some(11));
    assert_eq!(zodiac::segment(0).map(|s| s.name.as_str()), Some("Aries"));
    assert!(zodiac::segment(12).is_none());
}
