//! External alias tables and config files, loaded from disk.

use carbonscribe::activity::Category;
use carbonscribe::alias::AliasError;
use carbonscribe::config::EngineConfig;
use carbonscribe::engine::FootprintEngine;
use carbonscribe::error::ScribeError;

fn engine_with(alias_file: std::path::PathBuf) -> Result<FootprintEngine, ScribeError> {
    FootprintEngine::new(EngineConfig {
        alias_file: Some(alias_file),
        ..Default::default()
    })
}

#[test]
fn toml_alias_file_replaces_bundled_table() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("aliases.toml");
    std::fs::write(&path, "[transport]\ncar = [\"jalopy\", \"old banger\"]\n").unwrap();

    let engine = engine_with(path).unwrap();
    let report = engine.analyze("drove my old banger 10 km").unwrap();
    assert_eq!(report.transport_details().get("car"), Some(&1.2));

    // "taxi" is only an alias in the bundled table.
    let normalized = engine.normalize("took a taxi").unwrap();
    assert_eq!(normalized.text, "took a taxi");
    assert!(normalized.matched.is_empty());
}

#[test]
fn json_alias_file_is_detected_by_extension() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("aliases.json");
    std::fs::write(&path, r#"{"food": {"chicken": ["murgh"]}}"#).unwrap();

    let report = engine_with(path).unwrap().analyze("ate 200g murgh").unwrap();
    assert_eq!(report.category_total(Category::Food), 1.2);
}

#[test]
fn config_file_points_at_alias_file() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("aliases.json"),
        r#"{"plastic": {"plastic": ["carrier bags"]}}"#,
    )
    .unwrap();
    let config_path = dir.path().join("carbonscribe.toml");
    std::fs::write(
        &config_path,
        "alias_file = \"aliases.json\"\nfallback_detectors = false\n",
    )
    .unwrap();

    let config = EngineConfig::load(&config_path).unwrap();
    assert!(!config.fallback_detectors);
    let engine = FootprintEngine::new(config).unwrap();
    let normalized = engine.normalize("threw out 2 kg carrier bags").unwrap();
    assert_eq!(normalized.text, "threw out 2 kg plastic");
    assert_eq!(normalized.labels_in("plastic").collect::<Vec<_>>(), ["plastic"]);
}

#[test]
fn label_listed_as_variant_is_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("aliases.toml");
    std::fs::write(&path, "[transport]\ncab = [\"taxi\"]\ntaxi = [\"uber\"]\n").unwrap();

    let err = engine_with(path).unwrap_err();
    assert!(matches!(
        err,
        ScribeError::Alias(AliasError::LabelIsVariant { .. })
    ));
}

#[test]
fn empty_variant_is_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("aliases.toml");
    std::fs::write(&path, "[food]\nrice = [\"  \"]\n").unwrap();

    let err = engine_with(path).unwrap_err();
    assert!(matches!(err, ScribeError::Alias(AliasError::EmptyVariant { .. })));
}

#[test]
fn malformed_alias_file_is_a_parse_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("aliases.toml");
    std::fs::write(&path, "[transport\ncar = 3\n").unwrap();

    let err = engine_with(path).unwrap_err();
    assert!(matches!(err, ScribeError::Alias(AliasError::Parse { .. })));
}

#[test]
fn missing_alias_file_is_an_io_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = engine_with(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ScribeError::Alias(AliasError::Io { .. })));
}
