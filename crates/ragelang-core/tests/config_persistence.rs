use pretty_assertions::assert_eq;
use ragelang_core::{ConfigError, RoastConfig};

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = RoastConfig::load(&dir.path().join("missing.toml")).unwrap();
    assert_eq!(config, RoastConfig::default());
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = RoastConfig::default();
    config.enabled = false;
    config.set_cooldown_input("12").unwrap();
    config.set_api_key("key-123").unwrap();
    config.save(&path).unwrap();

    let loaded = RoastConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_invalid_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "cooldown_seconds = \"soon\"\n").unwrap();

    let err = RoastConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
}
