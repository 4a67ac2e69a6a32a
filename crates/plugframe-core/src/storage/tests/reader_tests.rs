use std::path::{Path, PathBuf};
use tempfile::tempdir;

use crate::plugin_config::{FrameworkConfig, PluginConfig, PluginInstanceConfig, VersionInfo};
use crate::storage::error::ConfigReadError;
use crate::storage::reader::{ConfigFormat, ConfigReader};
use serde_json::json;

const JSON_DOC: &str = r#"{
  "plugins": [
    {
      "file_path": "/plugins/foo.so",
      "version": "1.0.0",
      "instances": [
        { "name": "a", "config": { "port": 8080 } },
        { "name": "b", "dependencies": ["a"] }
      ]
    },
    {
      "file_path": "/plugins/bar.so",
      "min_version": "1.0.0",
      "max_version": "2.0.0",
      "instances": [{ "name": "c" }]
    }
  ]
}"#;

fn sample_config() -> FrameworkConfig {
    let mut b = PluginInstanceConfig::new("b");
    b.add_dependency("a");
    FrameworkConfig::new(vec![
        PluginConfig::exact(
            "/plugins/foo.so",
            VersionInfo::new(1, 0, 0),
            vec![
                PluginInstanceConfig::with_config("a", json!({ "port": 8080 })),
                b,
            ],
        ),
        PluginConfig::range(
            "/plugins/bar.so",
            VersionInfo::new(1, 0, 0),
            VersionInfo::new(2, 0, 0),
            vec![PluginInstanceConfig::new("c")],
        ),
    ])
}

#[test]
fn test_format_detection() {
    assert_eq!(ConfigFormat::from_path(Path::new("plugins.json")), Some(ConfigFormat::Json));
    assert_eq!(ConfigFormat::from_path(Path::new("PLUGINS.JSON")), Some(ConfigFormat::Json));
    assert_eq!(ConfigFormat::from_path(Path::new("plugins.ini")), None);
    assert_eq!(ConfigFormat::from_path(Path::new("plugins")), None);
    assert_eq!(ConfigFormat::Json.extension(), "json");

    #[cfg(feature = "yaml-config")]
    assert_eq!(ConfigFormat::from_path(Path::new("plugins.yml")), Some(ConfigFormat::Yaml));
    #[cfg(feature = "toml-config")]
    assert_eq!(ConfigFormat::from_name("toml"), Some(ConfigFormat::Toml));
}

#[test]
fn test_parse_json_document() -> Result<(), ConfigReadError> {
    let reader = ConfigReader::default();
    let config = reader.parse_str(JSON_DOC, ConfigFormat::Json)?;

    assert_eq!(config, sample_config());
    assert!(config.is_valid());

    let foo = &config.plugins()[0];
    assert!(foo.is_exact_version());
    assert_eq!(foo.instance_configs()[0].config()["port"], json!(8080));
    assert!(foo.instance_configs()[1].dependencies().contains("a"));

    let bar = &config.plugins()[1];
    assert!(bar.is_version_range());
    Ok(())
}

#[test]
fn test_reading_does_not_validate() -> Result<(), ConfigReadError> {
    // Well-shaped but semantically invalid: inverted range, no instances
    let data = r#"{ "plugins": [ { "file_path": "/plugins/foo.so",
        "min_version": "2.0.0", "max_version": "1.0.0" } ] }"#;
    let config = ConfigReader::default().parse_str(data, ConfigFormat::Json)?;

    assert_eq!(config.plugins().len(), 1);
    assert!(!config.is_valid());
    Ok(())
}

#[test]
fn test_mixed_versioning_is_rejected() {
    let data = r#"{ "plugins": [ { "file_path": "/plugins/foo.so", "version": "1.0.0",
        "min_version": "1.0.0", "max_version": "2.0.0", "instances": [{ "name": "a" }] } ] }"#;
    let result = ConfigReader::default().parse_str(data, ConfigFormat::Json);
    assert!(matches!(result, Err(ConfigReadError::AmbiguousVersion { path }) if path == PathBuf::from("/plugins/foo.so")));

    let partial = r#"{ "plugins": [ { "file_path": "/plugins/foo.so", "version": "1.0.0",
        "max_version": "2.0.0", "instances": [{ "name": "a" }] } ] }"#;
    assert!(matches!(
        ConfigReader::default().parse_str(partial, ConfigFormat::Json),
        Err(ConfigReadError::AmbiguousVersion { .. })
    ));
}

#[test]
fn test_missing_versioning_is_rejected() {
    let none = r#"{ "plugins": [ { "file_path": "/plugins/foo.so", "instances": [{ "name": "a" }] } ] }"#;
    assert!(matches!(
        ConfigReader::default().parse_str(none, ConfigFormat::Json),
        Err(ConfigReadError::MissingVersion { .. })
    ));

    let one_bound = r#"{ "plugins": [ { "file_path": "/plugins/foo.so", "min_version": "1.0.0",
        "instances": [{ "name": "a" }] } ] }"#;
    assert!(matches!(
        ConfigReader::default().parse_str(one_bound, ConfigFormat::Json),
        Err(ConfigReadError::MissingVersion { .. })
    ));
}

#[test]
fn test_malformed_documents() {
    let reader = ConfigReader::default();

    let bad_version = r#"{ "plugins": [ { "file_path": "/p.so", "version": "1.0" } ] }"#;
    assert!(matches!(
        reader.parse_str(bad_version, ConfigFormat::Json),
        Err(ConfigReadError::DeserializationError { .. })
    ));

    let unknown_field = r#"{ "plugins": [ { "file_path": "/p.so", "version": "1.0.0", "verison": "2.0.0" } ] }"#;
    assert!(reader.parse_str(unknown_field, ConfigFormat::Json).is_err());

    assert!(reader.parse_str("not json", ConfigFormat::Json).is_err());
}

#[test]
fn test_serialize_round_trip_all_formats() -> Result<(), ConfigReadError> {
    let reader = ConfigReader::default();
    let config = sample_config();

    let mut formats = vec![ConfigFormat::Json];
    #[cfg(feature = "yaml-config")]
    formats.push(ConfigFormat::Yaml);
    #[cfg(feature = "toml-config")]
    formats.push(ConfigFormat::Toml);

    for format in formats {
        let text = reader.to_string(&config, format)?;
        let parsed = reader.parse_str(&text, format)?;
        assert_eq!(parsed, config, "round trip through {:?}", format);
    }
    Ok(())
}

#[test]
fn test_json_output_shape() -> Result<(), ConfigReadError> {
    let text = ConfigReader::default().to_string(&sample_config(), ConfigFormat::Json)?;
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    let foo = &value["plugins"][0];
    assert_eq!(foo["version"], json!("1.0.0"));
    assert!(foo.get("min_version").is_none());

    let bar = &value["plugins"][1];
    assert!(bar.get("version").is_none());
    assert_eq!(bar["max_version"], json!("2.0.0"));
    Ok(())
}

#[test]
fn test_write_and_read_file() -> Result<(), ConfigReadError> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("nested").join("plugins.json");

    let reader = ConfigReader::default();
    reader.write_file(&path, &sample_config())?;
    assert!(path.exists());

    let loaded = reader.read_file(&path)?;
    assert_eq!(loaded, sample_config());
    Ok(())
}

#[test]
fn test_read_file_errors() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let reader = ConfigReader::default();

    let missing = temp_dir.path().join("missing.json");
    assert!(matches!(reader.read_file(&missing), Err(ConfigReadError::Io { .. })));

    let unsupported = temp_dir.path().join("plugins.ini");
    std::fs::write(&unsupported, "[plugins]").unwrap();
    assert!(matches!(
        reader.read_file(&unsupported),
        Err(ConfigReadError::UnsupportedConfigFormat(_))
    ));

    // No extension falls back to the default format
    let bare = temp_dir.path().join("plugins");
    std::fs::write(&bare, JSON_DOC).unwrap();
    assert_eq!(reader.read_file(&bare).unwrap(), sample_config());
}

#[test]
fn test_instance_typo_is_rejected() {
    let data = r#"{ "plugins": [ { "file_path": "/plugins/foo.so", "version": "1.0.0",
        "instances": [{ "name": "a", "dependecies": ["b"] }] } ] }"#;
    assert!(matches!(
        ConfigReader::default().parse_str(data, ConfigFormat::Json),
        Err(ConfigReadError::DeserializationError { .. })
    ));
}

#[test]
fn test_configs_without_a_mode_are_not_written() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let reader = ConfigReader::default();

    // Leaving exact mode through one bound gives a range with a null upper bound
    let mut half_range = PluginConfig::exact(
        "/plugins/foo.so",
        VersionInfo::new(1, 0, 0),
        vec![PluginInstanceConfig::new("a")],
    );
    half_range.set_min_version(VersionInfo::new(1, 0, 0));

    let null_exact = PluginConfig::exact(
        "/plugins/bar.so",
        VersionInfo::null(),
        vec![PluginInstanceConfig::new("b")],
    );

    for plugin in [half_range, null_exact] {
        let expected = plugin.file_path().to_path_buf();
        let config = FrameworkConfig::new(vec![plugin]);

        match reader.to_string(&config, ConfigFormat::Json) {
            Err(ConfigReadError::MissingVersion { path }) => assert_eq!(path, expected),
            other => panic!("Expected MissingVersion, got {:?}", other),
        }

        let path = temp_dir.path().join("plugins.json");
        assert!(matches!(
            reader.write_file(&path, &config),
            Err(ConfigReadError::MissingVersion { .. })
        ));
        assert!(!path.exists());
    }
}

#[test]
fn test_inverted_range_survives_round_trip() -> Result<(), ConfigReadError> {
    // Invalid, but still in range mode, so it has a document form
    let config = FrameworkConfig::new(vec![PluginConfig::range(
        "/plugins/foo.so",
        VersionInfo::new(2, 0, 0),
        VersionInfo::new(1, 0, 0),
        vec![PluginInstanceConfig::new("a")],
    )]);
    let reader = ConfigReader::default();

    let text = reader.to_string(&config, ConfigFormat::Json)?;
    assert_eq!(reader.parse_str(&text, ConfigFormat::Json)?, config);
    Ok(())
}
