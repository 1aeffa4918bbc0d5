use farmtrack_core::config::{ConfigError, FarmConfig, CONFIG_FILE};
use std::fs;

#[test]
fn missing_file_yields_defaults_rooted_at_dir() {
    let dir = tempfile::tempdir().unwrap();

    let config = FarmConfig::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.database.path, dir.path().join("farmtrack.sqlite3"));
    assert_eq!(config.dashboard.recent_limit, 5);
    assert!(config.logging.dir.is_none());
    assert_eq!(config.clock.offset().unwrap().local_minus_utc(), 0);
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let log_dir = dir.path().join("logs");
    let contents = format!(
        r#"
[database]
path = "data/farm.sqlite3"

[logging]
level = "warn"
dir = "{}"

[dashboard]
recent_limit = 8

[clock]
utc_offset = "-06:00"
"#,
        log_dir.display().to_string().replace('\\', "\\\\")
    );
    fs::write(dir.path().join(CONFIG_FILE), contents).unwrap();

    let config = FarmConfig::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.database.path, dir.path().join("data/farm.sqlite3"));
    assert_eq!(config.logging.level.as_deref(), Some("warn"));
    assert_eq!(config.logging.dir.as_deref(), Some(log_dir.as_path()));
    assert_eq!(config.dashboard.recent_limit, 8);
    assert_eq!(config.clock.offset().unwrap().local_minus_utc(), -6 * 3600);
}

#[test]
fn invalid_values_are_rejected() {
    let cases = [
        "[clock]\nutc_offset = \"+2\"\n",
        "[dashboard]\nrecent_limit = 0\n",
        "[logging]\ndir = \"relative/logs\"\n",
        "[logging]\nlevel = \"loud\"\n",
        "[database]\npath = \"\"\n",
    ];
    for contents in cases {
        let err = FarmConfig::from_toml_str(contents).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{contents}: {err}");
    }
}

#[test]
fn malformed_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "[dashboard\nrecent_limit = ").unwrap();

    let err = FarmConfig::load(&path).unwrap_err();
    match err {
        ConfigError::Parse { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}
