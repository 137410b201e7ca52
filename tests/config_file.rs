use catalog_core::CountRange;
use catalog_loader::{ConfigError, LoaderConfig};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_file_from_disk() {
    let file = write_config(
        r#"
editor_db_url = "postgresql://loader:s3cret@db:5432/editor_db"
num_editors = 5
games_per_editor_min = 2
games_per_editor_max = 2
publish_rate = 50
verbose = false
"#,
    );

    let config = LoaderConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.num_editors, 5);
    assert_eq!(config.games_per_editor(), CountRange::exactly(2));
    assert_eq!(config.publish_rate, 50);
    assert!(!config.verbose);
    assert_eq!(
        config.redacted().editor_db_url,
        "postgresql://loader:***@db:5432/editor_db"
    );
}

#[test]
fn test_malformed_file_is_an_error() {
    let file = write_config("num_editors = [1, 2");
    let err = LoaderConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_shown_config_round_trips() {
    let file = write_config("num_editors = 9\nseed = 123\n");
    let config = LoaderConfig::from_file(file.path()).unwrap();

    let shown = config.to_toml().unwrap();
    let reparsed = LoaderConfig::from_toml_str(&shown).unwrap();

    assert_eq!(reparsed.num_editors, 9);
    assert_eq!(reparsed.seed, Some(123));
}
