//! Loader configuration from catalog-loader.toml
//!
//! The file is a flat TOML table. Every key is optional and falls back to the
//! value in [`LoaderConfig::default`]; unknown keys are rejected.

use catalog_core::CountRange;
use catalog_postgresql::{redact, DatabaseArgs};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "catalog-loader.toml";

/// Errors raised while loading or validating the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration file passed explicitly does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("{key}_min ({min}) is greater than {key}_max ({max})")]
    InvalidRange {
        key: &'static str,
        min: u32,
        max: u32,
    },

    #[error("{key} must be between 0 and 100, got {value}")]
    InvalidPercentage { key: &'static str, value: u8 },
}

/// Resolved settings for one loader run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    pub editor_db_url: String,
    pub platform_db_url: String,

    pub num_editors: u32,
    pub games_per_editor_min: u32,
    pub games_per_editor_max: u32,
    pub dlc_per_game_min: u32,
    pub dlc_per_game_max: u32,
    pub patches_per_game_min: u32,
    pub patches_per_game_max: u32,
    pub bug_reports_per_game_min: u32,
    pub bug_reports_per_game_max: u32,
    pub evaluations_per_game_min: u32,
    pub evaluations_per_game_max: u32,

    /// Percentage of editors that are companies.
    pub enterprise_rate: u8,
    /// Percentage of games, DLCs and patches flagged as published.
    pub publish_rate: u8,

    /// Empty the editor tables before generating. The platform tables are
    /// rebuilt on every run regardless.
    pub clear_tables_before_load: bool,
    pub verbose: bool,

    /// Fixed seed; a random one is drawn and logged when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            editor_db_url: "host=localhost user=user password=password dbname=editor_db"
                .to_string(),
            platform_db_url: "host=localhost user=user password=password dbname=platform_db"
                .to_string(),
            num_editors: 20,
            games_per_editor_min: 3,
            games_per_editor_max: 7,
            dlc_per_game_min: 0,
            dlc_per_game_max: 3,
            patches_per_game_min: 2,
            patches_per_game_max: 5,
            bug_reports_per_game_min: 1,
            bug_reports_per_game_max: 10,
            evaluations_per_game_min: 5,
            evaluations_per_game_max: 50,
            enterprise_rate: 80,
            publish_rate: 80,
            clear_tables_before_load: true,
            verbose: true,
            seed: None,
        }
    }
}

impl LoaderConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file that must exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// File the configuration comes from: `explicit` when given, otherwise
    /// [`DEFAULT_CONFIG_FILE`] if it exists in the working directory.
    /// `None` means the defaults apply.
    pub fn source_path(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                path.exists().then(|| path.to_path_buf())
            }
        }
    }

    /// Load from `source`, as resolved by [`LoaderConfig::source_path`].
    pub fn load_from(source: Option<&Path>) -> Result<Self, ConfigError> {
        match source {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolve the source for `explicit` and load it.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(Self::source_path(explicit).as_deref())
    }

    /// Let command-line flags and environment variables win over the file.
    pub fn apply_overrides(&mut self, db: &DatabaseArgs, seed: Option<u64>) {
        if let Some(url) = &db.editor_db_url {
            self.editor_db_url = url.clone();
        }
        if let Some(url) = &db.platform_db_url {
            self.platform_db_url = url.clone();
        }
        if seed.is_some() {
            self.seed = seed;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ranges = [
            ("games_per_editor", self.games_per_editor()),
            ("dlc_per_game", self.dlc_per_game()),
            ("patches_per_game", self.patches_per_game()),
            ("bug_reports_per_game", self.bug_reports_per_game()),
            ("evaluations_per_game", self.evaluations_per_game()),
        ];
        for (key, range) in ranges {
            if !range.is_valid() {
                return Err(ConfigError::InvalidRange {
                    key,
                    min: range.min,
                    max: range.max,
                });
            }
        }

        for (key, value) in [
            ("enterprise_rate", self.enterprise_rate),
            ("publish_rate", self.publish_rate),
        ] {
            if value > 100 {
                return Err(ConfigError::InvalidPercentage { key, value });
            }
        }
        Ok(())
    }

    pub fn games_per_editor(&self) -> CountRange {
        CountRange::new(self.games_per_editor_min, self.games_per_editor_max)
    }

    pub fn dlc_per_game(&self) -> CountRange {
        CountRange::new(self.dlc_per_game_min, self.dlc_per_game_max)
    }

    pub fn patches_per_game(&self) -> CountRange {
        CountRange::new(self.patches_per_game_min, self.patches_per_game_max)
    }

    pub fn bug_reports_per_game(&self) -> CountRange {
        CountRange::new(self.bug_reports_per_game_min, self.bug_reports_per_game_max)
    }

    pub fn evaluations_per_game(&self) -> CountRange {
        CountRange::new(self.evaluations_per_game_min, self.evaluations_per_game_max)
    }

    /// Copy with passwords removed from both connection strings.
    pub fn redacted(&self) -> Self {
        Self {
            editor_db_url: redact(&self.editor_db_url),
            platform_db_url: redact(&self.platform_db_url),
            ..self.clone()
        }
    }

    /// Render as TOML, passwords redacted.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(&self.redacted())?)
    }

    /// Log the resolved configuration at `info`.
    pub fn log(&self) {
        let shown = self.redacted();
        info!("Editor database: {}", shown.editor_db_url);
        info!("Platform database: {}", shown.platform_db_url);
        info!("Editors: {}", self.num_editors);
        info!("Games per editor: {}", self.games_per_editor());
        info!("DLCs per game: {}", self.dlc_per_game());
        info!("Patches per game: {}", self.patches_per_game());
        info!("Bug reports per game: {}", self.bug_reports_per_game());
        info!("Evaluations per game: {}", self.evaluations_per_game());
        info!(
            "Enterprise rate: {}%, publish rate: {}%",
            self.enterprise_rate, self.publish_rate
        );
        info!("Clear editor tables before load: {}", self.clear_tables_before_load);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LoaderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_editors, 20);
        assert_eq!(config.evaluations_per_game(), CountRange::new(5, 50));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = LoaderConfig::from_toml_str(
            r#"
num_editors = 3
publish_rate = 100
seed = 42
"#,
        )
        .unwrap();

        assert_eq!(config.num_editors, 3);
        assert_eq!(config.publish_rate, 100);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.games_per_editor(), CountRange::new(3, 7));
        assert!(config.clear_tables_before_load);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = LoaderConfig::from_toml_str("num_editor = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = LoaderConfig::from_toml_str("dlc_per_game_min = 4\ndlc_per_game_max = 1")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "dlc_per_game_min (4) is greater than dlc_per_game_max (1)"
        );
    }

    #[test]
    fn test_negative_count_rejected() {
        let err = LoaderConfig::from_toml_str("num_editors = -1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_percentage_above_100_rejected() {
        let err = LoaderConfig::from_toml_str("publish_rate = 150").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidPercentage {
                key: "publish_rate",
                value: 150
            }
        ));
    }

    #[test]
    fn test_explicit_source_wins() {
        let explicit = Path::new("/etc/loader/custom.toml");
        assert_eq!(
            LoaderConfig::source_path(Some(explicit)),
            Some(explicit.to_path_buf())
        );
        assert_eq!(LoaderConfig::load_from(None).unwrap(), LoaderConfig::default());
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = LoaderConfig::load(Some(Path::new("/nonexistent/catalog-loader.toml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_overrides_win() {
        let mut config = LoaderConfig::default();
        let db = DatabaseArgs {
            editor_db_url: Some("host=db dbname=e".to_string()),
            platform_db_url: None,
        };
        config.apply_overrides(&db, Some(7));

        assert_eq!(config.editor_db_url, "host=db dbname=e");
        assert_eq!(
            config.platform_db_url,
            LoaderConfig::default().platform_db_url
        );
        assert_eq!(config.seed, Some(7));

        config.apply_overrides(&DatabaseArgs::default(), None);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_rendered_toml_is_redacted_and_parses() {
        let rendered = LoaderConfig::default().to_toml().unwrap();
        assert!(rendered.contains("password=***"));
        assert!(!rendered.contains("password=password"));

        let parsed = LoaderConfig::from_toml_str(&rendered).unwrap();
        assert_eq!(parsed.num_editors, 20);
    }
}
