//! End-of-run summary.
//!
//! The printed figures are estimates from the configured range midpoints,
//! multiplied down the hierarchy. Realized counts from the run are logged
//! next to them.

use crate::config::LoaderConfig;
use crate::pipeline::PipelineReport;
use std::fmt;
use tracing::info;

const RULE_WIDTH: usize = 60;

/// Expected row counts derived from the configuration alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimatedCounts {
    pub editors: u64,
    pub games: u64,
    pub dlcs: u64,
    pub patches: u64,
    pub bug_reports: u64,
    pub evaluations: u64,
    pub publish_rate: u8,
}

impl EstimatedCounts {
    pub fn from_config(config: &LoaderConfig) -> Self {
        let editors = u64::from(config.num_editors);
        let games = editors * u64::from(config.games_per_editor().midpoint());
        let per_game = |mid: u32| games * u64::from(mid);

        Self {
            editors,
            games,
            dlcs: per_game(config.dlc_per_game().midpoint()),
            patches: per_game(config.patches_per_game().midpoint()),
            bug_reports: per_game(config.bug_reports_per_game().midpoint()),
            evaluations: per_game(config.evaluations_per_game().midpoint()),
            publish_rate: config.publish_rate,
        }
    }
}

impl fmt::Display for EstimatedCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "DATA LOADING SUMMARY")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Editors:         ~{}", self.editors)?;
        writeln!(f, "Games:           ~{}", self.games)?;
        writeln!(f, "DLCs:            ~{}", self.dlcs)?;
        writeln!(f, "Patches:         ~{}", self.patches)?;
        writeln!(f, "Bug Reports:     ~{}", self.bug_reports)?;
        writeln!(f, "Evaluations:     ~{}", self.evaluations)?;
        writeln!(f)?;
        writeln!(
            f,
            "Published to platform_db: ~{}% of games/dlcs/patches",
            self.publish_rate
        )?;
        write!(f, "{rule}")
    }
}

/// Log what the run actually wrote.
pub fn log_realized(report: &PipelineReport) {
    let generation = &report.generation;
    let sync = &report.sync;
    info!("Seed: {}", report.seed);
    info!(
        "Editor database: {} editors, {} games ({} published), {} DLCs ({} published), {} patches ({} published), {} bug reports, {} evaluations",
        generation.editors,
        generation.games,
        generation.published_games,
        generation.dlcs,
        generation.published_dlcs,
        generation.patches,
        generation.published_patches,
        generation.bug_reports,
        generation.evaluations
    );
    info!(
        "Platform database: {} editors, {} games, {} platforms, {} genres, {} DLCs, {} patches",
        sync.editors, sync.games, sync.game_platforms, sync.game_genres, sync.dlcs, sync.patches
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_from_defaults() {
        let estimate = EstimatedCounts::from_config(&LoaderConfig::default());

        // 20 editors, (3 + 7) / 2 = 5 games each
        assert_eq!(estimate.editors, 20);
        assert_eq!(estimate.games, 100);
        assert_eq!(estimate.dlcs, 100);
        assert_eq!(estimate.patches, 300);
        assert_eq!(estimate.bug_reports, 500);
        assert_eq!(estimate.evaluations, 2700);
    }

    #[test]
    fn test_integer_midpoints() {
        let config = LoaderConfig {
            num_editors: 1,
            games_per_editor_min: 1,
            games_per_editor_max: 2,
            dlc_per_game_min: 0,
            dlc_per_game_max: 1,
            ..LoaderConfig::default()
        };
        let estimate = EstimatedCounts::from_config(&config);
        assert_eq!(estimate.games, 1);
        assert_eq!(estimate.dlcs, 0);
    }

    #[test]
    fn test_display() {
        let text = EstimatedCounts::from_config(&LoaderConfig::default()).to_string();
        assert!(text.contains("DATA LOADING SUMMARY"));
        assert!(text.contains("Games:           ~100"));
        assert!(text.contains("~80% of games/dlcs/patches"));
    }
}
