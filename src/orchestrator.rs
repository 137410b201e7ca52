//! Generation pass over the editor store.
//!
//! Entities are produced parents first (editors, games with their
//! associations, DLCs, patches, bug reports, evaluations) and written to the
//! store as soon as they exist. The first store error aborts the pass.

use crate::config::LoaderConfig;
use anyhow::{Context, Result};
use catalog_core::{CountRange, EditorStore, Game};
use catalog_generator::{
    BugReportGenerator, Distribution, DlcGenerator, EditorGenerator, EvaluationGenerator,
    GameGenerator, PatchGenerator,
};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// Rows written by one generation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub editors: u64,
    pub games: u64,
    pub published_games: u64,
    pub game_platforms: u64,
    pub game_genres: u64,
    pub dlcs: u64,
    pub published_dlcs: u64,
    pub patches: u64,
    pub published_patches: u64,
    pub bug_reports: u64,
    pub evaluations: u64,
}

/// Runs every generator against an [`EditorStore`].
#[derive(Debug, Clone)]
pub struct GenerationOrchestrator {
    num_editors: u32,
    games_per_editor: CountRange,
    dlc_per_game: CountRange,
    patches_per_game: CountRange,
    bug_reports_per_game: CountRange,
    evaluations_per_game: CountRange,
    editors: EditorGenerator,
    games: GameGenerator,
    dlcs: DlcGenerator,
    patches: PatchGenerator,
    bug_reports: BugReportGenerator,
    evaluations: EvaluationGenerator,
}

impl GenerationOrchestrator {
    pub fn new(config: &LoaderConfig) -> Self {
        Self {
            num_editors: config.num_editors,
            games_per_editor: config.games_per_editor(),
            dlc_per_game: config.dlc_per_game(),
            patches_per_game: config.patches_per_game(),
            bug_reports_per_game: config.bug_reports_per_game(),
            evaluations_per_game: config.evaluations_per_game(),
            editors: EditorGenerator::new(config.enterprise_rate),
            games: GameGenerator::new(config.publish_rate),
            dlcs: DlcGenerator::new(config.publish_rate),
            patches: PatchGenerator::new(config.publish_rate),
            bug_reports: BugReportGenerator::new(),
            evaluations: EvaluationGenerator::new(),
        }
    }

    /// Generate the whole dataset into `store`.
    ///
    /// The caller owns the transaction; nothing is committed here.
    pub async fn run<S>(&self, dist: &mut Distribution, store: &mut S) -> Result<GenerationReport>
    where
        S: EditorStore + ?Sized,
    {
        let mut report = GenerationReport::default();

        let editor_ids = self
            .generate_editors(dist, store, &mut report)
            .await
            .context("Editor generation failed")?;

        // editor -> games, in generation order
        let editor_games = self
            .generate_games(dist, store, &editor_ids, &mut report)
            .await
            .context("Game generation failed")?;
        let games: Vec<&Game> = editor_games.iter().flat_map(|(_, g)| g.iter()).collect();

        self.generate_dlcs(dist, store, &games, &mut report)
            .await
            .context("DLC generation failed")?;

        let game_patches = self
            .generate_patches(dist, store, &games, &mut report)
            .await
            .context("Patch generation failed")?;

        self.generate_bug_reports(dist, store, &games, &game_patches, &mut report)
            .await
            .context("Bug report generation failed")?;

        self.generate_evaluations(dist, store, &games, &mut report)
            .await
            .context("Evaluation generation failed")?;

        info!(
            "Generated {} editors, {} games, {} DLCs, {} patches, {} bug reports, {} evaluations",
            report.editors,
            report.games,
            report.dlcs,
            report.patches,
            report.bug_reports,
            report.evaluations
        );
        Ok(report)
    }

    async fn generate_editors<S>(
        &self,
        dist: &mut Distribution,
        store: &mut S,
        report: &mut GenerationReport,
    ) -> Result<Vec<Uuid>>
    where
        S: EditorStore + ?Sized,
    {
        info!("Generating {} editors...", self.num_editors);
        let editors = self.editors.generate(dist, self.num_editors);

        for (i, editor) in editors.iter().enumerate() {
            store.insert_editor(editor).await?;
            if (i + 1) % 10 == 0 {
                debug!("Inserted {}/{} editors", i + 1, editors.len());
            }
        }

        report.editors = editors.len() as u64;
        info!("Successfully generated {} editors", report.editors);
        Ok(editors.into_iter().map(|e| e.id).collect())
    }

    async fn generate_games<S>(
        &self,
        dist: &mut Distribution,
        store: &mut S,
        editor_ids: &[Uuid],
        report: &mut GenerationReport,
    ) -> Result<Vec<(Uuid, Vec<Game>)>>
    where
        S: EditorStore + ?Sized,
    {
        info!("Generating games for {} editors...", editor_ids.len());
        let mut editor_games = Vec::with_capacity(editor_ids.len());

        for &editor_id in editor_ids {
            let generated = self.games.generate(dist, editor_id, self.games_per_editor);
            let mut games = Vec::with_capacity(generated.len());

            for entry in generated {
                store.insert_game(&entry.game).await?;
                for row in &entry.platforms {
                    store.insert_game_platform(row).await?;
                }
                for row in &entry.genres {
                    store.insert_game_genre(row).await?;
                }

                report.games += 1;
                report.published_games += u64::from(entry.game.published);
                report.game_platforms += entry.platforms.len() as u64;
                report.game_genres += entry.genres.len() as u64;
                games.push(entry.game);
            }
            editor_games.push((editor_id, games));
        }

        info!(
            "Successfully generated {} games ({} published)",
            report.games, report.published_games
        );
        Ok(editor_games)
    }

    async fn generate_dlcs<S>(
        &self,
        dist: &mut Distribution,
        store: &mut S,
        games: &[&Game],
        report: &mut GenerationReport,
    ) -> Result<()>
    where
        S: EditorStore + ?Sized,
    {
        info!("Generating DLCs for {} games...", games.len());
        for game in games {
            for dlc in self.dlcs.generate(dist, game, self.dlc_per_game) {
                store.insert_dlc(&dlc).await?;
                report.dlcs += 1;
                report.published_dlcs += u64::from(dlc.published);
            }
        }
        info!("Successfully generated {} DLCs", report.dlcs);
        Ok(())
    }

    async fn generate_patches<S>(
        &self,
        dist: &mut Distribution,
        store: &mut S,
        games: &[&Game],
        report: &mut GenerationReport,
    ) -> Result<HashMap<Uuid, Vec<Uuid>>>
    where
        S: EditorStore + ?Sized,
    {
        info!("Generating patches for {} games...", games.len());
        let mut game_patches = HashMap::with_capacity(games.len());

        for game in games {
            let patches = self.patches.generate(dist, game.id, self.patches_per_game);
            let mut ids = Vec::with_capacity(patches.len());
            for patch in &patches {
                store.insert_patch(patch).await?;
                report.patches += 1;
                report.published_patches += u64::from(patch.published);
                ids.push(patch.id);
            }
            game_patches.insert(game.id, ids);
        }

        info!("Successfully generated {} patches", report.patches);
        Ok(game_patches)
    }

    async fn generate_bug_reports<S>(
        &self,
        dist: &mut Distribution,
        store: &mut S,
        games: &[&Game],
        game_patches: &HashMap<Uuid, Vec<Uuid>>,
        report: &mut GenerationReport,
    ) -> Result<()>
    where
        S: EditorStore + ?Sized,
    {
        info!("Generating bug reports...");
        for game in games {
            let patch_ids = game_patches.get(&game.id).map(Vec::as_slice).unwrap_or(&[]);
            let reports =
                self.bug_reports
                    .generate(dist, game.id, patch_ids, self.bug_reports_per_game);
            for bug_report in &reports {
                store.insert_bug_report(bug_report).await?;
            }
            report.bug_reports += reports.len() as u64;
        }
        info!("Successfully generated {} bug reports", report.bug_reports);
        Ok(())
    }

    async fn generate_evaluations<S>(
        &self,
        dist: &mut Distribution,
        store: &mut S,
        games: &[&Game],
        report: &mut GenerationReport,
    ) -> Result<()>
    where
        S: EditorStore + ?Sized,
    {
        info!("Generating evaluations...");
        for game in games {
            let evaluations = self
                .evaluations
                .generate(dist, game.id, self.evaluations_per_game);
            for evaluation in &evaluations {
                store.insert_evaluation(evaluation).await?;
            }
            report.evaluations += evaluations.len() as u64;
        }
        info!("Successfully generated {} evaluations", report.evaluations);
        Ok(())
    }
}
