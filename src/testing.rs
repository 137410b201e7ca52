//! Test support for the loader
//!
//! Small configurations, a platform store that fails on demand, and checks
//! that compare the two in-memory stores after a run. The checks return
//! errors instead of panicking so they can be used from tests and from
//! ad-hoc verification alike.

use crate::config::LoaderConfig;
use anyhow::{bail, Result};
use async_trait::async_trait;
use catalog_core::{
    Editor, GameGenre, GamePlatform, MemoryEditorStore, MemoryPlatformStore, PlatformDlc,
    PlatformGame, PlatformPatch, PlatformStore, PlatformTable, Transactional,
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// A configuration small enough for unit tests: one editor, one game, one
/// patch, everything published.
pub fn minimal_config() -> LoaderConfig {
    LoaderConfig {
        num_editors: 1,
        games_per_editor_min: 1,
        games_per_editor_max: 1,
        dlc_per_game_min: 0,
        dlc_per_game_max: 0,
        patches_per_game_min: 1,
        patches_per_game_max: 1,
        bug_reports_per_game_min: 1,
        bug_reports_per_game_max: 1,
        evaluations_per_game_min: 1,
        evaluations_per_game_max: 1,
        publish_rate: 100,
        seed: Some(1),
        ..LoaderConfig::default()
    }
}

/// A few editors with the default publish rate, for property checks.
pub fn small_config(seed: u64) -> LoaderConfig {
    LoaderConfig {
        num_editors: 4,
        games_per_editor_min: 1,
        games_per_editor_max: 4,
        dlc_per_game_min: 0,
        dlc_per_game_max: 3,
        patches_per_game_min: 2,
        patches_per_game_max: 5,
        bug_reports_per_game_min: 1,
        bug_reports_per_game_max: 6,
        evaluations_per_game_min: 5,
        evaluations_per_game_max: 12,
        seed: Some(seed),
        ..LoaderConfig::default()
    }
}

/// Platform store that fails the N-th insert (1-based, any table).
///
/// Everything else is delegated to a [`MemoryPlatformStore`].
#[derive(Debug)]
pub struct FailingPlatformStore {
    inner: MemoryPlatformStore,
    fail_on: u64,
    inserts: u64,
}

impl FailingPlatformStore {
    pub fn new(inner: MemoryPlatformStore, fail_on: u64) -> Self {
        Self {
            inner,
            fail_on,
            inserts: 0,
        }
    }

    pub fn inner(&self) -> &MemoryPlatformStore {
        &self.inner
    }

    pub fn into_inner(self) -> MemoryPlatformStore {
        self.inner
    }

    fn tick(&mut self, table: &str) -> Result<()> {
        self.inserts += 1;
        if self.inserts == self.fail_on {
            bail!("injected failure on insert #{} into {table}", self.inserts);
        }
        Ok(())
    }
}

#[async_trait]
impl Transactional for FailingPlatformStore {
    async fn begin(&mut self) -> Result<()> {
        self.inner.begin().await
    }

    async fn commit(&mut self) -> Result<()> {
        self.inner.commit().await
    }

    async fn rollback(&mut self) -> Result<()> {
        self.inner.rollback().await
    }

    async fn clear_tables(&mut self) -> Result<()> {
        self.inner.clear_tables().await
    }
}

#[async_trait]
impl PlatformStore for FailingPlatformStore {
    async fn insert_editor(&mut self, editor: &Editor) -> Result<()> {
        self.tick("editor")?;
        self.inner.insert_editor(editor).await
    }

    async fn insert_game(&mut self, game: &PlatformGame) -> Result<()> {
        self.tick("game")?;
        self.inner.insert_game(game).await
    }

    async fn insert_game_platform(&mut self, row: &GamePlatform) -> Result<()> {
        self.tick("game_platform")?;
        self.inner.insert_game_platform(row).await
    }

    async fn insert_game_genre(&mut self, row: &GameGenre) -> Result<()> {
        self.tick("game_genre")?;
        self.inner.insert_game_genre(row).await
    }

    async fn insert_dlc(&mut self, dlc: &PlatformDlc) -> Result<()> {
        self.tick("dlc")?;
        self.inner.insert_dlc(dlc).await
    }

    async fn insert_patch(&mut self, patch: &PlatformPatch) -> Result<()> {
        self.tick("patch")?;
        self.inner.insert_patch(patch).await
    }

    async fn row_count(&self, table: PlatformTable) -> Result<u64> {
        self.inner.row_count(table).await
    }
}

/// Check that `platform` holds exactly the published closure of `editor`.
pub fn verify_published_closure(
    editor: &MemoryEditorStore,
    platform: &MemoryPlatformStore,
) -> Result<()> {
    if editor.all_editors() != platform.editors() {
        bail!(
            "editor rows differ: {} in editor store, {} in platform store",
            editor.all_editors().len(),
            platform.editors().len()
        );
    }

    let published: HashSet<Uuid> = editor
        .games()
        .iter()
        .filter(|g| g.published)
        .map(|g| g.id)
        .collect();

    let expected_games: Vec<PlatformGame> = editor
        .games()
        .iter()
        .filter(|g| g.published)
        .map(PlatformGame::from)
        .collect();
    if expected_games != platform.games() {
        bail!(
            "expected {} published games on the platform, found {}",
            expected_games.len(),
            platform.games().len()
        );
    }

    let expected_platforms: HashSet<GamePlatform> = editor
        .game_platform_rows()
        .iter()
        .filter(|r| published.contains(&r.game_id))
        .copied()
        .collect();
    let actual_platforms: HashSet<GamePlatform> =
        platform.game_platform_rows().iter().copied().collect();
    if expected_platforms != actual_platforms {
        bail!("game_platform rows differ between the published closure and the platform store");
    }

    let expected_genres: HashSet<GameGenre> = editor
        .game_genre_rows()
        .iter()
        .filter(|r| published.contains(&r.game_id))
        .copied()
        .collect();
    let actual_genres: HashSet<GameGenre> = platform.game_genre_rows().iter().copied().collect();
    if expected_genres != actual_genres {
        bail!("game_genre rows differ between the published closure and the platform store");
    }

    let expected_dlcs: Vec<PlatformDlc> = editor
        .dlcs()
        .iter()
        .filter(|d| d.published && published.contains(&d.game_id))
        .map(PlatformDlc::from)
        .collect();
    if expected_dlcs != platform.dlcs() {
        bail!(
            "expected {} DLCs on the platform, found {}",
            expected_dlcs.len(),
            platform.dlcs().len()
        );
    }

    let expected_patches: Vec<PlatformPatch> = editor
        .patches()
        .iter()
        .filter(|p| p.published && published.contains(&p.game_id))
        .map(PlatformPatch::from)
        .collect();
    if expected_patches != platform.patches() {
        bail!(
            "expected {} patches on the platform, found {}",
            expected_patches.len(),
            platform.patches().len()
        );
    }

    Ok(())
}

/// Check the cross-row invariants of a generated editor store.
///
/// Beyond the foreign keys the store enforces itself: DLC owners match the
/// game owner, bug reports only cite patches of their own game, ratings are
/// in range and every game's patches form an unbroken version chain from 1.0.
pub fn verify_editor_invariants(editor: &MemoryEditorStore) -> Result<()> {
    let owners: HashMap<Uuid, Uuid> = editor
        .games()
        .iter()
        .map(|g| (g.id, g.editor_id))
        .collect();

    for dlc in editor.dlcs() {
        match owners.get(&dlc.game_id) {
            Some(owner) if *owner == dlc.editor_id => {}
            Some(owner) => bail!(
                "DLC {} has editor {} but its game belongs to {owner}",
                dlc.id,
                dlc.editor_id
            ),
            None => bail!("DLC {} references unknown game {}", dlc.id, dlc.game_id),
        }
    }

    let patch_game: HashMap<Uuid, Uuid> = editor
        .patches()
        .iter()
        .map(|p| (p.id, p.game_id))
        .collect();
    for report in editor.bug_reports() {
        if let Some(patch_id) = report.patch_id {
            if patch_game.get(&patch_id) != Some(&report.game_id) {
                bail!(
                    "bug report {} cites patch {patch_id} which is not a patch of game {}",
                    report.id,
                    report.game_id
                );
            }
        }
    }

    for evaluation in editor.evaluations() {
        if !(0..=10).contains(&evaluation.rating) {
            bail!(
                "evaluation {} has rating {} outside 0-10",
                evaluation.id,
                evaluation.rating
            );
        }
    }

    for game in editor.games() {
        let mut expected_old = 1.0;
        for patch in editor.patches().iter().filter(|p| p.game_id == game.id) {
            if (patch.old_version - expected_old).abs() > 1e-9 {
                bail!(
                    "patch {} of game {} starts at {} instead of {expected_old}",
                    patch.id,
                    game.id,
                    patch.old_version
                );
            }
            if patch.new_version <= patch.old_version {
                bail!("patch {} does not advance the version", patch.id);
            }
            expected_old = patch.new_version;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::EditorType;

    fn editor(id: u128) -> Editor {
        Editor {
            id: Uuid::from_u128(id),
            name: "Grace Hopper".to_string(),
            password: "hunter2hunter2".to_string(),
            editor_type: EditorType::Individual,
            description: "Solo developer.".to_string(),
        }
    }

    #[test]
    fn test_configs_are_valid() {
        assert!(minimal_config().validate().is_ok());
        assert!(small_config(3).validate().is_ok());
    }

    #[tokio::test]
    async fn test_failing_store_fails_on_chosen_insert() {
        let mut store = FailingPlatformStore::new(MemoryPlatformStore::new(), 2);

        store.insert_editor(&editor(1)).await.unwrap();
        let err = store.insert_editor(&editor(2)).await.unwrap_err();
        assert!(err.to_string().contains("insert #2"));
        store.insert_editor(&editor(3)).await.unwrap();

        assert_eq!(store.inner().editors().len(), 2);
    }

    #[tokio::test]
    async fn test_closure_check_detects_missing_editor() {
        let mut source = MemoryEditorStore::new();
        catalog_core::EditorStore::insert_editor(&mut source, &editor(1))
            .await
            .unwrap();
        let target = MemoryPlatformStore::new();

        assert!(verify_published_closure(&source, &target).is_err());
        assert!(verify_published_closure(&MemoryEditorStore::new(), &target).is_ok());
    }
}
