//! In-memory store implementations.
//!
//! Both stores keep rows in insertion order, enforce primary and foreign
//! keys the way the PostgreSQL schema does, and implement transactions by
//! snapshotting the tables on `begin` and restoring the snapshot on
//! `rollback`. They back the unit and integration tests.

use crate::entities::{
    BugReport, Dlc, Editor, Evaluation, Game, GameGenre, GamePlatform, Patch, PlatformDlc,
    PlatformGame, PlatformPatch,
};
use crate::store::{EditorStore, EditorTable, PlatformStore, PlatformTable, Transactional};
use crate::types::{Genre, Platform};
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use uuid::Uuid;

fn check_unique(ids: &HashSet<Uuid>, table: &str, id: Uuid) -> Result<()> {
    if ids.contains(&id) {
        bail!("duplicate key value violates unique constraint: {table}.id = {id}");
    }
    Ok(())
}

fn check_reference(ids: &HashSet<Uuid>, table: &str, column: &str, id: Uuid) -> Result<()> {
    if !ids.contains(&id) {
        bail!("insert on table \"{table}\" violates foreign key: {column} = {id} is not present");
    }
    Ok(())
}

/// Composite `(game_id, label)` primary key of the association tables.
fn check_unique_row<T: PartialEq>(
    rows: &[T],
    row: &T,
    table: &str,
    game_id: Uuid,
    label: &str,
) -> Result<()> {
    if rows.contains(row) {
        bail!("duplicate key value violates unique constraint: {table} ({game_id}, {label})");
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
struct EditorTables {
    editors: Vec<Editor>,
    games: Vec<Game>,
    game_platforms: Vec<GamePlatform>,
    game_genres: Vec<GameGenre>,
    dlcs: Vec<Dlc>,
    patches: Vec<Patch>,
    bug_reports: Vec<BugReport>,
    evaluations: Vec<Evaluation>,
    editor_ids: HashSet<Uuid>,
    game_ids: HashSet<Uuid>,
    dlc_ids: HashSet<Uuid>,
    patch_ids: HashSet<Uuid>,
    bug_report_ids: HashSet<Uuid>,
    evaluation_ids: HashSet<Uuid>,
}

/// In-memory editor store.
#[derive(Debug, Default)]
pub struct MemoryEditorStore {
    tables: EditorTables,
    snapshot: Option<EditorTables>,
}

impl MemoryEditorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_transaction(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn all_editors(&self) -> &[Editor] {
        &self.tables.editors
    }

    pub fn games(&self) -> &[Game] {
        &self.tables.games
    }

    pub fn game_platform_rows(&self) -> &[GamePlatform] {
        &self.tables.game_platforms
    }

    pub fn game_genre_rows(&self) -> &[GameGenre] {
        &self.tables.game_genres
    }

    pub fn dlcs(&self) -> &[Dlc] {
        &self.tables.dlcs
    }

    pub fn patches(&self) -> &[Patch] {
        &self.tables.patches
    }

    pub fn bug_reports(&self) -> &[BugReport] {
        &self.tables.bug_reports
    }

    pub fn evaluations(&self) -> &[Evaluation] {
        &self.tables.evaluations
    }

    fn is_game_published(&self, game_id: Uuid) -> bool {
        self.tables
            .games
            .iter()
            .any(|g| g.id == game_id && g.published)
    }
}

#[async_trait]
impl Transactional for MemoryEditorStore {
    async fn begin(&mut self) -> Result<()> {
        if self.snapshot.is_some() {
            bail!("editor store: a transaction is already in progress");
        }
        self.snapshot = Some(self.tables.clone());
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        self.snapshot = None;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        if let Some(snapshot) = self.snapshot.take() {
            self.tables = snapshot;
        }
        Ok(())
    }

    async fn clear_tables(&mut self) -> Result<()> {
        self.tables = EditorTables::default();
        Ok(())
    }
}

#[async_trait]
impl EditorStore for MemoryEditorStore {
    async fn insert_editor(&mut self, editor: &Editor) -> Result<()> {
        check_unique(&self.tables.editor_ids, "editor", editor.id)?;
        self.tables.editor_ids.insert(editor.id);
        self.tables.editors.push(editor.clone());
        Ok(())
    }

    async fn insert_game(&mut self, game: &Game) -> Result<()> {
        check_unique(&self.tables.game_ids, "game", game.id)?;
        check_reference(&self.tables.editor_ids, "game", "editor_id", game.editor_id)?;
        self.tables.game_ids.insert(game.id);
        self.tables.games.push(game.clone());
        Ok(())
    }

    async fn insert_game_platform(&mut self, row: &GamePlatform) -> Result<()> {
        check_reference(&self.tables.game_ids, "game_platform", "game_id", row.game_id)?;
        check_unique_row(
            &self.tables.game_platforms,
            row,
            "game_platform",
            row.game_id,
            row.platform.as_str(),
        )?;
        self.tables.game_platforms.push(*row);
        Ok(())
    }

    async fn insert_game_genre(&mut self, row: &GameGenre) -> Result<()> {
        check_reference(&self.tables.game_ids, "game_genre", "game_id", row.game_id)?;
        check_unique_row(
            &self.tables.game_genres,
            row,
            "game_genre",
            row.game_id,
            row.genre.as_str(),
        )?;
        self.tables.game_genres.push(*row);
        Ok(())
    }

    async fn insert_dlc(&mut self, dlc: &Dlc) -> Result<()> {
        check_unique(&self.tables.dlc_ids, "dlc", dlc.id)?;
        check_reference(&self.tables.game_ids, "dlc", "game_id", dlc.game_id)?;
        check_reference(&self.tables.editor_ids, "dlc", "editor_id", dlc.editor_id)?;
        self.tables.dlc_ids.insert(dlc.id);
        self.tables.dlcs.push(dlc.clone());
        Ok(())
    }

    async fn insert_patch(&mut self, patch: &Patch) -> Result<()> {
        check_unique(&self.tables.patch_ids, "patch", patch.id)?;
        check_reference(&self.tables.game_ids, "patch", "game_id", patch.game_id)?;
        self.tables.patch_ids.insert(patch.id);
        self.tables.patches.push(patch.clone());
        Ok(())
    }

    async fn insert_bug_report(&mut self, report: &BugReport) -> Result<()> {
        check_unique(&self.tables.bug_report_ids, "bug_report", report.id)?;
        check_reference(&self.tables.game_ids, "bug_report", "game_id", report.game_id)?;
        if let Some(patch_id) = report.patch_id {
            check_reference(&self.tables.patch_ids, "bug_report", "patch_id", patch_id)?;
        }
        self.tables.bug_report_ids.insert(report.id);
        self.tables.bug_reports.push(report.clone());
        Ok(())
    }

    async fn insert_evaluation(&mut self, evaluation: &Evaluation) -> Result<()> {
        check_unique(&self.tables.evaluation_ids, "evaluation", evaluation.id)?;
        check_reference(
            &self.tables.game_ids,
            "evaluation",
            "game_id",
            evaluation.game_id,
        )?;
        if !(0..=10).contains(&evaluation.rating) {
            return Err(anyhow!(
                "new row for relation \"evaluation\" violates check constraint: rating = {}",
                evaluation.rating
            ));
        }
        self.tables.evaluation_ids.insert(evaluation.id);
        self.tables.evaluations.push(evaluation.clone());
        Ok(())
    }

    async fn editors(&self) -> Result<Vec<Editor>> {
        Ok(self.tables.editors.clone())
    }

    async fn published_games(&self) -> Result<Vec<Game>> {
        Ok(self
            .tables
            .games
            .iter()
            .filter(|g| g.published)
            .cloned()
            .collect())
    }

    async fn game_platforms(&self, game_id: Uuid) -> Result<Vec<Platform>> {
        Ok(self
            .tables
            .game_platforms
            .iter()
            .filter(|row| row.game_id == game_id)
            .map(|row| row.platform)
            .collect())
    }

    async fn game_genres(&self, game_id: Uuid) -> Result<Vec<Genre>> {
        Ok(self
            .tables
            .game_genres
            .iter()
            .filter(|row| row.game_id == game_id)
            .map(|row| row.genre)
            .collect())
    }

    async fn published_dlcs_of_published_games(&self) -> Result<Vec<Dlc>> {
        Ok(self
            .tables
            .dlcs
            .iter()
            .filter(|d| d.published && self.is_game_published(d.game_id))
            .cloned()
            .collect())
    }

    async fn published_patches_of_published_games(&self) -> Result<Vec<Patch>> {
        Ok(self
            .tables
            .patches
            .iter()
            .filter(|p| p.published && self.is_game_published(p.game_id))
            .cloned()
            .collect())
    }

    async fn row_count(&self, table: EditorTable) -> Result<u64> {
        let t = &self.tables;
        let count = match table {
            EditorTable::Evaluation => t.evaluations.len(),
            EditorTable::BugReport => t.bug_reports.len(),
            EditorTable::GameGenre => t.game_genres.len(),
            EditorTable::GamePlatform => t.game_platforms.len(),
            EditorTable::Patch => t.patches.len(),
            EditorTable::Dlc => t.dlcs.len(),
            EditorTable::Game => t.games.len(),
            EditorTable::Editor => t.editors.len(),
        };
        Ok(count as u64)
    }
}

#[derive(Debug, Clone, Default)]
struct PlatformTables {
    editors: Vec<Editor>,
    games: Vec<PlatformGame>,
    game_platforms: Vec<GamePlatform>,
    game_genres: Vec<GameGenre>,
    dlcs: Vec<PlatformDlc>,
    patches: Vec<PlatformPatch>,
    editor_ids: HashSet<Uuid>,
    game_ids: HashSet<Uuid>,
    dlc_ids: HashSet<Uuid>,
    patch_ids: HashSet<Uuid>,
}

/// In-memory platform store.
#[derive(Debug, Default)]
pub struct MemoryPlatformStore {
    tables: PlatformTables,
    snapshot: Option<PlatformTables>,
}

impl MemoryPlatformStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_transaction(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn editors(&self) -> &[Editor] {
        &self.tables.editors
    }

    pub fn games(&self) -> &[PlatformGame] {
        &self.tables.games
    }

    pub fn game_platform_rows(&self) -> &[GamePlatform] {
        &self.tables.game_platforms
    }

    pub fn game_genre_rows(&self) -> &[GameGenre] {
        &self.tables.game_genres
    }

    pub fn dlcs(&self) -> &[PlatformDlc] {
        &self.tables.dlcs
    }

    pub fn patches(&self) -> &[PlatformPatch] {
        &self.tables.patches
    }
}

#[async_trait]
impl Transactional for MemoryPlatformStore {
    async fn begin(&mut self) -> Result<()> {
        if self.snapshot.is_some() {
            bail!("platform store: a transaction is already in progress");
        }
        self.snapshot = Some(self.tables.clone());
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        self.snapshot = None;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        if let Some(snapshot) = self.snapshot.take() {
            self.tables = snapshot;
        }
        Ok(())
    }

    async fn clear_tables(&mut self) -> Result<()> {
        self.tables = PlatformTables::default();
        Ok(())
    }
}

#[async_trait]
impl PlatformStore for MemoryPlatformStore {
    async fn insert_editor(&mut self, editor: &Editor) -> Result<()> {
        check_unique(&self.tables.editor_ids, "editor", editor.id)?;
        self.tables.editor_ids.insert(editor.id);
        self.tables.editors.push(editor.clone());
        Ok(())
    }

    async fn insert_game(&mut self, game: &PlatformGame) -> Result<()> {
        check_unique(&self.tables.game_ids, "game", game.id)?;
        check_reference(&self.tables.editor_ids, "game", "editor_id", game.editor_id)?;
        self.tables.game_ids.insert(game.id);
        self.tables.games.push(game.clone());
        Ok(())
    }

    async fn insert_game_platform(&mut self, row: &GamePlatform) -> Result<()> {
        check_reference(&self.tables.game_ids, "game_platform", "game_id", row.game_id)?;
        check_unique_row(
            &self.tables.game_platforms,
            row,
            "game_platform",
            row.game_id,
            row.platform.as_str(),
        )?;
        self.tables.game_platforms.push(*row);
        Ok(())
    }

    async fn insert_game_genre(&mut self, row: &GameGenre) -> Result<()> {
        check_reference(&self.tables.game_ids, "game_genre", "game_id", row.game_id)?;
        check_unique_row(
            &self.tables.game_genres,
            row,
            "game_genre",
            row.game_id,
            row.genre.as_str(),
        )?;
        self.tables.game_genres.push(*row);
        Ok(())
    }

    async fn insert_dlc(&mut self, dlc: &PlatformDlc) -> Result<()> {
        check_unique(&self.tables.dlc_ids, "dlc", dlc.id)?;
        check_reference(&self.tables.game_ids, "dlc", "game_id", dlc.game_id)?;
        check_reference(&self.tables.editor_ids, "dlc", "editor_id", dlc.editor_id)?;
        self.tables.dlc_ids.insert(dlc.id);
        self.tables.dlcs.push(dlc.clone());
        Ok(())
    }

    async fn insert_patch(&mut self, patch: &PlatformPatch) -> Result<()> {
        check_unique(&self.tables.patch_ids, "patch", patch.id)?;
        check_reference(&self.tables.game_ids, "patch", "game_id", patch.game_id)?;
        self.tables.patch_ids.insert(patch.id);
        self.tables.patches.push(patch.clone());
        Ok(())
    }

    async fn row_count(&self, table: PlatformTable) -> Result<u64> {
        let t = &self.tables;
        let count = match table {
            PlatformTable::GameGenre => t.game_genres.len(),
            PlatformTable::GamePlatform => t.game_platforms.len(),
            PlatformTable::Patch => t.patches.len(),
            PlatformTable::Dlc => t.dlcs.len(),
            PlatformTable::Game => t.games.len(),
            PlatformTable::Editor => t.editors.len(),
        };
        Ok(count as u64)
    }
}
