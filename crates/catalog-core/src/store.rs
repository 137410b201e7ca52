//! Store traits for the editor and platform databases.
//!
//! These traits abstract the storage backend so the same generation and
//! sync logic works with:
//! - PostgreSQL (`PostgresEditorStore` / `PostgresPlatformStore` in the
//!   catalog-postgresql crate)
//! - In-memory stores (`MemoryEditorStore` / `MemoryPlatformStore`)
//!
//! Every store is transactional: callers `begin` once, issue any number of
//! statements and then either `commit` or `rollback`.

use crate::entities::{
    BugReport, Dlc, Editor, Evaluation, Game, GameGenre, GamePlatform, Patch, PlatformDlc,
    PlatformGame, PlatformPatch,
};
use crate::types::{Genre, Platform};
use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

/// Tables of the editor store, children first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorTable {
    Evaluation,
    BugReport,
    GameGenre,
    GamePlatform,
    Patch,
    Dlc,
    Game,
    Editor,
}

impl EditorTable {
    /// All tables in an order that is safe for truncation.
    pub const ALL: [EditorTable; 8] = [
        EditorTable::Evaluation,
        EditorTable::BugReport,
        EditorTable::GameGenre,
        EditorTable::GamePlatform,
        EditorTable::Patch,
        EditorTable::Dlc,
        EditorTable::Game,
        EditorTable::Editor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EditorTable::Evaluation => "evaluation",
            EditorTable::BugReport => "bug_report",
            EditorTable::GameGenre => "game_genre",
            EditorTable::GamePlatform => "game_platform",
            EditorTable::Patch => "patch",
            EditorTable::Dlc => "dlc",
            EditorTable::Game => "game",
            EditorTable::Editor => "editor",
        }
    }
}

impl fmt::Display for EditorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tables of the platform store, children first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformTable {
    GameGenre,
    GamePlatform,
    Patch,
    Dlc,
    Game,
    Editor,
}

impl PlatformTable {
    /// All tables in an order that is safe for truncation.
    pub const ALL: [PlatformTable; 6] = [
        PlatformTable::GameGenre,
        PlatformTable::GamePlatform,
        PlatformTable::Patch,
        PlatformTable::Dlc,
        PlatformTable::Game,
        PlatformTable::Editor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformTable::GameGenre => "game_genre",
            PlatformTable::GamePlatform => "game_platform",
            PlatformTable::Patch => "patch",
            PlatformTable::Dlc => "dlc",
            PlatformTable::Game => "game",
            PlatformTable::Editor => "editor",
        }
    }
}

impl fmt::Display for PlatformTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transaction control shared by both stores.
#[async_trait]
pub trait Transactional: Send {
    /// Open a transaction. Auto-commit is off until `commit` or `rollback`.
    async fn begin(&mut self) -> Result<()>;

    async fn commit(&mut self) -> Result<()>;

    async fn rollback(&mut self) -> Result<()>;

    /// Delete every row from every table of this store.
    async fn clear_tables(&mut self) -> Result<()>;
}

/// Operations on the editor (primary) store.
#[async_trait]
pub trait EditorStore: Transactional {
    async fn insert_editor(&mut self, editor: &Editor) -> Result<()>;

    async fn insert_game(&mut self, game: &Game) -> Result<()>;

    async fn insert_game_platform(&mut self, row: &GamePlatform) -> Result<()>;

    async fn insert_game_genre(&mut self, row: &GameGenre) -> Result<()>;

    async fn insert_dlc(&mut self, dlc: &Dlc) -> Result<()>;

    async fn insert_patch(&mut self, patch: &Patch) -> Result<()>;

    async fn insert_bug_report(&mut self, report: &BugReport) -> Result<()>;

    async fn insert_evaluation(&mut self, evaluation: &Evaluation) -> Result<()>;

    /// Every editor, published or not.
    async fn editors(&self) -> Result<Vec<Editor>>;

    /// Games whose publish flag is set.
    async fn published_games(&self) -> Result<Vec<Game>>;

    async fn game_platforms(&self, game_id: Uuid) -> Result<Vec<Platform>>;

    async fn game_genres(&self, game_id: Uuid) -> Result<Vec<Genre>>;

    /// Published DLCs whose parent game is also published.
    async fn published_dlcs_of_published_games(&self) -> Result<Vec<Dlc>>;

    /// Published patches whose parent game is also published.
    async fn published_patches_of_published_games(&self) -> Result<Vec<Patch>>;

    async fn row_count(&self, table: EditorTable) -> Result<u64>;
}

/// Operations on the platform (secondary) store.
#[async_trait]
pub trait PlatformStore: Transactional {
    async fn insert_editor(&mut self, editor: &Editor) -> Result<()>;

    async fn insert_game(&mut self, game: &PlatformGame) -> Result<()>;

    async fn insert_game_platform(&mut self, row: &GamePlatform) -> Result<()>;

    async fn insert_game_genre(&mut self, row: &GameGenre) -> Result<()>;

    async fn insert_dlc(&mut self, dlc: &PlatformDlc) -> Result<()>;

    async fn insert_patch(&mut self, patch: &PlatformPatch) -> Result<()>;

    async fn row_count(&self, table: PlatformTable) -> Result<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_tables_children_first() {
        let names: Vec<_> = EditorTable::ALL.iter().map(|t| t.as_str()).collect();
        let pos = |name: &str| names.iter().position(|n| *n == name).unwrap();
        assert!(pos("dlc") < pos("game"));
        assert!(pos("bug_report") < pos("patch"));
        assert!(pos("game") < pos("editor"));
    }

    #[test]
    fn test_platform_tables_have_no_feedback_tables() {
        let names: Vec<_> = PlatformTable::ALL.iter().map(|t| t.to_string()).collect();
        assert_eq!(names.len(), 6);
        assert!(!names.contains(&"bug_report".to_string()));
        assert!(!names.contains(&"evaluation".to_string()));
    }
}
