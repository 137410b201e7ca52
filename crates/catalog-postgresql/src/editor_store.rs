//! Editor database store on PostgreSQL.

use crate::connect::{connect, Session};
use crate::error::PostgresStoreError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use catalog_core::{
    BugReport, Dlc, Editor, EditorStore, EditorTable, EditorType, Evaluation, Game, GameGenre,
    GamePlatform, Genre, Patch, Platform, Transactional,
};
use std::str::FromStr;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, Row};
use tracing::debug;
use uuid::Uuid;

/// [`EditorStore`] backed by a single `tokio_postgres` client.
///
/// Enum columns are bound as text and cast on the server
/// (`$n::text::platform_enum`), and read back with `::text`.
pub struct PostgresEditorStore {
    session: Session,
}

impl PostgresEditorStore {
    /// Connect to the editor database.
    pub async fn connect(connection_string: &str) -> Result<Self, PostgresStoreError> {
        let client = connect(connection_string, "editor").await?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        Self {
            session: Session::new(client, "editor"),
        }
    }

    pub fn client(&self) -> &Client {
        self.session.client()
    }

    pub fn in_transaction(&self) -> bool {
        self.session.in_transaction()
    }

    async fn execute(
        &self,
        table: EditorTable,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<()> {
        self.session
            .client()
            .execute(sql, params)
            .await
            .with_context(|| format!("Failed to insert into editor table '{table}'"))?;
        Ok(())
    }

    async fn query(&self, what: &str, sql: &str) -> Result<Vec<Row>> {
        self.session
            .client()
            .query(sql, &[])
            .await
            .with_context(|| format!("Failed to read {what} from the editor database"))
    }
}

/// Parse an enum label read back as text.
fn label<T>(row: &Row, idx: usize, column: &'static str) -> Result<T, PostgresStoreError>
where
    T: FromStr<Err = catalog_core::UnknownLabel>,
{
    let raw: String = row.get(idx);
    raw.parse()
        .map_err(|source| PostgresStoreError::Decode { column, source })
}

fn editor_from_row(row: &Row) -> Result<Editor, PostgresStoreError> {
    Ok(Editor {
        id: row.get(0),
        name: row.get(1),
        password: row.get(2),
        editor_type: label::<EditorType>(row, 3, "editor_type")?,
        description: row.get(4),
    })
}

fn game_from_row(row: &Row) -> Game {
    Game {
        id: row.get(0),
        editor_id: row.get(1),
        name: row.get(2),
        price: row.get(3),
        version: row.get(4),
        published: row.get(5),
    }
}

fn dlc_from_row(row: &Row) -> Dlc {
    Dlc {
        id: row.get(0),
        game_id: row.get(1),
        editor_id: row.get(2),
        name: row.get(3),
        price: row.get(4),
        version: row.get(5),
        published: row.get(6),
    }
}

fn patch_from_row(row: &Row) -> Result<Patch, PostgresStoreError> {
    Ok(Patch {
        id: row.get(0),
        is_patch_of_game: row.get(1),
        game_id: row.get(2),
        platform: label::<Platform>(row, 3, "platform")?,
        old_version: row.get(4),
        new_version: row.get(5),
        comment: row.get(6),
        modifications: row.get(7),
        published: row.get(8),
    })
}

#[async_trait]
impl Transactional for PostgresEditorStore {
    async fn begin(&mut self) -> Result<()> {
        self.session.begin().await
    }

    async fn commit(&mut self) -> Result<()> {
        self.session.commit().await
    }

    async fn rollback(&mut self) -> Result<()> {
        self.session.rollback().await
    }

    async fn clear_tables(&mut self) -> Result<()> {
        let tables: Vec<&str> = EditorTable::ALL.iter().map(|t| t.as_str()).collect();
        self.session.truncate(&tables).await
    }
}

#[async_trait]
impl EditorStore for PostgresEditorStore {
    async fn insert_editor(&mut self, editor: &Editor) -> Result<()> {
        self.execute(
            EditorTable::Editor,
            "INSERT INTO editor (id, name, password, editor_type, description) \
             VALUES ($1, $2, $3, $4::text::editor_type_enum, $5)",
            &[
                &editor.id,
                &editor.name,
                &editor.password,
                &editor.editor_type.as_str(),
                &editor.description,
            ],
        )
        .await
    }

    async fn insert_game(&mut self, game: &Game) -> Result<()> {
        self.execute(
            EditorTable::Game,
            "INSERT INTO game (id, editor_id, name, price, version, published) \
             VALUES ($1, $2, $3, $4, $5, $6)",
            &[
                &game.id,
                &game.editor_id,
                &game.name,
                &game.price,
                &game.version,
                &game.published,
            ],
        )
        .await
    }

    async fn insert_game_platform(&mut self, row: &GamePlatform) -> Result<()> {
        self.execute(
            EditorTable::GamePlatform,
            "INSERT INTO game_platform (game_id, platform) VALUES ($1, $2::text::platform_enum)",
            &[&row.game_id, &row.platform.as_str()],
        )
        .await
    }

    async fn insert_game_genre(&mut self, row: &GameGenre) -> Result<()> {
        self.execute(
            EditorTable::GameGenre,
            "INSERT INTO game_genre (game_id, genre) VALUES ($1, $2::text::genre_enum)",
            &[&row.game_id, &row.genre.as_str()],
        )
        .await
    }

    async fn insert_dlc(&mut self, dlc: &Dlc) -> Result<()> {
        self.execute(
            EditorTable::Dlc,
            "INSERT INTO dlc (id, game_id, editor_id, name, price, version, published) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
            &[
                &dlc.id,
                &dlc.game_id,
                &dlc.editor_id,
                &dlc.name,
                &dlc.price,
                &dlc.version,
                &dlc.published,
            ],
        )
        .await
    }

    async fn insert_patch(&mut self, patch: &Patch) -> Result<()> {
        self.execute(
            EditorTable::Patch,
            "INSERT INTO patch (id, is_patch_of_game, game_id, platform, old_version, \
             new_version, comment, modifications, published) \
             VALUES ($1, $2, $3, $4::text::platform_enum, $5, $6, $7, $8, $9)",
            &[
                &patch.id,
                &patch.is_patch_of_game,
                &patch.game_id,
                &patch.platform.as_str(),
                &patch.old_version,
                &patch.new_version,
                &patch.comment,
                &patch.modifications,
                &patch.published,
            ],
        )
        .await
    }

    async fn insert_bug_report(&mut self, report: &BugReport) -> Result<()> {
        self.execute(
            EditorTable::BugReport,
            "INSERT INTO bug_report (id, game_id, patch_id, description, platform) \
             VALUES ($1, $2, $3, $4, $5::text::platform_enum)",
            &[
                &report.id,
                &report.game_id,
                &report.patch_id,
                &report.description,
                &report.platform.as_str(),
            ],
        )
        .await
    }

    async fn insert_evaluation(&mut self, evaluation: &Evaluation) -> Result<()> {
        self.execute(
            EditorTable::Evaluation,
            "INSERT INTO evaluation (id, game_id, description, platform, rating) \
             VALUES ($1, $2, $3, $4::text::platform_enum, $5)",
            &[
                &evaluation.id,
                &evaluation.game_id,
                &evaluation.description,
                &evaluation.platform.as_str(),
                &evaluation.rating,
            ],
        )
        .await
    }

    async fn editors(&self) -> Result<Vec<Editor>> {
        let rows = self
            .query(
                "editors",
                "SELECT id, name, password, editor_type::text, description FROM editor",
            )
            .await?;
        let editors = rows
            .iter()
            .map(editor_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Read {} editors", editors.len());
        Ok(editors)
    }

    async fn published_games(&self) -> Result<Vec<Game>> {
        let rows = self
            .query(
                "published games",
                "SELECT id, editor_id, name, price, version, published FROM game WHERE published",
            )
            .await?;
        Ok(rows.iter().map(game_from_row).collect())
    }

    async fn game_platforms(&self, game_id: Uuid) -> Result<Vec<Platform>> {
        let rows = self
            .session
            .client()
            .query(
                "SELECT platform::text FROM game_platform WHERE game_id = $1",
                &[&game_id],
            )
            .await
            .with_context(|| format!("Failed to read platforms of game {game_id}"))?;
        let platforms = rows
            .iter()
            .map(|row| label::<Platform>(row, 0, "platform"))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(platforms)
    }

    async fn game_genres(&self, game_id: Uuid) -> Result<Vec<Genre>> {
        let rows = self
            .session
            .client()
            .query(
                "SELECT genre::text FROM game_genre WHERE game_id = $1",
                &[&game_id],
            )
            .await
            .with_context(|| format!("Failed to read genres of game {game_id}"))?;
        let genres = rows
            .iter()
            .map(|row| label::<Genre>(row, 0, "genre"))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(genres)
    }

    async fn published_dlcs_of_published_games(&self) -> Result<Vec<Dlc>> {
        let rows = self
            .query(
                "published DLCs",
                "SELECT d.id, d.game_id, d.editor_id, d.name, d.price, d.version, d.published \
                 FROM dlc d JOIN game g ON g.id = d.game_id \
                 WHERE d.published AND g.published",
            )
            .await?;
        Ok(rows.iter().map(dlc_from_row).collect())
    }

    async fn published_patches_of_published_games(&self) -> Result<Vec<Patch>> {
        let rows = self
            .query(
                "published patches",
                "SELECT p.id, p.is_patch_of_game, p.game_id, p.platform::text, p.old_version, \
                 p.new_version, p.comment, p.modifications, p.published \
                 FROM patch p JOIN game g ON g.id = p.game_id \
                 WHERE p.published AND g.published",
            )
            .await?;
        let patches = rows
            .iter()
            .map(patch_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(patches)
    }

    async fn row_count(&self, table: EditorTable) -> Result<u64> {
        self.session.count(table.as_str()).await
    }
}
