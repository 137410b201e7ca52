//! Platform database store on PostgreSQL.

use crate::connect::{connect, Session};
use crate::error::PostgresStoreError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use catalog_core::{
    Editor, GameGenre, GamePlatform, PlatformDlc, PlatformGame, PlatformPatch, PlatformStore,
    PlatformTable, Transactional,
};
use tokio_postgres::types::ToSql;
use tokio_postgres::Client;

/// [`PlatformStore`] backed by a single `tokio_postgres` client.
pub struct PostgresPlatformStore {
    session: Session,
}

impl PostgresPlatformStore {
    /// Connect to the platform database.
    pub async fn connect(connection_string: &str) -> Result<Self, PostgresStoreError> {
        let client = connect(connection_string, "platform").await?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            session: Session::new(client, "platform"),
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
        table: PlatformTable,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<()> {
        self.session
            .client()
            .execute(sql, params)
            .await
            .with_context(|| format!("Failed to insert into platform table '{table}'"))?;
        Ok(())
    }
}

#[async_trait]
impl Transactional for PostgresPlatformStore {
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
        let tables: Vec<&str> = PlatformTable::ALL.iter().map(|t| t.as_str()).collect();
        self.session.truncate(&tables).await
    }
}

#[async_trait]
impl PlatformStore for PostgresPlatformStore {
    async fn insert_editor(&mut self, editor: &Editor) -> Result<()> {
        self.execute(
            PlatformTable::Editor,
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

    async fn insert_game(&mut self, game: &PlatformGame) -> Result<()> {
        self.execute(
            PlatformTable::Game,
            "INSERT INTO game (id, editor_id, name, price, version) VALUES ($1, $2, $3, $4, $5)",
            &[
                &game.id,
                &game.editor_id,
                &game.name,
                &game.price,
                &game.version,
            ],
        )
        .await
    }

    async fn insert_game_platform(&mut self, row: &GamePlatform) -> Result<()> {
        self.execute(
            PlatformTable::GamePlatform,
            "INSERT INTO game_platform (game_id, platform) VALUES ($1, $2::text::platform_enum)",
            &[&row.game_id, &row.platform.as_str()],
        )
        .await
    }

    async fn insert_game_genre(&mut self, row: &GameGenre) -> Result<()> {
        self.execute(
            PlatformTable::GameGenre,
            "INSERT INTO game_genre (game_id, genre) VALUES ($1, $2::text::genre_enum)",
            &[&row.game_id, &row.genre.as_str()],
        )
        .await
    }

    async fn insert_dlc(&mut self, dlc: &PlatformDlc) -> Result<()> {
        self.execute(
            PlatformTable::Dlc,
            "INSERT INTO dlc (id, game_id, editor_id, name, price, version) \
             VALUES ($1, $2, $3, $4, $5, $6)",
            &[
                &dlc.id,
                &dlc.game_id,
                &dlc.editor_id,
                &dlc.name,
                &dlc.price,
                &dlc.version,
            ],
        )
        .await
    }

    async fn insert_patch(&mut self, patch: &PlatformPatch) -> Result<()> {
        self.execute(
            PlatformTable::Patch,
            "INSERT INTO patch (id, is_patch_of_game, game_id, platform, old_version, \
             new_version, description) \
             VALUES ($1, $2, $3, $4::text::platform_enum, $5, $6, $7)",
            &[
                &patch.id,
                &patch.is_patch_of_game,
                &patch.game_id,
                &patch.platform.as_str(),
                &patch.old_version,
                &patch.new_version,
                &patch.description,
            ],
        )
        .await
    }

    async fn row_count(&self, table: PlatformTable) -> Result<u64> {
        self.session.count(table.as_str()).await
    }
}
