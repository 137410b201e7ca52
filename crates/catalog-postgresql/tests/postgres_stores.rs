//! Store round trips against a live PostgreSQL.
//!
//! Run with `cargo test -p catalog-postgresql -- --ignored` after pointing
//! `EDITOR_DB_URL` / `PLATFORM_DB_URL` at scratch databases.

use catalog_core::{
    Dlc, Editor, EditorStore, EditorTable, EditorType, Game, GameGenre, GamePlatform, Genre,
    Patch, Platform, PlatformGame, PlatformStore, PlatformTable, Transactional,
};
use catalog_postgresql::{init_schema, PostgresEditorStore, PostgresPlatformStore, SchemaKind};
use uuid::Uuid;

fn editor_url() -> String {
    std::env::var("EDITOR_DB_URL").unwrap_or_else(|_| {
        "host=localhost user=user password=password dbname=editor_db".to_string()
    })
}

fn platform_url() -> String {
    std::env::var("PLATFORM_DB_URL").unwrap_or_else(|_| {
        "host=localhost user=user password=password dbname=platform_db".to_string()
    })
}

fn editor() -> Editor {
    Editor {
        id: Uuid::new_v4(),
        name: "Nova Labs Games".to_string(),
        password: "abcdEFGH1234".to_string(),
        editor_type: EditorType::Enterprise,
        description: "Where stories come alive.".to_string(),
    }
}

fn game(editor_id: Uuid, published: bool) -> Game {
    Game {
        id: Uuid::new_v4(),
        editor_id,
        name: "Whiterun Chronicles".to_string(),
        price: 29.99,
        version: 3.4,
        published,
    }
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL editor database"]
async fn test_editor_store_closure_queries() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("catalog_postgresql=debug")
        .try_init()
        .ok();

    let mut store = PostgresEditorStore::connect(&editor_url()).await?;
    init_schema(store.client(), SchemaKind::Editor, true).await?;

    store.begin().await?;
    store.clear_tables().await?;

    let owner = editor();
    let shown = game(owner.id, true);
    let hidden = game(owner.id, false);
    store.insert_editor(&owner).await?;
    store.insert_game(&shown).await?;
    store.insert_game(&hidden).await?;
    store
        .insert_game_platform(&GamePlatform { game_id: shown.id, platform: Platform::Ps5 })
        .await?;
    store
        .insert_game_genre(&GameGenre { game_id: shown.id, genre: Genre::Rpg })
        .await?;

    for parent in [&shown, &hidden] {
        store
            .insert_dlc(&Dlc {
                id: Uuid::new_v4(),
                game_id: parent.id,
                editor_id: owner.id,
                name: "Season Pass".to_string(),
                price: 9.99,
                version: 1.2,
                published: true,
            })
            .await?;
        store
            .insert_patch(&Patch {
                id: Uuid::new_v4(),
                is_patch_of_game: true,
                game_id: parent.id,
                platform: Platform::Pc,
                old_version: 1.0,
                new_version: 1.4,
                comment: "Stability improvements and crash fixes".to_string(),
                modifications: "- Updated skill tree textures".to_string(),
                published: true,
            })
            .await?;
    }

    assert_eq!(store.editors().await?, vec![owner]);
    assert_eq!(store.published_games().await?, vec![shown.clone()]);
    assert_eq!(store.game_platforms(shown.id).await?, vec![Platform::Ps5]);
    assert_eq!(store.game_genres(shown.id).await?, vec![Genre::Rpg]);

    let dlcs = store.published_dlcs_of_published_games().await?;
    assert_eq!(dlcs.len(), 1);
    assert_eq!(dlcs[0].game_id, shown.id);

    let patches = store.published_patches_of_published_games().await?;
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].platform, Platform::Pc);

    assert_eq!(store.row_count(EditorTable::Dlc).await?, 2);

    store.rollback().await?;
    assert_eq!(store.row_count(EditorTable::Editor).await?, 0);
    Ok(())
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL platform database"]
async fn test_platform_store_commit() -> anyhow::Result<()> {
    let mut store = PostgresPlatformStore::connect(&platform_url()).await?;
    init_schema(store.client(), SchemaKind::Platform, true).await?;

    store.begin().await?;
    let owner = editor();
    let shown = game(owner.id, true);
    store.insert_editor(&owner).await?;
    store.insert_game(&PlatformGame::from(&shown)).await?;
    store.commit().await?;

    assert!(!store.in_transaction());
    assert_eq!(store.row_count(PlatformTable::Editor).await?, 1);
    assert_eq!(store.row_count(PlatformTable::Game).await?, 1);
    Ok(())
}
