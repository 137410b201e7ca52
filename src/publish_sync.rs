//! Publish-gated closure sync from the editor store to the platform store.
//!
//! The platform store receives every editor, the published games with their
//! platform and genre rows, and the published DLCs and patches of those
//! games. A DLC or patch whose game is unpublished is never copied, even if
//! it is flagged as published itself.

use anyhow::{Context, Result};
use catalog_core::{
    EditorStore, GameGenre, GamePlatform, PlatformDlc, PlatformGame, PlatformPatch, PlatformStore,
};
use tracing::{debug, info};

/// Rows written to the platform store by one sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub editors: u64,
    pub games: u64,
    pub game_platforms: u64,
    pub game_genres: u64,
    pub dlcs: u64,
    pub patches: u64,
}

/// Copy the published closure of `source` into `target`.
///
/// The closure is read from `source` at call time, so whatever the current
/// transaction of `source` can see is what gets copied.
pub async fn sync_published_closure<E, P>(source: &E, target: &mut P) -> Result<SyncReport>
where
    E: EditorStore + ?Sized,
    P: PlatformStore + ?Sized,
{
    let mut report = SyncReport::default();

    info!("Syncing editors to platform database...");
    let editors = source.editors().await.context("Failed to read editors")?;
    for editor in &editors {
        target
            .insert_editor(editor)
            .await
            .context("Failed to sync editor")?;
    }
    report.editors = editors.len() as u64;

    info!("Syncing published games...");
    let games = source
        .published_games()
        .await
        .context("Failed to read published games")?;
    for game in &games {
        target
            .insert_game(&PlatformGame::from(game))
            .await
            .context("Failed to sync game")?;

        for platform in source.game_platforms(game.id).await? {
            target
                .insert_game_platform(&GamePlatform {
                    game_id: game.id,
                    platform,
                })
                .await
                .context("Failed to sync game platform")?;
            report.game_platforms += 1;
        }
        for genre in source.game_genres(game.id).await? {
            target
                .insert_game_genre(&GameGenre {
                    game_id: game.id,
                    genre,
                })
                .await
                .context("Failed to sync game genre")?;
            report.game_genres += 1;
        }
        debug!("Synced game {}", game.id);
    }
    report.games = games.len() as u64;

    info!("Syncing published DLCs of published games...");
    let dlcs = source
        .published_dlcs_of_published_games()
        .await
        .context("Failed to read published DLCs")?;
    for dlc in &dlcs {
        target
            .insert_dlc(&PlatformDlc::from(dlc))
            .await
            .context("Failed to sync DLC")?;
    }
    report.dlcs = dlcs.len() as u64;

    info!("Syncing published patches of published games...");
    let patches = source
        .published_patches_of_published_games()
        .await
        .context("Failed to read published patches")?;
    for patch in &patches {
        target
            .insert_patch(&PlatformPatch::from(patch))
            .await
            .context("Failed to sync patch")?;
    }
    report.patches = patches.len() as u64;

    info!(
        "Synced {} editors, {} games, {} DLCs, {} patches to platform database",
        report.editors, report.games, report.dlcs, report.patches
    );
    Ok(report)
}
