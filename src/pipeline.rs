//! Transaction boundary around generation and sync.
//!
//! Both stores are opened with `begin` before any statement runs and are
//! committed together once generation and sync have both succeeded. Any
//! error rolls both back. Rollback failures are logged and never replace the
//! error that caused them.
//!
//! `clear_tables_before_load` only applies to the editor store. A full run
//! always empties the platform store before copying the published closure,
//! so the platform mirrors everything the editor store holds.

use crate::config::LoaderConfig;
use crate::orchestrator::{GenerationOrchestrator, GenerationReport};
use crate::publish_sync::{sync_published_closure, SyncReport};
use anyhow::{Context, Result};
use catalog_core::{EditorStore, PlatformStore, Transactional};
use catalog_generator::Distribution;
use tracing::{error, info, warn};

/// Outcome of a committed full run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineReport {
    /// Seed the run's distribution was created from.
    pub seed: u64,
    pub generation: GenerationReport,
    pub sync: SyncReport,
}

/// Generate into `editor`, sync into `platform`, then commit both.
pub async fn run_pipeline<E, P>(
    config: &LoaderConfig,
    dist: &mut Distribution,
    editor: &mut E,
    platform: &mut P,
) -> Result<PipelineReport>
where
    E: EditorStore + ?Sized,
    P: PlatformStore + ?Sized,
{
    info!("Starting load with seed {}", dist.seed());
    begin_both(editor, platform).await?;

    let outcome = load(config, dist, editor, platform).await;
    let (generation, sync) = match outcome {
        Ok(reports) => reports,
        Err(e) => {
            error!("Load failed, rolling back both databases");
            rollback_both(editor, platform).await;
            return Err(e);
        }
    };

    commit_both(editor, platform).await?;
    Ok(PipelineReport {
        seed: dist.seed(),
        generation,
        sync,
    })
}

/// Re-run only the publish sync against an already populated editor store.
///
/// The platform tables are cleared first when `clear_platform` is set;
/// otherwise rows already present there must not collide with the closure.
pub async fn run_sync_only<E, P>(
    editor: &mut E,
    platform: &mut P,
    clear_platform: bool,
) -> Result<SyncReport>
where
    E: EditorStore + ?Sized,
    P: PlatformStore + ?Sized,
{
    begin_both(editor, platform).await?;

    let outcome = async {
        if clear_platform {
            platform
                .clear_tables()
                .await
                .context("Failed to clear platform tables")?;
        }
        sync_published_closure(&*editor, platform)
            .await
            .context("Publish sync failed")
    }
    .await;

    let report = match outcome {
        Ok(report) => report,
        Err(e) => {
            error!("Sync failed, rolling back both databases");
            rollback_both(editor, platform).await;
            return Err(e);
        }
    };

    commit_both(editor, platform).await?;
    Ok(report)
}

async fn load<E, P>(
    config: &LoaderConfig,
    dist: &mut Distribution,
    editor: &mut E,
    platform: &mut P,
) -> Result<(GenerationReport, SyncReport)>
where
    E: EditorStore + ?Sized,
    P: PlatformStore + ?Sized,
{
    if config.clear_tables_before_load {
        editor
            .clear_tables()
            .await
            .context("Failed to clear editor tables")?;
    }

    let generation = GenerationOrchestrator::new(config)
        .run(dist, editor)
        .await
        .context("Generation into the editor database failed")?;

    // The platform side is always rebuilt from the full published closure.
    platform
        .clear_tables()
        .await
        .context("Failed to clear platform tables")?;
    let sync = sync_published_closure(&*editor, platform)
        .await
        .context("Publish sync into the platform database failed")?;

    Ok((generation, sync))
}

async fn begin_both<E, P>(editor: &mut E, platform: &mut P) -> Result<()>
where
    E: Transactional + ?Sized,
    P: Transactional + ?Sized,
{
    editor
        .begin()
        .await
        .context("Failed to open editor transaction")?;
    if let Err(e) = platform.begin().await {
        rollback_quietly(editor, "editor").await;
        return Err(e.context("Failed to open platform transaction"));
    }
    Ok(())
}

async fn commit_both<E, P>(editor: &mut E, platform: &mut P) -> Result<()>
where
    E: Transactional + ?Sized,
    P: Transactional + ?Sized,
{
    if let Err(e) = editor.commit().await {
        rollback_both(editor, platform).await;
        return Err(e.context("Failed to commit editor transaction"));
    }
    if let Err(e) = platform.commit().await {
        // The editor side is already durable at this point.
        warn!("Editor transaction was committed but the platform commit failed");
        rollback_quietly(platform, "platform").await;
        return Err(e.context("Failed to commit platform transaction"));
    }
    info!("Committed editor and platform transactions");
    Ok(())
}

async fn rollback_both<E, P>(editor: &mut E, platform: &mut P)
where
    E: Transactional + ?Sized,
    P: Transactional + ?Sized,
{
    rollback_quietly(editor, "editor").await;
    rollback_quietly(platform, "platform").await;
}

async fn rollback_quietly<T>(store: &mut T, name: &str)
where
    T: Transactional + ?Sized,
{
    match store.rollback().await {
        Ok(()) => info!("Rolled back {name} transaction"),
        Err(e) => error!("Failed to roll back {name} transaction: {e:#}"),
    }
}
