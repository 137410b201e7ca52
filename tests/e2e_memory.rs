//! End-to-end runs of the full pipeline against the in-memory stores.

use catalog_core::{CountRange, MemoryEditorStore, MemoryPlatformStore};
use catalog_generator::Distribution;
use catalog_loader::testing::{
    minimal_config, small_config, verify_editor_invariants, verify_published_closure,
    FailingPlatformStore,
};
use catalog_loader::{run_pipeline, run_sync_only, LoaderConfig};
use std::collections::HashMap;
use uuid::Uuid;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter("catalog_loader=debug")
        .try_init()
        .ok();
}

async fn load(
    config: &LoaderConfig,
) -> anyhow::Result<(MemoryEditorStore, MemoryPlatformStore)> {
    let mut dist = Distribution::new(config.seed);
    let mut editor = MemoryEditorStore::new();
    let mut platform = MemoryPlatformStore::new();
    run_pipeline(config, &mut dist, &mut editor, &mut platform).await?;
    Ok((editor, platform))
}

fn children_per_parent<T>(
    parents: impl Iterator<Item = Uuid>,
    children: &[T],
    parent_of: impl Fn(&T) -> Uuid,
) -> Vec<u32> {
    let mut counts: HashMap<Uuid, u32> = parents.map(|id| (id, 0)).collect();
    for child in children {
        *counts.entry(parent_of(child)).or_default() += 1;
    }
    counts.into_values().collect()
}

#[tokio::test]
async fn test_single_editor_end_to_end() -> anyhow::Result<()> {
    init_logging();

    let config = minimal_config();
    let mut dist = Distribution::new(config.seed);
    let mut editor = MemoryEditorStore::new();
    let mut platform = MemoryPlatformStore::new();

    let report = run_pipeline(&config, &mut dist, &mut editor, &mut platform).await?;

    assert_eq!(report.seed, 1);
    assert_eq!(report.generation.editors, 1);
    assert_eq!(report.generation.games, 1);
    assert_eq!(report.generation.published_games, 1);
    assert_eq!(report.generation.dlcs, 0);
    assert_eq!(report.generation.patches, 1);

    assert_eq!(editor.all_editors().len(), 1);
    assert_eq!(editor.games().len(), 1);
    assert!(editor.games()[0].published);
    assert!(editor.dlcs().is_empty());

    let patch = &editor.patches()[0];
    assert_eq!(patch.old_version, 1.0);
    assert!(
        (1.1..=2.0).contains(&patch.new_version),
        "new_version = {}",
        patch.new_version
    );

    assert_eq!(platform.editors().len(), 1);
    assert_eq!(platform.games().len(), 1);
    assert!(platform.dlcs().is_empty());
    assert_eq!(platform.patches().len(), 1);
    assert_eq!(platform.patches()[0].id, patch.id);

    assert!(!editor.in_transaction());
    assert!(!platform.in_transaction());
    Ok(())
}

#[tokio::test]
async fn test_published_closure_and_integrity() -> anyhow::Result<()> {
    init_logging();

    for seed in [3, 17, 2024] {
        let config = small_config(seed);
        let (editor, platform) = load(&config).await?;

        verify_published_closure(&editor, &platform)?;
        verify_editor_invariants(&editor)?;

        let editor_ids: Vec<Uuid> = editor.all_editors().iter().map(|e| e.id).collect();
        let game_ids: Vec<Uuid> = editor.games().iter().map(|g| g.id).collect();

        let checks: [(&str, CountRange, Vec<u32>); 5] = [
            (
                "games",
                config.games_per_editor(),
                children_per_parent(editor_ids.iter().copied(), editor.games(), |g| {
                    g.editor_id
                }),
            ),
            (
                "dlcs",
                config.dlc_per_game(),
                children_per_parent(game_ids.iter().copied(), editor.dlcs(), |d| d.game_id),
            ),
            (
                "patches",
                config.patches_per_game(),
                children_per_parent(game_ids.iter().copied(), editor.patches(), |p| p.game_id),
            ),
            (
                "bug_reports",
                config.bug_reports_per_game(),
                children_per_parent(game_ids.iter().copied(), editor.bug_reports(), |b| {
                    b.game_id
                }),
            ),
            (
                "evaluations",
                config.evaluations_per_game(),
                children_per_parent(game_ids.iter().copied(), editor.evaluations(), |e| {
                    e.game_id
                }),
            ),
        ];
        for (what, range, counts) in checks {
            for count in counts {
                assert!(
                    range.contains(count),
                    "seed {seed}: {count} {what} outside {range}"
                );
            }
        }

        for game in platform.games() {
            assert!(editor_ids.contains(&game.editor_id));
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_nothing_published() -> anyhow::Result<()> {
    let config = LoaderConfig {
        publish_rate: 0,
        ..small_config(5)
    };
    let (editor, platform) = load(&config).await?;

    assert!(!editor.games().is_empty());
    assert_eq!(platform.editors().len(), editor.all_editors().len());
    assert!(platform.games().is_empty());
    assert!(platform.dlcs().is_empty());
    assert!(platform.patches().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_same_seed_same_dataset() -> anyhow::Result<()> {
    let config = small_config(99);
    let (first_editor, first_platform) = load(&config).await?;
    let (second_editor, second_platform) = load(&config).await?;

    assert_eq!(first_editor.all_editors(), second_editor.all_editors());
    assert_eq!(first_editor.games(), second_editor.games());
    assert_eq!(first_editor.patches(), second_editor.patches());
    assert_eq!(first_editor.evaluations(), second_editor.evaluations());
    assert_eq!(first_platform.games(), second_platform.games());
    Ok(())
}

#[tokio::test]
async fn test_second_run_without_clearing_doubles_editors() -> anyhow::Result<()> {
    init_logging();

    let config = LoaderConfig {
        clear_tables_before_load: false,
        ..small_config(8)
    };
    let mut editor = MemoryEditorStore::new();
    let mut platform = MemoryPlatformStore::new();

    let mut dist = Distribution::new(Some(8));
    let first = run_pipeline(&config, &mut dist, &mut editor, &mut platform).await?;
    assert_eq!(editor.all_editors().len(), 4);
    assert_eq!(platform.editors().len(), 4);

    // Same stores, nothing cleared on the editor side.
    let mut dist = Distribution::new(Some(9));
    let second = run_pipeline(&config, &mut dist, &mut editor, &mut platform).await?;

    assert_eq!(editor.all_editors().len(), 8);
    assert_eq!(platform.editors().len(), 8);
    assert_eq!(second.sync.editors, 8);
    assert_eq!(
        editor.games().len() as u64,
        first.generation.games + second.generation.games
    );
    verify_published_closure(&editor, &platform)?;
    verify_editor_invariants(&editor)?;
    Ok(())
}

#[tokio::test]
async fn test_rerun_drops_platform_rows_no_longer_published() -> anyhow::Result<()> {
    let mut editor = MemoryEditorStore::new();
    let mut platform = MemoryPlatformStore::new();

    let everything = LoaderConfig {
        publish_rate: 100,
        ..small_config(51)
    };
    let mut dist = Distribution::new(Some(51));
    run_pipeline(&everything, &mut dist, &mut editor, &mut platform).await?;
    assert!(!platform.games().is_empty());

    // The editor store is replaced by an unpublished dataset; the platform
    // must follow it rather than keep the earlier games.
    let nothing = LoaderConfig {
        publish_rate: 0,
        ..small_config(52)
    };
    let mut dist = Distribution::new(Some(52));
    run_pipeline(&nothing, &mut dist, &mut editor, &mut platform).await?;

    assert!(platform.games().is_empty());
    assert!(platform.dlcs().is_empty());
    assert!(platform.patches().is_empty());
    assert_eq!(platform.editors(), editor.all_editors());
    Ok(())
}

#[tokio::test]
async fn test_clearing_replaces_previous_run() -> anyhow::Result<()> {
    let config = small_config(11);
    let mut editor = MemoryEditorStore::new();
    let mut platform = MemoryPlatformStore::new();

    for seed in [11, 12] {
        let mut dist = Distribution::new(Some(seed));
        run_pipeline(&config, &mut dist, &mut editor, &mut platform).await?;
    }

    assert_eq!(editor.all_editors().len(), 4);
    verify_published_closure(&editor, &platform)?;
    Ok(())
}

#[tokio::test]
async fn test_sync_failure_rolls_back_both_stores() -> anyhow::Result<()> {
    init_logging();

    // An earlier committed run that must survive the failed one untouched.
    let (mut editor, platform) = load(&small_config(21)).await?;
    let editors_before = editor.all_editors().to_vec();
    let games_before = editor.games().to_vec();
    let platform_games_before = platform.games().to_vec();

    // Clearing, generation and the first two platform inserts all happen
    // before the injected failure.
    let mut failing = FailingPlatformStore::new(platform, 3);
    let mut dist = Distribution::new(Some(22));
    let config = small_config(22);

    let err = run_pipeline(&config, &mut dist, &mut editor, &mut failing)
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("injected failure"));

    let platform = failing.into_inner();
    assert_eq!(editor.all_editors(), editors_before.as_slice());
    assert_eq!(editor.games(), games_before.as_slice());
    assert_eq!(platform.games(), platform_games_before.as_slice());
    assert!(!editor.in_transaction());
    assert!(!platform.in_transaction());
    verify_published_closure(&editor, &platform)?;
    Ok(())
}

#[tokio::test]
async fn test_sync_only_recomputes_platform() -> anyhow::Result<()> {
    let (mut editor, _) = load(&small_config(31)).await?;
    let mut platform = MemoryPlatformStore::new();

    let report = run_sync_only(&mut editor, &mut platform, true).await?;

    assert_eq!(report.editors, 4);
    assert_eq!(report.games as usize, platform.games().len());
    verify_published_closure(&editor, &platform)?;

    // Running it again with clearing gives the same platform contents.
    let games = platform.games().to_vec();
    run_sync_only(&mut editor, &mut platform, true).await?;
    assert_eq!(platform.games(), games.as_slice());
    Ok(())
}

#[tokio::test]
async fn test_sync_only_without_clearing_collides() -> anyhow::Result<()> {
    let (mut editor, mut platform) = load(&small_config(41)).await?;
    let editors_before = platform.editors().to_vec();

    let result = run_sync_only(&mut editor, &mut platform, false).await;

    assert!(result.is_err());
    assert_eq!(platform.editors(), editors_before.as_slice());
    Ok(())
}
