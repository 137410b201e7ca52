//! Catalog Loader
//!
//! Generates a synthetic game-publishing catalog into the editor database and
//! mirrors its published part into the platform database.
//!
//! # Flow
//!
//! 1. Both stores open a transaction.
//! 2. Editor tables are optionally cleared, then editors, games, DLCs,
//!    patches, bug reports and evaluations are generated and inserted.
//! 3. Every editor and the published closure (published games, and the
//!    published DLCs and patches of those games) are copied to the platform
//!    store.
//! 4. Both transactions commit, or both roll back on the first error.
//!
//! # CLI Usage
//!
//! ```bash
//! # Create both schemas
//! catalog-loader init-schema
//!
//! # Generate and sync with a fixed seed
//! catalog-loader --seed 42 run
//!
//! # Re-run only the publish sync
//! catalog-loader sync
//! ```
//!
//! # Library Usage
//!
//! ```no_run
//! use catalog_core::{MemoryEditorStore, MemoryPlatformStore};
//! use catalog_generator::Distribution;
//! use catalog_loader::{run_pipeline, LoaderConfig};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = LoaderConfig::default();
//! let mut dist = Distribution::new(Some(42));
//! let mut editor = MemoryEditorStore::new();
//! let mut platform = MemoryPlatformStore::new();
//! let report = run_pipeline(&config, &mut dist, &mut editor, &mut platform).await?;
//! println!("{} games generated", report.generation.games);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod orchestrator;
pub mod pipeline;
pub mod publish_sync;
pub mod summary;
pub mod testing;

pub use config::{ConfigError, LoaderConfig, DEFAULT_CONFIG_FILE};
pub use orchestrator::{GenerationOrchestrator, GenerationReport};
pub use pipeline::{run_pipeline, run_sync_only, PipelineReport};
pub use publish_sync::{sync_published_closure, SyncReport};
pub use summary::{log_realized, EstimatedCounts};
