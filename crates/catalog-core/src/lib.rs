//! Core types for the catalog-loader workspace.
//!
//! This crate provides the foundational types used across the loader:
//!
//! - [`Platform`], [`Genre`], [`EditorType`] - the enumerations shared by
//!   both databases
//! - [`CountRange`] - inclusive per-parent child count
//! - entity records ([`Editor`], [`Game`], [`Dlc`], [`Patch`], ...) and
//!   their platform-store projections ([`PlatformGame`], [`PlatformDlc`],
//!   [`PlatformPatch`])
//! - [`EditorStore`] / [`PlatformStore`] - backend-agnostic store traits
//! - [`MemoryEditorStore`] / [`MemoryPlatformStore`] - in-memory backends
//!
//! # Architecture
//!
//! ```text
//! catalog-core (this crate)
//!    │
//!    ├─── catalog-generator   (produces entity records)
//!    ├─── catalog-postgresql  (implements the store traits on PostgreSQL)
//!    └─── catalog-loader      (orchestration and publish sync)
//! ```

pub mod entities;
pub mod memory;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use entities::{
    BugReport, Dlc, Editor, Evaluation, Game, GameGenre, GamePlatform, Patch, PlatformDlc,
    PlatformGame, PlatformPatch,
};
pub use memory::{MemoryEditorStore, MemoryPlatformStore};
pub use store::{EditorStore, EditorTable, PlatformStore, PlatformTable, Transactional};
pub use types::{CountRange, EditorType, Genre, Platform, UnknownLabel};
