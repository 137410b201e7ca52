//! Synthetic entity generation for the catalog loader.
//!
//! This crate turns a seeded [`Distribution`] into plausible editor-side
//! records:
//!
//! - [`EditorGenerator`] - companies and independent developers
//! - [`GameGenerator`] - games plus their platform and genre associations
//! - [`DlcGenerator`], [`PatchGenerator`] - per-game content, patches form a
//!   version chain starting at 1.0
//! - [`BugReportGenerator`], [`EvaluationGenerator`] - player feedback
//!
//! Nothing here touches a database. Records are returned to the caller, which
//! inserts them through a store.
//!
//! # Example
//!
//! ```rust
//! use catalog_core::CountRange;
//! use catalog_generator::{Distribution, EditorGenerator, GameGenerator};
//!
//! let mut dist = Distribution::from_seed(42);
//! let editors = EditorGenerator::new(80).generate(&mut dist, 2);
//! let games = GameGenerator::new(80).generate(&mut dist, editors[0].id, CountRange::new(3, 7));
//! assert!((3..=7).contains(&games.len()));
//! ```

pub mod distribution;
pub mod generators;
pub mod text;

pub use distribution::{round, Distribution};
pub use generators::{
    BugReportGenerator, DlcGenerator, EditorGenerator, EvaluationGenerator, GameGenerator,
    GeneratedGame, PatchGenerator,
};
