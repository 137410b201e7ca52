//! One generator per entity type.
//!
//! Generators are plain values configured with their rates. Each `generate`
//! call produces the children of a single parent; the caller walks the
//! hierarchy and decides where the records go.

mod bug_report;
mod dlc;
mod editor;
mod evaluation;
mod game;
mod patch;

pub use bug_report::BugReportGenerator;
pub use dlc::DlcGenerator;
pub use editor::EditorGenerator;
pub use evaluation::{review_band, sample_rating, EvaluationGenerator};
pub use game::{GameGenerator, GeneratedGame};
pub use patch::PatchGenerator;
