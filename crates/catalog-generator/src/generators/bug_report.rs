//! Bug report generator.

use crate::distribution::Distribution;
use crate::text;
use catalog_core::{BugReport, CountRange, Platform};
use uuid::Uuid;

/// Template taking `(area, value, other_area)`.
type DescriptionTemplate = fn(&str, &str, &str) -> String;

const DESCRIPTIONS: &[DescriptionTemplate] = &[
    |a, v, b| format!("Game crashes when entering {a}. Error code: {v}. This happens consistently on {b}."),
    |a, v, _| format!("Severe performance drop in {a} area. FPS drops from 60 to 15-20. Tested on {v}."),
    |a, v, _| format!("Audio completely cuts out during {a}. Requires game restart to fix. Platform: {v}."),
    |a, v, _| format!("Character gets stuck in {a} geometry. Cannot move or respawn. Affected area: {v}."),
    |a, v, _| format!("Quest '{a}' cannot be completed. NPC doesn't spawn after {v}. Blocking progression."),
    |a, v, _| format!("Visual glitch in {a}. Textures appear distorted or missing. Reproducible on {v}."),
    |a, v, _| format!("Multiplayer desync issue during {a}. Players experience lag and disconnections on {v}."),
    |a, v, _| format!("Save file corruption after {a}. Lost {v} hours of progress. Critical issue."),
    |a, v, _| format!("Controls become unresponsive in {a}. Affects {v} functionality. Requires restart."),
    |a, v, _| format!("Memory leak detected during {a}. RAM usage climbs to {v} GB after extended play."),
    |a, v, _| format!("Collision detection broken in {a}. Can walk through walls near {v} area."),
    |a, v, _| format!("Achievement '{a}' doesn't unlock despite meeting requirements. Tried {v} times."),
    |a, v, _| format!("UI elements overlapping in {a} menu. Text unreadable on {v} resolution."),
    |a, v, _| format!("Incorrect damage calculation for {a}. Should be {v} but shows different value."),
    |a, v, _| format!("Loading screen freeze when accessing {a}. Game becomes unresponsive for {v} minutes."),
];

const GAME_AREAS: &[&str] = &[
    "the main menu", "inventory screen", "character customization", "multiplayer lobby",
    "final boss arena", "tutorial section", "cutscenes", "level 5", "the marketplace",
    "skill tree menu", "settings page", "quest log", "map screen", "crafting menu",
];

const VALUES: &[&str] = &[
    "0x8007045D", "multiple platforms", "high settings", "low graphics mode",
    "completing mission", "3-4", "1920x1080", "critical hits", "2-3", "V1.2.3",
];

/// Creates the bug reports filed against one game.
#[derive(Debug, Clone, Copy, Default)]
pub struct BugReportGenerator;

impl BugReportGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate bug reports for `game_id`.
    ///
    /// `patch_ids` are the patches of that same game. When it is non-empty,
    /// each report references one of them with probability one half.
    pub fn generate(
        &self,
        dist: &mut Distribution,
        game_id: Uuid,
        patch_ids: &[Uuid],
        range: CountRange,
    ) -> Vec<BugReport> {
        let count = dist.count_in(range);
        (0..count)
            .map(|_| {
                let id = dist.uuid_v4();
                let patch_id = if !patch_ids.is_empty() && dist.weighted_boolean(50) {
                    Some(*dist.choose_one(patch_ids))
                } else {
                    None
                };
                let platform = *dist.choose_one(&Platform::ALL);
                let description = describe(dist);

                BugReport {
                    id,
                    game_id,
                    patch_id,
                    description,
                    platform,
                }
            })
            .collect()
    }
}

fn describe(dist: &mut Distribution) -> String {
    let template = *dist.choose_one(DESCRIPTIONS);
    let area = *dist.choose_one(GAME_AREAS);
    let other_area = *dist.choose_one(GAME_AREAS);
    let value = *dist.choose_one(VALUES);
    let context = text::sentence(dist, 15);
    format!("{} {context}", template(area, value, other_area))
}
