//! Patch generator.
//!
//! Patches of one game form a version chain: the first patch starts at 1.0
//! and every patch's `old_version` is the previous patch's `new_version`.

use crate::distribution::{round, Distribution};
use catalog_core::{CountRange, Patch, Platform};
use uuid::Uuid;

const INITIAL_VERSION: f64 = 1.0;

const COMMENTS: &[&str] = &[
    "Critical bug fixes and performance improvements",
    "Major update with new features and content",
    "Stability improvements and crash fixes",
    "Balance updates and gameplay adjustments",
    "Security patch and minor bug fixes",
    "Performance optimization for better FPS",
    "Fixed issues reported by community",
    "Updated graphics and UI improvements",
    "Multiplayer fixes and network optimization",
    "Seasonal update with new content",
];

type ModificationTemplate = fn(&str) -> String;

const MODIFICATIONS: &[ModificationTemplate] = &[
    |e| format!("Fixed crash when {e}"),
    |e| format!("Improved performance in {e}"),
    |e| format!("Added new {e} feature"),
    |e| format!("Balanced {e} mechanics"),
    |e| format!("Fixed audio glitches in {e}"),
    |e| format!("Updated {e} textures"),
    |e| format!("Optimized {e} loading times"),
    |e| format!("Fixed multiplayer issue with {e}"),
    |e| format!("Adjusted {e} difficulty"),
    |e| format!("Enhanced {e} visual effects"),
];

const GAME_ELEMENTS: &[&str] = &[
    "main menu", "inventory system", "combat system", "character creation", "boss fights",
    "cutscenes", "level transitions", "save system", "skill tree", "quest log", "map interface",
    "settings menu", "multiplayer lobby", "chat system", "achievements", "tutorials",
];

/// Creates the patch history of one game.
#[derive(Debug, Clone, Copy)]
pub struct PatchGenerator {
    /// Percentage (0-100) of patches flagged as published.
    pub publish_rate: u8,
}

impl PatchGenerator {
    pub fn new(publish_rate: u8) -> Self {
        Self { publish_rate }
    }

    /// Generate the patches of `game_id` in version order.
    pub fn generate(&self, dist: &mut Distribution, game_id: Uuid, range: CountRange) -> Vec<Patch> {
        let count = dist.count_in(range);
        let mut current_version = INITIAL_VERSION;
        let mut patches = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let id = dist.uuid_v4();
            let is_patch_of_game = dist.weighted_boolean(90);
            let platform = *dist.choose_one(&Platform::ALL);

            let old_version = current_version;
            let increment = round(dist.uniform_double(0.1, 1.0), 1);
            let new_version = round(old_version + increment, 1);
            current_version = new_version;

            let comment = dist.choose_one(COMMENTS).to_string();
            let modifications = modification_list(dist);
            let published = dist.weighted_boolean(self.publish_rate);

            patches.push(Patch {
                id,
                is_patch_of_game,
                game_id,
                platform,
                old_version,
                new_version,
                comment,
                modifications,
                published,
            });
        }

        patches
    }
}

fn modification_list(dist: &mut Distribution) -> String {
    let lines = dist.uniform_int(3, 8);
    (0..lines)
        .map(|_| {
            let template = *dist.choose_one(MODIFICATIONS);
            let element = *dist.choose_one(GAME_ELEMENTS);
            format!("- {}", template(element))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
