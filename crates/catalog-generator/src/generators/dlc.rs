//! DLC generator.

use crate::distribution::{round, Distribution};
use crate::text;
use catalog_core::{CountRange, Dlc, Game};

type NameTemplate = fn(&mut Distribution) -> String;

// Fixed names weigh less than the templated ones so small datasets do not
// repeat "Season Pass" on every other game.
const NAME_TEMPLATES: &[(u32, NameTemplate)] = &[
    (1, |_| "Season Pass".to_string()),
    (2, |d| format!("{} Expansion", text::pick(d, text::ADJECTIVES))),
    (1, |_| "Deluxe Edition Content".to_string()),
    (2, |d| format!("{} Pack", text::pick(d, text::COLORS))),
    (2, |d| format!("{} DLC", text::pick(d, text::PRIMORDIALS))),
    (2, |d| format!("{} Collection", text::pick(d, text::MUSIC_GENRES))),
    (2, |d| format!("{} Expansion Pack", text::pick(d, text::PLANETS))),
    (1, |_| "Ultimate Edition Upgrade".to_string()),
    (2, |d| format!("{} Skin Pack", text::pick(d, text::ANIMALS))),
    (2, |d| format!("Premium {} Bundle", text::pick(d, text::ADJECTIVES))),
    (2, |d| format!("{} Character Pack", text::pick(d, text::SUPERHEROES))),
    (2, |d| format!("Map Pack: {}", text::pick(d, text::CITIES))),
    (2, |d| format!("{}'s Blessing", text::pick(d, text::GODS))),
    (2, |d| format!("Weapon Pack: {}", text::pick(d, text::HEROES))),
    (2, |d| format!("Story Extension: {}", text::pick(d, text::BOOK_TITLES))),
];

/// Creates the DLCs of one game.
#[derive(Debug, Clone, Copy)]
pub struct DlcGenerator {
    /// Percentage (0-100) of DLCs flagged as published.
    pub publish_rate: u8,
}

impl DlcGenerator {
    pub fn new(publish_rate: u8) -> Self {
        Self { publish_rate }
    }

    /// Generate DLCs for `game`. The count may be zero.
    ///
    /// Each DLC repeats the game's `editor_id`.
    pub fn generate(&self, dist: &mut Distribution, game: &Game, range: CountRange) -> Vec<Dlc> {
        let count = dist.count_in(range);
        (0..count).map(|_| self.generate_one(dist, game)).collect()
    }

    fn generate_one(&self, dist: &mut Distribution, game: &Game) -> Dlc {
        let id = dist.uuid_v4();
        let template = *dist.choose_weighted(NAME_TEMPLATES);
        let name = template(dist);
        let price = round(dist.uniform_double(2.99, 29.99), 2);
        let version = round(dist.uniform_double(1.0, 5.0), 1);
        let published = dist.weighted_boolean(self.publish_rate);

        Dlc {
            id,
            game_id: game.id,
            editor_id: game.editor_id,
            name,
            price,
            version,
            published,
        }
    }
}
