//! Game generator, including each game's platform and genre associations.

use crate::distribution::{round, Distribution};
use crate::text;
use catalog_core::{CountRange, Game, GameGenre, GamePlatform, Genre, Platform};
use uuid::Uuid;

const VIDEO_GAME_TITLES: &[&str] = &[
    "Starfall Odyssey", "Hollow Depths", "Neon Drift", "Ember Saga", "Frostbound",
    "Circuit Breakers", "Tidecaller", "Ironclad Tactics",
];

const ESPORTS_TITLES: &[&str] = &[
    "Arena Legends", "Strike Protocol", "Rocket Brawl", "Summoner Clash", "Overdrive League",
];

type TitleTemplate = fn(&mut Distribution) -> String;

const TITLE_TEMPLATES: &[TitleTemplate] = &[
    |d| text::pick(d, VIDEO_GAME_TITLES).to_string(),
    |d| format!("{}: {}", text::pick(d, text::HEROES), text::pick(d, text::PRIMORDIALS)),
    |d| format!("{} Chronicles", text::pick(d, text::CITIES)),
    |d| format!("The Legend of {}", text::pick(d, text::FIRST_NAMES)),
    |d| format!("{} Warriors", text::pick(d, text::GALAXIES)),
    |d| format!("{} Simulator", text::pick(d, text::ANIMALS)),
    |d| format!("{}: The Game", text::pick(d, text::SUPERHEROES)),
    |d| text::pick(d, ESPORTS_TITLES).to_string(),
    |d| format!("{}'s {}", text::pick(d, text::GODS), text::pick(d, text::GERUNDS)),
    |d| format!("{} Fighter", text::pick(d, text::MUSIC_GENRES)),
];

/// A game together with the association rows created alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedGame {
    pub game: Game,
    pub platforms: Vec<GamePlatform>,
    pub genres: Vec<GameGenre>,
}

/// Creates the games of one editor.
#[derive(Debug, Clone, Copy)]
pub struct GameGenerator {
    /// Percentage (0-100) of games flagged as published.
    pub publish_rate: u8,
}

impl GameGenerator {
    pub fn new(publish_rate: u8) -> Self {
        Self { publish_rate }
    }

    /// Generate between `range.min` and `range.max` games owned by `editor_id`.
    pub fn generate(
        &self,
        dist: &mut Distribution,
        editor_id: Uuid,
        range: CountRange,
    ) -> Vec<GeneratedGame> {
        let count = dist.count_in(range);
        (0..count)
            .map(|_| self.generate_one(dist, editor_id))
            .collect()
    }

    fn generate_one(&self, dist: &mut Distribution, editor_id: Uuid) -> GeneratedGame {
        let id = dist.uuid_v4();
        let template = *dist.choose_one(TITLE_TEMPLATES);
        let name = template(dist);
        let price = round(dist.uniform_double(5.99, 79.99), 2);
        let version = round(dist.uniform_double(1.0, 10.0), 1);
        let published = dist.weighted_boolean(self.publish_rate);

        let platform_count = dist.uniform_int(1, 4) as usize;
        let platforms = dist
            .sample_distinct(&Platform::ALL, platform_count)
            .into_iter()
            .map(|platform| GamePlatform {
                game_id: id,
                platform,
            })
            .collect();

        let genre_count = dist.uniform_int(1, 3) as usize;
        let genres = dist
            .sample_distinct(&Genre::ALL, genre_count)
            .into_iter()
            .map(|genre| GameGenre { game_id: id, genre })
            .collect();

        GeneratedGame {
            game: Game {
                id,
                editor_id,
                name,
                price,
                version,
                published,
            },
            platforms,
            genres,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_count_within_range() {
        let mut dist = Distribution::from_seed(42);
        let generator = GameGenerator::new(80);
        let editor_id = Uuid::new_v4();

        for _ in 0..50 {
            let games = generator.generate(&mut dist, editor_id, CountRange::new(3, 7));
            assert!((3..=7).contains(&games.len()));
            assert!(games.iter().all(|g| g.game.editor_id == editor_id));
        }
    }

    #[test]
    fn test_price_and_version_bounds() {
        let mut dist = Distribution::from_seed(7);
        let games = GameGenerator::new(50).generate(&mut dist, Uuid::new_v4(), CountRange::exactly(200));

        for generated in &games {
            let game = &generated.game;
            assert!((5.99..=79.99).contains(&game.price), "price {}", game.price);
            assert!((1.0..=10.0).contains(&game.version), "version {}", game.version);
            assert_eq!(round(game.price, 2), game.price);
            assert_eq!(round(game.version, 1), game.version);
        }
    }

    #[test]
    fn test_associations_distinct_and_sized() {
        let mut dist = Distribution::from_seed(11);
        let games = GameGenerator::new(80).generate(&mut dist, Uuid::new_v4(), CountRange::exactly(200));

        for generated in &games {
            let platforms: HashSet<_> = generated.platforms.iter().map(|p| p.platform).collect();
            assert_eq!(platforms.len(), generated.platforms.len());
            assert!((1..=4).contains(&platforms.len()));

            let genres: HashSet<_> = generated.genres.iter().map(|g| g.genre).collect();
            assert_eq!(genres.len(), generated.genres.len());
            assert!((1..=3).contains(&genres.len()));

            assert!(generated.platforms.iter().all(|p| p.game_id == generated.game.id));
            assert!(generated.genres.iter().all(|g| g.game_id == generated.game.id));
        }
    }

    #[test]
    fn test_publish_rate_extremes() {
        let mut dist = Distribution::from_seed(3);
        let editor_id = Uuid::new_v4();

        let all = GameGenerator::new(100).generate(&mut dist, editor_id, CountRange::exactly(30));
        assert!(all.iter().all(|g| g.game.published));

        let none = GameGenerator::new(0).generate(&mut dist, editor_id, CountRange::exactly(30));
        assert!(none.iter().all(|g| !g.game.published));
    }

    #[test]
    fn test_zero_range() {
        let mut dist = Distribution::from_seed(3);
        let games = GameGenerator::new(80).generate(&mut dist, Uuid::new_v4(), CountRange::exactly(0));
        assert!(games.is_empty());
    }
}
