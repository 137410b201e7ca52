//! Evaluation generator.
//!
//! Ratings follow a fixed skewed distribution and the review text is picked
//! from the phrasings of the rating's band.

use crate::distribution::Distribution;
use crate::text;
use catalog_core::{CountRange, Evaluation, Platform};
use uuid::Uuid;

/// Rating buckets as `(cumulative percentage, min, max)`.
const RATING_BUCKETS: &[(i64, i64, i64)] = &[
    (5, 0, 3),
    (20, 4, 5),
    (50, 6, 7),
    (90, 8, 9),
    (100, 10, 10),
];

const GLOWING: &[&str] = &[
    "Absolutely amazing game! The graphics are stunning and gameplay is incredibly smooth.",
    "Best game I've played this year. Highly recommend to everyone!",
    "Perfect in every way. The story, mechanics, and visuals are all top-notch.",
    "A masterpiece! This game sets a new standard for the genre.",
    "Incredible experience from start to finish. Worth every penny!",
    "Flawless execution. The developers really nailed everything.",
    "Game of the year material. Everything about it is phenomenal.",
];

const FAVORABLE: &[&str] = &[
    "Great game overall! A few minor bugs but nothing game-breaking.",
    "Really enjoyed it. Some performance issues but the gameplay makes up for it.",
    "Solid experience. Could use some improvements but definitely worth playing.",
    "Very good game with a great story. Some mechanics feel a bit clunky though.",
    "Impressive work! A few rough edges but still highly enjoyable.",
    "Fun gameplay with beautiful graphics. A few optimization issues on my platform.",
    "Strong entry in the series. Not perfect but definitely recommended.",
];

const MIXED: &[&str] = &[
    "It's okay. Has potential but needs more polish and content.",
    "Average game. Some good ideas but execution could be better.",
    "Decent but nothing special. Lots of room for improvement.",
    "Mixed feelings about this one. Good concept, mediocre execution.",
    "Not bad but not great either. Wait for a sale maybe.",
    "Has its moments but also significant flaws. Needs patches.",
    "Serviceable game. Fun in parts but repetitive and buggy.",
];

const UNFAVORABLE: &[&str] = &[
    "Disappointing. So many bugs and performance issues.",
    "Not worth the price. Lacks content and feels unfinished.",
    "Frustrating experience. Controls are clunky and AI is terrible.",
    "Expected much more. Feels like a rushed release.",
    "Poor optimization and boring gameplay. Skip this one.",
    "Too many issues to enjoy. Needs serious work from developers.",
    "Underwhelming in every aspect. Better alternatives exist.",
];

const SCATHING: &[&str] = &[
    "Complete waste of money. Crashes constantly and barely playable.",
    "Absolutely terrible. Save your money and time.",
    "Broken mess. How did this even get released?",
    "Unplayable. Constant crashes and game-breaking bugs everywhere.",
    "Worst game purchase I've made. Requesting refund.",
    "Total disaster. Nothing works as intended.",
    "Avoid at all costs. Fundamentally broken on multiple levels.",
];

/// Phrasings matching a rating.
pub fn review_band(rating: i32) -> &'static [&'static str] {
    match rating {
        9.. => GLOWING,
        7..=8 => FAVORABLE,
        5..=6 => MIXED,
        3..=4 => UNFAVORABLE,
        _ => SCATHING,
    }
}

/// Creates the player evaluations of one game.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluationGenerator;

impl EvaluationGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, dist: &mut Distribution, game_id: Uuid, range: CountRange) -> Vec<Evaluation> {
        let count = dist.count_in(range);
        (0..count)
            .map(|_| {
                let id = dist.uuid_v4();
                let platform = *dist.choose_one(&Platform::ALL);
                let rating = sample_rating(dist);
                let review = dist.choose_one(review_band(rating));
                let context = text::sentence(dist, 8);

                Evaluation {
                    id,
                    game_id,
                    description: format!("{review} {context}"),
                    platform,
                    rating,
                }
            })
            .collect()
    }
}

/// Draw a rating in `0..=10` from the bucket distribution.
pub fn sample_rating(dist: &mut Distribution) -> i32 {
    let roll = dist.uniform_int(0, 99);
    let (_, min, max) = RATING_BUCKETS
        .iter()
        .copied()
        .find(|(cumulative, _, _)| roll < *cumulative)
        .unwrap_or((100, 10, 10));
    dist.uniform_int(min, max) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_distribution() {
        let mut dist = Distribution::from_seed(42);
        let samples = 100_000;
        let mut buckets = [0usize; 5];

        for _ in 0..samples {
            let rating = sample_rating(&mut dist);
            let bucket = match rating {
                0..=3 => 0,
                4..=5 => 1,
                6..=7 => 2,
                8..=9 => 3,
                10 => 4,
                other => panic!("rating out of range: {other}"),
            };
            buckets[bucket] += 1;
        }

        let expected = [5.0, 15.0, 30.0, 40.0, 10.0];
        for (count, pct) in buckets.iter().zip(expected) {
            let observed = *count as f64 * 100.0 / samples as f64;
            assert!(
                (observed - pct).abs() <= 2.0,
                "expected ~{pct}%, observed {observed}%"
            );
        }
    }

    #[test]
    fn test_review_matches_band() {
        let mut dist = Distribution::from_seed(7);
        let evaluations =
            EvaluationGenerator::new().generate(&mut dist, Uuid::new_v4(), CountRange::exactly(500));

        for evaluation in &evaluations {
            assert!((0..=10).contains(&evaluation.rating));
            let band = review_band(evaluation.rating);
            assert!(
                band.iter().any(|r| evaluation.description.starts_with(r)),
                "'{}' does not match rating {}",
                evaluation.description,
                evaluation.rating
            );
        }
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(review_band(10), GLOWING);
        assert_eq!(review_band(9), GLOWING);
        assert_eq!(review_band(7), FAVORABLE);
        assert_eq!(review_band(5), MIXED);
        assert_eq!(review_band(3), UNFAVORABLE);
        assert_eq!(review_band(2), SCATHING);
        assert_eq!(review_band(0), SCATHING);
    }
}
