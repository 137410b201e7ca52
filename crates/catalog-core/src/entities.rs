//! Entity records for the editor store and their platform-store projections.
//!
//! The editor store keeps the full authoring dataset, including the
//! `published` flag on games, DLCs and patches. The platform store receives
//! only published rows and uses a slightly different column layout, which is
//! expressed here by the `Platform*` records and their `From` conversions.

use crate::types::{EditorType, Genre, Platform};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A game publisher. Root of the entity graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Editor {
    pub id: Uuid,
    pub name: String,
    pub password: String,
    pub editor_type: EditorType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    pub editor_id: Uuid,
    pub name: String,
    pub price: f64,
    pub version: f64,
    pub published: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GamePlatform {
    pub game_id: Uuid,
    pub platform: Platform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameGenre {
    pub game_id: Uuid,
    pub genre: Genre,
}

/// Downloadable content attached to a game.
///
/// `editor_id` is a denormalized copy of the parent game's owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dlc {
    pub id: Uuid,
    pub game_id: Uuid,
    pub editor_id: Uuid,
    pub name: String,
    pub price: f64,
    pub version: f64,
    pub published: bool,
}

/// One step in a game's version chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub id: Uuid,
    /// False when the patch targets an associated DLC rather than the game.
    pub is_patch_of_game: bool,
    pub game_id: Uuid,
    pub platform: Platform,
    pub old_version: f64,
    pub new_version: f64,
    pub comment: String,
    /// Newline-separated `- ...` bullet lines.
    pub modifications: String,
    pub published: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BugReport {
    pub id: Uuid,
    pub game_id: Uuid,
    pub patch_id: Option<Uuid>,
    pub description: String,
    pub platform: Platform,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: Uuid,
    pub game_id: Uuid,
    pub description: String,
    pub platform: Platform,
    /// 0 to 10 inclusive.
    pub rating: i32,
}

/// A game as stored in the platform store (no publish flag).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformGame {
    pub id: Uuid,
    pub editor_id: Uuid,
    pub name: String,
    pub price: f64,
    pub version: f64,
}

impl From<&Game> for PlatformGame {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id,
            editor_id: game.editor_id,
            name: game.name.clone(),
            price: game.price,
            version: game.version,
        }
    }
}

/// A DLC as stored in the platform store (no publish flag).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformDlc {
    pub id: Uuid,
    pub game_id: Uuid,
    pub editor_id: Uuid,
    pub name: String,
    pub price: f64,
    pub version: f64,
}

impl From<&Dlc> for PlatformDlc {
    fn from(dlc: &Dlc) -> Self {
        Self {
            id: dlc.id,
            game_id: dlc.game_id,
            editor_id: dlc.editor_id,
            name: dlc.name.clone(),
            price: dlc.price,
            version: dlc.version,
        }
    }
}

/// A patch as stored in the platform store.
///
/// The editor-side modification list lands in `description`; the comment and
/// the publish flag are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformPatch {
    pub id: Uuid,
    pub is_patch_of_game: bool,
    pub game_id: Uuid,
    pub platform: Platform,
    pub old_version: f64,
    pub new_version: f64,
    pub description: String,
}

impl From<&Patch> for PlatformPatch {
    fn from(patch: &Patch) -> Self {
        Self {
            id: patch.id,
            is_patch_of_game: patch.is_patch_of_game,
            game_id: patch.game_id,
            platform: patch.platform,
            old_version: patch.old_version,
            new_version: patch.new_version,
            description: patch.modifications.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_patch_maps_modifications_to_description() {
        let patch = Patch {
            id: Uuid::from_u128(1),
            is_patch_of_game: true,
            game_id: Uuid::from_u128(2),
            platform: Platform::Switch,
            old_version: 1.0,
            new_version: 1.4,
            comment: "Stability improvements and crash fixes".to_string(),
            modifications: "- Fixed crash when main menu\n- Updated skill tree textures".to_string(),
            published: true,
        };

        let mapped = PlatformPatch::from(&patch);
        assert_eq!(mapped.id, patch.id);
        assert_eq!(mapped.description, patch.modifications);
        assert_eq!(mapped.old_version, 1.0);
        assert_eq!(mapped.new_version, 1.4);
        assert_eq!(mapped.platform, Platform::Switch);
    }

    #[test]
    fn test_platform_game_drops_publish_flag() {
        let game = Game {
            id: Uuid::from_u128(7),
            editor_id: Uuid::from_u128(3),
            name: "Shadow Chronicles".to_string(),
            price: 19.99,
            version: 2.3,
            published: true,
        };

        let mapped = PlatformGame::from(&game);
        assert_eq!(mapped.editor_id, game.editor_id);
        assert_eq!(mapped.name, "Shadow Chronicles");
        assert_eq!(mapped.price, 19.99);
    }
}
