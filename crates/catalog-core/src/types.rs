//! Enumerations and small value types shared by every catalog crate.
//!
//! The string forms returned by `as_str` are exactly the labels stored in
//! the PostgreSQL enum types (`platform_enum`, `genre_enum`,
//! `editor_type_enum`), so they double as the wire representation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a stored label does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} label: '{label}'")]
pub struct UnknownLabel {
    /// Which enumeration was being parsed
    pub kind: &'static str,
    /// The offending label
    pub label: String,
}

/// Distribution platform of a game, patch, bug report or evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    Pc,
    Xbox,
    Ps5,
    Switch,
}

impl Platform {
    /// Every platform, in declaration order.
    pub const ALL: [Platform; 4] = [Platform::Pc, Platform::Xbox, Platform::Ps5, Platform::Switch];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Pc => "PC",
            Platform::Xbox => "XBOX",
            Platform::Ps5 => "PS5",
            Platform::Switch => "SWITCH",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownLabel {
                kind: "platform",
                label: s.to_string(),
            })
    }
}

/// Game genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Genre {
    Action,
    Rpg,
    Strategy,
    Sports,
}

impl Genre {
    /// Every genre, in declaration order.
    pub const ALL: [Genre; 4] = [Genre::Action, Genre::Rpg, Genre::Strategy, Genre::Sports];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "ACTION",
            Genre::Rpg => "RPG",
            Genre::Strategy => "STRATEGY",
            Genre::Sports => "SPORTS",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownLabel {
                kind: "genre",
                label: s.to_string(),
            })
    }
}

/// Whether an editor is a company or a single person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorType {
    Enterprise,
    Individual,
}

impl EditorType {
    pub const ALL: [EditorType; 2] = [EditorType::Enterprise, EditorType::Individual];

    pub fn as_str(&self) -> &'static str {
        match self {
            EditorType::Enterprise => "enterprise",
            EditorType::Individual => "individual",
        }
    }
}

impl fmt::Display for EditorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditorType {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enterprise" => Ok(EditorType::Enterprise),
            "individual" => Ok(EditorType::Individual),
            other => Err(UnknownLabel {
                kind: "editor type",
                label: other.to_string(),
            }),
        }
    }
}

/// Inclusive `[min, max]` range of children to create per parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// A range that always yields exactly `n`.
    pub const fn exactly(n: u32) -> Self {
        Self { min: n, max: n }
    }

    pub fn contains(&self, n: u32) -> bool {
        (self.min..=self.max).contains(&n)
    }

    /// Integer midpoint used for the estimated-count summary.
    pub fn midpoint(&self) -> u32 {
        (self.min + self.max) / 2
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

impl fmt::Display for CountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_labels_roundtrip() {
        for platform in Platform::ALL {
            assert_eq!(platform.as_str().parse::<Platform>().unwrap(), platform);
        }
        assert_eq!(Platform::Ps5.to_string(), "PS5");
    }

    #[test]
    fn test_unknown_label() {
        let err = "N64".parse::<Platform>().unwrap_err();
        assert_eq!(err.kind, "platform");
        assert_eq!(err.to_string(), "Unknown platform label: 'N64'");
        assert!("racing".parse::<Genre>().is_err());
        assert!("studio".parse::<EditorType>().is_err());
    }

    #[test]
    fn test_editor_type_labels() {
        assert_eq!(EditorType::Enterprise.as_str(), "enterprise");
        assert_eq!(
            "individual".parse::<EditorType>().unwrap(),
            EditorType::Individual
        );
    }

    #[test]
    fn test_count_range() {
        let range = CountRange::new(3, 7);
        assert!(range.contains(3));
        assert!(range.contains(7));
        assert!(!range.contains(8));
        assert_eq!(range.midpoint(), 5);
        assert_eq!(range.to_string(), "3-7");
        assert!(!CountRange::new(4, 2).is_valid());
        assert_eq!(CountRange::exactly(1), CountRange::new(1, 1));
    }
}
