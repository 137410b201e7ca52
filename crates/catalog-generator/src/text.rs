//! Word catalogs and small text builders.
//!
//! Every name, phrase and filler sentence in the generated dataset is built
//! from the lists below so that output stays plausible without pulling in a
//! locale database.

use crate::distribution::Distribution;

pub const FIRST_NAMES: &[&str] = &[
    "Alice", "Bob", "Carol", "David", "Emma", "Frank", "Grace", "Henry", "Iris", "Jack", "Kate",
    "Leo", "Maya", "Noah", "Olivia", "Peter", "Quinn", "Rose", "Sam", "Tara", "Uma", "Victor",
    "Wendy", "Xavier", "Yara", "Zack", "Anna", "Brian", "Clara", "Derek",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Martinez",
    "Anderson", "Taylor", "Thomas", "Moore", "Jackson", "Martin", "Lee", "Thompson", "White",
    "Harris", "Clark", "Lewis", "Robinson", "Walker", "Hall", "Young", "King", "Wright", "Hill",
];

const COMPANY_PREFIXES: &[&str] = &[
    "Acme", "Global", "Prime", "Nova", "Alpha", "Delta", "Omega", "Apex", "Summit", "Core",
    "Edge", "Wave", "Spark", "Swift", "Bright", "Iron", "Crimson", "Silver", "Blue", "Northern",
];

const COMPANY_SUFFIXES: &[&str] = &[
    "Corp", "Labs", "Group", "Works", "Digital", "Partners", "Systems", "Media", "Forge", "Bits",
];

pub const GODS: &[&str] = &[
    "Zeus", "Athena", "Odin", "Thor", "Ra", "Anubis", "Apollo", "Freya", "Hermes", "Loki",
];

pub const HEROES: &[&str] = &[
    "Achilles", "Hercules", "Perseus", "Theseus", "Jason", "Odysseus", "Beowulf", "Gilgamesh",
];

pub const PRIMORDIALS: &[&str] = &["Chaos", "Gaia", "Uranus", "Nyx", "Erebus", "Tartarus", "Eros"];

pub const CITIES: &[&str] = &[
    "Whiterun", "Solitude", "Riften", "Markarth", "Windhelm", "Falkreath", "Dawnstar", "Winterhold",
];

pub const GALAXIES: &[&str] = &[
    "Andromeda", "Triangulum", "Sombrero", "Whirlpool", "Pinwheel", "Cartwheel", "Tadpole",
];

pub const PLANETS: &[&str] = &[
    "Mercury", "Venus", "Mars", "Jupiter", "Saturn", "Neptune", "Kepler-22b", "Proxima b",
];

pub const ANIMALS: &[&str] = &[
    "Goat", "Badger", "Falcon", "Otter", "Shark", "Wolf", "Panda", "Lynx", "Octopus", "Raven",
];

pub const MUSIC_GENRES: &[&str] = &[
    "Jazz", "Techno", "Metal", "Funk", "Reggae", "Blues", "Synthwave", "Punk", "Disco",
];

pub const COLORS: &[&str] = &[
    "Crimson", "Azure", "Emerald", "Amber", "Violet", "Obsidian", "Ivory", "Cobalt",
];

pub const SUPERHEROES: &[&str] = &[
    "Captain Nova", "Iron Falcon", "Night Warden", "Storm Breaker", "Quantum Lass", "Red Comet",
];

pub const ADJECTIVES: &[&str] = &[
    "Epic", "Ultimate", "Legendary", "Supreme", "Dark", "Golden", "Royal", "Ancient", "Mystic",
    "Shadow", "Divine",
];

pub const GERUNDS: &[&str] = &[
    "Fighting", "Racing", "Building", "Exploring", "Hunting", "Conquering", "Defending",
    "Surviving", "Crafting", "Rising",
];

pub const BOOK_TITLES: &[&str] = &[
    "The Last Lighthouse", "Ashes of Dawn", "A Crown of Frost", "The Silent Forge",
    "Echoes Below", "The Hollow King",
];

const CATCH_PHRASES: &[&str] = &[
    "Crafting worlds worth getting lost in",
    "Games built by players, for players",
    "Innovative interactive entertainment",
    "Bold ideas, polished experiences",
    "Where stories come alive",
    "Pushing the boundaries of play",
];

const BUSINESS_BUZZ: &[&str] = &[
    "We deliver cross-platform experiences at scale.",
    "We leverage live-service engagement loops.",
    "We empower communities through user-generated content.",
    "We streamline next-generation content pipelines.",
    "We iterate on player feedback every season.",
];

const INDIE_QUOTES: &[&str] = &[
    "It's a dangerous business, going out your door.",
    "Not all those who wander are lost.",
    "Even the smallest person can change the course of the future.",
    "The road goes ever on and on.",
    "All we have to decide is what to do with the time that is given us.",
];

const LOREM_WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in", "voluptate",
    "velit", "esse", "cillum", "fugiat", "nulla", "pariatur", "excepteur", "sint", "occaecat",
];

const PASSWORD_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Pick one entry of a word list.
pub fn pick(dist: &mut Distribution, words: &[&'static str]) -> &'static str {
    *dist.choose_one(words)
}

pub fn full_name(dist: &mut Distribution) -> String {
    format!("{} {}", pick(dist, FIRST_NAMES), pick(dist, LAST_NAMES))
}

pub fn company_name(dist: &mut Distribution) -> String {
    format!(
        "{} {}",
        pick(dist, COMPANY_PREFIXES),
        pick(dist, COMPANY_SUFFIXES)
    )
}

pub fn catch_phrase(dist: &mut Distribution) -> &'static str {
    pick(dist, CATCH_PHRASES)
}

pub fn business_buzz(dist: &mut Distribution) -> &'static str {
    pick(dist, BUSINESS_BUZZ)
}

pub fn indie_quote(dist: &mut Distribution) -> &'static str {
    pick(dist, INDIE_QUOTES)
}

/// Capitalized lorem sentence of `word_count` words ending with a period.
pub fn sentence(dist: &mut Distribution, word_count: usize) -> String {
    let mut text = (0..word_count.max(1))
        .map(|_| pick(dist, LOREM_WORDS))
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(first) = text.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    text.push('.');
    text
}

/// Alphanumeric password between `min_len` and `max_len` characters.
pub fn password(dist: &mut Distribution, min_len: usize, max_len: usize) -> String {
    let len = dist.uniform_int(min_len as i64, max_len as i64) as usize;
    (0..len)
        .map(|_| char::from(*dist.choose_one(PASSWORD_CHARS)))
        .collect()
}
