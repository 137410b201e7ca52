//! DDL for the editor and platform schemas.
//!
//! Enum labels are taken from the `catalog_core` enums so the database types
//! and the Rust types cannot drift apart. Tables are created parents first
//! and dropped children first.

use crate::error::PostgresStoreError;
use catalog_core::{EditorTable, EditorType, Genre, Platform, PlatformTable};
use tokio_postgres::Client;
use tracing::{debug, info};

/// Which of the two databases a schema belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Editor,
    Platform,
}

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::Editor => "editor",
            SchemaKind::Platform => "platform",
        }
    }
}

fn create_enum(name: &str, labels: &[&str]) -> String {
    let labels = labels
        .iter()
        .map(|l| format!("'{l}'"))
        .collect::<Vec<_>>()
        .join(", ");
    // CREATE TYPE has no IF NOT EXISTS
    format!(
        "DO $$ BEGIN\n    CREATE TYPE {name} AS ENUM ({labels});\nEXCEPTION WHEN duplicate_object THEN NULL;\nEND $$"
    )
}

fn enum_statements() -> Vec<String> {
    let platforms: Vec<_> = Platform::ALL.iter().map(|p| p.as_str()).collect();
    let genres: Vec<_> = Genre::ALL.iter().map(|g| g.as_str()).collect();
    let editor_types: Vec<_> = EditorType::ALL.iter().map(|t| t.as_str()).collect();

    vec![
        create_enum("platform_enum", &platforms),
        create_enum("genre_enum", &genres),
        create_enum("editor_type_enum", &editor_types),
    ]
}

const EDITOR_TABLE: &str = "CREATE TABLE IF NOT EXISTS editor (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    password TEXT NOT NULL,
    editor_type editor_type_enum NOT NULL,
    description TEXT NOT NULL
)";

const GAME_PLATFORM_TABLE: &str = "CREATE TABLE IF NOT EXISTS game_platform (
    game_id UUID NOT NULL REFERENCES game(id),
    platform platform_enum NOT NULL,
    PRIMARY KEY (game_id, platform)
)";

const GAME_GENRE_TABLE: &str = "CREATE TABLE IF NOT EXISTS game_genre (
    game_id UUID NOT NULL REFERENCES game(id),
    genre genre_enum NOT NULL,
    PRIMARY KEY (game_id, genre)
)";

/// `CREATE TABLE` statement for one editor-database table.
pub fn editor_table_ddl(table: EditorTable) -> &'static str {
    match table {
        EditorTable::Editor => EDITOR_TABLE,
        EditorTable::Game => {
            "CREATE TABLE IF NOT EXISTS game (
    id UUID PRIMARY KEY,
    editor_id UUID NOT NULL REFERENCES editor(id),
    name TEXT NOT NULL,
    price DOUBLE PRECISION NOT NULL,
    version DOUBLE PRECISION NOT NULL,
    published BOOLEAN NOT NULL DEFAULT FALSE
)"
        }
        EditorTable::GamePlatform => GAME_PLATFORM_TABLE,
        EditorTable::GameGenre => GAME_GENRE_TABLE,
        EditorTable::Dlc => {
            "CREATE TABLE IF NOT EXISTS dlc (
    id UUID PRIMARY KEY,
    game_id UUID NOT NULL REFERENCES game(id),
    editor_id UUID NOT NULL REFERENCES editor(id),
    name TEXT NOT NULL,
    price DOUBLE PRECISION NOT NULL,
    version DOUBLE PRECISION NOT NULL,
    published BOOLEAN NOT NULL DEFAULT FALSE
)"
        }
        EditorTable::Patch => {
            "CREATE TABLE IF NOT EXISTS patch (
    id UUID PRIMARY KEY,
    is_patch_of_game BOOLEAN NOT NULL,
    game_id UUID NOT NULL REFERENCES game(id),
    platform platform_enum NOT NULL,
    old_version DOUBLE PRECISION NOT NULL,
    new_version DOUBLE PRECISION NOT NULL,
    comment TEXT NOT NULL,
    modifications TEXT NOT NULL,
    published BOOLEAN NOT NULL DEFAULT FALSE
)"
        }
        EditorTable::BugReport => {
            "CREATE TABLE IF NOT EXISTS bug_report (
    id UUID PRIMARY KEY,
    game_id UUID NOT NULL REFERENCES game(id),
    patch_id UUID REFERENCES patch(id),
    description TEXT NOT NULL,
    platform platform_enum NOT NULL
)"
        }
        EditorTable::Evaluation => {
            "CREATE TABLE IF NOT EXISTS evaluation (
    id UUID PRIMARY KEY,
    game_id UUID NOT NULL REFERENCES game(id),
    description TEXT NOT NULL,
    platform platform_enum NOT NULL,
    rating INTEGER NOT NULL CHECK (rating BETWEEN 0 AND 10)
)"
        }
    }
}

/// `CREATE TABLE` statement for one platform-database table.
pub fn platform_table_ddl(table: PlatformTable) -> &'static str {
    match table {
        PlatformTable::Editor => EDITOR_TABLE,
        PlatformTable::Game => {
            "CREATE TABLE IF NOT EXISTS game (
    id UUID PRIMARY KEY,
    editor_id UUID NOT NULL REFERENCES editor(id),
    name TEXT NOT NULL,
    price DOUBLE PRECISION NOT NULL,
    version DOUBLE PRECISION NOT NULL
)"
        }
        PlatformTable::GamePlatform => GAME_PLATFORM_TABLE,
        PlatformTable::GameGenre => GAME_GENRE_TABLE,
        PlatformTable::Dlc => {
            "CREATE TABLE IF NOT EXISTS dlc (
    id UUID PRIMARY KEY,
    game_id UUID NOT NULL REFERENCES game(id),
    editor_id UUID NOT NULL REFERENCES editor(id),
    name TEXT NOT NULL,
    price DOUBLE PRECISION NOT NULL,
    version DOUBLE PRECISION NOT NULL
)"
        }
        PlatformTable::Patch => {
            "CREATE TABLE IF NOT EXISTS patch (
    id UUID PRIMARY KEY,
    is_patch_of_game BOOLEAN NOT NULL,
    game_id UUID NOT NULL REFERENCES game(id),
    platform platform_enum NOT NULL,
    old_version DOUBLE PRECISION NOT NULL,
    new_version DOUBLE PRECISION NOT NULL,
    description TEXT NOT NULL
)"
        }
    }
}

/// Statements creating the whole schema of `kind`, enums first.
pub fn create_schema_statements(kind: SchemaKind) -> Vec<String> {
    let mut statements = enum_statements();
    match kind {
        SchemaKind::Editor => statements.extend(
            EditorTable::ALL
                .iter()
                .rev()
                .map(|t| editor_table_ddl(*t).to_string()),
        ),
        SchemaKind::Platform => statements.extend(
            PlatformTable::ALL
                .iter()
                .rev()
                .map(|t| platform_table_ddl(*t).to_string()),
        ),
    }
    statements
}

/// Statements dropping the whole schema of `kind`, tables before enums.
pub fn drop_schema_statements(kind: SchemaKind) -> Vec<String> {
    let tables: Vec<&str> = match kind {
        SchemaKind::Editor => EditorTable::ALL.iter().map(|t| t.as_str()).collect(),
        SchemaKind::Platform => PlatformTable::ALL.iter().map(|t| t.as_str()).collect(),
    };

    let mut statements: Vec<String> = tables
        .iter()
        .map(|t| format!("DROP TABLE IF EXISTS {t} CASCADE"))
        .collect();
    for name in ["platform_enum", "genre_enum", "editor_type_enum"] {
        statements.push(format!("DROP TYPE IF EXISTS {name}"));
    }
    statements
}

/// Create the schema of `kind`, dropping it first when `recreate` is set.
pub async fn init_schema(
    client: &Client,
    kind: SchemaKind,
    recreate: bool,
) -> Result<(), PostgresStoreError> {
    if recreate {
        info!("Dropping {} schema", kind.as_str());
        for sql in drop_schema_statements(kind) {
            debug!("DDL: {}", sql);
            client.batch_execute(&sql).await?;
        }
    }

    info!("Creating {} schema", kind.as_str());
    for sql in create_schema_statements(kind) {
        debug!("DDL: {}", sql);
        client.batch_execute(&sql).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(statements: &[String], needle: &str) -> usize {
        statements
            .iter()
            .position(|s| s.contains(needle))
            .unwrap_or_else(|| panic!("no statement contains '{needle}'"))
    }

    #[test]
    fn test_enum_labels_follow_core_types() {
        let statements = create_schema_statements(SchemaKind::Editor);
        assert!(statements[0].contains("CREATE TYPE platform_enum AS ENUM ('PC', 'XBOX', 'PS5', 'SWITCH')"));
        assert!(statements[1].contains("('ACTION', 'RPG', 'STRATEGY', 'SPORTS')"));
        assert!(statements[2].contains("('enterprise', 'individual')"));
    }

    #[test]
    fn test_editor_tables_created_parents_first() {
        let statements = create_schema_statements(SchemaKind::Editor);
        assert_eq!(statements.len(), 3 + 8);
        assert!(position(&statements, "TABLE IF NOT EXISTS editor") < position(&statements, "TABLE IF NOT EXISTS game ("));
        assert!(position(&statements, "TABLE IF NOT EXISTS game (") < position(&statements, "TABLE IF NOT EXISTS dlc"));
        assert!(position(&statements, "TABLE IF NOT EXISTS patch") < position(&statements, "TABLE IF NOT EXISTS bug_report"));
    }

    #[test]
    fn test_platform_schema_has_no_publish_flag() {
        let statements = create_schema_statements(SchemaKind::Platform);
        assert_eq!(statements.len(), 3 + 6);
        assert!(statements.iter().all(|s| !s.contains("published")));
        assert!(statements.iter().all(|s| !s.contains("bug_report")));
        let patch = &statements[position(&statements, "TABLE IF NOT EXISTS patch")];
        assert!(patch.contains("description TEXT"));
        assert!(!patch.contains("comment"));
    }

    #[test]
    fn test_drop_children_first() {
        let statements = drop_schema_statements(SchemaKind::Editor);
        assert_eq!(statements[0], "DROP TABLE IF EXISTS evaluation CASCADE");
        assert!(position(&statements, "EXISTS game ") < position(&statements, "EXISTS editor "));
        assert_eq!(statements.last().map(String::as_str), Some("DROP TYPE IF EXISTS editor_type_enum"));
    }
}
