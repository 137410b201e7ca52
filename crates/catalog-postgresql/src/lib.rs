//! PostgreSQL backends for the catalog loader.
//!
//! - [`PostgresEditorStore`] implements [`catalog_core::EditorStore`] on the
//!   editor database
//! - [`PostgresPlatformStore`] implements [`catalog_core::PlatformStore`] on
//!   the platform database
//! - [`ddl`] creates and drops both schemas
//!
//! Each store owns one `tokio_postgres::Client`. The connection driver runs
//! on a spawned task; every statement is awaited before the next is sent.

pub mod args;
pub mod connect;
pub mod ddl;
pub mod editor_store;
pub mod error;
pub mod platform_store;

pub use args::DatabaseArgs;
pub use connect::{connect, redact};
pub use ddl::{init_schema, SchemaKind};
pub use editor_store::PostgresEditorStore;
pub use error::PostgresStoreError;
pub use platform_store::PostgresPlatformStore;
