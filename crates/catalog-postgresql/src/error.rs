//! Error types for the PostgreSQL stores.

use catalog_core::UnknownLabel;
use thiserror::Error;

/// Errors raised by the PostgreSQL editor and platform stores.
#[derive(Error, Debug)]
pub enum PostgresStoreError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// Could not open a connection to a database.
    #[error("Failed to connect to the {database} database: {source}")]
    Connection {
        database: &'static str,
        #[source]
        source: tokio_postgres::Error,
    },

    /// `begin` was called while a transaction was already open.
    #[error("A transaction is already open on the {0} database")]
    TransactionAlreadyOpen(&'static str),

    /// An enum column held a label this crate does not know.
    #[error("Unexpected value in column '{column}': {source}")]
    Decode {
        column: &'static str,
        #[source]
        source: UnknownLabel,
    },
}
