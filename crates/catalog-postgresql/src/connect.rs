//! Connection setup shared by both stores.

use crate::error::PostgresStoreError;
use anyhow::{Context, Result};
use tokio_postgres::{Client, NoTls};
use tracing::{debug, error, info};

/// Open a connection and verify it with `SELECT 1`.
///
/// `database` names the connection in logs and errors ("editor" or
/// "platform").
pub async fn connect(
    connection_string: &str,
    database: &'static str,
) -> Result<Client, PostgresStoreError> {
    let (client, connection) = tokio_postgres::connect(connection_string, NoTls)
        .await
        .map_err(|source| PostgresStoreError::Connection { database, source })?;

    // Spawn the connection task
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            error!("PostgreSQL connection error ({database}): {e}");
        }
    });

    client
        .simple_query("SELECT 1")
        .await
        .map_err(|source| PostgresStoreError::Connection { database, source })?;

    info!("Connected to {database} database at {}", redact(connection_string));
    Ok(client)
}

/// Replace the password in a key/value or URL connection string.
pub fn redact(connection_string: &str) -> String {
    if let Some((scheme, rest)) = connection_string.split_once("://") {
        if let Some((credentials, host)) = rest.rsplit_once('@') {
            if let Some((user, _)) = credentials.split_once(':') {
                return format!("{scheme}://{user}:***@{host}");
            }
        }
        return connection_string.to_string();
    }

    connection_string
        .split_whitespace()
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if key == "password" => "password=***".to_string(),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One client plus the transaction state the stores track on top of it.
pub(crate) struct Session {
    client: Client,
    database: &'static str,
    in_transaction: bool,
}

impl Session {
    pub(crate) fn new(client: Client, database: &'static str) -> Self {
        Self {
            client,
            database,
            in_transaction: false,
        }
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn in_transaction(&self) -> bool {
        self.in_transaction
    }

    pub(crate) async fn begin(&mut self) -> Result<()> {
        if self.in_transaction {
            return Err(PostgresStoreError::TransactionAlreadyOpen(self.database).into());
        }
        self.client
            .batch_execute("BEGIN")
            .await
            .with_context(|| format!("Failed to begin {} transaction", self.database))?;
        self.in_transaction = true;
        debug!("Began {} transaction", self.database);
        Ok(())
    }

    pub(crate) async fn commit(&mut self) -> Result<()> {
        if !self.in_transaction {
            return Ok(());
        }
        self.client
            .batch_execute("COMMIT")
            .await
            .with_context(|| format!("Failed to commit {} transaction", self.database))?;
        self.in_transaction = false;
        debug!("Committed {} transaction", self.database);
        Ok(())
    }

    pub(crate) async fn rollback(&mut self) -> Result<()> {
        if !self.in_transaction {
            return Ok(());
        }
        // The transaction is over even if ROLLBACK itself fails.
        self.in_transaction = false;
        self.client
            .batch_execute("ROLLBACK")
            .await
            .with_context(|| format!("Failed to roll back {} transaction", self.database))?;
        debug!("Rolled back {} transaction", self.database);
        Ok(())
    }

    /// Truncate `tables` in one statement.
    pub(crate) async fn truncate(&mut self, tables: &[&str]) -> Result<()> {
        let sql = format!("TRUNCATE TABLE {} CASCADE", tables.join(", "));
        info!("Clearing {} tables: {}", self.database, tables.join(", "));
        self.client
            .batch_execute(&sql)
            .await
            .with_context(|| format!("Failed to clear {} tables", self.database))?;
        Ok(())
    }

    pub(crate) async fn count(&self, table: &str) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let row = self
            .client
            .query_one(&sql, &[])
            .await
            .with_context(|| format!("Failed to count rows of {} table '{table}'", self.database))?;
        let count: i64 = row.get(0);
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_key_value() {
        assert_eq!(
            redact("host=localhost user=user password=secret dbname=editor_db"),
            "host=localhost user=user password=*** dbname=editor_db"
        );
    }

    #[test]
    fn test_redact_url() {
        assert_eq!(
            redact("postgresql://user:secret@db:5432/platform_db"),
            "postgresql://user:***@db:5432/platform_db"
        );
        assert_eq!(
            redact("postgresql://db:5432/platform_db"),
            "postgresql://db:5432/platform_db"
        );
    }

    #[test]
    fn test_redact_without_password() {
        assert_eq!(redact("host=localhost dbname=x"), "host=localhost dbname=x");
    }
}
