//! Database connectivity for the prefix migration.
//!
//! The migration steps never talk to a driver directly. Everything they need from
//! the database is expressed by the [`DatabaseConnector`] trait:
//! - escaping a literal for use inside a `LIKE` pattern
//! - listing tables by pattern
//! - renaming a table
//! - reading one column of a table
//! - updating a single row by value
//!
//! A concrete implementation over SeaORM's MySQL driver lives in the `mysql` submodule.

use mockall::automock;
use thiserror::Error;

pub mod mysql;

/// Errors reported by a database connector.
///
/// Each variant carries the driver's own error text so callers can surface it verbatim.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// The statement was rejected or failed while executing
    #[error("MySQL error: {0}")]
    Query(String),
    /// A row came back in a shape the connector did not expect
    #[error("Cannot decode row: {0}")]
    Decode(String),
}

/// Trait for abstracting the statements the prefix migration issues.
#[automock]
pub trait DatabaseConnector {
    /// Escapes `literal` so that none of its characters act as `LIKE` wildcards.
    fn escape_like(&self, literal: &str) -> String;

    /// Lists the names of the tables in the current schema matching a `LIKE` pattern.
    ///
    /// # Arguments
    ///
    /// * `pattern` - The already escaped pattern, wildcards included
    async fn list_tables(&self, pattern: &str) -> Result<Vec<String>, Error>;

    /// Renames table `from` to `to`.
    async fn rename_table<'connector, 'name>(
        &'connector self,
        from: &'name str,
        to: &'name str,
    ) -> Result<(), Error>;

    /// Reads every value of `column` in `table`, `None` standing for SQL `NULL`.
    async fn fetch_column<'connector, 'name>(
        &'connector self,
        table: &'name str,
        column: &'name str,
    ) -> Result<Vec<Option<String>>, Error>;

    /// Sets `column` to `new_value` on at most one row of `table` where it equals `old_value`.
    ///
    /// # Returns
    ///
    /// * `Result<u64, Error>` - The number of rows affected, or the driver error
    async fn update_single<'connector, 'name, 'value>(
        &'connector self,
        table: &'name str,
        column: &'name str,
        new_value: &'value str,
        old_value: &'value str,
    ) -> Result<u64, Error>;
}
