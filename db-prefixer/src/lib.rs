//! Renames the table prefix of a WordPress-style MySQL schema.
//!
//! A run is three steps against one connection, in a fixed order:
//! 1. every table starting with the old prefix is renamed to the new prefix
//! 2. the `<prefix>user_roles` row of the options table is renamed
//! 3. every usermeta key starting with the old prefix is renamed
//!
//! The first failure aborts the run. Statements are not wrapped in a transaction,
//! so a failed run can leave the schema partially migrated; the returned [`Error`]
//! names the table or key where it stopped.

pub mod config;
pub mod connectors;
mod steps;

use connectors::DatabaseConnector;
use std::fmt::{Display, Formatter};
use thiserror::Error;
use tracing::info;

pub use steps::replace_prefix;

/// Errors that abort a prefix migration.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// Listing the tables failed, or nothing matched the old prefix
    #[error("Cannot discover tables matching '{pattern}': {reason}")]
    Discovery { pattern: String, reason: String },
    /// A single table rename failed
    #[error("Cannot rename table '{table}' to '{new_name}': {reason}")]
    Rename {
        table: String,
        new_name: String,
        reason: String,
    },
    /// An option name or meta key could not be updated
    #[error("Cannot update '{key}' in table '{table}': {reason}")]
    Update {
        table: String,
        key: String,
        reason: String,
    },
    /// Listing the meta keys failed, or the table was empty
    #[error("Cannot scan meta keys of table '{table}': {reason}")]
    Scan { table: String, reason: String },
}

/// What a successful run changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub renamed_tables: usize,
    pub options_updated: u64,
    pub meta_keys_updated: usize,
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} tables renamed, {} option rows updated, {} meta keys updated",
            self.renamed_tables, self.options_updated, self.meta_keys_updated
        )
    }
}

/// Runs the migration steps for one `(old_prefix, new_prefix)` pair over a connector.
pub struct Prefixer<'a, DB: DatabaseConnector> {
    pub(crate) db: &'a DB,
    pub(crate) old_prefix: &'a str,
    pub(crate) new_prefix: &'a str,
    pub(crate) allow_empty: bool,
}

impl<'a, DB: DatabaseConnector> Prefixer<'a, DB> {
    pub fn new(db: &'a DB, old_prefix: &'a str, new_prefix: &'a str) -> Self {
        Self {
            db,
            old_prefix,
            new_prefix,
            allow_empty: false,
        }
    }

    /// Treats an empty table discovery or usermeta scan as nothing to do instead of an error.
    pub fn allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    /// Renames the tables, then fixes the options row, then the usermeta keys.
    #[tracing::instrument(skip(self), fields(old_prefix = self.old_prefix, new_prefix = self.new_prefix))]
    pub async fn run(&self) -> Result<Report, Error> {
        let renamed_tables = self.rename_tables().await?;
        if renamed_tables == 0 {
            info!("No tables renamed, skipping options and usermeta");
            return Ok(Report::default());
        }
        let options_updated = self.fix_options_table().await?;
        let meta_keys_updated = self.fix_user_meta().await?;
        Ok(Report {
            renamed_tables,
            options_updated,
            meta_keys_updated,
        })
    }
}

/// Renames every table starting with `old_prefix` so that it starts with `new_prefix`.
pub async fn rename_tables<DB: DatabaseConnector>(
    db: &DB,
    old_prefix: &str,
    new_prefix: &str,
) -> Result<usize, Error> {
    Prefixer::new(db, old_prefix, new_prefix)
        .rename_tables()
        .await
}

/// Renames the `<old_prefix>user_roles` option in the already renamed options table.
pub async fn fix_options_table<DB: DatabaseConnector>(
    db: &DB,
    new_prefix: &str,
    old_prefix: &str,
) -> Result<u64, Error> {
    Prefixer::new(db, old_prefix, new_prefix)
        .fix_options_table()
        .await
}

/// Renames every meta key starting with `old_prefix` in the already renamed usermeta table.
pub async fn fix_user_meta<DB: DatabaseConnector>(
    db: &DB,
    new_prefix: &str,
    old_prefix: &str,
) -> Result<usize, Error> {
    Prefixer::new(db, old_prefix, new_prefix)
        .fix_user_meta()
        .await
}

/// Runs the full migration, failing on an empty discovery or scan.
pub async fn run<DB: DatabaseConnector>(
    db: &DB,
    old_prefix: &str,
    new_prefix: &str,
) -> Result<Report, Error> {
    Prefixer::new(db, old_prefix, new_prefix).run().await
}
