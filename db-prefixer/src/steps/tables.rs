use crate::connectors::DatabaseConnector;
use crate::{Error, Prefixer};
use tracing::{debug, info};

impl<DB: DatabaseConnector> Prefixer<'_, DB> {
    /// Renames every table whose name starts with the old prefix.
    ///
    /// Stops at the first rename the database rejects; tables renamed before it stay renamed.
    ///
    /// # Returns
    ///
    /// * `Result<usize, Error>` - How many tables were renamed
    #[tracing::instrument(skip(self), fields(old_prefix = self.old_prefix, new_prefix = self.new_prefix))]
    pub async fn rename_tables(&self) -> Result<usize, Error> {
        let pattern = format!("{}%", self.db.escape_like(self.old_prefix));
        let tables = self
            .db
            .list_tables(&pattern)
            .await
            .map_err(|err| Error::Discovery {
                pattern: pattern.clone(),
                reason: err.to_string(),
            })?;

        // LIKE may match case-insensitively, only exact prefixes are renamed
        let suffixes: Vec<&str> = tables
            .iter()
            .filter_map(|table| {
                let suffix = table.strip_prefix(self.old_prefix);
                if suffix.is_none() {
                    debug!(table, "Skipping table without exact prefix");
                }
                suffix
            })
            .collect();

        if suffixes.is_empty() {
            if self.allow_empty {
                info!(pattern, "No tables to rename");
                return Ok(0);
            }
            return Err(Error::Discovery {
                pattern,
                reason: "no tables found".to_string(),
            });
        }

        for suffix in &suffixes {
            let from = format!("{}{suffix}", self.old_prefix);
            let to = format!("{}{suffix}", self.new_prefix);
            self.db
                .rename_table(&from, &to)
                .await
                .map_err(|err| Error::Rename {
                    table: from.clone(),
                    new_name: to.clone(),
                    reason: err.to_string(),
                })?;
            debug!(from, to, "Renamed table");
        }

        info!(count = suffixes.len(), "Renamed tables");
        Ok(suffixes.len())
    }
}
