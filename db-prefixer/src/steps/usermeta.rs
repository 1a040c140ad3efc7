use super::{META_KEY_COLUMN, USERMETA_TABLE, replace_prefix};
use crate::connectors::DatabaseConnector;
use crate::{Error, Prefixer};
use tracing::{debug, info};

impl<DB: DatabaseConnector> Prefixer<'_, DB> {
    /// Renames the usermeta keys that start with the old prefix, such as `wp_capabilities`.
    ///
    /// Must run after [`Prefixer::rename_tables`]. Keys are updated one row at a time by value,
    /// so a second run over already migrated keys finds nothing to do.
    #[tracing::instrument(skip(self), fields(old_prefix = self.old_prefix, new_prefix = self.new_prefix))]
    pub async fn fix_user_meta(&self) -> Result<usize, Error> {
        let table = format!("{}{USERMETA_TABLE}", self.new_prefix);
        let keys = self
            .db
            .fetch_column(&table, META_KEY_COLUMN)
            .await
            .map_err(|err| Error::Scan {
                table: table.clone(),
                reason: err.to_string(),
            })?;

        if keys.is_empty() {
            if self.allow_empty {
                info!(table, "No meta keys to scan");
                return Ok(0);
            }
            return Err(Error::Scan {
                table,
                reason: "no rows found".to_string(),
            });
        }

        let mut updated = 0;
        for key in keys.iter().flatten() {
            let Some(new_key) = replace_prefix(key, self.old_prefix, self.new_prefix) else {
                continue;
            };
            self.db
                .update_single(&table, META_KEY_COLUMN, &new_key, key)
                .await
                .map_err(|err| Error::Update {
                    table: table.clone(),
                    key: key.clone(),
                    reason: err.to_string(),
                })?;
            debug!(from = key, to = new_key, "Renamed meta key");
            updated += 1;
        }

        info!(table, scanned = keys.len(), updated, "Renamed meta keys");
        Ok(updated)
    }
}
