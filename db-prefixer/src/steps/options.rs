use super::{OPTION_NAME_COLUMN, OPTIONS_TABLE, USER_ROLES_OPTION};
use crate::connectors::DatabaseConnector;
use crate::{Error, Prefixer};
use tracing::{info, warn};

impl<DB: DatabaseConnector> Prefixer<'_, DB> {
    /// Renames the `user_roles` option, whose name embeds the table prefix.
    ///
    /// Must run after [`Prefixer::rename_tables`], the options table is addressed by its new name.
    /// Finding no such row is not an error; the returned count is then 0.
    #[tracing::instrument(skip(self), fields(old_prefix = self.old_prefix, new_prefix = self.new_prefix))]
    pub async fn fix_options_table(&self) -> Result<u64, Error> {
        let table = format!("{}{OPTIONS_TABLE}", self.new_prefix);
        let old_name = format!("{}{USER_ROLES_OPTION}", self.old_prefix);
        let new_name = format!("{}{USER_ROLES_OPTION}", self.new_prefix);

        let updated = self
            .db
            .update_single(&table, OPTION_NAME_COLUMN, &new_name, &old_name)
            .await
            .map_err(|err| Error::Update {
                table: table.clone(),
                key: old_name.clone(),
                reason: err.to_string(),
            })?;

        if updated == 0 {
            warn!(table, option = old_name, "Option not found, nothing updated");
        } else {
            info!(table, from = old_name, to = new_name, "Renamed option");
        }
        Ok(updated)
    }
}
