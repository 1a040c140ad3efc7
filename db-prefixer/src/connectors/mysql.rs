use super::{DatabaseConnector, Error};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, Statement};

pub const LIST_TABLES_SQL: &str = "SELECT CAST(table_name AS CHAR) AS table_name \
    FROM information_schema.tables \
    WHERE table_schema = DATABASE() AND table_name LIKE ? \
    ORDER BY table_name";

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::Type(message) => Error::Decode(message),
            err => Error::Query(err.to_string()),
        }
    }
}

/// Escapes the MySQL `LIKE` metacharacters (`\`, `%` and `_`) with a backslash.
pub fn escape_like(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len());
    for c in literal.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Quotes an identifier with backticks, doubling any backtick it contains.
pub fn quote_identifier(identifier: &str) -> String {
    format!("`{}`", identifier.replace('`', "``"))
}

pub fn rename_table_sql(from: &str, to: &str) -> String {
    format!(
        "RENAME TABLE {} TO {}",
        quote_identifier(from),
        quote_identifier(to)
    )
}

pub fn fetch_column_sql(table: &str, column: &str) -> String {
    format!(
        "SELECT {} FROM {}",
        quote_identifier(column),
        quote_identifier(table)
    )
}

pub fn update_single_sql(table: &str, column: &str) -> String {
    let column = quote_identifier(column);
    format!(
        "UPDATE {} SET {column} = ? WHERE {column} = ? LIMIT 1",
        quote_identifier(table)
    )
}

/// [`DatabaseConnector`] backed by a SeaORM MySQL connection.
pub struct SeaOrmConnector<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SeaOrmConnector<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

impl DatabaseConnector for SeaOrmConnector<'_> {
    fn escape_like(&self, literal: &str) -> String {
        escape_like(literal)
    }

    #[tracing::instrument(skip(self))]
    async fn list_tables(&self, pattern: &str) -> Result<Vec<String>, Error> {
        let statement =
            Statement::from_sql_and_values(DbBackend::MySql, LIST_TABLES_SQL, [pattern.into()]);
        let rows = self.db.query_all(statement).await?;
        rows.iter()
            .map(|row| row.try_get::<String>("", "table_name").map_err(Error::from))
            .collect()
    }

    #[tracing::instrument(skip(self))]
    async fn rename_table<'connector, 'name>(
        &'connector self,
        from: &'name str,
        to: &'name str,
    ) -> Result<(), Error> {
        let statement = Statement::from_string(DbBackend::MySql, rename_table_sql(from, to));
        self.db.execute(statement).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_column<'connector, 'name>(
        &'connector self,
        table: &'name str,
        column: &'name str,
    ) -> Result<Vec<Option<String>>, Error> {
        let statement = Statement::from_string(DbBackend::MySql, fetch_column_sql(table, column));
        let rows = self.db.query_all(statement).await?;
        rows.iter()
            .map(|row| {
                row.try_get::<Option<String>>("", column)
                    .map_err(Error::from)
            })
            .collect()
    }

    #[tracing::instrument(skip(self))]
    async fn update_single<'connector, 'name, 'value>(
        &'connector self,
        table: &'name str,
        column: &'name str,
        new_value: &'value str,
        old_value: &'value str,
    ) -> Result<u64, Error> {
        let statement = Statement::from_sql_and_values(
            DbBackend::MySql,
            update_single_sql(table, column),
            [new_value.into(), old_value.into()],
        );
        let result = self.db.execute(statement).await?;
        Ok(result.rows_affected())
    }
}
