#![allow(dead_code)] // each test binary uses a different subset

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, MockExecResult, Statement, Value};
use std::collections::BTreeMap;
use testcontainers_modules::testcontainers::runners::AsyncRunner;
use testcontainers_modules::{mysql, testcontainers};

pub fn table_row(name: &str) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("table_name", Value::from(name))])
}

pub fn meta_row(key: Option<&str>) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("meta_key", Value::from(key.map(str::to_string)))])
}

pub fn affected(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

pub async fn setup_container() -> anyhow::Result<testcontainers::ContainerAsync<mysql::Mysql>> {
    let container = mysql::Mysql::default().start().await?;
    Ok(container)
}

pub async fn setup_db(
    container: &testcontainers::ContainerAsync<mysql::Mysql>,
) -> anyhow::Result<DatabaseConnection> {
    let host = container.get_host().await?;
    let port = container.get_host_port_ipv4(3306).await?;
    let db_url = format!("mysql://root@{}:{}/test", host, port);
    let db = Database::connect(&db_url).await?;
    Ok(db)
}

/// Creates a minimal WordPress schema under `prefix`.
pub async fn create_wordpress_schema(db: &DatabaseConnection, prefix: &str) -> anyhow::Result<()> {
    db.execute_unprepared(&format!(
        "CREATE TABLE `{prefix}posts` (
            ID BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
            post_title TEXT NOT NULL
        )"
    ))
    .await?;
    db.execute_unprepared(&format!(
        "CREATE TABLE `{prefix}options` (
            option_id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
            option_name VARCHAR(191) NOT NULL DEFAULT '' UNIQUE,
            option_value LONGTEXT NOT NULL
        )"
    ))
    .await?;
    db.execute_unprepared(&format!(
        "CREATE TABLE `{prefix}usermeta` (
            umeta_id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
            user_id BIGINT UNSIGNED NOT NULL DEFAULT 0,
            meta_key VARCHAR(255) DEFAULT NULL,
            meta_value LONGTEXT
        )"
    ))
    .await?;
    Ok(())
}

pub async fn table_names(db: &DatabaseConnection) -> anyhow::Result<Vec<String>> {
    let rows = db
        .query_all(Statement::from_string(
            db.get_database_backend(),
            "SELECT CAST(table_name AS CHAR) AS table_name FROM information_schema.tables \
             WHERE table_schema = DATABASE() ORDER BY table_name",
        ))
        .await?;
    Ok(rows
        .iter()
        .map(|row| row.try_get::<String>("", "table_name"))
        .collect::<Result<_, _>>()?)
}

pub async fn column_values(
    db: &DatabaseConnection,
    table: &str,
    column: &str,
    order_by: &str,
) -> anyhow::Result<Vec<Option<String>>> {
    let rows = db
        .query_all(Statement::from_string(
            db.get_database_backend(),
            format!("SELECT `{column}` FROM `{table}` ORDER BY `{order_by}`"),
        ))
        .await?;
    Ok(rows
        .iter()
        .map(|row| row.try_get::<Option<String>>("", column))
        .collect::<Result<_, _>>()?)
}
