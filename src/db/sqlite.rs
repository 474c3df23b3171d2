use crate::db::schema::SQLITE_INIT;
use crate::error::ShopError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Row};
use std::str::FromStr;
use tracing::{debug, info};

/// Open a single connection. `sqlite::memory:` gives a private database that
/// lives exactly as long as the returned handle.
pub async fn connect(database_url: &str) -> Result<SqliteConnection, ShopError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let conn = connect_opts.connect().await?;
    info!(database_url = %database_url, "connection established");
    Ok(conn)
}

/// Initialize the schema by executing the bundled DDL. Safe to call repeatedly.
pub async fn init_schema(conn: &mut SqliteConnection) -> Result<(), ShopError> {
    // sqlx::query runs a single statement, so split the script
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(&mut *conn).await?;
    }
    debug!("schema initialized");
    Ok(())
}

/// User tables currently defined, sorted by name.
pub async fn table_names(conn: &mut SqliteConnection) -> Result<Vec<String>, ShopError> {
    let rows = sqlx::query(
        r#"SELECT name FROM sqlite_master
           WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
           ORDER BY name"#,
    )
    .fetch_all(&mut *conn)
    .await?;
    rows.iter()
        .map(|row| row.try_get::<String, _>("name").map_err(ShopError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bootstrap_is_idempotent() {
        let mut conn = connect("sqlite::memory:").await.unwrap();
        init_schema(&mut conn).await.unwrap();
        init_schema(&mut conn).await.unwrap();

        let names = table_names(&mut conn).await.unwrap();
        assert_eq!(names, vec!["Customer", "Item", "Purchase"]);
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let mut conn = connect("sqlite::memory:").await.unwrap();
        let (enabled,): (i64,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&mut conn)
            .await
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
