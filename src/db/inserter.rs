//! Generic, validated, parameterized INSERT.
//!
//! Identifiers come from the [`Table`] registry, never from the caller's
//! strings, and values are only ever bound to placeholders. Every call runs in
//! one transaction: either all rows become visible or none do.

use crate::db::schema::Table;
use crate::db::value::{Row, Rows};
use crate::error::ShopError;
use sqlx::Connection;
use sqlx::sqlite::SqliteConnection;
use tracing::{debug, warn};

/// Insert one row or a batch into `table`. Returns the number of rows written.
pub async fn insert(
    conn: &mut SqliteConnection,
    table: &str,
    columns: &[&str],
    rows: impl Into<Rows>,
) -> Result<u64, ShopError> {
    match rows.into() {
        Rows::One(row) => insert_one(conn, table, columns, &row).await,
        Rows::Batch(rows) => insert_batch(conn, table, columns, &rows).await,
    }
}

pub async fn insert_one(
    conn: &mut SqliteConnection,
    table: &str,
    columns: &[&str],
    row: &Row,
) -> Result<u64, ShopError> {
    insert_batch(conn, table, columns, std::slice::from_ref(row)).await
}

/// Insert `rows` in order inside a single transaction.
pub async fn insert_batch(
    conn: &mut SqliteConnection,
    table: &str,
    columns: &[&str],
    rows: &[Row],
) -> Result<u64, ShopError> {
    let (table, canonical) = resolve_columns(table, columns)?;
    check_row_shapes(canonical.len(), rows)?;
    if rows.is_empty() {
        return Ok(0);
    }

    let statement = build_insert_statement(table, &canonical);
    debug!(%statement, rows = rows.len(), "inserting");

    write_rows(conn, &statement, rows).await.inspect_err(|e| {
        warn!(%table, error = %e, "insert rolled back");
    })
}

async fn write_rows(
    conn: &mut SqliteConnection,
    statement: &str,
    rows: &[Row],
) -> Result<u64, ShopError> {
    // dropping an uncommitted transaction rolls it back
    let mut tx = conn.begin().await?;
    let mut written = 0;
    for row in rows {
        let query = row
            .values()
            .iter()
            .fold(sqlx::query(statement), |q, value| value.bind_to(q));
        written += query.execute(&mut *tx).await?.rows_affected();
    }
    tx.commit().await?;
    Ok(written)
}

/// `INSERT INTO <table> (<c1>, <c2>, ...) VALUES (?, ?, ...)`.
pub fn build_insert_statement(table: Table, columns: &[&str]) -> String {
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table.name(),
        columns.join(", "),
        placeholders
    )
}

/// Map caller identifiers onto the registry, rejecting anything unknown.
fn resolve_columns(
    table: &str,
    columns: &[&str],
) -> Result<(Table, Vec<&'static str>), ShopError> {
    let table = Table::from_name(table)
        .ok_or_else(|| ShopError::schema_mismatch(format!("unknown table `{table}`")))?;
    if columns.is_empty() {
        return Err(ShopError::schema_mismatch(format!(
            "no columns given for `{table}`"
        )));
    }

    let mut canonical: Vec<&'static str> = Vec::with_capacity(columns.len());
    for column in columns {
        let name = table.column(column).ok_or_else(|| {
            ShopError::schema_mismatch(format!("table `{table}` has no column `{column}`"))
        })?;
        if canonical.contains(&name) {
            return Err(ShopError::schema_mismatch(format!(
                "column `{name}` listed twice"
            )));
        }
        canonical.push(name);
    }
    Ok((table, canonical))
}

fn check_row_shapes(expected: usize, rows: &[Row]) -> Result<(), ShopError> {
    match rows.iter().position(|row| row.len() != expected) {
        Some(idx) => Err(ShopError::schema_mismatch(format!(
            "row {idx} has {} values, expected {expected}",
            rows[idx].len()
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::reports::{count_rows, fetch_columns};
    use crate::db::sqlite::{connect, init_schema};
    use crate::db::value::SqlValue;

    async fn fresh() -> SqliteConnection {
        let mut conn = connect("sqlite::memory:").await.unwrap();
        init_schema(&mut conn).await.unwrap();
        conn
    }

    #[test]
    fn statement_has_one_placeholder_per_column() {
        let sql = build_insert_statement(Table::Purchase, &["customerid", "itemid", "price"]);
        assert_eq!(
            sql,
            "INSERT INTO Purchase (customerid, itemid, price) VALUES (?, ?, ?)"
        );
    }

    #[test]
    fn identifiers_are_canonicalized() {
        let (table, cols) = resolve_columns("item", &["TITLE", "Price"]).unwrap();
        assert_eq!(table, Table::Item);
        assert_eq!(cols, vec!["title", "price"]);
    }

    #[test]
    fn rejects_unknown_and_duplicate_identifiers() {
        assert!(resolve_columns("Orders", &["id"]).unwrap_err().is_schema_mismatch());
        assert!(resolve_columns("Item", &[]).unwrap_err().is_schema_mismatch());
        assert!(
            resolve_columns("Item", &["title; DROP TABLE Item"])
                .unwrap_err()
                .is_schema_mismatch()
        );
        assert!(
            resolve_columns("Item", &["title", "TITLE"])
                .unwrap_err()
                .is_schema_mismatch()
        );
    }

    #[tokio::test]
    async fn single_row_round_trips() {
        let mut conn = fresh().await;
        let written = insert(
            &mut conn,
            "Item",
            &["title", "price"],
            Row::from(("MacBook Pro", 3199.99)),
        )
        .await
        .unwrap();
        assert_eq!(written, 1);

        let rows = fetch_columns(&mut conn, Table::Item, &["id", "title", "price"])
            .await
            .unwrap();
        assert_eq!(
            rows,
            vec![vec![
                SqlValue::Integer(1),
                SqlValue::Text("MacBook Pro".into()),
                SqlValue::Real(3199.99),
            ]]
        );
    }

    #[tokio::test]
    async fn text_is_bound_not_interpolated() {
        let mut conn = fresh().await;
        let hostile = "Robert'); DROP TABLE Customer; --";
        insert(
            &mut conn,
            "Customer",
            &["firstname", "lastname"],
            Row::from((hostile, "Tables")),
        )
        .await
        .unwrap();

        let rows = fetch_columns(&mut conn, Table::Customer, &["firstname"])
            .await
            .unwrap();
        assert_eq!(rows, vec![vec![SqlValue::Text(hostile.into())]]);
    }

    #[tokio::test]
    async fn wrong_row_length_commits_nothing() {
        let mut conn = fresh().await;
        let rows = vec![
            Row::from(("John", "Smith")),
            Row::from(("Amy",)),
        ];
        let err = insert(&mut conn, "Customer", &["firstname", "lastname"], rows)
            .await
            .unwrap_err();
        assert!(err.is_schema_mismatch(), "{err}");
        assert_eq!(count_rows(&mut conn, Table::Customer).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn empty_batch_is_a_no_op() {
        let mut conn = fresh().await;
        let written = insert(&mut conn, "Customer", &["firstname"], Vec::<Row>::new())
            .await
            .unwrap();
        assert_eq!(written, 0);
        assert_eq!(count_rows(&mut conn, Table::Customer).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_primary_key_is_a_constraint_violation() {
        let mut conn = fresh().await;
        insert(&mut conn, "Customer", &["id", "firstname"], Row::from((7, "Amy")))
            .await
            .unwrap();
        let err = insert(&mut conn, "Customer", &["id", "firstname"], Row::from((7, "Jim")))
            .await
            .unwrap_err();
        assert!(err.is_constraint_violation(), "{err}");
        assert_eq!(count_rows(&mut conn, Table::Customer).await.unwrap(), 1);
    }
}
