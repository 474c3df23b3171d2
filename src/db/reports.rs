//! Fixed read queries over the ledger.
//!
//! Decimal columns have NUMERIC affinity, so whole prices are stored as
//! integers; aggregates are cast to REAL to decode uniformly as `f64`.

use crate::db::models::{CustomerTotal, ItemAverage, QueryPlanStep, TitledAverage};
use crate::db::schema::Table;
use crate::db::value::SqlValue;
use crate::error::ShopError;
use sqlx::sqlite::SqliteConnection;
use tracing::info;

pub async fn avg_price_by_item_id(
    conn: &mut SqliteConnection,
) -> Result<Vec<ItemAverage>, ShopError> {
    let rows: Vec<ItemAverage> = sqlx::query_as(
        r#"SELECT itemid, CAST(AVG(price) AS REAL) AS avg_price
           FROM Purchase GROUP BY itemid"#,
    )
    .fetch_all(&mut *conn)
    .await?;
    info!(?rows, "average paid price by item id");
    Ok(rows)
}

pub async fn avg_price_by_item_title(
    conn: &mut SqliteConnection,
) -> Result<Vec<TitledAverage>, ShopError> {
    let rows: Vec<TitledAverage> = sqlx::query_as(
        r#"SELECT item.title AS title, CAST(AVG(purchases.price) AS REAL) AS avg_price
           FROM Purchase AS purchases
           INNER JOIN Item AS item ON (item.id = purchases.itemid)
           GROUP BY purchases.itemid"#,
    )
    .fetch_all(&mut *conn)
    .await?;
    info!(?rows, "average paid price by item name");
    Ok(rows)
}

pub async fn sum_price_by_customer(
    conn: &mut SqliteConnection,
) -> Result<Vec<CustomerTotal>, ShopError> {
    let rows: Vec<CustomerTotal> = sqlx::query_as(
        r#"SELECT customer.firstname AS firstname, CAST(SUM(purchases.price) AS REAL) AS total
           FROM Purchase AS purchases
           INNER JOIN Customer AS customer ON (customer.id = purchases.customerid)
           GROUP BY customer.firstname"#,
    )
    .fetch_all(&mut *conn)
    .await?;
    info!(?rows, "sum of purchase prices by customer");
    Ok(rows)
}

/// Query plan for the Purchase/Customer/Item join.
pub async fn explain_purchase_join(
    conn: &mut SqliteConnection,
) -> Result<Vec<QueryPlanStep>, ShopError> {
    let rows: Vec<QueryPlanStep> = sqlx::query_as(
        r#"EXPLAIN QUERY PLAN
           SELECT customer.firstname, item.title, item.price, purchases.price
           FROM Purchase AS purchases
           INNER JOIN Customer AS customer ON (customer.id = purchases.customerid)
           INNER JOIN Item AS item ON (item.id = purchases.itemid)"#,
    )
    .fetch_all(&mut *conn)
    .await?;
    info!(?rows, "explaining query");
    Ok(rows)
}

pub async fn count_rows(conn: &mut SqliteConnection, table: Table) -> Result<i64, ShopError> {
    let sql = format!("SELECT COUNT(*) FROM {}", table.name());
    let (count,): (i64,) = sqlx::query_as(&sql).fetch_one(&mut *conn).await?;
    Ok(count)
}

/// Read `columns` of every row of `table`, ordered by primary key.
pub async fn fetch_columns(
    conn: &mut SqliteConnection,
    table: Table,
    columns: &[&str],
) -> Result<Vec<Vec<SqlValue>>, ShopError> {
    let canonical = columns
        .iter()
        .map(|c| {
            table.column(c).ok_or_else(|| {
                ShopError::schema_mismatch(format!("table `{table}` has no column `{c}`"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if canonical.is_empty() {
        return Err(ShopError::schema_mismatch("no columns to read"));
    }

    let sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        canonical.join(", "),
        table.name(),
        table.primary_key()
    );
    let rows = sqlx::query(&sql).fetch_all(&mut *conn).await?;
    rows.iter()
        .map(|row| {
            (0..canonical.len())
                .map(|idx| SqlValue::from_column(row, idx).map_err(ShopError::from))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect()
}
