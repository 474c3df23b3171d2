//! Sample customers, items and purchases.

use crate::db::inserter::insert;
use crate::db::schema::Table;
use crate::db::value::Row;
use crate::error::ShopError;
use sqlx::sqlite::SqliteConnection;
use tracing::info;

pub const CUSTOMERS: [(&str, &str); 3] = [("John", "Smith"), ("Amy", "Adams"), ("Jim", "Beam")];

pub const ITEMS: [(&str, f64); 3] = [
    ("MacBook Pro", 3199.99),
    ("MacBook Air", 1188.99),
    ("iPad", 599.99),
];

/// (customerid, itemid, price)
pub const PURCHASES: [(i64, i64, f64); 5] = [
    (1, 1, 3099.99),
    (1, 2, 1202.23),
    (1, 3, 599.99),
    (2, 3, 580.00),
    (3, 2, 1188.99),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub customers: u64,
    pub items: u64,
    pub purchases: u64,
}

/// Insert the sample data set. Customers and items go first so the
/// purchases' foreign keys resolve.
pub async fn seed(conn: &mut SqliteConnection) -> Result<SeedSummary, ShopError> {
    let customers = insert(
        conn,
        Table::Customer.name(),
        &["firstname", "lastname"],
        CUSTOMERS.into_iter().map(Row::from).collect::<Vec<_>>(),
    )
    .await?;

    let items = insert(
        conn,
        Table::Item.name(),
        &["title", "price"],
        ITEMS.into_iter().map(Row::from).collect::<Vec<_>>(),
    )
    .await?;

    let purchases = insert(
        conn,
        Table::Purchase.name(),
        &["customerid", "itemid", "price"],
        PURCHASES.into_iter().map(Row::from).collect::<Vec<_>>(),
    )
    .await?;

    let summary = SeedSummary {
        customers,
        items,
        purchases,
    };
    info!(?summary, "sample data inserted");
    Ok(summary)
}
