//! Database module: schema, values, connection and the ledger operations.
//!
//! Layout:
//! - `schema.rs`: SQL DDL and the registry of writable tables
//! - `value.rs`: scalar values, rows and batches
//! - `sqlite.rs`: connection acquisition and schema bootstrap
//! - `inserter.rs`: generic parameterized insert
//! - `models.rs`: typed rows returned by the fixed queries
//! - `reports.rs`: aggregation queries and read-back helpers

pub mod inserter;
pub mod models;
pub mod reports;
pub mod schema;
pub mod sqlite;
pub mod value;

pub use inserter::{build_insert_statement, insert, insert_batch, insert_one};
pub use schema::{SQLITE_INIT, Table};
pub use sqlite::{connect, init_schema, table_names};
pub use value::{Row, Rows, SqlValue};
