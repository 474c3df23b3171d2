//! SQL DDL for the purchase ledger and the registry of tables the inserter
//! is allowed to write to.

/// SQLite schema:
/// - `Customer` and `Item` with auto-assigned integer ids
/// - `Purchase` referencing both through named foreign-key constraints
/// - `decimal` columns have NUMERIC affinity
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS Customer (
    id integer PRIMARY KEY,
    firstname varchar(255),
    lastname varchar(255)
);

CREATE TABLE IF NOT EXISTS Item (
    id integer PRIMARY KEY,
    title varchar(255),
    price decimal
);

CREATE TABLE IF NOT EXISTS Purchase (
    ordernumber integer PRIMARY KEY,
    customerid integer,
    itemid integer,
    price decimal,
    CONSTRAINT customerid
        FOREIGN KEY (customerid) REFERENCES Customer(id),
    CONSTRAINT itemid
        FOREIGN KEY (itemid) REFERENCES Item(id)
);
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Customer,
    Item,
    Purchase,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::Customer, Table::Item, Table::Purchase];

    pub fn name(self) -> &'static str {
        match self {
            Table::Customer => "Customer",
            Table::Item => "Item",
            Table::Purchase => "Purchase",
        }
    }

    /// Column names in declaration order. The first one is the primary key.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Table::Customer => &["id", "firstname", "lastname"],
            Table::Item => &["id", "title", "price"],
            Table::Purchase => &["ordernumber", "customerid", "itemid", "price"],
        }
    }

    pub fn primary_key(self) -> &'static str {
        self.columns()[0]
    }

    /// Case-insensitive lookup, matching how SQLite resolves identifiers.
    pub fn from_name(name: &str) -> Option<Table> {
        Table::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    /// Canonical spelling of `column` if it belongs to this table.
    pub fn column(self, column: &str) -> Option<&'static str> {
        self.columns()
            .iter()
            .copied()
            .find(|c| c.eq_ignore_ascii_case(column))
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
