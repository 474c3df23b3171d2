use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::query::Query;
use sqlx::{Row as _, Sqlite, TypeInfo, ValueRef};

/// A scalar that can be bound to a placeholder or read back from a column.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    pub(crate) fn bind_to<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        match self {
            SqlValue::Null => query.bind(None::<i64>),
            SqlValue::Integer(i) => query.bind(*i),
            SqlValue::Real(r) => query.bind(*r),
            SqlValue::Text(s) => query.bind(s.clone()),
        }
    }

    /// Decode column `idx` using the storage class of the stored value.
    pub(crate) fn from_column(row: &SqliteRow, idx: usize) -> Result<Self, sqlx::Error> {
        let raw = row.try_get_raw(idx)?;
        if raw.is_null() {
            return Ok(SqlValue::Null);
        }
        let storage = raw.type_info().name().to_ascii_uppercase();
        let value = match storage.as_str() {
            "INTEGER" | "BOOLEAN" => SqlValue::Integer(row.try_get_unchecked(idx)?),
            "REAL" | "NUMERIC" => SqlValue::Real(row.try_get_unchecked(idx)?),
            _ => SqlValue::Text(row.try_get_unchecked(idx)?),
        };
        Ok(value)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Integer(v.into())
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// Values positionally matching a column list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row(pub Vec<SqlValue>);

impl Row {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.0
    }
}

impl From<Vec<SqlValue>> for Row {
    fn from(values: Vec<SqlValue>) -> Self {
        Row(values)
    }
}

macro_rules! row_from_tuple {
    ($($ty:ident $var:ident),+) => {
        impl<$($ty: Into<SqlValue>),+> From<($($ty,)+)> for Row {
            fn from(($($var,)+): ($($ty,)+)) -> Self {
                Row(vec![$($var.into()),+])
            }
        }
    };
}

row_from_tuple!(A a);
row_from_tuple!(A a, B b);
row_from_tuple!(A a, B b, C c);
row_from_tuple!(A a, B b, C c, D d);

/// Either a single row or an ordered batch written as one unit.
#[derive(Debug, Clone, PartialEq)]
pub enum Rows {
    One(Row),
    Batch(Vec<Row>),
}

impl Rows {
    pub fn as_slice(&self) -> &[Row] {
        match self {
            Rows::One(row) => std::slice::from_ref(row),
            Rows::Batch(rows) => rows,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl From<Row> for Rows {
    fn from(row: Row) -> Self {
        Rows::One(row)
    }
}

impl From<Vec<Row>> for Rows {
    fn from(rows: Vec<Row>) -> Self {
        Rows::Batch(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuples_convert_positionally() {
        let row: Row = ("MacBook Pro", 3199.99).into();
        assert_eq!(
            row.values(),
            &[SqlValue::Text("MacBook Pro".into()), SqlValue::Real(3199.99)]
        );

        let row: Row = (1, 3, None::<f64>).into();
        assert_eq!(
            row.values(),
            &[SqlValue::Integer(1), SqlValue::Integer(3), SqlValue::Null]
        );
    }

    #[test]
    fn single_row_is_a_batch_of_one() {
        let rows: Rows = Row::from(("Amy", "Adams")).into();
        assert_eq!(rows.len(), 1);
        assert!(!rows.is_empty());

        let empty: Rows = Vec::<Row>::new().into();
        assert!(empty.is_empty());
    }
}
