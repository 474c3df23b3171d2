use sqlx::error::{DatabaseError, ErrorKind};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ShopError {
    #[error("connection error: {0}")]
    ConnectionError(String),

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),
}

impl ShopError {
    pub fn schema_mismatch(msg: impl Into<String>) -> Self {
        ShopError::SchemaMismatch(msg.into())
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, ShopError::ConstraintViolation(_))
    }

    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, ShopError::SchemaMismatch(_))
    }

    pub fn is_connection_error(&self) -> bool {
        matches!(self, ShopError::ConnectionError(_))
    }

    fn from_database(db_err: &dyn DatabaseError) -> Option<Self> {
        let message = db_err.message().to_string();
        match db_err.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => return Some(ShopError::ConstraintViolation(message)),
            _ => {}
        }

        // SQLITE_CONSTRAINT family without a more specific extended code.
        let code = db_err.code();
        if code.as_deref() == Some("19") || message.contains("constraint failed") {
            return Some(ShopError::ConstraintViolation(message));
        }
        if is_missing_identifier(&message) {
            return Some(ShopError::SchemaMismatch(message));
        }
        None
    }
}

fn is_missing_identifier(message: &str) -> bool {
    message.contains("no such table")
        || message.contains("no such column")
        || message.contains("has no column named")
}

impl From<sqlx::Error> for ShopError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if let Some(classified) = ShopError::from_database(db_err.as_ref()) {
                return classified;
            }
        }
        match e {
            sqlx::Error::Io(io) => ShopError::ConnectionError(io.to_string()),
            sqlx::Error::Tls(tls) => ShopError::ConnectionError(tls.to_string()),
            sqlx::Error::PoolClosed => {
                ShopError::ConnectionError("connection pool is closed".to_string())
            }
            sqlx::Error::PoolTimedOut => {
                ShopError::ConnectionError("timed out acquiring a connection".to_string())
            }
            sqlx::Error::WorkerCrashed => {
                ShopError::ConnectionError("database worker thread crashed".to_string())
            }
            other => ShopError::Database(other),
        }
    }
}
