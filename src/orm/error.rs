//! Errors raised by the query layer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A single-row fetch matched more than one row
    #[error("query on `{table}` returned more than one row")]
    NonUniqueResult { table: &'static str },
}

pub type QueryResult<T> = Result<T, QueryError>;
