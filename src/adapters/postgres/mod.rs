//! PostgreSQL adapters: implementations of the persistence ports.

mod access_checker;
mod location_store;
mod message_repository;
mod plan_provider;
mod session_reader;
mod session_repository;
mod summary_repository;

pub use access_checker::PostgresAccessChecker;
pub use location_store::PostgresLocationStore;
pub use message_repository::PostgresMessageRepository;
pub use plan_provider::PostgresPlanProvider;
pub use session_reader::PostgresSessionReader;
pub use session_repository::PostgresSessionRepository;
pub use summary_repository::PostgresSummaryRepository;

use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Maps a sqlx error into a DatabaseError with context.
pub(crate) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

/// Decodes one column, mapping decode failures to DatabaseError.
pub(crate) fn get_column<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", column, e),
        )
    })
}
