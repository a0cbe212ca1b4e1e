use keyward_core::{AppError, AppResult, NonEmptyString, PageRequest};
use tracing::warn;

/// Translates a failed write into the application error taxonomy.
///
/// Unique violations become `Conflict`, foreign-key violations become `NotFound`.
pub(crate) fn map_write_error(error: sqlx::Error, action: &str) -> AppError {
    if let sqlx::Error::Database(database_error) = &error {
        let constraint = database_error.constraint().unwrap_or("unknown").to_owned();
        match database_error.code().as_deref() {
            Some("23505") => {
                warn!(%constraint, "unique violation while trying to {action}");
                return AppError::Conflict(format!(
                    "failed to {action}: duplicate value violates '{constraint}'"
                ));
            }
            Some("23503") => {
                warn!(%constraint, "foreign key violation while trying to {action}");
                return AppError::NotFound(format!(
                    "failed to {action}: referenced record does not exist ('{constraint}')"
                ));
            }
            _ => {}
        }
    }

    AppError::Internal(format!("failed to {action}: {error}"))
}

/// Wraps a read failure.
pub(crate) fn map_read_error(error: sqlx::Error, action: &str) -> AppError {
    AppError::Internal(format!("failed to {action}: {error}"))
}

/// Rebuilds a validated string from a stored column.
pub(crate) fn stored_text(column: &str, value: String) -> AppResult<NonEmptyString> {
    NonEmptyString::new(value)
        .map_err(|_| AppError::Internal(format!("stored column '{column}' is empty")))
}

/// Converts page bounds to `OFFSET`/`LIMIT` parameters.
pub(crate) fn page_bounds(page: PageRequest) -> (i64, i64) {
    (
        i64::try_from(page.skip()).unwrap_or(i64::MAX),
        i64::try_from(page.limit()).unwrap_or(i64::MAX),
    )
}
