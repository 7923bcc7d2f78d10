//! Shared helpers for Diesel repository implementations.

use tracing::debug;

use super::pool::PoolError;

/// Extract a readable message from a pool error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Build { message } | PoolError::Checkout { message } => message,
    }
}

/// Extract a readable message from a Diesel error and emit debug context.
pub(crate) fn diesel_error_message(error: diesel::result::Error, operation: &str) -> String {
    let message = error.to_string();
    debug!(%message, %operation, "diesel operation failed");
    message
}

/// Collect row conversions, mapping the first failure through `map_err`.
pub(crate) fn collect_rows<T, E>(
    results: impl Iterator<Item = Result<T, String>>,
    map_err: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    results.collect::<Result<Vec<_>, _>>().map_err(map_err)
}
