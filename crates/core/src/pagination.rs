use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// Page size used when a caller does not provide one.
pub const DEFAULT_PAGE_LIMIT: u64 = 100;

/// Largest page size a caller may request.
pub const MAX_PAGE_LIMIT: u64 = 1000;

/// Validated `skip`/`limit` bounds for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    skip: u64,
    limit: u64,
}

impl PageRequest {
    /// Builds page bounds, applying defaults and rejecting out-of-range limits.
    pub fn new(skip: Option<u64>, limit: Option<u64>) -> AppResult<Self> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if limit == 0 || limit > MAX_PAGE_LIMIT {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {MAX_PAGE_LIMIT}, got {limit}"
            )));
        }

        Ok(Self {
            skip: skip.unwrap_or(0),
            limit,
        })
    }

    /// Number of rows skipped.
    #[must_use]
    pub fn skip(&self) -> u64 {
        self.skip
    }

    /// Maximum rows returned.
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Applies the bounds to an already ordered sequence.
    #[must_use]
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(usize::try_from(self.skip).unwrap_or(usize::MAX))
            .take(usize::try_from(self.limit).unwrap_or(usize::MAX))
            .collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}
