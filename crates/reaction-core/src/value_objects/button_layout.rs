//! Button layout - pagination of reaction buttons into rows
//!
//! Entries are placed left to right. A row is closed once it holds at least
//! `row_length` buttons and at least `row_min_length` entries are still
//! unplaced; otherwise it keeps absorbing entries so the last row is never
//! shorter than `row_min_length`.
//!
//! ```text
//! 8 entries, row_length 5, row_min_length 2  =>  [5, 3]
//! 6 entries, row_length 5, row_min_length 2  =>  [6]
//! ```

use crate::error::DomainError;

/// Validated layout parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonLayout {
    /// Target row length; `0` disables pagination
    row_length: usize,
    /// Minimum number of buttons left over for a new row to be started
    row_min_length: usize,
}

impl ButtonLayout {
    /// Default row length
    pub const DEFAULT_ROW_LENGTH: i64 = 5;
    /// Default minimum trailing row length
    pub const DEFAULT_ROW_MIN_LENGTH: i64 = 2;

    /// Create a layout, rejecting parameters that would paginate pathologically.
    ///
    /// `row_length <= 0` means "no pagination" and accepts any minimum.
    pub fn new(row_length: i64, row_min_length: i64) -> Result<Self, DomainError> {
        if row_min_length < 0 {
            return Err(DomainError::InvalidLayout(format!(
                "row minimum length must not be negative (got {row_min_length})"
            )));
        }
        if row_length > 0 && row_min_length > row_length {
            return Err(DomainError::InvalidLayout(format!(
                "row minimum length {row_min_length} exceeds row length {row_length}"
            )));
        }

        Ok(Self {
            row_length: usize::try_from(row_length).unwrap_or(0),
            row_min_length: usize::try_from(row_min_length).unwrap_or(0),
        })
    }

    /// Layout that keeps every button on a single row
    #[must_use]
    pub const fn unpaginated() -> Self {
        Self {
            row_length: 0,
            row_min_length: 0,
        }
    }

    #[inline]
    pub fn row_length(&self) -> usize {
        self.row_length
    }

    #[inline]
    pub fn row_min_length(&self) -> usize {
        self.row_min_length
    }

    /// Check whether pagination is enabled
    #[inline]
    pub fn is_paginated(&self) -> bool {
        self.row_length > 0
    }

    /// Arrange items into rows
    pub fn arrange<T>(&self, items: Vec<T>) -> Vec<Vec<T>> {
        if items.is_empty() {
            return Vec::new();
        }
        if !self.is_paginated() {
            return vec![items];
        }

        let total = items.len();
        let mut rows = Vec::new();
        let mut row = Vec::with_capacity(self.row_length);

        for (i, item) in items.into_iter().enumerate() {
            row.push(item);
            let unplaced = total - (i + 1);
            if row.len() >= self.row_length && unplaced >= self.row_min_length.max(1) {
                rows.push(std::mem::replace(
                    &mut row,
                    Vec::with_capacity(self.row_length),
                ));
            }
        }

        if !row.is_empty() {
            rows.push(row);
        }
        rows
    }
}

impl Default for ButtonLayout {
    fn default() -> Self {
        Self {
            row_length: Self::DEFAULT_ROW_LENGTH as usize,
            row_min_length: Self::DEFAULT_ROW_MIN_LENGTH as usize,
        }
    }
}

/// Arrange items into rows with unvalidated parameters.
///
/// Negative minimums are clamped to zero and a minimum larger than the row
/// length is honored as given.
pub fn arrange<T>(items: Vec<T>, row_length: i64, row_min_length: i64) -> Vec<Vec<T>> {
    ButtonLayout {
        row_length: usize::try_from(row_length).unwrap_or(0),
        row_min_length: usize::try_from(row_min_length).unwrap_or(0),
    }
    .arrange(items)
}
