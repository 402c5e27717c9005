//! Visible row range calculation result

/// Channel rows intersecting the viewport, inclusive on both ends.
///
/// # Invariants
/// - `first <= last`
/// - `last < channel_count` of the data source it was computed for
/// - Every row outside `[first, last]` has no pixel overlap with the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRows {
    /// First visible row (inclusive).
    pub first: usize,
    /// Last visible row (inclusive).
    pub last: usize,
}

impl VisibleRows {
    /// Create a new visible range.
    ///
    /// # Panics
    /// In debug builds, panics if `first > last`.
    pub fn new(first: usize, last: usize) -> Self {
        debug_assert!(first <= last, "first row {first} after last row {last}");
        Self { first, last }
    }

    /// Number of visible rows.
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    /// Always false: a computed range holds at least one row.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over visible row indices.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        self.first..=self.last
    }

    /// Check if a specific row is in range.
    pub fn contains(&self, row: usize) -> bool {
        row >= self.first && row <= self.last
    }
}
