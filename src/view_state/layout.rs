//! Row-indexed vertical layout of the channel grid.

use super::layout_params::GridGeometry;
use super::types::saturate_i32;
use super::visible_range::VisibleRows;

/// Maps channel row index ↔ canvas y.
///
/// Row `i` occupies `[row_top(i), row_top(i) + row_height)`. The time bar
/// sits above row 0, so `row_top(0)` is `row_margin + time_bar_height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutModel {
    geometry: GridGeometry,
}

impl LayoutModel {
    pub fn new(geometry: GridGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Canvas y of the top edge of a row.
    pub fn row_top(&self, row: usize) -> i32 {
        saturate_i32(self.row_top_signed(row as i64))
    }

    fn row_top_signed(&self, row: i64) -> i64 {
        row * i64::from(self.geometry.row_pitch())
            + i64::from(self.geometry.row_margin)
            + i64::from(self.geometry.time_bar_height)
    }

    /// First row whose extent can reach `scroll_y`. Never negative.
    pub fn first_visible_row(&self, scroll_y: i32) -> usize {
        let g = &self.geometry;
        let position = (scroll_y - g.row_margin - g.time_bar_height) / g.row_pitch().max(1);
        position.max(0) as usize
    }

    /// Last row that can reach the viewport's bottom edge, clamped to the
    /// last channel.
    ///
    /// One extra row is included when the viewport extends past the last
    /// whole row and channels remain, so a partially visible trailing row
    /// is never clipped. `channel_count` must be non-zero.
    pub fn last_visible_row(&self, scroll_y: i32, viewport_height: i32, channel_count: usize) -> usize {
        let g = &self.geometry;
        let last_channel = channel_count.saturating_sub(1);
        let position = (scroll_y + viewport_height + g.time_bar_height - g.row_margin)
            / g.row_pitch().max(1);
        let position = (position.max(0) as usize).min(last_channel);

        let bottom = i64::from(scroll_y) + i64::from(viewport_height);
        if bottom > position as i64 * i64::from(g.row_height) && position < last_channel {
            position + 1
        } else {
            position
        }
    }

    /// Visible rows for a scroll position, or `None` without channels.
    pub fn visible_rows(
        &self,
        scroll_y: i32,
        viewport_height: i32,
        channel_count: usize,
    ) -> Option<VisibleRows> {
        if channel_count == 0 {
            return None;
        }
        let last = self.last_visible_row(scroll_y, viewport_height, channel_count);
        let first = self.first_visible_row(scroll_y).min(last);
        Some(VisibleRows::new(first, last))
    }

    /// Largest vertical scroll offset.
    ///
    /// Measured to the bottom of the second-to-last row, so the last row's
    /// tail is reached only through the viewport's own height. Zero when
    /// the content fits.
    pub fn max_vertical_scroll(&self, channel_count: usize, viewport_height: i32) -> i32 {
        let content_bottom = self.row_top_signed(channel_count as i64 - 2)
            + i64::from(self.geometry.row_height);
        if content_bottom < i64::from(viewport_height) {
            0
        } else {
            saturate_i32(content_bottom - i64::from(viewport_height))
        }
    }

    /// Row under a canvas y, if it names an existing channel.
    pub fn row_at(&self, canvas_y: i32, channel_count: usize) -> Option<usize> {
        let g = &self.geometry;
        let shifted = canvas_y - g.time_bar_height + g.row_margin;
        if shifted < 0 || channel_count == 0 {
            return None;
        }
        let row = (shifted / g.row_pitch().max(1)) as usize;
        (row < channel_count).then_some(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LayoutModel {
        LayoutModel::new(GridGeometry {
            row_height: 64,
            row_margin: 4,
            time_bar_height: 40,
            ..GridGeometry::default()
        })
    }

    mod row_top {
        use super::*;

        #[test]
        fn first_row_sits_under_time_bar() {
            assert_eq!(model().row_top(0), 44);
        }

        #[test]
        fn rows_advance_by_height_plus_margin() {
            let m = model();
            assert_eq!(m.row_top(1) - m.row_top(0), 68);
            assert_eq!(m.row_top(10), 10 * 68 + 44);
        }
    }

    mod visible_rows {
        use super::*;

        #[test]
        fn twenty_channels_at_top_include_partial_trailing_row() {
            let m = model();
            assert_eq!(m.first_visible_row(0), 0);
            let last = m.last_visible_row(0, 600, 20);
            // row 8 starts at 588 and is cut by the 600px edge
            assert!(last >= 8);
            assert_eq!(last, 10);
        }

        #[test]
        fn last_row_is_clamped_to_channel_count() {
            assert_eq!(model().last_visible_row(0, 600, 3), 2);
            assert_eq!(model().last_visible_row(0, 600, 1), 0);
        }

        #[test]
        fn first_row_tracks_scroll() {
            let m = model();
            // (700 - 4 - 40) / 68 = 9
            assert_eq!(m.first_visible_row(700), 9);
        }

        #[test]
        fn no_channels_yields_none() {
            assert_eq!(model().visible_rows(0, 600, 0), None);
        }

        #[test]
        fn visible_rows_are_ordered() {
            let rows = model().visible_rows(300, 600, 20).unwrap();
            assert!(rows.first <= rows.last);
            assert!(rows.last < 20);
        }
    }

    mod max_vertical_scroll {
        use super::*;

        #[test]
        fn content_that_fits_needs_no_scroll() {
            assert_eq!(model().max_vertical_scroll(3, 600), 0);
        }

        #[test]
        fn measured_to_second_to_last_row() {
            let m = model();
            // row_top(18) + 64 - 600
            let expected = m.row_top(18) + 64 - 600;
            assert_eq!(m.max_vertical_scroll(20, 600), expected);
        }

        #[test]
        fn single_channel_is_zero() {
            assert_eq!(model().max_vertical_scroll(1, 600), 0);
        }
    }

    mod row_at {
        use super::*;

        #[test]
        fn maps_canvas_y_back_to_row() {
            let m = model();
            assert_eq!(m.row_at(m.row_top(0), 20), Some(0));
            assert_eq!(m.row_at(m.row_top(5) + 10, 20), Some(5));
        }

        #[test]
        fn rejects_rows_past_the_end() {
            let m = model();
            assert_eq!(m.row_at(m.row_top(3), 3), None);
        }

        #[test]
        fn rejects_empty_source() {
            assert_eq!(model().row_at(100, 0), None);
        }
    }
}
