/// Reconciles the scroll offset against the cursor.
///
/// `heights[i]` is the number of screen rows item `i` wraps to. The result
/// is the smallest offset, starting from `offset`, at which the cursor's whole
/// block fits inside `rows` rows. Moving the cursor above the offset makes the
/// cursor the new top. A block taller than the viewport pins the offset to
/// the cursor.
pub fn adjust_scroll(heights: &[usize], cursor: usize, offset: usize, rows: usize) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let cursor = cursor.min(heights.len() - 1);
    if cursor < offset {
        return cursor;
    }
    let mut offset = offset;
    while offset < cursor && block_rows(heights, offset, cursor) > rows {
        offset += 1;
    }
    offset
}

/// Rows taken by items `from..=to`.
pub fn block_rows(heights: &[usize], from: usize, to: usize) -> usize {
    heights
        .get(from..=to)
        .map(|slice| slice.iter().sum())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_view_resets() {
        assert_eq!(adjust_scroll(&[], 4, 3, 18), 0);
    }

    #[test]
    fn cursor_above_offset_becomes_top() {
        assert_eq!(adjust_scroll(&[1; 30], 2, 7, 18), 2);
    }

    #[test]
    fn cursor_within_viewport_keeps_offset() {
        assert_eq!(adjust_scroll(&[1; 30], 10, 0, 18), 0);
        assert_eq!(adjust_scroll(&[1; 30], 17, 0, 18), 0);
    }

    #[test]
    fn stepping_past_the_bottom_scrolls_by_one() {
        assert_eq!(adjust_scroll(&[1; 30], 18, 0, 18), 1);
    }

    #[test]
    fn tall_items_push_the_offset_further() {
        // items 0..=3 are three rows each, cursor item is two rows
        let heights = [3, 3, 3, 3, 1, 1, 2];
        assert_eq!(adjust_scroll(&heights, 6, 0, 10), 2);
    }

    #[test]
    fn oversized_block_pins_to_cursor() {
        assert_eq!(adjust_scroll(&[1, 1, 25], 2, 0, 18), 2);
    }

    #[test]
    fn cursor_block_is_always_fully_visible() {
        let heights = [1, 3, 2, 1, 4, 1, 1, 2, 5, 1, 1, 3];
        let rows = 8;
        for cursor in 0..heights.len() {
            for start in 0..heights.len() {
                let offset = adjust_scroll(&heights, cursor, start, rows);
                assert!(offset <= cursor);
                assert!(
                    block_rows(&heights, offset, cursor) <= rows,
                    "cursor {cursor} start {start} offset {offset}"
                );
                if offset > start.min(cursor) {
                    // one less would not have fit
                    assert!(block_rows(&heights, offset - 1, cursor) > rows);
                }
            }
        }
    }
}
