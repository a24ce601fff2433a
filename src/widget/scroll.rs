//! Keep the highlighted candidate inside the dropdown viewport.

/// Scroll position of the dropdown list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollSync {
    offset: usize,
    viewport: usize,
}

impl ScrollSync {
    pub fn new(viewport: usize) -> Self {
        Self {
            offset: 0,
            viewport,
        }
    }

    /// Index of the first visible candidate
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }

    /// Resize the viewport, keeping `highlight` visible
    pub fn set_viewport(&mut self, viewport: usize, highlight: Option<usize>) {
        self.viewport = viewport;
        self.reveal(highlight, true);
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Scroll just far enough for `highlight` to be visible.
    ///
    /// No-op without a highlight or while the dropdown is closed.
    pub fn reveal(&mut self, highlight: Option<usize>, open: bool) {
        if let Some(index) = highlight
            && open
        {
            self.offset = adjust_scroll(self.offset, index, self.viewport);
        }
    }
}

/// Nearest-edge scroll: returns the offset that makes `selected_index`
/// visible while moving as little as possible.
pub fn adjust_scroll(scroll_offset: usize, selected_index: usize, list_height: usize) -> usize {
    if list_height == 0 {
        return 0;
    }

    if selected_index < scroll_offset {
        return selected_index;
    }

    if selected_index >= scroll_offset + list_height {
        return selected_index.saturating_sub(list_height - 1);
    }

    scroll_offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_scroll_within_view() {
        assert_eq!(adjust_scroll(0, 3, 5), 0);
        assert_eq!(adjust_scroll(2, 6, 5), 2);
    }

    #[test]
    fn test_adjust_scroll_below_view_aligns_bottom_edge() {
        assert_eq!(adjust_scroll(0, 5, 5), 1);
        assert_eq!(adjust_scroll(0, 9, 5), 5);
    }

    #[test]
    fn test_adjust_scroll_above_view_aligns_top_edge() {
        assert_eq!(adjust_scroll(5, 3, 5), 3);
    }

    #[test]
    fn test_adjust_scroll_zero_height() {
        assert_eq!(adjust_scroll(4, 7, 0), 0);
    }

    #[test]
    fn test_reveal_walks_down_one_row_at_a_time() {
        let mut scroll = ScrollSync::new(3);
        let offsets: Vec<usize> = (0..6)
            .map(|i| {
                scroll.reveal(Some(i), true);
                scroll.offset()
            })
            .collect();
        assert_eq!(offsets, vec![0, 0, 0, 1, 2, 3]);
    }

    #[test]
    fn test_reveal_noop_without_highlight_or_closed() {
        let mut scroll = ScrollSync::new(3);
        scroll.reveal(Some(8), true);
        assert_eq!(scroll.offset(), 6);

        scroll.reveal(None, true);
        assert_eq!(scroll.offset(), 6);

        scroll.reveal(Some(0), false);
        assert_eq!(scroll.offset(), 6);
    }

    #[test]
    fn test_shrinking_viewport_keeps_highlight_visible() {
        let mut scroll = ScrollSync::new(10);
        scroll.reveal(Some(7), true);
        assert_eq!(scroll.offset(), 0);

        scroll.set_viewport(4, Some(7));
        assert_eq!(scroll.offset(), 4);
    }
}
