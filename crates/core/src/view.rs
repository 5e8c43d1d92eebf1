//! View state: current page, zoom scale, page count
//!
//! All mutations clamp, so the state can never leave its valid range no
//! matter how many actions arrive.

/// Minimum zoom scale
pub const MIN_ZOOM: f32 = 1.2;

/// Maximum zoom scale
pub const MAX_ZOOM: f32 = 3.0;

/// Zoom increment per step
pub const ZOOM_STEP: f32 = 0.2;

/// Viewer navigation state.
///
/// Owned exclusively by the shell; every mutation goes through the clamped
/// methods below, which report whether anything changed so the caller knows
/// to persist and re-render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Current page, 1-based, clamped to [1, page_count]
    pub current_page: u32,

    /// Total pages of the loaded document, 0 when none is loaded
    pub page_count: u32,

    /// Zoom scale, clamped to [MIN_ZOOM, MAX_ZOOM]
    pub zoom: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_count: 0,
            zoom: MIN_ZOOM,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a document is loaded.
    pub fn has_document(&self) -> bool {
        self.page_count > 0
    }

    /// Install a freshly loaded document and reset to page 1.
    pub fn set_document(&mut self, page_count: u32) {
        self.page_count = page_count;
        self.current_page = 1;
    }

    fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.page_count.max(1))
    }

    /// Go to a page, clamped into range. Returns whether the page changed.
    pub fn go_to_page(&mut self, page: u32) -> bool {
        let clamped = self.clamp_page(page);
        let changed = clamped != self.current_page;
        self.current_page = clamped;
        changed
    }

    /// Advance one page, clamped. Returns whether the page changed.
    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.current_page.saturating_add(1))
    }

    /// Go back one page, clamped. Returns whether the page changed.
    pub fn prev_page(&mut self) -> bool {
        self.go_to_page(self.current_page.saturating_sub(1))
    }

    /// Increase zoom by one step, clamped. Returns whether zoom changed.
    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom + ZOOM_STEP)
    }

    /// Decrease zoom by one step, clamped. Returns whether zoom changed.
    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom - ZOOM_STEP)
    }

    fn set_zoom(&mut self, zoom: f32) -> bool {
        let clamped = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let changed = (clamped - self.zoom).abs() > f32::EPSILON;
        self.zoom = clamped;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_has_no_document() {
        let view = ViewState::new();
        assert!(!view.has_document());
        assert_eq!(view.current_page, 1);
        assert_eq!(view.zoom, MIN_ZOOM);
    }

    #[test]
    fn three_page_document_pagination_scenario() {
        let mut view = ViewState::new();
        view.set_document(3);
        assert_eq!(view.page_count, 3);
        assert_eq!(view.current_page, 1);

        assert!(view.next_page());
        assert!(view.next_page());
        assert_eq!(view.current_page, 3);

        // Next at the last page stays put.
        assert!(!view.next_page());
        assert_eq!(view.current_page, 3);
    }

    #[test]
    fn prev_page_clamps_at_one() {
        let mut view = ViewState::new();
        view.set_document(3);

        assert!(!view.prev_page());
        assert_eq!(view.current_page, 1);
    }

    #[test]
    fn page_stays_in_range_under_arbitrary_actions() {
        let mut view = ViewState::new();
        view.set_document(5);

        for _ in 0..20 {
            view.next_page();
        }
        assert_eq!(view.current_page, 5);

        for _ in 0..20 {
            view.prev_page();
        }
        assert_eq!(view.current_page, 1);
    }

    #[test]
    fn go_to_page_clamps_both_ends() {
        let mut view = ViewState::new();
        view.set_document(4);

        assert!(view.go_to_page(99));
        assert_eq!(view.current_page, 4);

        assert!(view.go_to_page(0));
        assert_eq!(view.current_page, 1);
    }

    #[test]
    fn zoom_stays_in_range_under_arbitrary_actions() {
        let mut view = ViewState::new();

        for _ in 0..30 {
            view.zoom_in();
        }
        assert!(view.zoom <= MAX_ZOOM + 1e-4);
        assert!((view.zoom - MAX_ZOOM).abs() < 1e-4);

        for _ in 0..30 {
            view.zoom_out();
        }
        assert!((view.zoom - MIN_ZOOM).abs() < 1e-4);
    }

    #[test]
    fn zoom_steps_by_fixed_increment() {
        let mut view = ViewState::new();
        assert!(view.zoom_in());
        assert!((view.zoom - 1.4).abs() < 1e-4);

        assert!(view.zoom_out());
        assert!((view.zoom - 1.2).abs() < 1e-4);

        // Already at the minimum: no change reported.
        assert!(!view.zoom_out());
    }

    #[test]
    fn set_document_resets_current_page() {
        let mut view = ViewState::new();
        view.set_document(10);
        view.go_to_page(7);

        view.set_document(3);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.page_count, 3);
    }
}
