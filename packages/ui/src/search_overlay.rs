use std::cell::Cell;

/// DOM side of the search overlay.
pub trait OverlayView {
    /// Toggle the `open` class and `aria-hidden`.
    fn set_open(&self, open: bool);
    fn focus_field(&self);
}

/// Full-screen search overlay opened from the header.
pub struct SearchOverlay<V> {
    view: V,
    open: Cell<bool>,
}

impl<V: OverlayView> SearchOverlay<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            open: Cell::new(false),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn open(&self) {
        self.open.set(true);
        self.view.set_open(true);
        self.view.focus_field();
    }

    pub fn close(&self) {
        self.open.set(false);
        self.view.set_open(false);
    }

    /// Returns true when the key was handled.
    pub fn key_down(&self, key: &str) -> bool {
        if key == "Escape" && self.is_open() {
            self.close();
            return true;
        }
        false
    }

    /// Clicks on the backdrop itself close; clicks inside the panel bubble
    /// up with a different target and are ignored.
    pub fn overlay_clicked(&self, on_backdrop: bool) {
        if on_backdrop {
            self.close();
        }
    }

    /// The form has no endpoint; submissions are swallowed.
    pub fn submit(&self, query: &str) {
        tracing::debug!(query, "search submitted");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct RecordingView {
        calls: RefCell<Vec<&'static str>>,
    }

    impl OverlayView for RecordingView {
        fn set_open(&self, open: bool) {
            self.calls
                .borrow_mut()
                .push(if open { "open" } else { "close" });
        }

        fn focus_field(&self) {
            self.calls.borrow_mut().push("focus");
        }
    }

    #[test]
    fn test_open_focuses_field() {
        let overlay = SearchOverlay::new(RecordingView::default());
        overlay.open();
        assert!(overlay.is_open());
        assert_eq!(*overlay.view().calls.borrow(), vec!["open", "focus"]);
    }

    #[test]
    fn test_escape_only_closes_when_open() {
        let overlay = SearchOverlay::new(RecordingView::default());
        assert!(!overlay.key_down("Escape"));
        overlay.open();
        assert!(!overlay.key_down("Enter"));
        assert!(overlay.key_down("Escape"));
        assert!(!overlay.is_open());
    }

    #[test]
    fn test_backdrop_click() {
        let overlay = SearchOverlay::new(RecordingView::default());
        overlay.open();
        overlay.overlay_clicked(false);
        assert!(overlay.is_open());
        overlay.overlay_clicked(true);
        assert!(!overlay.is_open());
    }
}
