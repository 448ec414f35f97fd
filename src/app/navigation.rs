//! Navigation methods for the App.

use super::App;

impl App {
    /// Select the next source, wrapping to the first.
    pub fn select_next(&mut self) {
        if self.sources.is_empty() || self.last_error.is_some() {
            return;
        }
        self.selected = (self.selected + 1) % self.sources.len();
        self.after_selection_change();
    }

    /// Select the previous source, wrapping to the last.
    pub fn select_previous(&mut self) {
        if self.sources.is_empty() || self.last_error.is_some() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.sources.len() - 1
        } else {
            self.selected - 1
        };
        self.after_selection_change();
    }

    fn after_selection_change(&mut self) {
        tracing::debug!(selected = self.selected, "Selection changed");
        self.retained = None;
        self.request_load();
    }

    /// Record the new terminal size and re-render the selected source.
    ///
    /// Retained bytes are reused, so a resize never fetches again once the
    /// current source's bytes have arrived.
    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.viewport = Some((width, height));
        self.mark_dirty();
        self.request_load();
    }
}
