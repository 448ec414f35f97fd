//! Message and key handling for the App.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{App, AppMessage};

impl App {
    /// Handle a message from a load task or animation.
    ///
    /// Messages from superseded loads are dropped, as is everything after
    /// an error has been recorded.
    pub fn handle_message(&mut self, msg: AppMessage) {
        if msg.generation() != self.generation {
            tracing::trace!(
                stale = msg.generation(),
                current = self.generation,
                "Dropping stale message"
            );
            return;
        }
        if self.last_error.is_some() {
            return;
        }

        match msg {
            AppMessage::BytesFetched { fetched, .. } => {
                self.retained = Some(fetched);
            }
            AppMessage::LoadSucceeded { rendering, .. } => {
                // A still's task ends after this message
                self.active_load = None;
                self.rendered = Some(rendering);
                self.mark_dirty();
            }
            AppMessage::FrameReady { rendering, .. } => {
                self.rendered = Some(rendering);
                self.mark_dirty();
            }
            AppMessage::LoadFailed { error, .. } => {
                tracing::warn!(
                    source = error.source_id(),
                    code = error.error_code(),
                    "Load failed: {}",
                    error
                );
                self.cancel_active_load();
                self.retained = None;
                self.last_error = Some(error);
                self.mark_dirty();
            }
        }
    }

    /// Handle a key press.
    ///
    /// With an error on screen any key quits. Otherwise `q` or Ctrl+C
    /// quits, `j`/Down selects the next source and `k`/Up the previous.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.last_error.is_some() {
            self.quit();
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_previous(),
            _ => {}
        }
    }
}
