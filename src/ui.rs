//! Drawing the viewer.

use ratatui::{widgets::Paragraph, Frame};

use crate::app::App;

/// Draw the current view over the whole frame.
pub fn render(frame: &mut Frame, app: &App) {
    frame.render_widget(Paragraph::new(app.view()), frame.area());
}
