//! Projection of app state onto screen text.

use ratatui::text::Text;

use super::App;

impl App {
    /// What should be on screen right now.
    ///
    /// Pure: calling it any number of times changes nothing.
    pub fn view(&self) -> Text<'static> {
        if let Some(error) = &self.last_error {
            return Text::from(format!(
                "couldn't load image(s): {}\n\npress any key to exit",
                error
            ));
        }

        match (&self.rendered, self.selected_source()) {
            (Some(rendering), _) => rendering.text().clone(),
            (None, Some(source)) => Text::from(
                source
                    .loading_caption()
                    .unwrap_or_else(|| format!("loading {} ✨", source.id())),
            ),
            (None, None) => Text::default(),
        }
    }
}
