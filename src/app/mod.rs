//! Application state and logic for the viewer.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`AppMessage`] - Results coming back from background loads
//! - navigation (`select_next`, `select_previous`, `on_resize`)
//! - message and key handling
//! - [`App::view`], the pure projection of state onto text
//!
//! `App` is owned by the event loop and is its only writer. Background
//! tasks report through `message_tx`; nothing else mutates it.

mod handlers;
mod loader;
mod messages;
mod navigation;
mod view;

pub use messages::AppMessage;

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::color::ColorProfile;
use crate::config::ViewerConfig;
use crate::error::LoadError;
use crate::render::{RasterOptions, Rendering};
use crate::source::{Fetched, ImageSource};

pub struct App {
    /// Sources in command-line order
    pub sources: Vec<Arc<dyn ImageSource>>,
    /// Index of the source on screen
    selected: usize,
    /// Current rendering; `None` shows the loading caption
    rendered: Option<Rendering>,
    /// First load failure; once set the session only waits for a key
    last_error: Option<LoadError>,
    /// Terminal size in (columns, rows); `None` until the first resize
    viewport: Option<(u16, u16)>,
    /// Generation of the most recent load request
    generation: u64,
    /// Cancels the in-flight load or the playing animation
    active_load: Option<CancellationToken>,
    /// Bytes of the selected source, reused on resize
    retained: Option<Fetched>,
    /// Color tier used for rasterizing
    pub profile: ColorProfile,
    pub config: ViewerConfig,
    /// Receiver for load results (taken by the event loop)
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender for load results (cloned into each load task)
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    pub should_quit: bool,
    /// Dirty flag: set on every visible change, cleared after each draw
    pub needs_redraw: bool,
}

impl App {
    /// Create an app for `sources`, detecting the color profile unless the
    /// config forces one.
    pub fn new(sources: Vec<Arc<dyn ImageSource>>, config: ViewerConfig) -> Self {
        let profile = config.resolve_color_profile();
        Self::with_profile(sources, config, profile)
    }

    pub fn with_profile(
        sources: Vec<Arc<dyn ImageSource>>,
        config: ViewerConfig,
        profile: ColorProfile,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            sources,
            selected: 0,
            rendered: None,
            last_error: None,
            viewport: None,
            generation: 0,
            active_load: None,
            retained: None,
            profile,
            config,
            message_rx: Some(message_rx),
            message_tx,
            should_quit: false,
            needs_redraw: true,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_source(&self) -> Option<&Arc<dyn ImageSource>> {
        self.sources.get(self.selected)
    }

    pub fn rendered(&self) -> Option<&Rendering> {
        self.rendered.as_ref()
    }

    pub fn last_error(&self) -> Option<&LoadError> {
        self.last_error.as_ref()
    }

    pub fn viewport(&self) -> Option<(u16, u16)> {
        self.viewport
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while bytes for the selected source are held for re-rendering.
    pub fn has_retained_bytes(&self) -> bool {
        self.retained.is_some()
    }

    /// True from the start of a load until a still is shown, the load fails,
    /// or it is superseded. Animations stay active while they play.
    pub fn is_loading_or_playing(&self) -> bool {
        self.active_load
            .as_ref()
            .map(|token| !token.is_cancelled())
            .unwrap_or(false)
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.cancel_active_load();
        self.should_quit = true;
    }

    fn raster_options(&self, (width, height): (u16, u16)) -> RasterOptions {
        RasterOptions::new(width, height, self.profile)
            .with_vertical_margin(self.config.vertical_margin)
    }

    fn cancel_active_load(&mut self) {
        if let Some(token) = self.active_load.take() {
            token.cancel();
        }
    }

    /// Start a fresh load of the selected source.
    ///
    /// Clears the rendering, retires the previous load's token, and bumps
    /// the generation before spawning, so a superseded load can neither
    /// publish nor be mistaken for the new one.
    pub fn request_load(&mut self) {
        if self.last_error.is_some() {
            return;
        }
        let Some(viewport) = self.viewport else {
            return;
        };
        let Some(source) = self.selected_source().cloned() else {
            return;
        };

        self.cancel_active_load();
        self.generation += 1;
        self.rendered = None;
        self.mark_dirty();

        let token = CancellationToken::new();
        self.active_load = Some(token.clone());

        tracing::info!(
            source = source.id(),
            generation = self.generation,
            width = viewport.0,
            height = viewport.1,
            reuse_bytes = self.retained.is_some(),
            "Loading image"
        );

        let job = loader::LoadJob {
            generation: self.generation,
            source,
            retained: self.retained.clone(),
            options: self.raster_options(viewport),
            min_frame_delay_cs: self.config.min_frame_delay_cs,
            token,
            tx: self.message_tx.clone(),
        };
        tokio::spawn(loader::run(job));
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.cancel_active_load();
    }
}
