//! pixcat - view images and animated GIFs as block art in the terminal
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod animation;
pub mod app;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod source;
pub mod terminal;
pub mod traits;
pub mod ui;
