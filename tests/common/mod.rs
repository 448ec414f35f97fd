//! Common test utilities for integration tests.
//!
//! This module provides reusable image fixtures and helpers for driving an
//! [`App`] the way the event loop does.
//!
//! # Example
//!
//! ```ignore
//! use common::{gif_file, test_app, pump_until};
//!
//! let gif = gif_file(&[10, 10], [255, 0, 0]);
//! let (mut app, mut rx) = test_app(vec![file_source(&gif)]);
//! app.on_resize(40, 20);
//! pump_until(&mut app, &mut rx, |app| app.rendered().is_some()).await;
//! ```

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::*;

use std::sync::Arc;
use std::time::Duration;

use pixcat::app::{App, AppMessage};
use pixcat::color::ColorProfile;
use pixcat::config::ViewerConfig;
use pixcat::source::ImageSource;
use tokio::sync::mpsc::UnboundedReceiver;

/// How long helpers wait before failing a test.
pub const WAIT: Duration = Duration::from_secs(10);

/// Creates an app with a fixed true-color profile and takes its receiver.
pub fn test_app(sources: Vec<Arc<dyn ImageSource>>) -> (App, UnboundedReceiver<AppMessage>) {
    let mut app = App::with_profile(sources, ViewerConfig::default(), ColorProfile::TrueColor);
    let rx = app
        .message_rx
        .take()
        .expect("fresh app always has a receiver");
    (app, rx)
}

/// Feed messages to the app until `done` holds.
pub async fn pump_until<F>(app: &mut App, rx: &mut UnboundedReceiver<AppMessage>, mut done: F)
where
    F: FnMut(&App) -> bool,
{
    tokio::time::timeout(WAIT, async {
        while !done(app) {
            let msg = rx.recv().await.expect("message channel closed");
            app.handle_message(msg);
        }
    })
    .await
    .expect("timed out waiting for app state");
}

/// Receive messages for `window`, handing each to the app.
///
/// Returns every message seen, in arrival order.
pub async fn pump_for(
    app: &mut App,
    rx: &mut UnboundedReceiver<AppMessage>,
    window: Duration,
) -> Vec<AppMessage> {
    let mut seen = Vec::new();
    let deadline = tokio::time::Instant::now() + window;
    while let Ok(Some(msg)) = tokio::time::timeout_at(deadline, rx.recv()).await {
        seen.push(msg.clone());
        app.handle_message(msg);
    }
    seen
}

/// Handle everything already queued without waiting.
pub fn drain(app: &mut App, rx: &mut UnboundedReceiver<AppMessage>) -> usize {
    let mut count = 0;
    while let Ok(msg) = rx.try_recv() {
        app.handle_message(msg);
        count += 1;
    }
    count
}
