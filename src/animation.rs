//! GIF playback.
//!
//! An [`AnimationScheduler`] walks through a fixed life cycle:
//!
//! ```text
//! Idle -> Decoding -> Playing -> {Cancelled, Error}
//! ```
//!
//! [`prepare`](AnimationScheduler::prepare) rasterizes every frame up front,
//! so playback never touches the rasterizer. [`play`](AnimationScheduler::play)
//! publishes frame 0 immediately and then advances one frame per declared
//! delay, wrapping around, until its cancellation token fires or the
//! receiving side hangs up.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::app::AppMessage;
use crate::error::{LoadError, LoadResult};
use crate::render::{rasterize, RasterOptions, Rendering};
use crate::source::DecodedAnimation;

/// Default floor for zero-delay frames, in centiseconds.
pub const DEFAULT_MIN_FRAME_DELAY_CS: u16 = 10;

/// Life-cycle state of one scheduler instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Decoding,
    Playing,
    Cancelled,
    Error,
}

/// A frame that is ready to go on screen.
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    pub rendering: Rendering,
    pub delay_cs: u16,
}

#[derive(Debug)]
pub struct AnimationScheduler {
    state: SchedulerState,
    frames: Arc<[RenderedFrame]>,
    min_delay_cs: u16,
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_FRAME_DELAY_CS)
    }
}

impl AnimationScheduler {
    pub fn new(min_delay_cs: u16) -> Self {
        Self {
            state: SchedulerState::Idle,
            frames: Arc::from(Vec::new()),
            min_delay_cs: min_delay_cs.max(1),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn frames(&self) -> &[RenderedFrame] {
        &self.frames
    }

    /// Rasterize every frame of `animation`.
    ///
    /// Either all frames are rasterized or none are kept; a failure moves the
    /// scheduler to [`SchedulerState::Error`].
    pub fn prepare(
        &mut self,
        source_id: &str,
        animation: DecodedAnimation,
        options: &RasterOptions,
        footer: Option<&str>,
    ) -> LoadResult<()> {
        self.state = SchedulerState::Decoding;

        if animation.is_empty() {
            self.state = SchedulerState::Error;
            return Err(LoadError::decode(source_id, "animation has no frames"));
        }

        let frames: Vec<RenderedFrame> = animation
            .frames
            .into_iter()
            .map(|frame| RenderedFrame {
                rendering: rasterize(&frame.image, options, footer),
                delay_cs: frame.delay_cs,
            })
            .collect();

        tracing::debug!(source = source_id, frames = frames.len(), "Animation frames ready");
        self.frames = Arc::from(frames);
        Ok(())
    }

    /// How long frame `index` stays on screen.
    pub fn frame_delay(&self, index: usize) -> Duration {
        let declared = self.frames.get(index).map(|f| f.delay_cs).unwrap_or(0);
        let delay_cs = if declared == 0 {
            self.min_delay_cs
        } else {
            declared
        };
        Duration::from_millis(u64::from(delay_cs) * 10)
    }

    /// Publish frames in a loop until `token` is cancelled.
    ///
    /// Returns the terminal state: [`SchedulerState::Cancelled`] after a
    /// cancellation or a closed channel, [`SchedulerState::Error`] if there
    /// was nothing to play.
    pub async fn play(
        &mut self,
        generation: u64,
        token: &CancellationToken,
        tx: &mpsc::UnboundedSender<AppMessage>,
    ) -> SchedulerState {
        if self.frames.is_empty() {
            self.state = SchedulerState::Error;
            return self.state;
        }
        if token.is_cancelled() {
            self.state = SchedulerState::Cancelled;
            return self.state;
        }

        self.state = SchedulerState::Playing;
        let mut index = 0;

        loop {
            let rendering = self.frames[index].rendering.clone();
            if tx
                .send(AppMessage::FrameReady {
                    generation,
                    rendering,
                })
                .is_err()
            {
                break;
            }

            tokio::select! {
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(self.frame_delay(index)) => {}
            }

            if token.is_cancelled() {
                break;
            }
            index = (index + 1) % self.frames.len();
        }

        tracing::debug!(generation, "Animation stopped");
        self.state = SchedulerState::Cancelled;
        self.frames = Arc::from(Vec::new());
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorProfile;
    use crate::source::AnimationFrame;
    use image::{DynamicImage, Rgba, RgbaImage};
    use tokio::time::Instant;

    fn animation(delays: &[u16]) -> DecodedAnimation {
        let frames = delays
            .iter()
            .enumerate()
            .map(|(i, delay)| AnimationFrame {
                image: DynamicImage::ImageRgba8(RgbaImage::from_pixel(
                    2,
                    2,
                    Rgba([(i * 50) as u8, 0, 0, 255]),
                )),
                delay_cs: *delay,
            })
            .collect();
        DecodedAnimation { frames }
    }

    fn options() -> RasterOptions {
        RasterOptions::new(2, 10, ColorProfile::TrueColor)
    }

    fn prepared(delays: &[u16]) -> AnimationScheduler {
        let mut scheduler = AnimationScheduler::default();
        scheduler
            .prepare("a.gif", animation(delays), &options(), None)
            .unwrap();
        scheduler
    }

    #[test]
    fn test_starts_idle() {
        assert_eq!(AnimationScheduler::default().state(), SchedulerState::Idle);
    }

    #[test]
    fn test_prepare_rasterizes_every_frame() {
        let scheduler = prepared(&[10, 20, 30]);
        assert_eq!(scheduler.state(), SchedulerState::Decoding);
        assert_eq!(scheduler.frames().len(), 3);
        assert_ne!(scheduler.frames()[0].rendering, scheduler.frames()[1].rendering);
    }

    #[test]
    fn test_prepare_empty_animation_is_error() {
        let mut scheduler = AnimationScheduler::default();
        let err = scheduler
            .prepare("a.gif", DecodedAnimation { frames: vec![] }, &options(), None)
            .unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));
        assert_eq!(scheduler.state(), SchedulerState::Error);
        assert!(scheduler.frames().is_empty());
    }

    #[test]
    fn test_zero_delay_uses_floor() {
        let scheduler = prepared(&[0, 7]);
        assert_eq!(scheduler.frame_delay(0), Duration::from_millis(100));
        assert_eq!(scheduler.frame_delay(1), Duration::from_millis(70));
    }

    #[test]
    fn test_floor_is_never_zero() {
        let mut scheduler = AnimationScheduler::new(0);
        scheduler
            .prepare("a.gif", animation(&[0]), &options(), None)
            .unwrap();
        assert_eq!(scheduler.frame_delay(0), Duration::from_millis(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_frames_loop_in_order() {
        let mut scheduler = prepared(&[10, 10, 10, 10]);
        let expected: Vec<Rendering> = scheduler
            .frames()
            .iter()
            .map(|f| f.rendering.clone())
            .collect();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let task_token = token.clone();
        let handle = tokio::spawn(async move { scheduler.play(7, &task_token, &tx).await });

        let start = Instant::now();
        for i in 0..6 {
            match rx.recv().await.unwrap() {
                AppMessage::FrameReady {
                    generation,
                    rendering,
                } => {
                    assert_eq!(generation, 7);
                    assert_eq!(rendering, expected[i % 4]);
                }
                other => panic!("unexpected message: {:?}", other),
            }
        }
        // frames 1..=5 each waited 100ms
        assert!(start.elapsed() >= Duration::from_millis(500));

        token.cancel();
        assert_eq!(handle.await.unwrap(), SchedulerState::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_frame_respects_delay() {
        let mut scheduler = prepared(&[50]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let task_token = token.clone();
        let handle = tokio::spawn(async move { scheduler.play(1, &task_token, &tx).await });

        rx.recv().await.unwrap();
        let start = Instant::now();
        rx.recv().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));

        token.cancel();
        assert_eq!(handle.await.unwrap(), SchedulerState::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_publishing() {
        let mut scheduler = prepared(&[10, 10]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let task_token = token.clone();
        let handle = tokio::spawn(async move { scheduler.play(1, &task_token, &tx).await });

        rx.recv().await.unwrap();
        token.cancel();
        assert_eq!(handle.await.unwrap(), SchedulerState::Cancelled);

        // Sender dropped with the task; nothing else was queued
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_cancelled_before_start_publishes_nothing() {
        let mut scheduler = prepared(&[10]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        token.cancel();

        assert_eq!(scheduler.play(1, &token, &tx).await, SchedulerState::Cancelled);
        drop(tx);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_closed_channel_stops_playback() {
        let mut scheduler = prepared(&[10]);
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let token = CancellationToken::new();
        assert_eq!(scheduler.play(1, &token, &tx).await, SchedulerState::Cancelled);
    }
}
