//! Background load task.
//!
//! One task per load request. It fetches (or reuses retained bytes), decodes
//! and rasterizes on the blocking pool, then either reports a still or hands
//! the frames to an [`AnimationScheduler`]. All results go back to the event
//! loop as [`AppMessage`]s; the task never touches app state.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::AppMessage;
use crate::animation::AnimationScheduler;
use crate::error::{LoadError, LoadResult};
use crate::render::{rasterize, RasterOptions, Rendering};
use crate::source::{resolve, Decoded, Fetched, ImageSource};

/// Everything a load task needs, captured when the load is requested.
pub(crate) struct LoadJob {
    pub generation: u64,
    pub source: Arc<dyn ImageSource>,
    pub retained: Option<Fetched>,
    pub options: RasterOptions,
    pub min_frame_delay_cs: u16,
    pub token: CancellationToken,
    pub tx: mpsc::UnboundedSender<AppMessage>,
}

enum Prepared {
    Still(Rendering),
    Animated(AnimationScheduler),
}

fn prepare(
    source: &dyn ImageSource,
    fetched: &Fetched,
    options: &RasterOptions,
    min_frame_delay_cs: u16,
) -> LoadResult<Prepared> {
    let footer = source.footer_caption();
    match resolve(source, fetched)? {
        Decoded::Still(image) => Ok(Prepared::Still(rasterize(
            &image,
            options,
            footer.as_deref(),
        ))),
        Decoded::Animated(animation) => {
            let mut scheduler = AnimationScheduler::new(min_frame_delay_cs);
            scheduler.prepare(source.id(), animation, options, footer.as_deref())?;
            Ok(Prepared::Animated(scheduler))
        }
    }
}

pub(crate) async fn run(job: LoadJob) {
    let LoadJob {
        generation,
        source,
        retained,
        options,
        min_frame_delay_cs,
        token,
        tx,
    } = job;

    let fetched = match retained {
        Some(fetched) => {
            tracing::debug!(source = source.id(), generation, "Reusing retained bytes");
            fetched
        }
        None => {
            let result = tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(source = source.id(), generation, "Fetch abandoned");
                    return;
                }
                result = source.fetch_bytes() => result,
            };
            match result {
                Ok(fetched) => {
                    let _ = tx.send(AppMessage::BytesFetched {
                        generation,
                        fetched: fetched.clone(),
                    });
                    fetched
                }
                Err(error) => {
                    let _ = tx.send(AppMessage::LoadFailed { generation, error });
                    return;
                }
            }
        }
    };

    let blocking_source = Arc::clone(&source);
    let prepared = tokio::task::spawn_blocking(move || {
        prepare(
            blocking_source.as_ref(),
            &fetched,
            &options,
            min_frame_delay_cs,
        )
    })
    .await
    .unwrap_or_else(|e| Err(LoadError::decode(source.id(), e.to_string())));

    if token.is_cancelled() {
        return;
    }

    match prepared {
        Ok(Prepared::Still(rendering)) => {
            let _ = tx.send(AppMessage::LoadSucceeded {
                generation,
                rendering,
            });
        }
        Ok(Prepared::Animated(mut scheduler)) => {
            tracing::debug!(
                source = source.id(),
                generation,
                frames = scheduler.frames().len(),
                "Starting animation"
            );
            scheduler.play(generation, &token, &tx).await;
        }
        Err(error) => {
            let _ = tx.send(AppMessage::LoadFailed { generation, error });
        }
    }
}
