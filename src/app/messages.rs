//! AppMessage enum for results coming back from background loads.

use crate::error::LoadError;
use crate::render::Rendering;
use crate::source::Fetched;

/// Messages sent from load tasks and animation schedulers to the event loop.
///
/// Every variant carries the generation of the load that produced it. The
/// app drops any message whose generation is not the current one.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Raw bytes of the selected source, kept for re-rendering on resize
    BytesFetched { generation: u64, fetched: Fetched },
    /// A still image finished rendering
    LoadSucceeded {
        generation: u64,
        rendering: Rendering,
    },
    /// The next animation frame is due on screen
    FrameReady {
        generation: u64,
        rendering: Rendering,
    },
    /// Fetching, decoding, or rasterizing failed
    LoadFailed { generation: u64, error: LoadError },
}

impl AppMessage {
    pub fn generation(&self) -> u64 {
        match self {
            AppMessage::BytesFetched { generation, .. }
            | AppMessage::LoadSucceeded { generation, .. }
            | AppMessage::FrameReady { generation, .. }
            | AppMessage::LoadFailed { generation, .. } => *generation,
        }
    }
}
