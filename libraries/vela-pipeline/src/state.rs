//! Element states and buffering queries

use serde::{Deserialize, Serialize};

/// Lifecycle state of a pipeline element
///
/// Elements move through these states under runtime control; the transitions
/// that matter to higher layers are `Null -> Ready` (element joined the
/// graph) and `Ready -> Null` (element left the graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementState {
    /// Element exists but holds no resources
    Null,

    /// Element has allocated resources and joined the graph
    Ready,

    /// Element is prerolled and waiting
    Paused,

    /// Element is processing data
    Playing,
}

/// Buffering accounting mode reported by the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BufferingMode {
    /// In-memory byte-stream buffering (the mode correction applies to)
    Stream,

    /// Progressive download with its own on-disk accounting
    Download,

    /// Timeshift ringbuffer buffering
    Timeshift,

    /// Live source, no buffering
    Live,
}

/// Buffering query issued against a specific element
///
/// The caller constructs the query, an element fills in the answer and
/// reports success through [`PipelineElement::query`].
///
/// [`PipelineElement::query`]: crate::PipelineElement::query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferingQuery {
    /// Buffering mode the answering element operates in
    pub mode: BufferingMode,

    /// Buffer fill level (0-100)
    pub percent: u32,

    /// Whether the element is still actively buffering
    pub busy: bool,
}

impl BufferingQuery {
    /// Create a new query for the given mode with an empty answer
    pub fn new(mode: BufferingMode) -> Self {
        Self {
            mode,
            percent: 0,
            busy: false,
        }
    }
}
