use crate::foundation::error::StratusResult;
use crate::render::state::SceneFrame;

/// Sink contract for consuming computed frames.
///
/// `apply` is called at most once per coalesced display frame with the
/// complete batch for that frame; the engine performs no geometry reads
/// between building the batch and handing it over.
pub trait RenderSink {
    /// Apply one frame's batch of states.
    fn apply(&mut self, frame: &SceneFrame) -> StratusResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    frames: Vec<SceneFrame>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[SceneFrame] {
        &self.frames
    }

    /// The most recently applied frame, if any.
    pub fn last(&self) -> Option<&SceneFrame> {
        self.frames.last()
    }
}

impl RenderSink for InMemorySink {
    fn apply(&mut self, frame: &SceneFrame) -> StratusResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}
