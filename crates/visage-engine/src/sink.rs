//! Avatar sink - the consumer of per-frame mouth commands

use visage_core::{VisageResult, VisemeId};

/// Receives one `(viseme, intensity)` pair per frame and mutates the
/// renderable model.
///
/// `apply` is called every tick while playing, including with
/// `(neutral, 0.0)`, and must tolerate that. Failures propagate out of
/// the tick rather than being swallowed.
pub trait AvatarSink {
    fn apply(&mut self, viseme: VisemeId, intensity: f32) -> VisageResult<()>;
}

/// Sink that discards every frame, for headless operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AvatarSink for NullSink {
    fn apply(&mut self, _viseme: VisemeId, _intensity: f32) -> VisageResult<()> {
        Ok(())
    }
}
