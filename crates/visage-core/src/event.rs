//! Timed viseme events - the atoms of a lip-sync track

use std::time::Duration;

use crate::{MediaTime, VisemeId};

/// One timed mouth-shape cue within an utterance.
///
/// Immutable once received from the speech backend. Producers are not
/// trusted to emit non-overlapping or gap-free sequences; the track layer
/// tolerates both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisemeEvent {
    /// Which mouth shape to show.
    pub viseme: VisemeId,
    /// When the shape becomes active, relative to audio start.
    pub offset: MediaTime,
    /// How long the shape stays active.
    pub duration: Duration,
}

impl VisemeEvent {
    /// Fallback duration when the producer omits one.
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(100);

    pub fn new(viseme: VisemeId, offset: MediaTime, duration: Duration) -> Self {
        VisemeEvent {
            viseme,
            offset,
            duration,
        }
    }

    /// Event with the default 100 ms window.
    pub fn with_default_duration(viseme: VisemeId, offset: MediaTime) -> Self {
        Self::new(viseme, offset, Self::DEFAULT_DURATION)
    }

    /// Synthetic neutral cue anchored at `offset`, used to hold the mouth
    /// closed outside the track's covered range.
    pub fn neutral_at(offset: MediaTime) -> Self {
        Self::with_default_duration(VisemeId::NEUTRAL, offset)
    }

    /// End of the active window.
    #[inline]
    pub fn end(&self) -> MediaTime {
        self.offset + self.duration
    }

    /// Is `t` inside the active window (inclusive on both ends)?
    #[inline]
    pub fn contains(&self, t: MediaTime) -> bool {
        t >= self.offset && t <= self.end()
    }
}
