//! Viseme track - the ordered cue list for one utterance
//!
//! A track is created whole when a speech-generation result arrives and
//! replaced whole on the next one; it is never mutated in place.

use visage_core::{MediaTime, VisemeEvent};

/// Where a playback position falls relative to the track.
///
/// The distinction between `Gap` and the boundary variants is deliberate:
/// outside the covered range the mouth holds an explicit neutral cue, while
/// interior gaps carry no cue at all and the caller decays toward neutral
/// instead of snapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Track has no events at all.
    Empty,
    /// Before the first event starts - hold a synthetic neutral cue.
    LeadIn(VisemeEvent),
    /// Inside an event's active window.
    Active(VisemeEvent),
    /// Between two events, covered by neither.
    Gap,
    /// Past the last event's end - hold neutral anchored at the query time.
    TrailOut(VisemeEvent),
}

/// Ordered sequence of timed viseme cues for one utterance.
#[derive(Debug, Clone, Default)]
pub struct VisemeTrack {
    events: Vec<VisemeEvent>,
}

impl VisemeTrack {
    /// Build a track from producer events.
    ///
    /// Producers are not trusted to emit sorted sequences. The sort is
    /// stable so events sharing an offset keep their producer order, which
    /// is what decides precedence when windows overlap.
    pub fn new(mut events: Vec<VisemeEvent>) -> Self {
        events.sort_by(|a, b| a.offset.cmp(&b.offset));
        VisemeTrack { events }
    }

    /// Track with no cues. Lookups always miss; playback idles at neutral.
    pub fn empty() -> Self {
        VisemeTrack { events: Vec::new() }
    }

    pub fn events(&self) -> &[VisemeEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Classify a playback position relative to the track.
    ///
    /// Linear scan, first covering event wins (index precedence on
    /// overlap). The cue list for one utterance is short enough that a
    /// scan beats maintaining an interval structure.
    pub fn cue_at(&self, t: MediaTime) -> Cue {
        let (Some(first), Some(last)) = (self.events.first(), self.events.last()) else {
            return Cue::Empty;
        };

        for event in &self.events {
            if event.contains(t) {
                return Cue::Active(*event);
            }
        }

        if t < first.offset {
            return Cue::LeadIn(VisemeEvent::neutral_at(MediaTime::ZERO));
        }
        if t > last.end() {
            return Cue::TrailOut(VisemeEvent::neutral_at(t));
        }
        Cue::Gap
    }

    /// The active (or synthetic boundary) cue at `t`, or `None` for
    /// interior gaps and empty tracks.
    pub fn lookup(&self, t: MediaTime) -> Option<VisemeEvent> {
        match self.cue_at(t) {
            Cue::Active(event) | Cue::LeadIn(event) | Cue::TrailOut(event) => Some(event),
            Cue::Gap | Cue::Empty => None,
        }
    }
}
