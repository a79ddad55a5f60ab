//! Deterministic test doubles and canned scenarios
//!
//! The scheduler is pure with respect to its clock and sink, so driving it
//! through a scripted clock and a recording sink makes every frame of a
//! playback reproducible.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use visage_core::{MediaTime, VisageError, VisageResult, VisemeEvent, VisemeId};
use visage_engine::{AvatarSink, TickClock};
use visage_timeline::VisemeTrack;

/// A clock the test advances by hand.
#[derive(Clone, Default)]
pub struct ScriptedClock(Arc<AtomicI64>);

impl ScriptedClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, t: MediaTime) {
        self.0.store(t.as_micros(), Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.0.fetch_add(by.as_micros() as i64, Ordering::SeqCst);
    }
}

impl TickClock for ScriptedClock {
    fn now(&self) -> MediaTime {
        MediaTime::from_micros(self.0.load(Ordering::SeqCst))
    }
}

/// Sink that records every frame it is asked to apply.
#[derive(Clone, Default)]
pub struct RecordingSink(Arc<Mutex<Vec<(VisemeId, f32)>>>);

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<(VisemeId, f32)> {
        self.0.lock().clone()
    }

    pub fn last(&self) -> Option<(VisemeId, f32)> {
        self.0.lock().last().copied()
    }
}

impl AvatarSink for RecordingSink {
    fn apply(&mut self, viseme: VisemeId, intensity: f32) -> VisageResult<()> {
        self.0.lock().push((viseme, intensity));
        Ok(())
    }
}

/// Sink that rejects every frame, for error-path tests.
pub struct FailingSink;

impl AvatarSink for FailingSink {
    fn apply(&mut self, _viseme: VisemeId, _intensity: f32) -> VisageResult<()> {
        Err(VisageError::Sink("simulated renderer failure".into()))
    }
}

/// Canned viseme tracks used across the harness and benches.
pub mod scenarios {
    use super::*;

    /// One long cue holding a single open-mouth shape.
    pub fn sustained(id: u8, secs: f64) -> VisemeTrack {
        VisemeTrack::new(vec![VisemeEvent::new(
            VisemeId::new(id),
            MediaTime::ZERO,
            Duration::from_secs_f64(secs),
        )])
    }

    /// Two short cues separated by an interior gap.
    pub fn gapped_pair() -> VisemeTrack {
        VisemeTrack::new(vec![
            VisemeEvent::new(
                VisemeId::new(1),
                MediaTime::ZERO,
                Duration::from_secs_f64(0.2),
            ),
            VisemeEvent::new(
                VisemeId::new(2),
                MediaTime::from_secs_f64(0.3),
                Duration::from_secs_f64(0.2),
            ),
        ])
    }

    /// A letter-mapped track for a short spoken phrase.
    pub fn short_utterance() -> VisemeTrack {
        VisemeTrack::new(visage_speech::visemes_for_text(
            "hello world",
            Duration::from_secs(1),
        ))
    }
}
