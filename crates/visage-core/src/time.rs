//! Media time - timestamps on the playback timeline
//!
//! Lip-sync runs against a single timeline: the audio element's playback
//! position. `MediaTime` is signed so that a query made before the audio
//! actually starts (elapsed < 0) stays representable instead of clamping
//! to zero and snapping the mouth open early.

use std::ops::{Add, Sub};
use std::time::Duration;

/// A point on the playback timeline, in microseconds.
///
/// Zero is the start of the current utterance's audio. Negative values
/// mean "before the audio began".
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MediaTime(pub i64);

impl MediaTime {
    pub const ZERO: MediaTime = MediaTime(0);

    #[inline]
    pub fn from_micros(micros: i64) -> Self {
        MediaTime(micros)
    }

    #[inline]
    pub fn from_millis(millis: i64) -> Self {
        MediaTime(millis * 1000)
    }

    #[inline]
    pub fn from_secs_f64(secs: f64) -> Self {
        MediaTime((secs * 1_000_000.0) as i64)
    }

    #[inline]
    pub fn as_micros(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn as_millis(self) -> i64 {
        self.0 / 1000
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Signed difference `self - rhs`.
    ///
    /// Kept separate from `Sub<Duration>` because elapsed time relative to
    /// an audio start timestamp may legitimately be negative.
    #[inline]
    pub fn delta(self, rhs: MediaTime) -> MediaTime {
        MediaTime(self.0 - rhs.0)
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        MediaTime(self.0.saturating_add(duration.as_micros() as i64))
    }
}

impl Add<Duration> for MediaTime {
    type Output = MediaTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        MediaTime(self.0 + rhs.as_micros() as i64)
    }
}

impl Sub<Duration> for MediaTime {
    type Output = MediaTime;

    #[inline]
    fn sub(self, rhs: Duration) -> Self::Output {
        MediaTime(self.0 - rhs.as_micros() as i64)
    }
}

impl std::fmt::Debug for MediaTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t({:.3}ms)", self.0 as f64 / 1000.0)
    }
}
