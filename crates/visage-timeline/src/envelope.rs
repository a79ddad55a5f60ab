//! Intensity envelope - trapezoidal ease-in/ease-out per cue
//!
//! Each viseme cue fades in over the first fraction of its window, holds
//! full intensity, and fades out over the last fraction. Fast enough to
//! read as distinct mouth shapes, smooth enough to avoid popping.

use visage_core::{MediaTime, VisemeEvent};

/// Envelope shape configuration, as fractions of the cue window.
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeConfig {
    /// Ramp-up fraction at the start of the window.
    pub attack: f32,
    /// Ramp-down fraction at the end of the window.
    pub release: f32,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        EnvelopeConfig {
            attack: 0.2,
            release: 0.2,
        }
    }
}

/// Computes the 0..1 intensity of a cue at a playback position.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntensityShaper {
    config: EnvelopeConfig,
}

impl IntensityShaper {
    pub fn new(config: EnvelopeConfig) -> Self {
        IntensityShaper { config }
    }

    /// Envelope value for `event` at `elapsed`, scaled by `global` and
    /// clamped to [0, 1].
    ///
    /// Callers normally restrict this to in-window positions; out-of-window
    /// progress (including the degenerate zero-duration case) lands outside
    /// the ramps and is absorbed by the final clamp rather than panicking.
    pub fn intensity(&self, event: &VisemeEvent, elapsed: MediaTime, global: f32) -> f32 {
        let window = event.duration.as_secs_f64();
        let progress = (elapsed.delta(event.offset).as_secs_f64() / window) as f32;

        let shape = if progress < self.config.attack {
            progress / self.config.attack
        } else if progress > 1.0 - self.config.release {
            (1.0 - progress) / self.config.release
        } else {
            1.0
        };

        (shape * global.clamp(0.0, 1.0)).clamp(0.0, 1.0)
    }
}
