//! Visage Timeline - from timed viseme events to per-frame intensity
//!
//! Two pieces live here:
//! - [`VisemeTrack`]: the ordered cue list for one utterance, answering
//!   "which mouth shape is active at time t"
//! - [`IntensityShaper`]: the trapezoidal 0..1 envelope applied within a
//!   cue's window, so shapes fade in and out instead of popping

pub mod envelope;
pub mod track;

pub use envelope::*;
pub use track::*;
