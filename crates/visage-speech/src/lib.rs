//! Visage Speech - the TTS collaborator boundary
//!
//! The speech backend returns audio bytes plus a timed viseme list for
//! each utterance. This crate holds everything that touches that
//! boundary:
//! - the phoneme/letter to viseme mapping tables
//! - text-driven viseme sequence generation (the backend's approximation
//!   when no phoneme alignment is available)
//! - the decoded speech-clip result and its JSON DTOs
//!
//! The HTTP transport itself is out of scope; callers hand the raw JSON
//! response to [`SpeechClip::from_json`].

pub mod clip;
pub mod mapping;
pub mod sequence;

pub use clip::*;
pub use mapping::*;
pub use sequence::*;
