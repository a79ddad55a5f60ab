//! Visage Core - Fundamental types for avatar lip-sync
//!
//! This crate defines the types shared by the whole workspace:
//! - Viseme identifiers and the semantic mouth-shape set
//! - Media-time primitives (signed playback-timeline timestamps)
//! - Timed viseme events
//! - Error taxonomy

pub mod error;
pub mod event;
pub mod time;
pub mod viseme;

pub use error::*;
pub use event::*;
pub use time::*;
pub use viseme::*;
