//! Visage Engine - the lip-sync animation scheduler
//!
//! The scheduler maps an utterance's viseme track onto a continuously
//! running frame clock: each tick it reads the elapsed playback time,
//! looks up the active cue, shapes its intensity, exponentially smooths
//! the mouth-shape value, and emits one `(viseme, intensity)` pair to the
//! avatar sink.
//!
//! Ownership of the armed tick chain is explicit: `start`/`resume` return
//! a [`TickToken`], and a tick presented with a stale token is a no-op.
//! That makes "which loop is currently armed" unambiguous even with
//! several avatar instances, and makes pause/stop cancellation immediate.
//!
//! [`FrameDriver`] is the host loop for non-browser embeddings: a single
//! tokio task that owns the scheduler, re-arms itself on an interval, and
//! takes transport commands over a channel.

pub mod audio;
pub mod clock;
pub mod driver;
pub mod scheduler;
pub mod sink;

pub use audio::*;
pub use clock::*;
pub use driver::*;
pub use scheduler::*;
pub use sink::*;
