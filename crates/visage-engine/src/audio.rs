//! Audio transport wiring - playback events drive scheduler transitions
//!
//! The audio element owns the authoritative playback state; the scheduler
//! follows it. `play` resumes, `pause` pauses, `ended` stops. There is no
//! timeout on the tick loop itself - the `ended` event is what terminates
//! an utterance.

use visage_core::{MediaTime, VisageResult};

use crate::{AvatarSink, LipSyncScheduler, TickClock, TickToken};

/// Playback events consumed from the host audio element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioTransportEvent {
    /// Playback started or resumed. Carries the clock reading at which the
    /// audio actually (re)started, when the transport knows it.
    Play { resumed_at: Option<MediaTime> },
    /// Playback paused.
    Pause,
    /// Playback reached the end of the utterance.
    Ended,
}

impl<C: TickClock, S: AvatarSink> LipSyncScheduler<C, S> {
    /// Map a transport event onto the matching transition.
    ///
    /// Returns the fresh tick token when the event armed a new chain
    /// (`Play`), `None` otherwise.
    pub fn handle_audio(
        &mut self,
        event: AudioTransportEvent,
    ) -> VisageResult<Option<TickToken>> {
        match event {
            AudioTransportEvent::Play { resumed_at } => Ok(Some(self.resume(resumed_at))),
            AudioTransportEvent::Pause => {
                self.pause();
                Ok(None)
            }
            AudioTransportEvent::Ended => {
                self.stop()?;
                Ok(None)
            }
        }
    }
}
