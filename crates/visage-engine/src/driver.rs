//! Frame driver - hosts a scheduler on a tokio task
//!
//! In a browser the tick loop is a frame callback re-arming itself; here
//! it is a single task that owns the scheduler, ticks it on an interval,
//! and accepts transport commands over a channel. One task per avatar
//! instance, so scheduler state is never shared and sink mutation is
//! strictly serialized.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};
use visage_core::{MediaTime, VisageError, VisageResult};
use visage_timeline::VisemeTrack;

use crate::{
    AudioTransportEvent, AvatarSink, LipSyncScheduler, SchedulerStats, TickClock, TickOutcome,
    TickToken,
};

/// Frame driver configuration.
#[derive(Clone, Debug)]
pub struct DriverConfig {
    /// Interval between animation frames.
    pub frame_interval: Duration,
    /// Command channel depth.
    pub command_buffer: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            // ~60 fps
            frame_interval: Duration::from_micros(16_667),
            command_buffer: 32,
        }
    }
}

enum Command {
    Start {
        track: VisemeTrack,
        audio_start: Option<MediaTime>,
    },
    Audio(AudioTransportEvent),
    Stop,
    Shutdown,
}

/// Handle to a running frame-driver task.
///
/// Dropping the handle closes the command channel and the task winds down;
/// `shutdown` additionally surfaces the task's result, which is how sink
/// failures reach the embedder instead of dying silently.
pub struct FrameDriver {
    commands: mpsc::Sender<Command>,
    stats: Arc<Mutex<SchedulerStats>>,
    handle: JoinHandle<VisageResult<()>>,
}

impl FrameDriver {
    /// Spawn the driver task. Must be called within a tokio runtime.
    pub fn spawn<C, S>(scheduler: LipSyncScheduler<C, S>, config: DriverConfig) -> Self
    where
        C: TickClock + Send + 'static,
        S: AvatarSink + Send + 'static,
    {
        let (commands, rx) = mpsc::channel(config.command_buffer);
        let stats = Arc::new(Mutex::new(SchedulerStats::default()));
        let handle = tokio::spawn(run_loop(scheduler, rx, config, Arc::clone(&stats)));

        FrameDriver {
            commands,
            stats,
            handle,
        }
    }

    /// Begin animating a new utterance.
    pub async fn start(
        &self,
        track: VisemeTrack,
        audio_start: Option<MediaTime>,
    ) -> VisageResult<()> {
        self.send(Command::Start { track, audio_start }).await
    }

    /// Forward an audio transport event.
    pub async fn audio_event(&self, event: AudioTransportEvent) -> VisageResult<()> {
        self.send(Command::Audio(event)).await
    }

    pub async fn pause(&self) -> VisageResult<()> {
        self.send(Command::Audio(AudioTransportEvent::Pause)).await
    }

    pub async fn resume(&self, resumed_at: Option<MediaTime>) -> VisageResult<()> {
        self.send(Command::Audio(AudioTransportEvent::Play { resumed_at }))
            .await
    }

    pub async fn stop(&self) -> VisageResult<()> {
        self.send(Command::Stop).await
    }

    /// Snapshot of the scheduler's counters after the last frame.
    pub fn stats(&self) -> SchedulerStats {
        self.stats.lock().clone()
    }

    /// Stop the task and surface its result.
    pub async fn shutdown(self) -> VisageResult<()> {
        // Ignore send failure: the task may already have exited with an
        // error, which join reports below.
        let _ = self.commands.send(Command::Shutdown).await;
        match self.handle.await {
            Ok(result) => result,
            Err(join_err) => Err(VisageError::Sink(format!(
                "frame driver task failed: {join_err}"
            ))),
        }
    }

    async fn send(&self, command: Command) -> VisageResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| VisageError::DriverStopped)
    }
}

async fn run_loop<C, S>(
    mut scheduler: LipSyncScheduler<C, S>,
    mut rx: mpsc::Receiver<Command>,
    config: DriverConfig,
    stats: Arc<Mutex<SchedulerStats>>,
) -> VisageResult<()>
where
    C: TickClock + Send,
    S: AvatarSink + Send,
{
    let mut interval = tokio::time::interval(config.frame_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut armed: Option<TickToken> = None;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let Some(token) = armed else { continue };
                match scheduler.tick(token) {
                    Ok(TickOutcome::Rendered { .. }) => {
                        *stats.lock() = scheduler.stats().clone();
                    }
                    Ok(TickOutcome::Skipped) => {
                        armed = None;
                    }
                    Err(err) => {
                        error!(%err, "lip-sync tick failed");
                        return Err(err);
                    }
                }
            }
            command = rx.recv() => {
                let Some(command) = command else { break };
                match command {
                    Command::Start { track, audio_start } => {
                        armed = Some(scheduler.start(track, audio_start));
                    }
                    Command::Audio(event) => {
                        armed = match scheduler.handle_audio(event) {
                            Ok(token) => token,
                            Err(err) => {
                                error!(%err, "transport transition failed");
                                return Err(err);
                            }
                        };
                    }
                    Command::Stop => {
                        armed = None;
                        if let Err(err) = scheduler.stop() {
                            error!(%err, "neutral render on stop failed");
                            return Err(err);
                        }
                        *stats.lock() = scheduler.stats().clone();
                    }
                    Command::Shutdown => break,
                }
            }
        }
    }

    debug!("frame driver shut down");
    Ok(())
}
