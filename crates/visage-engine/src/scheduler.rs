//! Lip-sync scheduler - the per-frame animation state machine
//!
//! States: Idle -> Playing <-> Paused -> Idle. The smoothed mouth value is
//! a continuous float; only its rounded integer goes to the sink, so rapid
//! target changes read as gradual motion rather than stepping.

use tracing::{debug, trace};
use visage_core::{MediaTime, VisageResult, VisemeId};
use visage_timeline::{EnvelopeConfig, IntensityShaper, VisemeTrack};

use crate::{AvatarSink, TickClock};

/// Scheduler configuration.
#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Exponential smoothing factor applied per tick.
    /// Higher = snappier, lower = smoother/laggier. Clamped to [0.01, 1].
    pub smoothing: f64,
    /// Master multiplier applied to every envelope value, in [0, 1].
    pub global_intensity: f32,
    /// Per-cue intensity envelope shape.
    pub envelope: EnvelopeConfig,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            smoothing: 0.15,
            global_intensity: 1.0,
            envelope: EnvelopeConfig::default(),
        }
    }
}

impl SchedulerConfig {
    fn clamped_smoothing(&self) -> f64 {
        self.smoothing.clamp(0.01, 1.0)
    }
}

/// Handle for one armed tick chain.
///
/// Returned by `start`/`resume`; required by `tick`. Every transition
/// bumps the scheduler's generation, so a token from before the
/// transition is stale and the armed tick it represents will not run its
/// body. This is what guarantees at most one live tick chain per
/// scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken(u64);

/// Playback phase of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Playing,
    Paused,
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Stale token or not playing; the tick body did not run.
    Skipped,
    /// A frame was rendered and sent to the sink.
    Rendered { viseme: VisemeId, intensity: f32 },
}

/// Counters mirrored out for observability.
#[derive(Clone, Debug, Default)]
pub struct SchedulerStats {
    /// Frames rendered since the last (re)start.
    pub frames: u64,
    /// Ticks that arrived with a stale token and were dropped.
    pub skipped_ticks: u64,
    /// Smoothed mouth value after the last rendered frame.
    pub current: f64,
    /// Target viseme of the last rendered frame.
    pub target: VisemeId,
}

/// The lip-sync animation scheduler.
///
/// Owns all animation state exclusively; sink mutation happens
/// synchronously inside `tick`, never concurrently with another tick.
pub struct LipSyncScheduler<C, S> {
    clock: C,
    sink: S,
    track: VisemeTrack,
    shaper: IntensityShaper,
    config: SchedulerConfig,
    phase: Phase,
    started_at: MediaTime,
    current: f64,
    target: VisemeId,
    frames: u64,
    generation: u64,
    stats: SchedulerStats,
}

impl<C: TickClock, S: AvatarSink> LipSyncScheduler<C, S> {
    pub fn new(clock: C, sink: S) -> Self {
        Self::with_config(clock, sink, SchedulerConfig::default())
    }

    pub fn with_config(clock: C, sink: S, config: SchedulerConfig) -> Self {
        LipSyncScheduler {
            clock,
            sink,
            track: VisemeTrack::empty(),
            shaper: IntensityShaper::new(config.envelope),
            config,
            phase: Phase::Idle,
            started_at: MediaTime::ZERO,
            current: 0.0,
            target: VisemeId::NEUTRAL,
            frames: 0,
            generation: 0,
            stats: SchedulerStats::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Frames rendered since the last (re)start. Not reset by pause/resume.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Smoothed mouth value.
    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Begin a new utterance.
    ///
    /// Cancels any armed tick chain first (double-start is an implicit
    /// stop+restart, not an error). An empty track is accepted; every tick
    /// then resolves to the neutral branch. `audio_start` is the clock
    /// reading at which audio playback began; when absent the scheduler
    /// reads its own clock, trading a small sync error for being able to
    /// start ahead of the audio element.
    pub fn start(&mut self, track: VisemeTrack, audio_start: Option<MediaTime>) -> TickToken {
        self.generation += 1;
        self.track = track;
        self.started_at = audio_start.unwrap_or_else(|| self.clock.now());
        self.frames = 0;
        self.current = 0.0;
        self.target = VisemeId::NEUTRAL;
        self.phase = Phase::Playing;
        self.stats = SchedulerStats::default();

        debug!(
            started_at = self.started_at.as_micros(),
            cues = self.track.len(),
            "lip-sync start"
        );
        TickToken(self.generation)
    }

    /// Suspend ticking without losing the smoothed mouth state, so a later
    /// resume continues from the same shape. Any armed tick is cancelled.
    pub fn pause(&mut self) {
        self.generation += 1;
        if self.phase == Phase::Playing {
            self.phase = Phase::Paused;
            debug!("lip-sync pause");
        }
    }

    /// Resume ticking. `resumed_at` overrides the start timestamp when the
    /// audio element resumed at a different clock position.
    pub fn resume(&mut self, resumed_at: Option<MediaTime>) -> TickToken {
        self.generation += 1;
        if let Some(at) = resumed_at {
            self.started_at = at;
        }
        self.phase = Phase::Playing;
        debug!(started_at = self.started_at.as_micros(), "lip-sync resume");
        TickToken(self.generation)
    }

    /// Cancel ticking, force-render neutral, and clear the smoothed state.
    pub fn stop(&mut self) -> VisageResult<()> {
        self.generation += 1;
        self.phase = Phase::Idle;
        self.current = 0.0;
        self.target = VisemeId::NEUTRAL;
        self.stats.current = 0.0;
        self.stats.target = VisemeId::NEUTRAL;

        self.sink.apply(VisemeId::NEUTRAL, 0.0)?;
        debug!("lip-sync stop");
        Ok(())
    }

    /// Run one frame of the animation.
    ///
    /// The embedding host calls this once per display frame while playing
    /// and re-arms the next tick on a `Rendered` outcome. A stale token
    /// (any transition since it was issued) skips the body entirely -
    /// cancellation is immediate, not best-effort.
    pub fn tick(&mut self, token: TickToken) -> VisageResult<TickOutcome> {
        if token.0 != self.generation || self.phase != Phase::Playing {
            self.stats.skipped_ticks += 1;
            return Ok(TickOutcome::Skipped);
        }

        let elapsed = self.clock.now().delta(self.started_at);
        self.frames += 1;

        let (target, intensity) = match self.track.lookup(elapsed) {
            Some(cue) => (
                cue.viseme,
                self.shaper
                    .intensity(&cue, elapsed, self.config.global_intensity),
            ),
            // Interior gap or empty track: decay toward neutral under the
            // same smoothing law, no hard cut.
            None => (VisemeId::NEUTRAL, 0.0),
        };

        self.target = target;
        let s = self.config.clamped_smoothing();
        self.current += (f64::from(target.as_u8()) - self.current) * s;

        let viseme = VisemeId::new(self.current.round().clamp(0.0, 255.0) as u8);
        self.sink.apply(viseme, intensity)?;

        self.stats.frames = self.frames;
        self.stats.current = self.current;
        self.stats.target = self.target;
        trace!(
            frame = self.frames,
            current = self.current,
            target = target.as_u8(),
            intensity,
            "lip-sync tick"
        );

        Ok(TickOutcome::Rendered { viseme, intensity })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    use visage_core::{VisageError, VisemeEvent};

    use super::*;

    #[derive(Clone, Default)]
    struct TestClock(Rc<Cell<i64>>);

    impl TestClock {
        fn set_secs(&self, secs: f64) {
            self.0.set(MediaTime::from_secs_f64(secs).as_micros());
        }
    }

    impl TickClock for TestClock {
        fn now(&self) -> MediaTime {
            MediaTime::from_micros(self.0.get())
        }
    }

    #[derive(Clone, Default)]
    struct RecSink(Rc<Cell<usize>>, Rc<std::cell::RefCell<Vec<(u8, f32)>>>);

    impl RecSink {
        fn calls(&self) -> Vec<(u8, f32)> {
            self.1.borrow().clone()
        }
    }

    impl AvatarSink for RecSink {
        fn apply(&mut self, viseme: VisemeId, intensity: f32) -> VisageResult<()> {
            self.0.set(self.0.get() + 1);
            self.1.borrow_mut().push((viseme.as_u8(), intensity));
            Ok(())
        }
    }

    struct DeadSink;

    impl AvatarSink for DeadSink {
        fn apply(&mut self, _viseme: VisemeId, _intensity: f32) -> VisageResult<()> {
            Err(VisageError::Sink("model released".into()))
        }
    }

    fn sustained_track(id: u8, secs: f64) -> VisemeTrack {
        VisemeTrack::new(vec![VisemeEvent::new(
            VisemeId::new(id),
            MediaTime::ZERO,
            Duration::from_secs_f64(secs),
        )])
    }

    fn scheduler() -> (TestClock, LipSyncScheduler<TestClock, RecSink>) {
        let clock = TestClock::default();
        let sched = LipSyncScheduler::new(clock.clone(), RecSink::default());
        (clock, sched)
    }

    #[test]
    fn test_smoothing_matches_closed_form() {
        let (clock, mut sched) = scheduler();
        clock.set_secs(10.0);

        let token = sched.start(sustained_track(8, 100.0), Some(MediaTime::ZERO));
        for _ in 0..50 {
            sched.tick(token).unwrap();
        }

        // current after n ticks at constant target T from 0:
        // T * (1 - (1 - s)^n)
        let expected = 8.0 * (1.0 - 0.85f64.powi(50));
        assert!((sched.current() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_double_start_leaves_one_tick_chain() {
        let (clock, mut sched) = scheduler();
        clock.set_secs(1.0);

        let first = sched.start(sustained_track(3, 10.0), Some(MediaTime::ZERO));
        let second = sched.start(sustained_track(5, 10.0), Some(MediaTime::ZERO));

        assert_eq!(sched.tick(first).unwrap(), TickOutcome::Skipped);
        assert!(matches!(
            sched.tick(second).unwrap(),
            TickOutcome::Rendered { .. }
        ));
        assert_eq!(sched.stats().skipped_ticks, 1);
        assert_eq!(sched.frames(), 1);
    }

    #[test]
    fn test_pause_cancels_armed_tick() {
        let (clock, mut sched) = scheduler();
        clock.set_secs(1.0);

        let token = sched.start(sustained_track(3, 10.0), Some(MediaTime::ZERO));
        sched.tick(token).unwrap();
        let rendered = sched.sink().calls().len();

        sched.pause();
        assert_eq!(sched.phase(), Phase::Paused);
        // The armed-but-not-yet-run tick must not execute its body.
        assert_eq!(sched.tick(token).unwrap(), TickOutcome::Skipped);
        assert_eq!(sched.sink().calls().len(), rendered);
    }

    #[test]
    fn test_pause_resume_keeps_smoothed_state_and_frames() {
        let (clock, mut sched) = scheduler();
        clock.set_secs(1.0);

        let token = sched.start(sustained_track(8, 10.0), Some(MediaTime::ZERO));
        for _ in 0..5 {
            sched.tick(token).unwrap();
        }
        let mid = sched.current();
        assert!(mid > 0.0);

        sched.pause();
        let token = sched.resume(None);

        assert_eq!(sched.current(), mid);
        sched.tick(token).unwrap();
        // Frame counter continues across pause/resume; only (re)start resets it.
        assert_eq!(sched.frames(), 6);
    }

    #[test]
    fn test_resume_with_new_timestamp_rebases_elapsed() {
        let (clock, mut sched) = scheduler();
        let track = VisemeTrack::new(vec![
            VisemeEvent::new(VisemeId::new(1), MediaTime::ZERO, Duration::from_secs(1)),
            VisemeEvent::new(
                VisemeId::new(2),
                MediaTime::from_secs_f64(4.0),
                Duration::from_secs(1),
            ),
        ]);

        clock.set_secs(10.0);
        let token = sched.start(track, Some(MediaTime::from_secs_f64(9.5)));
        sched.tick(token).unwrap();
        // elapsed 0.5s -> first cue
        assert_eq!(sched.stats().target, VisemeId::new(1));

        sched.pause();
        // Audio seeked; its start now maps to clock position 5.5s.
        let token = sched.resume(Some(MediaTime::from_secs_f64(5.5)));
        sched.tick(token).unwrap();
        // elapsed 4.5s -> second cue
        assert_eq!(sched.stats().target, VisemeId::new(2));
    }

    #[test]
    fn test_stop_renders_neutral_and_cancels() {
        let (clock, mut sched) = scheduler();
        clock.set_secs(1.0);

        let token = sched.start(sustained_track(8, 10.0), Some(MediaTime::ZERO));
        for _ in 0..10 {
            sched.tick(token).unwrap();
        }

        sched.stop().unwrap();
        assert_eq!(sched.phase(), Phase::Idle);
        assert_eq!(sched.current(), 0.0);
        assert_eq!(sched.sink().calls().last(), Some(&(0, 0.0)));

        let rendered = sched.sink().calls().len();
        assert_eq!(sched.tick(token).unwrap(), TickOutcome::Skipped);
        assert_eq!(sched.sink().calls().len(), rendered);
    }

    #[test]
    fn test_empty_track_ticks_neutral_without_error() {
        let (clock, mut sched) = scheduler();
        clock.set_secs(1.0);

        let token = sched.start(VisemeTrack::empty(), None);
        let outcome = sched.tick(token).unwrap();

        assert_eq!(
            outcome,
            TickOutcome::Rendered {
                viseme: VisemeId::NEUTRAL,
                intensity: 0.0
            }
        );
        assert_eq!(sched.frames(), 1);
        assert_eq!(sched.sink().calls(), vec![(0, 0.0)]);
    }

    #[test]
    fn test_gap_decays_instead_of_snapping() {
        let (clock, mut sched) = scheduler();
        let track = VisemeTrack::new(vec![
            VisemeEvent::new(
                VisemeId::new(8),
                MediaTime::ZERO,
                Duration::from_secs_f64(0.2),
            ),
            VisemeEvent::new(
                VisemeId::new(2),
                MediaTime::from_secs_f64(5.0),
                Duration::from_secs_f64(0.2),
            ),
        ]);

        clock.set_secs(0.1);
        let token = sched.start(track, Some(MediaTime::ZERO));
        for _ in 0..20 {
            sched.tick(token).unwrap();
        }
        let before_gap = sched.current();
        assert!(before_gap > 5.0);

        // Move into the interior gap: value decays, never jumps to zero.
        clock.set_secs(1.0);
        sched.tick(token).unwrap();
        let in_gap = sched.current();
        assert!(in_gap < before_gap);
        assert!(in_gap > before_gap * 0.8);
        let (_, intensity) = *sched.sink().calls().last().unwrap();
        assert_eq!(intensity, 0.0);
    }

    #[test]
    fn test_sink_failure_propagates() {
        let clock = TestClock::default();
        let mut sched = LipSyncScheduler::new(clock.clone(), DeadSink);
        clock.set_secs(1.0);

        let token = sched.start(sustained_track(4, 10.0), Some(MediaTime::ZERO));
        assert!(matches!(sched.tick(token), Err(VisageError::Sink(_))));
    }

    #[test]
    fn test_smoothing_factor_is_clamped() {
        let clock = TestClock::default();
        let config = SchedulerConfig {
            smoothing: 50.0,
            ..Default::default()
        };
        let mut sched = LipSyncScheduler::with_config(clock.clone(), RecSink::default(), config);
        clock.set_secs(1.0);

        let token = sched.start(sustained_track(6, 10.0), Some(MediaTime::ZERO));
        sched.tick(token).unwrap();

        // s clamps to 1.0: converges in a single tick, no overshoot.
        assert_eq!(sched.current(), 6.0);
    }
}
