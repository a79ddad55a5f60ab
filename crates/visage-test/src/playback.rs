//! Playback simulator - frame-accurate lip-sync runs with seeded jitter
//!
//! Real hosts never deliver frames on an exact cadence; the simulator
//! reproduces that with a seeded jitter model so a failing run can be
//! replayed bit-for-bit from its seed.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use visage_core::{MediaTime, VisageResult, VisemeId};
use visage_engine::{LipSyncScheduler, SchedulerConfig, TickClock};
use visage_timeline::VisemeTrack;

use crate::harness::{RecordingSink, ScriptedClock};

/// Seeded frame-interval jitter.
pub struct FrameJitter {
    rng: StdRng,
    max: Duration,
}

impl FrameJitter {
    pub fn seeded(seed: u64, max: Duration) -> Self {
        FrameJitter {
            rng: StdRng::seed_from_u64(seed),
            max,
        }
    }

    /// Jittered frame interval around `base`, never shorter than 1 ms.
    pub fn apply(&mut self, base: Duration) -> Duration {
        let max_us = self.max.as_micros() as i64;
        if max_us == 0 {
            return base;
        }
        let jitter = self.rng.gen_range(-max_us..=max_us);
        let us = (base.as_micros() as i64 + jitter).max(1_000);
        Duration::from_micros(us as u64)
    }
}

/// Summary of one simulated playback.
#[derive(Clone, Debug, Default)]
pub struct PlaybackReport {
    /// Frames rendered.
    pub frames: u64,
    /// Largest change in rendered viseme id between consecutive frames.
    pub max_step: u8,
    /// Frames that rendered the neutral shape.
    pub neutral_frames: u64,
    /// Highest intensity rendered.
    pub peak_intensity: f32,
    /// Viseme of the final rendered frame.
    pub final_viseme: VisemeId,
}

/// Drives a scheduler through a full utterance on a scripted clock.
pub struct PlaybackSimulator {
    clock: ScriptedClock,
    sink: RecordingSink,
    scheduler: LipSyncScheduler<ScriptedClock, RecordingSink>,
    frame_interval: Duration,
    jitter: Option<FrameJitter>,
}

impl PlaybackSimulator {
    pub fn new(config: SchedulerConfig) -> Self {
        let clock = ScriptedClock::new();
        let sink = RecordingSink::new();
        let scheduler = LipSyncScheduler::with_config(clock.clone(), sink.clone(), config);
        PlaybackSimulator {
            clock,
            sink,
            scheduler,
            frame_interval: Duration::from_micros(16_667),
            jitter: None,
        }
    }

    pub fn with_jitter(mut self, seed: u64, max: Duration) -> Self {
        self.jitter = Some(FrameJitter::seeded(seed, max));
        self
    }

    pub fn sink(&self) -> &RecordingSink {
        &self.sink
    }

    /// Play `track` from time zero for `total`, ticking every (jittered)
    /// frame interval.
    pub fn run(&mut self, track: VisemeTrack, total: Duration) -> VisageResult<PlaybackReport> {
        self.clock.set(MediaTime::ZERO);
        let token = self.scheduler.start(track, Some(MediaTime::ZERO));
        let end = MediaTime::ZERO + total;

        while self.clock.now() < end {
            let step = match &mut self.jitter {
                Some(jitter) => jitter.apply(self.frame_interval),
                None => self.frame_interval,
            };
            self.clock.advance(step);
            self.scheduler.tick(token)?;
        }

        Ok(self.report())
    }

    /// End the utterance; the scheduler force-renders neutral.
    pub fn stop(&mut self) -> VisageResult<()> {
        self.scheduler.stop()
    }

    fn report(&self) -> PlaybackReport {
        let frames = self.sink.frames();
        let mut report = PlaybackReport {
            frames: frames.len() as u64,
            ..Default::default()
        };

        let mut previous: Option<u8> = None;
        for (viseme, intensity) in &frames {
            let id = viseme.as_u8();
            if let Some(prev) = previous {
                report.max_step = report.max_step.max(id.abs_diff(prev));
            }
            previous = Some(id);
            if viseme.is_neutral() {
                report.neutral_frames += 1;
            }
            report.peak_intensity = report.peak_intensity.max(*intensity);
            report.final_viseme = *viseme;
        }
        report
    }
}
