//! Benchmarks for the per-frame lip-sync path

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use visage_core::{MediaTime, VisemeEvent, VisemeId};
use visage_engine::{LipSyncScheduler, NullSink};
use visage_test::harness::{scenarios, ScriptedClock};
use visage_timeline::{EnvelopeConfig, IntensityShaper, VisemeTrack};

fn dense_track(cues: usize) -> VisemeTrack {
    let events = (0..cues)
        .map(|i| {
            VisemeEvent::new(
                VisemeId::new((i % 15) as u8),
                MediaTime::from_millis(i as i64 * 80),
                Duration::from_millis(80),
            )
        })
        .collect();
    VisemeTrack::new(events)
}

fn bench_track_lookup(c: &mut Criterion) {
    let track = dense_track(1_000);
    let mid = MediaTime::from_millis(40_000);

    c.bench_function("track_lookup_1k_cues", |b| {
        b.iter(|| black_box(track.lookup(black_box(mid))))
    });
}

fn bench_envelope_intensity(c: &mut Criterion) {
    let shaper = IntensityShaper::new(EnvelopeConfig::default());
    let event = VisemeEvent::new(
        VisemeId::new(8),
        MediaTime::ZERO,
        Duration::from_millis(200),
    );
    let t = MediaTime::from_millis(100);

    c.bench_function("envelope_intensity", |b| {
        b.iter(|| black_box(shaper.intensity(black_box(&event), t, 1.0)))
    });
}

fn bench_scheduler_tick(c: &mut Criterion) {
    let clock = ScriptedClock::new();
    let mut scheduler = LipSyncScheduler::new(clock.clone(), NullSink);
    let token = scheduler.start(scenarios::sustained(8, 3_600.0), Some(MediaTime::ZERO));

    c.bench_function("scheduler_tick", |b| {
        b.iter(|| {
            clock.advance(Duration::from_micros(16_667));
            black_box(scheduler.tick(token))
        })
    });
}

criterion_group!(
    benches,
    bench_track_lookup,
    bench_envelope_intensity,
    bench_scheduler_tick
);
criterion_main!(benches);
