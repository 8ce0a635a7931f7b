use criterion::{black_box, criterion_group, criterion_main, Criterion};
use chrono::Duration;
use orrery::catalog::builtin_catalog;
use orrery::ephemeris::{LightSource, PositionEngine};
use orrery::timeline::{SimulationClock, SpeedMode, TimeWindow};

fn bench_single_position(c: &mut Criterion) {
    let window = TimeWindow::default();
    let engine = PositionEngine::new(window.epoch);
    let moon = builtin_catalog().get("Moon").cloned();
    let time = window.epoch + Duration::days(40);

    c.bench_function("position_moon", |b| {
        b.iter(|| moon.as_ref().map(|body| engine.position(black_box(body), black_box(time))))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let window = TimeWindow::default();
    let engine = PositionEngine::new(window.epoch);
    let light = LightSource::new(window.start, 270.0, 1.0);

    c.bench_function("snapshot_builtin", |b| {
        b.iter(|| engine.snapshot(builtin_catalog(), &light, black_box(window.epoch)))
    });
}

fn bench_full_window_sweep(c: &mut Criterion) {
    let window = TimeWindow::default();
    let engine = PositionEngine::new(window.epoch);
    let light = LightSource::new(window.start, 270.0, 1.0);

    // One pass of the window at the fastest preset
    c.bench_function("sweep_window_fast", |b| {
        b.iter(|| {
            let mut clock = SimulationClock::new(window);
            clock.set_speed(SpeedMode::Fast);
            clock.jump_to(window.start);
            clock.play();
            let mut count = 0usize;
            loop {
                let snapshot = engine.snapshot(builtin_catalog(), &light, clock.cursor());
                count += snapshot.bodies.len();
                clock.tick();
                if clock.cursor() == window.start {
                    break;
                }
            }
            black_box(count)
        })
    });
}

criterion_group!(benches, bench_single_position, bench_snapshot, bench_full_window_sweep);
criterion_main!(benches);
