use criterion::{black_box, criterion_group, criterion_main, Criterion};
use chrono::Utc;
use orrery::aspects::AspectDetector;
use orrery::catalog::builtin_catalog;
use orrery::ephemeris::{position_from_degree, BodyState, LightSource, PositionEngine, SkySnapshot};
use orrery::timeline::TimeWindow;

fn bench_classify(c: &mut Criterion) {
    let detector = AspectDetector::new();

    c.bench_function("classify_distance", |b| {
        b.iter(|| {
            let distance = AspectDetector::circular_distance(black_box(100.0), black_box(221.0));
            detector.classify(distance).map(|rule| rule.kind)
        })
    });
}

fn bench_detect_builtin(c: &mut Criterion) {
    let window = TimeWindow::default();
    let engine = PositionEngine::new(window.epoch);
    let light = LightSource::new(window.start, 270.0, 1.0);
    let snapshot = engine.snapshot(builtin_catalog(), &light, window.epoch);
    let detector = AspectDetector::new();

    c.bench_function("detect_builtin_sky", |b| {
        b.iter(|| detector.detect(black_box(&snapshot)))
    });
}

fn bench_detect_crowded(c: &mut Criterion) {
    let bodies = (0..60)
        .map(|i| BodyState {
            name: format!("body_{}", i),
            position: position_from_degree(i as f64 * 6.1),
        })
        .collect();
    let snapshot = SkySnapshot {
        time: Utc::now(),
        bodies,
        light_degree: 0.0,
    };
    let detector = AspectDetector::new();

    c.bench_function("detect_60_bodies", |b| {
        b.iter(|| detector.detect(black_box(&snapshot)))
    });
}

criterion_group!(benches, bench_classify, bench_detect_builtin, bench_detect_crowded);
criterion_main!(benches);
