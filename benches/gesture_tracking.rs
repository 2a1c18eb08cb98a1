use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use swipedeck::carousel::{CarouselController, GestureTracker};
use swipedeck::CarouselConfig;

fn bench_sample_recording(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_samples");

    for moves in [16usize, 128, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(moves), &moves, |b, &moves| {
            b.iter(|| {
                let mut tracker = GestureTracker::begin(400.0, 200.0, 0, 100);
                for step in 0..moves {
                    let x = 400.0 - step as f64 * 0.5;
                    tracker.record(x, x - 400.0, step as u64 * 4);
                }
                black_box(tracker.velocity())
            })
        });
    }

    group.finish();
}

fn bench_full_swipe(c: &mut Criterion) {
    c.bench_function("controller_swipe_cycle", |b| {
        let mut controller =
            CarouselController::with_manual_scheduler(8, CarouselConfig::default())
                .expect("valid controller");
        let mut now = 0u64;

        b.iter(|| {
            controller.begin_gesture(300.0, 100.0, now);
            for step in 1..=10u64 {
                let x = 300.0 - step as f64 * 8.0;
                black_box(controller.update_gesture(x, 101.0, now + step * 10));
            }
            black_box(controller.end_gesture(220.0, 101.0, now + 100));
            now += 1_000;
            controller.advance(now);
            if controller.current_index() + 1 == controller.item_count() {
                controller = CarouselController::with_manual_scheduler(8, CarouselConfig::default())
                    .expect("valid controller");
                now = 0;
            }
        })
    });
}

criterion_group!(benches, bench_sample_recording, bench_full_swipe);
criterion_main!(benches);
