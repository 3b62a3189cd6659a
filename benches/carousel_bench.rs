use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;
use rand::{rngs::StdRng, SeedableRng};
use ringmenu::{
    engine::RecordingHost,
    options::{ItemOptions, Options},
    CarouselCommand, CarouselEngine,
};

const VIEWPORT: (u32, u32) = (1280, 720);

fn engine_with(count: usize) -> CarouselEngine {
    let mut options = Options::default();
    options.items = (0..count)
        .map(|i| ItemOptions {
            label: format!("Item {i}"),
            destination: format!("/item/{i}"),
            sound: None,
        })
        .collect();
    let mut rng = StdRng::seed_from_u64(7);
    CarouselEngine::with_rng(options, VIEWPORT, &mut rng).unwrap()
}

fn frame_update_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_update");

    for count in [5, 20, 100] {
        let mut engine = engine_with(count);
        let mut host = RecordingHost::default();
        group.bench_function(format!("{count}_items"), |b| {
            b.iter(|| {
                engine.execute(CarouselCommand::RotateRight);
                black_box(engine.update().len());
                engine.flush(&mut host);
                host.effects.clear();
            });
        });
    }
    group.finish();
}

fn pick_benchmark(c: &mut Criterion) {
    let mut engine = engine_with(20);
    let _ = engine.update();
    let center = Vec2::new(VIEWPORT.0 as f32 / 2.0, VIEWPORT.1 as f32 * 0.6);

    c.bench_function("pick_at_center", |b| {
        b.iter(|| black_box(engine.pick_at(black_box(center))));
    });
}

criterion_group!(benches, frame_update_benchmark, pick_benchmark);
criterion_main!(benches);
