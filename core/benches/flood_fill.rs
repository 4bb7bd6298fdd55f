use criterion::{criterion_group, criterion_main, Criterion};
use estopim_core::*;

fn bench_generate(c: &mut Criterion) {
    let config = GameConfig::new(60, 500);
    c.bench_function("generate_60x60_500", |b| {
        b.iter(|| GameEngine::new(config, 42).unwrap())
    });
}

fn bench_flood_reveal(c: &mut Criterion) {
    // sparse board: the safe-region reveal cascades across most of the grid
    let config = GameConfig::new(60, 10);
    c.bench_function("start_and_clear_60x60_10", |b| {
        b.iter(|| {
            let mut engine = GameEngine::new(config, 42).unwrap();
            let size = engine.grid().size();
            for row in 0..size {
                for col in 0..size {
                    let cell = *engine.grid().cell((row, col));
                    if cell.is_mine || cell.is_revealed {
                        continue;
                    }
                    engine.reveal((row, col)).unwrap();
                }
            }
            engine
        })
    });
}

criterion_group!(benches, bench_generate, bench_flood_reveal);
criterion_main!(benches);
