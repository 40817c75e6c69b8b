use criterion::{Criterion, criterion_group, criterion_main};
use minefield_core::{
    Board, BoardGenerator, Coord, DEFAULT_MAX_ATTEMPTS, Difficulty, GameState,
    RandomBoardGenerator,
};
use std::hint::black_box;

fn generate_tiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_with_safe_start");
    for difficulty in Difficulty::ALL {
        group.bench_function(difficulty.name(), |b| {
            let mut generator = RandomBoardGenerator::new(0);
            b.iter(|| {
                generator
                    .generate_with_safe_start(black_box(difficulty.config()), DEFAULT_MAX_ATTEMPTS)
                    .ok()
            })
        });
    }
    group.finish();
}

fn full_board_cascade(c: &mut Criterion) {
    let board = Board::from_mine_coords((Coord::MAX, Coord::MAX), &[(0, 0)])
        .expect("single mine fits");
    c.bench_function("full_board_cascade", |b| {
        b.iter(|| {
            let mut game = GameState::new(board.clone());
            game.reveal(black_box((254, 254)))
        })
    });
}

criterion_group!(benches, generate_tiers, full_board_cascade);
criterion_main!(benches);
