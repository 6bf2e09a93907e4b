use criterion::{black_box, criterion_group, criterion_main, Criterion};
use memory_match::core::deck::deck_rng;
use memory_match::core::{build_deck, Session, SessionConfig, DEFAULT_FACE_POOL};
use memory_match::types::{MATCH_SETTLE_MS, TICK_MS};

fn config() -> SessionConfig {
    SessionConfig::default()
        .with_grid(6, 6)
        .with_moves(0)
        .with_preview_ms(0)
        .with_seed(12345)
}

fn bench_build_deck(c: &mut Criterion) {
    let mut rng = deck_rng(Some(12345));
    c.bench_function("build_deck_6x6", |b| {
        b.iter(|| build_deck(black_box(6), black_box(6), DEFAULT_FACE_POOL, &mut rng))
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut session = Session::headless(config());
    session.start().unwrap();

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            session.tick(black_box(TICK_MS));
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut session = Session::headless(config());
    session.start().unwrap();

    c.bench_function("session_snapshot", |b| b.iter(|| session.snapshot()));
}

/// Clear a 6x6 board pair by pair with perfect memory.
fn bench_full_round(c: &mut Criterion) {
    c.bench_function("full_round_6x6", |b| {
        b.iter(|| {
            let mut session = Session::headless(config());
            session.start().unwrap();
            let mut by_pair = vec![Vec::new(); session.board().pair_count()];
            for (index, card) in session.board().cards().iter().enumerate() {
                by_pair[card.pair() as usize].push(index);
            }
            for cards in by_pair {
                for card in cards {
                    session.select(card);
                    session.reveal_settled(card);
                }
                session.tick(MATCH_SETTLE_MS);
            }
            black_box(session.score())
        })
    });
}

criterion_group!(
    benches,
    bench_build_deck,
    bench_tick,
    bench_snapshot,
    bench_full_round
);
criterion_main!(benches);
