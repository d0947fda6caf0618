//! Companion Benchmark Suite
//!
//! Per-turn cost of the engagement pipeline. Everything here runs between
//! reading a line and printing a reply, so it should stay far below human
//! typing latency:
//!   observe_single_turn ............... < 20μs
//!   initiative_evaluate ............... < 1μs
//!   choose_next_topic_13_topics ....... < 5μs
//!   session_200_turns ................. < 5ms

use std::time::{Duration, Instant};

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use companion_core::config::InitiativeConfig;
use companion_core::emotion::EmotionalState;
use companion_core::engagement::Engagement;
use companion_core::initiative::InitiativeEngine;
use companion_core::persona::Persona;
use companion_core::topics::{DEFAULT_RECENT_CAPACITY, TopicMemory, Vocabulary};
use companion_core::types::{CommunicationStyle, Mood, UserAge};

const MESSAGES: &[&str] = &[
    "hi",
    "I love music, especially old jazz records from the fifties.",
    "school was terrible today",
    "ok",
    "my hobby is drawing. I do it every evening",
    "what do you think about games and anime?",
    "cool",
    "I study at a small school near the river.",
];

fn engagement(t0: Instant) -> Option<Engagement> {
    let persona = Persona::new(
        "Alice",
        UserAge::new(15).ok()?,
        CommunicationStyle::Friendly,
    );
    Engagement::new(persona, &InitiativeConfig::default(), t0, StdRng::seed_from_u64(1)).ok()
}

/// Benchmark: one observed user message (target: < 20μs).
fn bench_observe(c: &mut Criterion) {
    let t0 = Instant::now();
    let Some(mut e) = engagement(t0) else { return };
    let mut tick = 0u64;
    c.bench_function("observe_single_turn", |b| {
        b.iter(|| {
            tick += 1;
            let message = MESSAGES[(tick as usize) % MESSAGES.len()];
            black_box(e.observe(black_box(message), t0 + Duration::from_millis(tick)));
        });
    });
}

/// Benchmark: initiative evaluation alone (target: < 1μs).
fn bench_evaluate(c: &mut Criterion) {
    let t0 = Instant::now();
    let mut engine = InitiativeEngine::new(InitiativeConfig::default(), t0);
    engine.record_message_length(3);
    let state = EmotionalState::new(Mood::Good, 80, 20, 25);
    c.bench_function("initiative_evaluate", |b| {
        b.iter(|| black_box(engine.evaluate(black_box(t0 + Duration::from_secs(30)), &state)));
    });
}

/// Benchmark: next-topic choice over a teen vocabulary (target: < 5μs).
fn bench_choose_topic(c: &mut Criterion) {
    let t0 = Instant::now();
    let Ok(age) = UserAge::new(15) else { return };
    let persona = Persona::new("Alice", age, CommunicationStyle::Playful);
    let Ok(vocabulary) = Vocabulary::new(persona.topics()) else { return };
    let mut memory = TopicMemory::new(vocabulary, DEFAULT_RECENT_CAPACITY);
    memory.update("I love music and games");
    memory.update("anime is terrible");
    let engine = InitiativeEngine::new(InitiativeConfig::default(), t0);
    let mut rng = StdRng::seed_from_u64(3);

    c.bench_function("choose_next_topic_13_topics", |b| {
        b.iter(|| black_box(engine.choose_next_topic(&mut memory, &mut rng)));
    });
}

/// Benchmark: a whole 200-turn session with initiatives (target: < 5ms).
fn bench_session(c: &mut Criterion) {
    c.bench_function("session_200_turns", |b| {
        b.iter(|| {
            let t0 = Instant::now();
            let Some(mut e) = engagement(t0) else { return };
            let mut now = t0;
            for i in 0..200u64 {
                now += Duration::from_secs(i % 37);
                let message = MESSAGES[(i as usize) % MESSAGES.len()];
                let turn = e.observe(message, now);
                if turn.decision.needed {
                    black_box(e.take_initiative(now));
                }
            }
            black_box(e.initiative().state().initiative_count);
        });
    });
}

criterion_group!(
    benches,
    bench_observe,
    bench_evaluate,
    bench_choose_topic,
    bench_session,
);
criterion_main!(benches);
