//! Integration Tests — end-to-end engagement scenarios
//!
//! Whole-session flows across emotion, topic memory and the initiative engine,
//! driven through the public API with a fixed clock origin and seeded RNG.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use companion_core::config::{CompanionConfig, InitiativeConfig};
use companion_core::emotion::EmotionalState;
use companion_core::engagement::Engagement;
use companion_core::initiative::{InitiativeEngine, InitiativeKind};
use companion_core::persona::Persona;
use companion_core::topics::{DEFAULT_RECENT_CAPACITY, TopicMemory, Vocabulary};
use companion_core::types::{CommunicationStyle, InfoCategory, Mood, Topic, UserAge};

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

fn memory(labels: &[&str], capacity: usize) -> TopicMemory {
    let vocab = Vocabulary::new(labels.iter().map(|l| Topic::from(*l))).expect("non-empty");
    TopicMemory::new(vocab, capacity)
}

fn session(age: i64, style: CommunicationStyle, t0: Instant) -> Engagement {
    let persona = Persona::new("Alice", UserAge::new(age).expect("valid age"), style);
    Engagement::new(persona, &InitiativeConfig::default(), t0, StdRng::seed_from_u64(2024))
        .expect("non-empty vocabulary")
}

// ---------------------------------------------------------------------------
// Topic detection and sentiment
// ---------------------------------------------------------------------------

#[test]
fn longer_topic_name_wins_and_both_become_favorites() {
    let mut mem = memory(&["music", "movies", "art"], DEFAULT_RECENT_CAPACITY);

    let detected = mem.update("I love music and I love movies");
    assert_eq!(detected, Some(Topic::from("movies")));

    mem.update("I love music");
    assert!(mem.favorite_topics().contains(&Topic::from("music")));
    assert!(mem.favorite_topics().contains(&Topic::from("movies")));
    assert_eq!(mem.current_topic(), Some(&Topic::from("music")));
}

#[test]
fn personal_facts_are_remembered_across_turns() {
    let t0 = Instant::now();
    let mut e = session(30, CommunicationStyle::Formal, t0);
    e.observe("I work as a nurse. It is tiring", t0 + secs(2));
    e.observe("my hobby is chess. quite relaxing", t0 + secs(4));

    let info = e.topics().important_info();
    assert_eq!(info.get(&InfoCategory::Work).map(String::as_str), Some("work as a nurse"));
    assert_eq!(info.get(&InfoCategory::Hobbies).map(String::as_str), Some("hobby is chess"));
}

// ---------------------------------------------------------------------------
// Initiative decision scenarios
// ---------------------------------------------------------------------------

#[test]
fn short_message_run_counts_and_resets() {
    let t0 = Instant::now();
    let mut e = session(20, CommunicationStyle::Friendly, t0);
    e.observe("hi", t0 + secs(1));
    assert_eq!(e.initiative().short_message_counter(), 1);
    e.observe("not very long", t0 + secs(2));
    assert_eq!(e.initiative().short_message_counter(), 2);
    e.observe("and this one is long", t0 + secs(3));
    assert_eq!(e.initiative().short_message_counter(), 0);
}

#[test]
fn long_pause_with_two_short_messages_forces_initiative() {
    let t0 = Instant::now();
    let mut engine = InitiativeEngine::new(InitiativeConfig::default(), t0);
    engine.record_message_length(2);
    engine.record_message_length(3);

    let state = EmotionalState::new(Mood::Good, 50, 0, 50);
    let decision = engine.evaluate(t0 + secs(25), &state);
    assert!(decision.score <= 0.6, "score {}", decision.score);
    assert!(decision.long_pause);
    assert!(decision.needed);
}

#[test]
fn tired_persona_asks_questions() {
    let mut engine = InitiativeEngine::new(InitiativeConfig::default(), Instant::now());
    for ok in [true, true, true, true, true, false] {
        engine.record_outcome(ok);
    }
    let state = EmotionalState::new(Mood::Good, 20, 0, 80);
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(engine.choose_kind(&state, &mut rng), InitiativeKind::Question);
}

#[test]
fn exhausted_vocabulary_resets_recent_window() {
    let labels = ["t1", "t2", "t3", "t4", "t5", "t6", "t7", "t8"];
    let mut mem = memory(&labels, labels.len());
    for label in labels {
        mem.push_recent(Topic::from(label));
    }
    assert_eq!(mem.recent_topics().len(), 8);

    let engine = InitiativeEngine::new(InitiativeConfig::default(), Instant::now());
    let mut rng = StdRng::seed_from_u64(8);
    let topic = engine.choose_next_topic(&mut mem, &mut rng);
    assert!(mem.recent_topics().is_empty());
    assert!(labels.contains(&topic.as_str()));
}

// ---------------------------------------------------------------------------
// Adaptive cadence over a whole session
// ---------------------------------------------------------------------------

#[test]
fn engaged_user_shortens_the_interval() {
    let t0 = Instant::now();
    let mut e = session(40, CommunicationStyle::Playful, t0);
    let mut now = t0;

    for _ in 0..3 {
        now += secs(5);
        let initiative = e.take_initiative(now);
        now += secs(5);
        let reply = format!("Honestly {} is something I could talk about for hours", initiative.topic);
        let turn = e.observe(&reply, now);
        assert_eq!(turn.feedback, Some(true));
    }

    let state = e.initiative().state();
    assert_eq!(state.successful_initiatives, 3);
    assert!((state.interval_between_initiatives - 60.0 * 0.9 * 0.9 * 0.9).abs() < 1e-9);
}

#[test]
fn curt_user_lengthens_the_interval() {
    let t0 = Instant::now();
    let mut e = session(40, CommunicationStyle::Formal, t0);
    let initiative = e.take_initiative(t0 + secs(5));
    let turn = e.observe(initiative.topic.as_str(), t0 + secs(9));
    assert_eq!(turn.feedback, Some(false));
    assert!((e.initiative().state().interval_between_initiatives - 72.0).abs() < 1e-9);
}

#[test]
fn idle_user_eventually_gets_an_initiative() {
    let t0 = Instant::now();
    let mut e = session(16, CommunicationStyle::Friendly, t0);
    e.observe("ok", t0 + secs(2));
    e.observe("sure", t0 + secs(4));

    let decision = e.evaluate(t0 + secs(45));
    assert!(decision.needed);
    let initiative = e.take_initiative(t0 + secs(45));
    assert_eq!(e.initiative().short_message_counter(), 0);
    assert!(!initiative.text(CommunicationStyle::Friendly).is_empty());
}

// ---------------------------------------------------------------------------
// Configuration drives the engine
// ---------------------------------------------------------------------------

#[test]
fn tuned_config_changes_cadence() {
    let config = CompanionConfig::from_toml(
        r"
        [initiative]
        initial_interval_secs = 100.0
        success_interval_factor = 0.5
        min_interval_secs = 40.0
        ",
    )
    .expect("valid config");

    let mut engine = InitiativeEngine::new(config.initiative, Instant::now());
    engine.record_outcome(true);
    assert!((engine.state().interval_between_initiatives - 50.0).abs() < 1e-9);
    engine.record_outcome(true);
    assert!((engine.state().interval_between_initiatives - 40.0).abs() < 1e-9);
}
