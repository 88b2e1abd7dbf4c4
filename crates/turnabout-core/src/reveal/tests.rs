use super::*;

const WORDS: [&str; 10] = [
    "Friends,", "Romans,", "countrymen.", "Lend", "me", "your", "ears.", "I", "come", "home.",
];

fn engine(breakpoints: &[usize]) -> RevealEngine {
    RevealEngine::new(
        WORDS.len(),
        breakpoints.iter().copied().collect(),
        RevealConfig {
            wpm: 120,
            settle_ms: 800,
            finish_settle_ms: 800,
        },
    )
}

/// Drives the engine on a 10 ms clock, resuming every pause `resume_after_ms`
/// later, and returns every event with its timestamp.
fn drive(
    engine: &mut RevealEngine,
    resume_after_ms: u64,
    until_ms: u64,
) -> Vec<(u64, RevealEvent)> {
    let mut events = Vec::new();
    let mut resume_at = None;
    let mut now = 0u64;

    while now <= until_ms {
        if resume_at.is_some_and(|at| now >= at) {
            engine.resume(now).unwrap();
            resume_at = None;
        }
        if let Some(event) = engine.tick(now) {
            if matches!(event, RevealEvent::Paused { .. }) {
                resume_at = Some(now + resume_after_ms);
            }
            events.push((now, event));
            if event == RevealEvent::Finished {
                break;
            }
        }
        now += 10;
    }

    events
}

#[test]
fn interval_follows_wpm_with_floor() {
    assert_eq!(tick_interval_ms(120), 500);
    assert_eq!(tick_interval_ms(60), 1_000);
    assert_eq!(tick_interval_ms(0), 1_000);
    assert_eq!(tick_interval_ms(30), 1_000);
    assert_eq!(tick_interval_ms(600), 100);
}

#[test]
fn first_word_appears_one_interval_after_start() {
    let mut engine = engine(&[]);
    engine.start(1_000).unwrap();

    assert_eq!(engine.phase(), RevealPhase::Running);
    assert_eq!(engine.tick(1_499), None);
    assert_eq!(engine.tick(1_500), Some(RevealEvent::Revealed { count: 1 }));
    assert_eq!(engine.tick(1_999), None);
    assert_eq!(engine.tick(2_000), Some(RevealEvent::Revealed { count: 2 }));
}

#[test]
fn exit_before_first_tick_cancels_everything() {
    let mut engine = engine(&[4]);
    engine.start(0).unwrap();
    engine.exit();

    assert_eq!(engine.phase(), RevealPhase::Idle);
    assert_eq!(engine.revealed_count(), 0);
    for now in [500, 1_000, 60_000] {
        assert_eq!(engine.tick(now), None);
    }
    assert_eq!(engine.revealed_count(), 0);
}

#[test]
fn exit_while_settling_drops_the_pending_pause() {
    let mut engine = engine(&[2]);
    engine.start(0).unwrap();
    engine.tick(500);
    engine.tick(1_000);
    assert!(engine.awaiting_turn());

    engine.exit();
    assert_eq!(engine.tick(5_000), None);
    assert_eq!(engine.phase(), RevealPhase::Idle);
    assert_eq!(engine.revealed_count(), 2);
}

#[test]
fn pauses_after_settle_delay_at_breakpoint() {
    let mut engine = engine(&[3]);
    engine.start(0).unwrap();

    assert_eq!(engine.tick(500), Some(RevealEvent::Revealed { count: 1 }));
    assert_eq!(engine.tick(1_000), Some(RevealEvent::Revealed { count: 2 }));
    assert_eq!(engine.tick(1_500), Some(RevealEvent::Revealed { count: 3 }));
    assert_eq!(engine.phase(), RevealPhase::Running);
    assert!(engine.awaiting_turn());

    assert_eq!(engine.tick(2_299), None);
    assert_eq!(engine.tick(2_300), Some(RevealEvent::Paused { breakpoint: 3 }));
    assert_eq!(engine.phase(), RevealPhase::Paused);

    assert_eq!(engine.tick(60_000), None);
    assert_eq!(engine.revealed_count(), 3);

    engine.resume(60_000).unwrap();
    assert_eq!(engine.paragraph_breaks(), &[3]);
    assert_eq!(engine.next_breakpoint_index(), 1);
    assert_eq!(engine.tick(60_499), None);
    assert_eq!(engine.tick(60_500), Some(RevealEvent::Revealed { count: 4 }));
}

#[test]
fn invalid_transitions_leave_state_untouched() {
    let mut engine = engine(&[3]);
    assert_eq!(
        engine.resume(0),
        Err(RevealError::InvalidTransition {
            from: RevealPhase::Idle,
            attempted: Transition::Resume,
        })
    );

    engine.start(0).unwrap();
    engine.tick(500);
    assert_eq!(
        engine.start(600),
        Err(RevealError::InvalidTransition {
            from: RevealPhase::Running,
            attempted: Transition::Start,
        })
    );
    assert!(engine.set_breakpoints(Breakpoints::empty()).is_err());
    assert_eq!(engine.revealed_count(), 1);
    assert_eq!(engine.tick(1_000), Some(RevealEvent::Revealed { count: 2 }));
}

#[test]
fn second_resume_does_not_duplicate_paragraph_break() {
    let mut engine = engine(&[3]);
    engine.start(0).unwrap();
    let events = drive(&mut engine, u64::MAX / 2, 5_000);
    assert_eq!(events.last(), Some(&(2_300, RevealEvent::Paused { breakpoint: 3 })));

    engine.resume(5_000).unwrap();
    assert!(engine.resume(5_001).is_err());
    assert_eq!(engine.paragraph_breaks(), &[3]);
    assert_eq!(engine.next_breakpoint_index(), 1);
}

#[test]
fn reveal_conserves_words_and_pauses_only_at_breakpoints() {
    let breakpoints = [3, 7];
    let mut engine = engine(&breakpoints);
    engine.start(0).unwrap();

    let events = drive(&mut engine, 1_000, 120_000);
    let mut last = 0usize;
    let mut pauses = Vec::new();
    for (_, event) in &events {
        match *event {
            RevealEvent::Revealed { count } => {
                assert_eq!(count, last + 1);
                last = count;
            }
            RevealEvent::Paused { breakpoint } => {
                assert_eq!(breakpoint, last);
                pauses.push(breakpoint);
            }
            RevealEvent::Finished => assert_eq!(last, WORDS.len()),
        }
    }

    assert_eq!(pauses, breakpoints);
    assert_eq!(engine.phase(), RevealPhase::Finished);
    assert_eq!(engine.revealed_count(), WORDS.len());
    assert_eq!(engine.paragraph_breaks(), &breakpoints);
    assert_eq!(engine.progress_pct(), 100);
    assert_eq!(engine.drain_word_updates(), WORDS.len() as u32);
    assert_eq!(engine.drain_word_updates(), 0);
}

#[test]
fn finish_waits_for_settle_delay() {
    let mut engine = engine(&[]);
    engine.start(0).unwrap();
    let events = drive(&mut engine, 0, 20_000);
    let (revealed_at, _) = events[events.len() - 2];
    let (finished_at, finished) = events[events.len() - 1];

    assert_eq!(revealed_at, 5_000);
    assert_eq!(finished, RevealEvent::Finished);
    assert_eq!(finished_at, revealed_at + 800);
}

#[test]
fn breakpoint_on_last_word_finishes_instead_of_pausing() {
    let mut engine = engine(&[WORDS.len()]);
    engine.start(0).unwrap();
    let events = drive(&mut engine, 0, 20_000);
    assert!(
        events
            .iter()
            .all(|(_, event)| !matches!(event, RevealEvent::Paused { .. }))
    );
    assert_eq!(engine.phase(), RevealPhase::Finished);
}

#[test]
fn empty_text_finishes_on_first_tick() {
    let mut engine = RevealEngine::new(0, Breakpoints::empty(), RevealConfig::default());
    engine.start(0).unwrap();
    let interval = u64::from(tick_interval_ms(RevealConfig::default().wpm));

    assert_eq!(engine.tick(interval - 1), None);
    assert_eq!(engine.tick(interval), Some(RevealEvent::Finished));
    assert_eq!(engine.revealed_count(), 0);
    assert_eq!(engine.progress(), 0.0);
    assert_eq!(engine.displayed_text(&[]), "");
}

#[test]
fn restart_after_finish_resets_run_state() {
    let mut engine = engine(&[3]);
    engine.start(0).unwrap();
    drive(&mut engine, 100, 60_000);
    assert_eq!(engine.phase(), RevealPhase::Finished);

    engine.start(70_000).unwrap();
    assert_eq!(engine.revealed_count(), 0);
    assert_eq!(engine.next_breakpoint_index(), 0);
    assert!(engine.paragraph_breaks().is_empty());
    assert_eq!(engine.tick(70_500), Some(RevealEvent::Revealed { count: 1 }));
}

#[test]
fn wpm_change_applies_from_next_tick() {
    let mut engine = engine(&[]);
    engine.start(0).unwrap();
    engine.set_wpm(240);
    assert_eq!(engine.tick(250), None);
    assert_eq!(engine.tick(500), Some(RevealEvent::Revealed { count: 1 }));
    assert_eq!(engine.tick(749), None);
    assert_eq!(engine.tick(750), Some(RevealEvent::Revealed { count: 2 }));
}

#[test]
fn text_views_follow_revealed_words_and_breaks() {
    let mut engine = engine(&[3, 7]);
    engine.start(0).unwrap();
    drive(&mut engine, 100, 60_000);

    let paragraphs: Vec<&[&str]> = engine.paragraphs(&WORDS).collect();
    assert_eq!(paragraphs.len(), 3);
    assert_eq!(paragraphs[0], &["Friends,", "Romans,", "countrymen."]);
    assert_eq!(paragraphs[2], &["I", "come", "home."]);
    assert_eq!(
        engine.displayed_text(&WORDS),
        "Friends, Romans, countrymen. Lend me your ears. I come home."
    );
}
