//! Integration tests for Key Highlight
//!
//! These tests drive the App the way the terminal loop does: key presses
//! routed to the drill on screen, ticks with explicit times, resets and
//! report export.

use key_highlight::config::Config;
use key_highlight::highlight::sequence::SequenceAdvancer;
use key_highlight::highlight::Zone;
use key_highlight::ui::{App, AppState, AppView, KeyLook};
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn config_with(text: &str, words: &[&str]) -> Config {
    let mut config = Config::default();
    config.drill.text = text.to_string();
    config.drill.words = words.iter().map(|w| w.to_string()).collect();
    config
}

/// Type every character of `text` at the same instant
fn type_text(app: &mut App, text: &str, now: Instant) {
    for c in text.chars() {
        app.handle_char_at(c, now);
    }
}

// ---------------------------------------------------------------------------
// Letter drill
// ---------------------------------------------------------------------------

#[test]
fn letter_drill_advances_on_correct_keys() {
    let t0 = Instant::now();
    let mut app = App::new_at(config_with("cat", &["dog"]), t0);

    assert_eq!(app.tracker.next_key(), Some('c'));
    app.handle_char_at('c', t0);
    assert_eq!(app.tracker.position(), 1);
    assert_eq!(app.tracker.next_key(), Some('a'));

    app.handle_char_at('x', t0);
    assert_eq!(app.tracker.position(), 1);
    assert_eq!(app.tracker.incorrect_keys(), &['x']);
    assert_eq!(app.mistakes.get(&'x'), Some(&1));

    app.handle_char_at('a', t0);
    assert_eq!(app.tracker.correct_keys(), &['c', 'a']);
    assert_eq!(app.tracker.incorrect_keys(), &['x']);
}

#[test]
fn letter_drill_finishes_and_ignores_extra_keys() {
    let t0 = Instant::now();
    let mut app = App::new_at(config_with("hi", &["dog"]), t0);

    type_text(&mut app, "hi", t0);
    assert!(app.tracker.is_finished());
    assert_eq!(app.tracker.next_key(), None);
    assert!(app.get_status().is_some());

    app.handle_char_at('z', t0);
    assert_eq!(app.tracker.correct_keys(), &['h', 'i']);
    assert!(app.tracker.incorrect_keys().is_empty());
}

#[test]
fn letter_drill_highlights_next_key_and_zone() {
    let t0 = Instant::now();
    let mut app = App::new_at(config_with("ah", &["dog"]), t0);

    let h = app.highlights();
    assert_eq!(h.next_key, Some('a'));
    assert_eq!(h.zone, Some(Zone::Home));

    app.handle_char_at('a', t0);
    let h = app.highlights();
    assert_eq!(h.next_key, Some('h'));
    assert_eq!(h.zone, Some(Zone::Right));
    assert_eq!(h.pressed_key, Some('a'));
}

#[test]
fn pressed_key_fades_on_tick() {
    let t0 = Instant::now();
    let mut app = App::new_at(config_with("cat", &["dog"]), t0);

    app.handle_char_at('c', t0);
    app.tick(t0 + ms(100));
    assert_eq!(app.tracker.pressed_key(), Some('c'));

    app.tick(t0 + ms(200));
    assert_eq!(app.tracker.pressed_key(), None);
}

#[test]
fn case_sensitive_config_is_applied() {
    let t0 = Instant::now();
    let mut config = config_with("Hi", &["dog"]);
    config.highlight.case_sensitive = true;
    let mut app = App::new_at(config, t0);

    app.handle_char_at('h', t0);
    assert_eq!(app.tracker.position(), 0);
    app.handle_char_at('H', t0);
    assert_eq!(app.tracker.position(), 1);
}

#[test]
fn case_sensitive_capitals_light_the_keyboard() {
    let t0 = Instant::now();
    let mut config = config_with("Cat", &["dog"]);
    config.highlight.case_sensitive = true;
    let mut app = App::new_at(config, t0);

    assert_eq!(app.highlights().next_key, Some('C'));
    assert_eq!(app.highlights().look('c'), KeyLook::Next);

    app.handle_char_at('X', t0);
    assert_eq!(app.highlights().look('x'), KeyLook::Pressed);
    app.tick(t0 + ms(200));
    assert_eq!(app.highlights().look('x'), KeyLook::Incorrect);

    app.handle_char_at('C', t0 + ms(300));
    app.tick(t0 + ms(500));
    assert_eq!(app.highlights().look('c'), KeyLook::Correct);
    assert_eq!(app.highlights().look('a'), KeyLook::Next);
}

#[test]
fn reset_letters_restarts_drill() {
    let t0 = Instant::now();
    let mut app = App::new_at(config_with("cat", &["dog"]), t0);
    type_text(&mut app, "cx", t0);

    app.reset_current_at(t0);
    assert_eq!(app.tracker.position(), 0);
    assert_eq!(app.tracker.next_key(), Some('c'));
    assert!(app.tracker.correct_keys().is_empty());
    assert!(app.mistakes.is_empty());
}

// ---------------------------------------------------------------------------
// Word drill
// ---------------------------------------------------------------------------

#[test]
fn word_drill_moves_to_next_word() {
    let t0 = Instant::now();
    let mut app = App::new_at(config_with("cat", &["up", "go"]), t0);
    app.view = AppView::Words;

    assert_eq!(app.sequence.highlighted_key(), Some('u'));
    app.handle_char_at('x', t0);
    assert_eq!(app.sequence.current_index(), 0);

    type_text(&mut app, "Up", t0);
    assert_eq!(app.word_index, 1);
    assert_eq!(app.current_word(), "go");
    assert_eq!(app.sequence.highlighted_key(), Some('g'));

    type_text(&mut app, "go", t0);
    assert_eq!(app.current_word(), "up");
}

#[test]
fn word_drill_lights_typed_keys() {
    let t0 = Instant::now();
    let mut app = App::new_at(config_with("cat", &["sun"]), t0);
    app.view = AppView::Words;
    app.handle_char_at('s', t0);

    let h = app.highlights();
    assert_eq!(h.next_key, Some('u'));
    assert_eq!(h.correct_keys, &['s']);
}

#[test]
fn sequence_engine_usable_on_its_own() {
    let mut seq = SequenceAdvancer::new("ok".chars());
    assert_eq!(seq.highlighted_key(), Some('o'));
    seq.advance();
    seq.advance();
    assert!(seq.is_complete());
    seq.reset();
    assert_eq!(seq.highlighted_key(), Some('o'));
}

#[test]
fn empty_word_list_is_harmless() {
    let t0 = Instant::now();
    let mut app = App::new_at(config_with("cat", &[]), t0);
    app.view = AppView::Words;
    type_text(&mut app, "abc", t0);
    assert!(app.sequence.is_complete());

    app.view = AppView::Reveal;
    app.tick(t0 + ms(5000));
    assert!(app.revealer.is_complete());
}

// ---------------------------------------------------------------------------
// Zone drill
// ---------------------------------------------------------------------------

#[test]
fn zone_drill_lights_and_clears() {
    let mut app = App::default();
    app.view = AppView::Zones;

    app.handle_char('z');
    assert_eq!(app.zones.active_zone(), Some(Zone::Bottom));
    assert_eq!(app.highlights().zone, Some(Zone::Bottom));

    app.handle_char('g');
    assert_eq!(app.zones.active_zone(), Some(Zone::Left));

    app.handle_backspace();
    assert_eq!(app.zones.active_zone(), None);

    app.handle_char('7');
    assert_eq!(app.zones.active_zone(), None);
}

// ---------------------------------------------------------------------------
// Reveal drill
// ---------------------------------------------------------------------------

#[test]
fn reveal_drill_reveals_over_time() {
    let t0 = Instant::now();
    let mut app = App::new_at(config_with("cat", &["abc", "dog"]), t0);
    app.view = AppView::Reveal;

    app.tick(t0);
    assert_eq!(app.revealer.revealed_count(), 0);

    app.tick(t0 + ms(1000));
    assert!(app.revealer.is_revealed(0));
    assert!(!app.revealer.is_revealed(1));
    assert_eq!(app.highlights().revealed, Some(&['a'][..]));

    app.tick(t0 + ms(3000));
    assert!(app.revealer.is_complete());

    // Any key after completion starts the next word
    let t1 = t0 + ms(3500);
    app.handle_char_at(' ', t1);
    assert_eq!(app.current_reveal_word(), "dog");
    assert_eq!(app.revealer.revealed_count(), 0);
    app.tick(t1 + ms(1000));
    assert_eq!(app.revealer.revealed_keys(), &['d']);
}

#[test]
fn reveal_uses_configured_delay() {
    let t0 = Instant::now();
    let mut config = config_with("cat", &["ab"]);
    config.reveal.reveal_delay_ms = 250;
    let mut app = App::new_at(config, t0);

    app.tick(t0 + ms(500));
    assert!(app.revealer.is_complete());
}

#[test]
fn reset_reveal_restarts_schedule() {
    let t0 = Instant::now();
    let mut app = App::new_at(config_with("cat", &["abc"]), t0);
    app.view = AppView::Reveal;
    app.tick(t0 + ms(2000));

    let t1 = t0 + ms(2100);
    app.reset_current_at(t1);
    assert_eq!(app.revealer.revealed_count(), 0);
    app.tick(t0 + ms(3000));
    assert_eq!(app.revealer.revealed_count(), 0);
    app.tick(t1 + ms(1000));
    assert_eq!(app.revealer.revealed_count(), 1);
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

#[test]
fn reset_all_clears_every_drill() {
    let t0 = Instant::now();
    let mut app = App::new_at(config_with("cat", &["up"]), t0);
    type_text(&mut app, "cx", t0);
    app.view = AppView::Words;
    app.handle_char_at('u', t0);
    app.view = AppView::Zones;
    app.handle_char_at('q', t0);
    app.tick(t0 + ms(1000));

    app.reset_all_at(t0 + ms(1000));
    assert_eq!(app.tracker.position(), 0);
    assert_eq!(app.sequence.current_index(), 0);
    assert_eq!(app.zones.active_zone(), None);
    assert_eq!(app.revealer.revealed_count(), 0);
    assert_eq!(app.total_presses, 0);
}

#[test]
fn quitting_ignores_keys_and_shutdown_stops_timers() {
    let mut app = App::default();
    app.quit();
    assert_eq!(app.state, AppState::Quitting);

    app.handle_char('t');
    assert_eq!(app.total_presses, 0);

    app.shutdown();
    assert!(!app.revealer.is_running());
}

#[test]
fn help_view_ignores_typing() {
    let mut app = App::default();
    app.view = AppView::Help;
    app.handle_char('t');
    assert_eq!(app.tracker.position(), 0);
    assert_eq!(app.total_presses, 1);
}

#[test]
fn report_reflects_letter_drill() {
    let t0 = Instant::now();
    let mut app = App::new_at(config_with("cat", &["dog"]), t0);
    type_text(&mut app, "cxat", t0);

    let report = app.generate_report();
    assert_eq!(report.summary.target_text, "cat");
    assert_eq!(report.summary.correct_presses, 3);
    assert_eq!(report.summary.incorrect_presses, 1);
    assert_eq!(report.summary.accuracy_percent, Some(75.0));
    assert!(report.summary.finished);
    assert_eq!(report.mistakes.len(), 1);
    assert_eq!(report.mistakes[0].key, "x");
}

#[test]
fn export_report_writes_json() {
    let mut app = App::new(config_with("hi", &["dog"]));
    type_text(&mut app, "hi", Instant::now());

    let path = std::env::temp_dir().join(format!("key-highlight-it-{}.json", std::process::id()));
    let filename = path.to_string_lossy().to_string();
    let msg = app.export_report(&filename).expect("export failed");
    assert!(msg.contains("Exported"));

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("\"finished\": true"));
    let _ = std::fs::remove_file(&path);
}
