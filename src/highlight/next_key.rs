//! Next-key tracking and press validation
//!
//! Follows a learner through a target string. The session driver owns the
//! position and pushes it in with `set_position`; the tracker derives the
//! expected key from it, checks presses against it and keeps a history of
//! correct and incorrect keys for the keyboard visual.

use crate::timer::TimerQueue;
use std::time::{Duration, Instant};

/// How long `pressed_key` stays set after a press
pub const DEFAULT_PRESS_FEEDBACK: Duration = Duration::from_millis(200);

/// Called with the pressed key when it matches
pub type CorrectKeyCallback = Box<dyn FnMut(char)>;
/// Called with the pressed key and the key that was expected
pub type IncorrectKeyCallback = Box<dyn FnMut(char, char)>;

/// Snapshot the rendering layer reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightState {
    /// Key expected at the current position, `None` once the text is done
    pub next_key: Option<char>,
    /// Every correct press in order, repeats included
    pub correct_keys: Vec<char>,
    /// Wrong presses not yet typed correctly later
    pub incorrect_keys: Vec<char>,
    /// Most recent press, cleared shortly afterwards
    pub pressed_key: Option<char>,
}

/// Result of a single press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Nothing was expected, the press was ignored
    Ignored,
    Correct(char),
    Incorrect { key: char, expected: char },
}

/// Fold `key` for comparison. Characters whose lowercase form is more than
/// one `char` are left alone.
pub fn normalize(key: char, case_sensitive: bool) -> char {
    if case_sensitive {
        return key;
    }
    let mut lower = key.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => key,
    }
}

/// Tracks the next expected key and the learner's press history
pub struct NextKeyTracker {
    /// Indexed by `char`, one entry per Unicode scalar value
    target: Vec<char>,
    position: usize,
    case_sensitive: bool,
    press_feedback: Duration,
    state: HighlightState,
    clear_timers: TimerQueue<()>,
    on_correct: Option<CorrectKeyCallback>,
    on_incorrect: Option<IncorrectKeyCallback>,
}

impl NextKeyTracker {
    pub fn new(target_text: &str) -> Self {
        let mut tracker = Self {
            target: target_text.chars().collect(),
            position: 0,
            case_sensitive: false,
            press_feedback: DEFAULT_PRESS_FEEDBACK,
            state: HighlightState::default(),
            clear_timers: TimerQueue::new(),
            on_correct: None,
            on_incorrect: None,
        };
        tracker.recompute();
        tracker
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.set_case_sensitive(case_sensitive);
        self
    }

    pub fn with_press_feedback(mut self, delay: Duration) -> Self {
        self.press_feedback = delay;
        self
    }

    pub fn on_correct_key(mut self, callback: impl FnMut(char) + 'static) -> Self {
        self.on_correct = Some(Box::new(callback));
        self
    }

    pub fn on_incorrect_key(mut self, callback: impl FnMut(char, char) + 'static) -> Self {
        self.on_incorrect = Some(Box::new(callback));
        self
    }

    /// Re-derive `next_key` from the target, position and case setting
    pub fn recompute(&mut self) {
        self.state.next_key = self
            .target
            .get(self.position)
            .map(|&c| normalize(c, self.case_sensitive));
    }

    pub fn set_target_text(&mut self, target_text: &str) {
        self.target = target_text.chars().collect();
        self.recompute();
    }

    /// Move to `position`. Anything past the end means the text is finished.
    pub fn set_position(&mut self, position: usize) {
        self.position = position;
        self.recompute();
    }

    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
        self.recompute();
    }

    /// Check a key press against the expected key using the current time
    pub fn handle_key_press(&mut self, key: char) -> PressOutcome {
        self.handle_key_press_at(key, Instant::now())
    }

    /// Check a key press against the expected key.
    ///
    /// Every accepted press sets `pressed_key` and schedules its own clear.
    /// Earlier clears are not cancelled, so a clear from an older press can
    /// blank the indicator of a newer one.
    pub fn handle_key_press_at(&mut self, key: char, now: Instant) -> PressOutcome {
        let Some(expected) = self.state.next_key else {
            return PressOutcome::Ignored;
        };

        let key = normalize(key, self.case_sensitive);
        self.state.pressed_key = Some(key);
        self.clear_timers.schedule(now, self.press_feedback, ());

        if key == expected {
            self.state.correct_keys.push(key);
            self.state.incorrect_keys.retain(|&k| k != key);
            log::debug!("correct key {:?} at position {}", key, self.position);
            if let Some(callback) = self.on_correct.as_mut() {
                callback(key);
            }
            PressOutcome::Correct(key)
        } else {
            self.state.incorrect_keys.push(key);
            log::debug!("incorrect key {:?}, expected {:?}", key, expected);
            if let Some(callback) = self.on_incorrect.as_mut() {
                callback(key, expected);
            }
            PressOutcome::Incorrect { key, expected }
        }
    }

    /// Fire any press-feedback clears that are due
    pub fn tick(&mut self, now: Instant) {
        while self.clear_timers.pop_due(now).is_some() {
            self.state.pressed_key = None;
        }
    }

    /// Clear all highlight state. Position and target stay with the driver,
    /// so `next_key` remains `None` until the next recompute.
    pub fn reset(&mut self) {
        self.state = HighlightState::default();
    }

    pub fn state(&self) -> &HighlightState {
        &self.state
    }

    pub fn snapshot(&self) -> HighlightState {
        self.state.clone()
    }

    pub fn next_key(&self) -> Option<char> {
        self.state.next_key
    }

    pub fn correct_keys(&self) -> &[char] {
        &self.state.correct_keys
    }

    pub fn incorrect_keys(&self) -> &[char] {
        &self.state.incorrect_keys
    }

    pub fn pressed_key(&self) -> Option<char> {
        self.state.pressed_key
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn target(&self) -> &[char] {
        &self.target
    }

    pub fn target_text(&self) -> String {
        self.target.iter().collect()
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.target.len()
    }

    /// When the next pending clear is due
    pub fn next_deadline(&self) -> Option<Instant> {
        self.clear_timers.next_deadline()
    }
}
