//! Main application state and logic
//!
//! `App` is the practice session driver: it owns one instance of each
//! highlighting engine, routes key presses to the drill on screen, moves
//! the letter drill forward on correct presses and builds what the widgets
//! draw. Engines never talk to each other.

use super::keyboard_visual::KeyHighlights;
use super::widgets::StatLine;
use crate::config::Config;
use crate::highlight::next_key::normalize;
use crate::highlight::{
    zones, NextKeyTracker, PressOutcome, ProgressiveRevealer, SequenceAdvancer, ZoneClassifier,
};
use crate::report::{DrillReport, ReportError};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::mpsc;
use std::time::Instant;

/// Current view/tab in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Letters,
    Words,
    Zones,
    Reveal,
    Help,
}

impl AppView {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Letters => "Letters",
            Self::Words => "Words",
            Self::Zones => "Zones",
            Self::Reveal => "Reveal",
            Self::Help => "Help",
        }
    }

    pub fn all() -> &'static [AppView] {
        &[Self::Letters, Self::Words, Self::Zones, Self::Reveal, Self::Help]
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Letters => 0,
            Self::Words => 1,
            Self::Zones => 2,
            Self::Reveal => 3,
            Self::Help => 4,
        }
    }

    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Letters,
            1 => Self::Words,
            2 => Self::Zones,
            3 => Self::Reveal,
            _ => Self::Help,
        }
    }
}

/// Application running state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Running,
    Quitting,
}

/// What the letter tracker reported through its callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackEvent {
    Correct(char),
    Incorrect { key: char, expected: char },
}

/// Main application
pub struct App {
    pub view: AppView,
    pub state: AppState,
    pub config: Config,
    /// Letter drill
    pub tracker: NextKeyTracker,
    /// Word drill
    pub sequence: SequenceAdvancer,
    pub word_index: usize,
    /// Zone drill
    pub zones: ZoneClassifier,
    /// Reveal drill
    pub revealer: ProgressiveRevealer,
    pub reveal_index: usize,
    /// Wrong presses per key in the letter drill
    pub mistakes: BTreeMap<char, u32>,
    feedback_rx: mpsc::Receiver<FeedbackEvent>,
    pub start_time: Instant,
    pub total_presses: u64,
    pub status_message: Option<String>,
    pub status_time: Option<Instant>,
}

fn word_at(words: &[String], index: usize) -> &str {
    if words.is_empty() {
        ""
    } else {
        &words[index % words.len()]
    }
}

impl App {
    pub fn new(config: Config) -> Self {
        Self::new_at(config, Instant::now())
    }

    /// Start a session at `now`
    pub fn new_at(config: Config, now: Instant) -> Self {
        let (tx, feedback_rx) = mpsc::channel();
        let incorrect_tx = tx.clone();

        let tracker = NextKeyTracker::new(&config.drill.text)
            .with_case_sensitive(config.highlight.case_sensitive)
            .with_press_feedback(config.highlight.press_feedback())
            .on_correct_key(move |key| {
                let _ = tx.send(FeedbackEvent::Correct(key));
            })
            .on_incorrect_key(move |key, expected| {
                let _ = incorrect_tx.send(FeedbackEvent::Incorrect { key, expected });
            });

        let sequence = SequenceAdvancer::new(word_at(&config.drill.words, 0).chars());
        let revealer = ProgressiveRevealer::new_at(
            word_at(&config.drill.words, 0).chars(),
            config.reveal.reveal_delay(),
            now,
        );

        Self {
            view: AppView::Letters,
            state: AppState::Running,
            config,
            tracker,
            sequence,
            word_index: 0,
            zones: ZoneClassifier::new(),
            revealer,
            reveal_index: 0,
            mistakes: BTreeMap::new(),
            feedback_rx,
            start_time: now,
            total_presses: 0,
            status_message: None,
            status_time: None,
        }
    }

    /// Route a typed character to the drill on screen
    pub fn handle_char(&mut self, key: char) {
        self.handle_char_at(key, Instant::now());
    }

    pub fn handle_char_at(&mut self, key: char, now: Instant) {
        if self.state != AppState::Running {
            return;
        }
        self.total_presses += 1;

        match self.view {
            AppView::Letters => self.letters_press(key, now),
            AppView::Words => self.words_press(key),
            AppView::Zones => {
                self.zones.highlight_zone(key);
            }
            AppView::Reveal => {
                if self.revealer.is_complete() {
                    self.next_reveal_word(now);
                }
            }
            AppView::Help => {}
        }
    }

    fn letters_press(&mut self, key: char, now: Instant) {
        if self.tracker.handle_key_press_at(key, now) == PressOutcome::Ignored {
            return;
        }

        while let Ok(event) = self.feedback_rx.try_recv() {
            match event {
                FeedbackEvent::Correct(_) => {
                    let position = self.tracker.position() + 1;
                    self.tracker.set_position(position);
                }
                FeedbackEvent::Incorrect { key, .. } => {
                    *self.mistakes.entry(key).or_default() += 1;
                }
            }
        }

        if self.tracker.is_finished() {
            log::info!(
                "letter drill finished: {} correct, {} mistakes",
                self.tracker.correct_keys().len(),
                self.mistakes.values().sum::<u32>()
            );
            self.set_status("Well done! Press F2 to go again".to_string());
        }
    }

    fn words_press(&mut self, key: char) {
        let case_sensitive = self.config.highlight.case_sensitive;
        let Some(expected) = self.sequence.highlighted_key() else {
            return;
        };
        if normalize(key, case_sensitive) != normalize(expected, case_sensitive) {
            return;
        }

        self.sequence.advance();
        if self.sequence.is_complete() {
            let word = self.current_word().to_string();
            log::info!("word {:?} complete", word);
            self.set_status(format!("You typed \"{}\"!", word));
            self.word_index += 1;
            self.sequence = SequenceAdvancer::new(self.current_word().chars());
        }
    }

    fn next_reveal_word(&mut self, now: Instant) {
        self.reveal_index += 1;
        self.revealer.stop();
        self.revealer = ProgressiveRevealer::new_at(
            word_at(&self.config.drill.words, self.reveal_index).chars(),
            self.config.reveal.reveal_delay(),
            now,
        );
    }

    /// Backspace clears the lit zone in the zone drill
    pub fn handle_backspace(&mut self) {
        if self.view == AppView::Zones {
            self.zones.clear_zone();
        }
    }

    /// Fire due timers in every engine
    pub fn tick(&mut self, now: Instant) {
        self.tracker.tick(now);
        self.revealer.tick(now);
    }

    /// Earliest moment any engine needs a tick
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.tracker.next_deadline(), self.revealer.next_deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    pub fn current_word(&self) -> &str {
        word_at(&self.config.drill.words, self.word_index)
    }

    pub fn current_reveal_word(&self) -> &str {
        word_at(&self.config.drill.words, self.reveal_index)
    }

    /// Switch to the next view
    pub fn next_view(&mut self) {
        let next = (self.view.index() + 1) % AppView::all().len();
        self.view = AppView::from_index(next);
    }

    /// Switch to the previous view
    pub fn prev_view(&mut self) {
        let current = self.view.index();
        let prev = if current == 0 {
            AppView::all().len() - 1
        } else {
            current - 1
        };
        self.view = AppView::from_index(prev);
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.state = AppState::Quitting;
    }

    /// Release engine resources at the end of a session
    pub fn shutdown(&mut self) {
        self.revealer.stop();
        log::info!("session ended after {} key presses", self.total_presses);
    }

    fn reset_letters(&mut self) {
        self.tracker.reset();
        self.tracker.set_position(0);
        self.mistakes.clear();
        while self.feedback_rx.try_recv().is_ok() {}
    }

    /// Restart every drill
    pub fn reset_all(&mut self) {
        self.reset_all_at(Instant::now());
    }

    pub fn reset_all_at(&mut self, now: Instant) {
        self.reset_letters();
        self.sequence.reset();
        self.zones.clear_zone();
        self.revealer.reset_at(now);
        self.total_presses = 0;
        log::info!("all drills reset");
        self.set_status("All drills restarted".to_string());
    }

    /// Restart the drill on screen
    pub fn reset_current(&mut self) {
        self.reset_current_at(Instant::now());
    }

    pub fn reset_current_at(&mut self, now: Instant) {
        match self.view {
            AppView::Letters => {
                self.reset_letters();
                self.set_status("Letter drill restarted".to_string());
            }
            AppView::Words => {
                self.sequence.reset();
                self.set_status("Word restarted".to_string());
            }
            AppView::Zones => {
                self.zones.clear_zone();
                self.set_status("Zone cleared".to_string());
            }
            AppView::Reveal => {
                self.revealer.reset_at(now);
                self.set_status("Reveal restarted".to_string());
            }
            AppView::Help => {}
        }
    }

    /// Set a status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_time = Some(Instant::now());
    }

    /// Get status message if still valid (within 3 seconds)
    pub fn get_status(&self) -> Option<&str> {
        match (&self.status_message, self.status_time) {
            (Some(msg), Some(time)) if time.elapsed().as_secs() < 3 => Some(msg),
            _ => None,
        }
    }

    /// What the keyboard should light up for the current view
    pub fn highlights(&self) -> KeyHighlights<'_> {
        match self.view {
            AppView::Letters => {
                let state = self.tracker.state();
                KeyHighlights {
                    next_key: state.next_key,
                    pressed_key: state.pressed_key,
                    correct_keys: &state.correct_keys,
                    incorrect_keys: &state.incorrect_keys,
                    zone: state.next_key.and_then(zones::zone_of),
                    revealed: None,
                }
            }
            AppView::Words => KeyHighlights {
                next_key: self.sequence.highlighted_key(),
                correct_keys: &self.sequence.keys()[..self.sequence.current_index()],
                ..Default::default()
            },
            AppView::Zones => KeyHighlights {
                zone: self.zones.active_zone(),
                ..Default::default()
            },
            AppView::Reveal => KeyHighlights {
                correct_keys: self.revealer.revealed_keys(),
                revealed: Some(self.revealer.revealed_keys()),
                ..Default::default()
            },
            AppView::Help => KeyHighlights::default(),
        }
    }

    /// Stats for the current view
    pub fn current_lines(&self) -> Vec<StatLine> {
        match self.view {
            AppView::Letters => self.letter_lines(),
            AppView::Words => vec![
                StatLine::info("Word", self.current_word()),
                StatLine::info(
                    "Progress",
                    format!("{}/{}", self.sequence.current_index(), self.sequence.len()),
                ),
                StatLine::ok("Words typed", self.word_index.to_string()),
            ],
            AppView::Zones => {
                let zone = self.zones.active_zone().map_or("None", |z| z.name());
                vec![StatLine::info("Zone", zone)]
            }
            AppView::Reveal => {
                let status = if self.revealer.is_complete() {
                    StatLine::ok("Revealed", "All keys shown, press any key")
                } else {
                    StatLine::info(
                        "Revealed",
                        format!("{}/{}", self.revealer.revealed_count(), self.revealer.keys().len()),
                    )
                };
                vec![status]
            }
            AppView::Help => Vec::new(),
        }
    }

    fn letter_lines(&self) -> Vec<StatLine> {
        let state = self.tracker.state();
        let next = match state.next_key {
            Some(' ') => "space".to_string(),
            Some(k) => k.to_string(),
            None => "done".to_string(),
        };
        let mistakes: u32 = self.mistakes.values().sum();

        let mut lines = vec![
            StatLine::info("Next key", next),
            StatLine::ok("Correct", state.correct_keys.len().to_string()),
        ];
        if mistakes > 0 {
            lines.push(StatLine::warning("Mistakes", mistakes.to_string()));
            let keys: String = state.incorrect_keys.iter().collect();
            if !keys.is_empty() {
                lines.push(StatLine::warning("Keys to practise", keys));
            }
        } else {
            lines.push(StatLine::ok("Mistakes", "0"));
        }
        lines
    }

    /// Get elapsed time formatted
    pub fn elapsed_formatted(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// Generate a report for the letter drill
    pub fn generate_report(&self) -> DrillReport {
        DrillReport::new(self.start_time, &self.tracker, &self.mistakes)
    }

    /// Export the letter drill report to a JSON file
    pub fn export_report(&mut self, filename: &str) -> Result<String, ReportError> {
        let report = self.generate_report();
        report.export_json(Path::new(filename))?;
        log::info!("report exported to {}", filename);
        let msg = format!("Exported to {}", filename);
        self.set_status(msg.clone());
        Ok(msg)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
