//! Timed, one-at-a-time disclosure of a key list

use crate::timer::{TimerId, TimerQueue};
use std::time::{Duration, Instant};

pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(1000);

/// Reveals keys one by one, each `reveal_delay` after the previous.
///
/// Each reveal schedules the next one-shot timer rather than running a
/// fixed-period timer. The pending timer is owned by the revealer and is
/// cancelled on reset, on `stop` and on drop.
#[derive(Debug)]
pub struct ProgressiveRevealer {
    keys: Vec<char>,
    reveal_delay: Duration,
    revealed_count: usize,
    timers: TimerQueue<()>,
    pending: Option<TimerId>,
}

impl ProgressiveRevealer {
    pub fn new(keys: impl IntoIterator<Item = char>, reveal_delay: Duration) -> Self {
        Self::new_at(keys, reveal_delay, Instant::now())
    }

    /// Create a revealer whose first reveal is due `reveal_delay` after `now`
    pub fn new_at(
        keys: impl IntoIterator<Item = char>,
        reveal_delay: Duration,
        now: Instant,
    ) -> Self {
        let mut revealer = Self {
            keys: keys.into_iter().collect(),
            reveal_delay,
            revealed_count: 0,
            timers: TimerQueue::new(),
            pending: None,
        };
        revealer.schedule_next(now);
        revealer
    }

    fn schedule_next(&mut self, from: Instant) {
        self.pending = if self.is_complete() {
            None
        } else {
            Some(self.timers.schedule(from, self.reveal_delay, ()))
        };
    }

    /// Fire due reveals. A late poll catches up on every delay that has
    /// elapsed, measured from each reveal's own deadline.
    pub fn tick(&mut self, now: Instant) {
        while let Some(expired) = self.timers.pop_due(now) {
            self.revealed_count = (self.revealed_count + 1).min(self.keys.len());
            log::debug!("revealed {}/{}", self.revealed_count, self.keys.len());
            self.schedule_next(expired.deadline);
        }
    }

    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    /// Hide everything and restart the schedule from `now`
    pub fn reset_at(&mut self, now: Instant) {
        self.stop();
        self.revealed_count = 0;
        self.schedule_next(now);
    }

    /// Cancel the pending reveal. Already revealed keys stay revealed.
    pub fn stop(&mut self) {
        if let Some(id) = self.pending.take() {
            if self.timers.cancel(id) {
                log::debug!("cancelled pending reveal");
            }
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        index < self.revealed_count
    }

    pub fn is_complete(&self) -> bool {
        self.revealed_count >= self.keys.len()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    pub fn revealed_keys(&self) -> &[char] {
        &self.keys[..self.revealed_count]
    }

    pub fn keys(&self) -> &[char] {
        &self.keys
    }

    pub fn reveal_delay(&self) -> Duration {
        self.reveal_delay
    }

    /// Whether a reveal is still scheduled
    pub fn is_running(&self) -> bool {
        self.pending.is_some_and(|id| self.timers.is_pending(id))
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }
}

impl Drop for ProgressiveRevealer {
    fn drop(&mut self) {
        self.stop();
    }
}
