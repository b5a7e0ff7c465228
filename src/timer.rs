//! One-shot timer queue
//!
//! The engines run on a single cooperative event loop. Instead of spawning
//! threads, each engine owns a `TimerQueue` and the loop polls it with the
//! current time. `next_deadline()` tells the loop when the next poll is due.

use std::time::{Duration, Instant};

/// Handle to a scheduled timer, used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A timer that has reached its deadline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expired<E> {
    pub id: TimerId,
    /// When the timer was due (not when it was polled)
    pub deadline: Instant,
    pub payload: E,
}

#[derive(Debug)]
struct Pending<E> {
    id: TimerId,
    deadline: Instant,
    payload: E,
}

/// Pending one-shot timers, fired in deadline order
#[derive(Debug)]
pub struct TimerQueue<E> {
    pending: Vec<Pending<E>>,
    next_id: u64,
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `payload` to fire `delay` after `now`
    pub fn schedule(&mut self, now: Instant, delay: Duration, payload: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            deadline: now + delay,
            payload,
        });
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Remove and return the earliest timer whose deadline is at or before `now`.
    ///
    /// Timers sharing a deadline come out in the order they were scheduled.
    pub fn pop_due(&mut self, now: Instant) -> Option<Expired<E>> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= now)
            .min_by_key(|(_, p)| (p.deadline, p.id))
            .map(|(i, _)| i)?;

        let Pending {
            id,
            deadline,
            payload,
        } = self.pending.remove(index);
        Some(Expired {
            id,
            deadline,
            payload,
        })
    }

    /// Earliest pending deadline, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.deadline).min()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Cancel every pending timer
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}
