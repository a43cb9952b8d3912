//! One-shot delayed events
//!
//! Nothing is ever removed before it fires. Events carry the generation or
//! id they were scheduled for, and the state machine drops the stale ones.

use super::events::GameEvent;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

struct Scheduled {
    due: Instant,
    /// Tie-breaker keeping insertion order for equal deadlines
    seq: u64,
    event: GameEvent,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed: BinaryHeap is a max-heap and we want the earliest first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Pending delayed events ordered by deadline
#[derive(Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, event: GameEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Scheduled { due, seq, event });
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|s| s.due)
    }

    /// Pop the earliest event if it is due at `now`
    pub fn pop_due(&mut self, now: Instant) -> Option<(Instant, GameEvent)> {
        if self.heap.peek()?.due > now {
            return None;
        }
        self.heap.pop().map(|s| (s.due, s.event))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
