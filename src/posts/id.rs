//! Time-based post ids.
//!
//! An id is the decimal Unix timestamp in milliseconds at creation. Two
//! creations in the same millisecond would collide, so the generator hands
//! out the next unused millisecond instead: ids are unique and strictly
//! increasing within a process, and still read as timestamps.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        self.next_at(now_millis()).to_string()
    }

    fn next_at(&self, now: u64) -> u64 {
        let prev = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(prev + 1)
    }
}

/// A clock set before the epoch reads as zero; the generator still moves
/// forward from its last value.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
