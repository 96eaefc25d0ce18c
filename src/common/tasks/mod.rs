//! Per-entity timed task queue.
//!
//! Every timed behavior (shooting cadence, reload, burn, vanish, spawn loop, distance
//! polling) is a keyed entry in a `TaskQueue` owned by the component that drives it.
//! A system drains the due keys once per `Update` tick and runs the matching
//! continuation; continuations that want to resume later schedule their key again.
//!
//! ```text
//!  start(Shoot, now) ─┐
//!                     v
//!        [(deadline, seq, key), ...]   <- at most one entry per key
//!                     │
//!   tick: drain_due(now) -> [keys with deadline <= now, oldest first]
//!                     │
//!        continuation runs, may start(key, now + period) again
//! ```
//!
//! Keys are small `Copy` enums, optionally carrying an `Entity` when one owner drives
//! many instances (e.g. one expiry timer per fired shot).

use std::fmt::Debug;
use std::time::Duration;

use crate::common::rng::GameRng;

/// Anything usable as a task key.
pub trait TaskKey: Copy + Eq + Debug + Send + Sync + 'static {}

impl<T: Copy + Eq + Debug + Send + Sync + 'static> TaskKey for T {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scheduled<K> {
    deadline: Duration,
    seq: u64,
    key: K,
}

#[derive(Debug, Clone)]
pub struct TaskQueue<K: TaskKey> {
    pending: Vec<Scheduled<K>>,
    next_seq: u64,
}

impl<K: TaskKey> Default for TaskQueue<K> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<K: TaskKey> TaskQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key` to resume at `at`.
    ///
    /// Returns `false` (and changes nothing) if `key` is already scheduled.
    pub fn start(&mut self, key: K, at: Duration) -> bool {
        if self.is_scheduled(key) {
            return false;
        }
        self.push(key, at);
        true
    }

    /// Schedule `key` to resume at `at`, replacing any pending deadline.
    pub fn restart(&mut self, key: K, at: Duration) {
        self.pending.retain(|s| s.key != key);
        self.push(key, at);
    }

    /// Cancel `key`. Returns `false` if it was not scheduled.
    pub fn stop(&mut self, key: K) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.key != key);
        self.pending.len() != before
    }

    #[inline]
    pub fn is_scheduled(&self, key: K) -> bool {
        self.pending.iter().any(|s| s.key == key)
    }

    pub fn deadline(&self, key: K) -> Option<Duration> {
        self.pending.iter().find(|s| s.key == key).map(|s| s.deadline)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Remove and return every key whose deadline is `<= now`,
    /// ordered by deadline, then by scheduling order.
    pub fn drain_due(&mut self, now: Duration) -> Vec<K> {
        if !self.pending.iter().any(|s| s.deadline <= now) {
            return Vec::new();
        }

        let mut due = Vec::new();
        self.pending.retain(|s| {
            if s.deadline <= now {
                due.push(*s);
                false
            } else {
                true
            }
        });

        due.sort_by_key(|s| (s.deadline, s.seq));
        due.into_iter().map(|s| s.key).collect()
    }

    fn push(&mut self, key: K, at: Duration) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.pending.push(Scheduled {
            deadline: at,
            seq,
            key,
        });
    }
}

/// Seconds from config to a `Duration`; negative or NaN values clamp to zero,
/// values too large to represent (infinity included) clamp to `Duration::MAX`.
///
/// Add the result to a deadline with `saturating_add`.
#[inline]
pub fn secs(seconds: f32) -> Duration {
    if seconds.is_nan() || seconds <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f32(seconds).unwrap_or(Duration::MAX)
}

/// Random delay uniformly drawn from `[min, max]` seconds.
#[inline]
pub fn random_delay(rng: &mut GameRng, min: f32, max: f32) -> Duration {
    secs(rng.range(min, max))
}

/// Linear progress of `elapsed` through `total`, clamped to `[0, 1]`.
/// A zero-length span is immediately complete.
#[inline]
pub fn progress(elapsed: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
}
