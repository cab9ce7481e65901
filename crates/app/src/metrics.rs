//! In-process request metrics: monotonic counters and elapsed-time timers.
//!
//! Handlers call these explicitly around their bodies. All state is atomic,
//! so a single [`HandlerMetrics`] can be shared across request tasks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;

/// Monotonic event counter.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Records how long an operation took, in microseconds.
#[derive(Debug)]
pub struct Timer {
    count: AtomicU64,
    total_micros: AtomicU64,
    min_micros: AtomicU64,
    max_micros: AtomicU64,
}

impl Default for Timer {
    fn default() -> Self {
        Self {
            count: AtomicU64::new(0),
            total_micros: AtomicU64::new(0),
            min_micros: AtomicU64::new(u64::MAX),
            max_micros: AtomicU64::new(0),
        }
    }
}

impl Timer {
    /// Start timing; the elapsed time is recorded when the guard drops.
    #[must_use]
    pub fn start(&self) -> TimerGuard<'_> {
        TimerGuard {
            timer: self,
            started: Instant::now(),
        }
    }

    /// Record one observation.
    pub fn record(&self, elapsed: Duration) {
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.total_micros.fetch_add(micros, Ordering::Relaxed);
        self.min_micros.fetch_min(micros, Ordering::Relaxed);
        self.max_micros.fetch_max(micros, Ordering::Relaxed);
        // Published last so a counted observation is always reflected in min/max.
        self.count.fetch_add(1, Ordering::Release);
    }

    /// Point-in-time view, converted to milliseconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn snapshot(&self) -> TimerSnapshot {
        let count = self.count.load(Ordering::Acquire);
        if count == 0 {
            return TimerSnapshot::default();
        }
        let total = self.total_micros.load(Ordering::Relaxed) as f64 / 1000.0;
        let min = match self.min_micros.load(Ordering::Relaxed) {
            u64::MAX => 0,
            min => min,
        };
        TimerSnapshot {
            count,
            total_ms: total,
            min_ms: min as f64 / 1000.0,
            max_ms: self.max_micros.load(Ordering::Relaxed) as f64 / 1000.0,
            mean_ms: total / count as f64,
        }
    }
}

/// Records the time since [`Timer::start`] on drop, including early returns.
pub struct TimerGuard<'a> {
    timer: &'a Timer,
    started: Instant,
}

impl Drop for TimerGuard<'_> {
    fn drop(&mut self) {
        self.timer.record(self.started.elapsed());
    }
}

/// Serializable view of a [`Timer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub count: u64,
    pub total_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub mean_ms: f64,
}

/// Counters and timers for the person resource handlers.
#[derive(Debug, Default)]
pub struct HandlerMetrics {
    /// How many times a person had been added.
    pub times_persist: Counter,
    /// How long it takes to persist a person.
    pub persist_timer: Timer,
    /// How many times a person had been retrieved.
    pub times_retrieved: Counter,
    /// How long it takes to retrieve a person.
    pub retrieve_timer: Timer,
}

impl HandlerMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            times_persist: self.times_persist.get(),
            persist_timer: self.persist_timer.snapshot(),
            times_retrieved: self.times_retrieved.get(),
            retrieve_timer: self.retrieve_timer.snapshot(),
        }
    }
}

/// Serializable view of [`HandlerMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub times_persist: u64,
    pub persist_timer: TimerSnapshot,
    pub times_retrieved: u64,
    pub retrieve_timer: TimerSnapshot,
}
