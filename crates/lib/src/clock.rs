//! Time source used for record ids and health reporting.
//!
//! Production code reads wall-clock time through [`SystemClock`]. Tests swap in a
//! [`FixedClock`] so that generated ids are predictable.
//!
//! # Example
//!
//! ```
//! use userdesk::{Clock, SystemClock};
//!
//! let clock = SystemClock;
//! assert!(clock.now_millis() > 0);
//! ```

use std::fmt::Debug;

#[cfg(any(test, feature = "testing"))]
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::{DateTime, Utc};

/// A provider of the current time.
pub trait Clock: Send + Sync + Debug {
    /// Milliseconds since the Unix epoch. Record ids are derived from this.
    fn now_millis(&self) -> u64;

    /// The current time as an RFC3339 string, for `/health`.
    fn now_rfc3339(&self) -> String;
}

/// Wall-clock time from [`chrono::Utc`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
    }

    fn now_rfc3339(&self) -> String {
        Utc::now().to_rfc3339()
    }
}

/// Deterministic clock for tests.
///
/// Each id read (`now_millis`) hands out the current tick and moves one millisecond
/// on, so consecutive creates get consecutive ids. While a [`ClockHold`] is alive
/// every read returns the same tick, which reproduces two creates landing in the
/// same millisecond.
///
/// ```
/// use userdesk::{Clock, FixedClock};
///
/// let clock = FixedClock::new(1000);
/// assert_eq!(clock.now_millis(), 1000);
/// assert_eq!(clock.now_millis(), 1001);
///
/// let _hold = clock.hold();
/// assert_eq!(clock.now_millis(), clock.now_millis());
/// ```
#[cfg(any(test, feature = "testing"))]
#[derive(Debug)]
pub struct FixedClock {
    tick: AtomicU64,
    held: AtomicBool,
}

/// Freezes a [`FixedClock`] until dropped.
#[cfg(any(test, feature = "testing"))]
#[must_use = "the clock resumes as soon as the hold is dropped"]
pub struct ClockHold<'a>(&'a FixedClock);

#[cfg(any(test, feature = "testing"))]
impl Drop for ClockHold<'_> {
    fn drop(&mut self) {
        self.0.held.store(false, Ordering::SeqCst);
    }
}

#[cfg(any(test, feature = "testing"))]
impl FixedClock {
    pub fn new(start_millis: u64) -> Self {
        Self {
            tick: AtomicU64::new(start_millis),
            held: AtomicBool::new(false),
        }
    }

    pub fn hold(&self) -> ClockHold<'_> {
        self.held.store(true, Ordering::SeqCst);
        ClockHold(self)
    }

    /// The tick the next `now_millis` call will return.
    pub fn peek(&self) -> u64 {
        self.tick.load(Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for FixedClock {
    /// 2024-01-01T00:00:00Z
    fn default() -> Self {
        Self::new(1_704_067_200_000)
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        if self.held.load(Ordering::SeqCst) {
            self.peek()
        } else {
            self.tick.fetch_add(1, Ordering::SeqCst)
        }
    }

    fn now_rfc3339(&self) -> String {
        let millis = i64::try_from(self.peek()).unwrap_or(i64::MAX);
        DateTime::<Utc>::from_timestamp_millis(millis)
            .unwrap_or_default()
            .to_rfc3339()
    }
}
