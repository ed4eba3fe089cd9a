//! Time-related utilities with clock abstraction for testability.

use chrono::{Local, NaiveTime, Timelike};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current wall-clock time of day in the server's local timezone
    fn local_time(&self) -> NaiveTime;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn local_time(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: NaiveTime,
}

impl FixedClock {
    /// Create a new fixed clock with the given time of day
    pub fn new(fixed_time: NaiveTime) -> Self {
        Self { fixed_time }
    }

    /// Create a fixed clock at `hour:minute`.
    ///
    /// Out-of-range values fall back to midnight.
    pub fn at(hour: u32, minute: u32) -> Self {
        Self::new(NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN))
    }
}

impl Clock for FixedClock {
    fn local_time(&self) -> NaiveTime {
        self.fixed_time
    }
}

/// Format a time of day as the `[HH:MM]` prefix used on chat lines
pub fn timestamp_prefix(time: NaiveTime) -> String {
    format!("[{:02}:{:02}]", time.hour(), time.minute())
}
