//! Time-related utilities with clock abstraction for testability.
//!
//! Chat messages carry a human-readable timestamp taken from the sender's
//! local clock. The format follows RFC 850 (`Monday, 02-Jan-06 15:04:05 +09:00`).

use chrono::{DateTime, FixedOffset, Local};

/// RFC 850 style layout used for message timestamps.
pub const RFC850_FORMAT: &str = "%A, %d-%b-%y %H:%M:%S %:z";

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current local time with its UTC offset
    fn now(&self) -> DateTime<FixedOffset>;

    /// Current local time rendered as an RFC 850 string
    fn timestamp(&self) -> String {
        format_rfc850(&self.now())
    }
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<FixedOffset>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    pub fn new(fixed_time: DateTime<FixedOffset>) -> Self {
        Self { fixed_time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.fixed_time
    }
}

/// Render a time as an RFC 850 string
pub fn format_rfc850(time: &DateTime<FixedOffset>) -> String {
    time.format(RFC850_FORMAT).to_string()
}
