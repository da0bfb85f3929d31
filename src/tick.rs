//! Wrapping millisecond tick counter and deadline arithmetic.
//!
//! The device's monotonic millisecond counter is 32 bits wide and overflows
//! roughly every 49.7 days. All comparisons go through a signed difference so
//! that a deadline armed just before the overflow is still reached just after.

use embassy_time::{Duration, Instant};

/// Millisecond tick read from the device's monotonic counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tick(pub u32);

impl Tick {
    pub const fn from_millis(ms: u32) -> Self {
        Self(ms)
    }

    /// Convert a platform instant into a tick.
    ///
    /// Truncation to 32 bits is intentional: it reproduces the wrapping
    /// behaviour of a hardware millisecond counter.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_instant(instant: Instant) -> Self {
        Self(instant.as_millis() as u32)
    }

    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// Tick `ms` milliseconds after this one, wrapping at the counter width.
    #[must_use]
    pub const fn add_millis(self, ms: u32) -> Self {
        Self(self.0.wrapping_add(ms))
    }

    /// Milliseconds elapsed since `earlier`, correct across one overflow.
    pub const fn millis_since(self, earlier: Tick) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Signed distance from `deadline` to this tick.
    ///
    /// Non-negative once the deadline has been reached.
    #[allow(clippy::cast_possible_wrap)]
    pub const fn signed_since(self, deadline: Tick) -> i32 {
        self.0.wrapping_sub(deadline.0) as i32
    }

    /// Whether `deadline` has been reached at this tick.
    pub const fn has_reached(self, deadline: Tick) -> bool {
        self.signed_since(deadline) >= 0
    }
}

/// Convert a configured duration into a tick period.
#[allow(clippy::cast_possible_truncation)]
pub const fn period_millis(duration: Duration) -> u32 {
    let ms = duration.as_millis();
    if ms > u32::MAX as u64 {
        u32::MAX
    } else {
        ms as u32
    }
}

/// Periodic deadline advanced additively.
///
/// Advancing adds the period to the previous deadline instead of to the
/// current tick, so a late iteration does not push every later one back.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    next: Tick,
}

impl Deadline {
    pub const fn new(first: Tick) -> Self {
        Self { next: first }
    }

    pub const fn next(&self) -> Tick {
        self.next
    }

    pub const fn is_due(&self, now: Tick) -> bool {
        now.has_reached(self.next)
    }

    /// Re-anchor the deadline at `now`.
    pub fn rearm(&mut self, now: Tick) {
        self.next = now;
    }

    /// Advance the deadline by one period.
    ///
    /// If the loop stalled for more than two periods, the deadline is
    /// re-anchored at `now + period` instead of replaying the backlog.
    pub fn advance(&mut self, now: Tick, period_ms: u32) {
        let max_lag = period_ms.saturating_mul(2);
        #[allow(clippy::cast_sign_loss)]
        let lag = now.signed_since(self.next).max(0) as u32;
        if lag > max_lag {
            self.next = now;
        }
        self.next = self.next.add_millis(period_ms);
    }

    /// Milliseconds until the deadline, zero when already due.
    #[allow(clippy::cast_sign_loss)]
    pub const fn remaining(&self, now: Tick) -> u32 {
        let diff = self.next.signed_since(now);
        if diff > 0 { diff as u32 } else { 0 }
    }
}
