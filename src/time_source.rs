//! Wall-clock time derived from network sync or a manually seeded clock
//!
//! A network epoch is preferred whenever the sync provider reports one and it
//! passes the plausibility check. Otherwise a manual clock seeded with `ts/`
//! is extrapolated from the device tick. Calendar fields are computed in
//! UTC after adding the configured offset; there is no DST handling.

use core::fmt::Write;

use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use heapless::String;

use crate::tick::Tick;

/// 2023-01-01T00:00:00Z; earlier epochs are treated as not synced
pub const PLAUSIBLE_EPOCH: u64 = 1_672_531_200;

/// Shown instead of the time when no time source is available
pub const TIME_PLACEHOLDER: &str = "--:--:--";

/// Shown instead of the date when the calendar date is unknown
pub const DATE_PLACEHOLDER: &str = "----------";

const SECONDS_PER_DAY: u64 = 86_400;

/// Network time-sync provider
pub trait TimeSync {
    /// Whether the provider has completed at least one successful sync
    fn has_validated_epoch(&self) -> bool;

    /// Current epoch in seconds; only meaningful once validated
    fn current_epoch_seconds(&self) -> u64;
}

/// Epoch from the sync provider, if it is validated and plausible
pub fn network_epoch<T: TimeSync>(sync: &T) -> Option<u64> {
    if !sync.has_validated_epoch() {
        return None;
    }
    let epoch = sync.current_epoch_seconds();
    (epoch >= PLAUSIBLE_EPOCH).then_some(epoch)
}

/// Errors raised when seeding the manual clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    HourOutOfRange(u8),
    MinuteOutOfRange(u8),
    SecondOutOfRange(u8),
}

/// A validated time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TimeOfDay {
    pub const fn new(hour: u8, minute: u8, second: u8) -> Result<Self, ClockError> {
        if hour >= 24 {
            return Err(ClockError::HourOutOfRange(hour));
        }
        if minute >= 60 {
            return Err(ClockError::MinuteOutOfRange(minute));
        }
        if second >= 60 {
            return Err(ClockError::SecondOutOfRange(second));
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    pub const fn seconds_of_day(self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }
}

/// Snapshot of (epoch, tick) taken when the clock was set by hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManualClock {
    pub active: bool,
    /// Epoch at the snapshot; seconds since an arbitrary midnight when the
    /// date is unknown
    pub epoch_base: u64,
    pub base_tick: Tick,
    pub date_known: bool,
}

impl ManualClock {
    /// Seed the clock with a time of day.
    ///
    /// The entered value is the baseline itself; the timezone offset is only
    /// applied when formatting. With a validated network epoch the time is
    /// placed on that epoch's UTC day, otherwise only the time of day is
    /// known. On error the clock is left untouched.
    pub fn seed<T: TimeSync>(
        &mut self,
        hour: u8,
        minute: u8,
        second: u8,
        now: Tick,
        sync: &T,
    ) -> Result<(), ClockError> {
        let of_day = u64::from(TimeOfDay::new(hour, minute, second)?.seconds_of_day());

        let (epoch_base, date_known) = match network_epoch(sync) {
            Some(epoch) => (epoch - epoch % SECONDS_PER_DAY + of_day, true),
            None => (of_day, false),
        };

        *self = Self {
            active: true,
            epoch_base,
            base_tick: now,
            date_known,
        };
        Ok(())
    }

    /// Extrapolated epoch at `now`, if the clock has been seeded
    pub fn epoch_at(&self, now: Tick) -> Option<u64> {
        self.active
            .then(|| self.epoch_base + u64::from(now.millis_since(self.base_tick) / 1000))
    }
}

/// Result of resolving "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    Known { epoch_seconds: u64, date_known: bool },
    Unknown,
}

impl Reading {
    /// Local date and time at a fixed offset from UTC
    pub fn local(self, tz_offset_minutes: i16) -> Option<DateTime<FixedOffset>> {
        let Self::Known { epoch_seconds, .. } = self else {
            return None;
        };
        let offset = FixedOffset::east_opt(i32::from(tz_offset_minutes) * 60)?;
        let utc = DateTime::from_timestamp(i64::try_from(epoch_seconds).ok()?, 0)?;
        Some(utc.with_timezone(&offset))
    }

    pub const fn date_known(self) -> bool {
        matches!(
            self,
            Self::Known {
                date_known: true,
                ..
            }
        )
    }
}

/// Read-only view resolving "now" from the available time sources
pub struct TimeSource<'a, T: TimeSync> {
    sync: &'a T,
    manual: &'a ManualClock,
    tick: Tick,
}

impl<'a, T: TimeSync> TimeSource<'a, T> {
    pub const fn new(sync: &'a T, manual: &'a ManualClock, tick: Tick) -> Self {
        Self { sync, manual, tick }
    }

    pub fn now(&self) -> Reading {
        if let Some(epoch_seconds) = network_epoch(self.sync) {
            return Reading::Known {
                epoch_seconds,
                date_known: true,
            };
        }
        match self.manual.epoch_at(self.tick) {
            Some(epoch_seconds) => Reading::Known {
                epoch_seconds,
                date_known: self.manual.date_known,
            },
            None => Reading::Unknown,
        }
    }

    /// `HH:MM:SS` in local time
    pub fn format_time(&self, tz_offset_minutes: i16) -> String<8> {
        format_time(self.now(), tz_offset_minutes)
    }

    /// `YYYY-MM-DD` in local time
    pub fn format_date(&self, tz_offset_minutes: i16) -> String<10> {
        format_date(self.now(), tz_offset_minutes)
    }
}

pub fn format_time(reading: Reading, tz_offset_minutes: i16) -> String<8> {
    let mut out = String::new();
    match reading.local(tz_offset_minutes) {
        Some(t) => {
            let _ = write!(out, "{:02}:{:02}:{:02}", t.hour(), t.minute(), t.second());
        }
        None => {
            let _ = out.push_str(TIME_PLACEHOLDER);
        }
    }
    out
}

pub fn format_date(reading: Reading, tz_offset_minutes: i16) -> String<10> {
    let mut out = String::new();
    match reading.local(tz_offset_minutes) {
        Some(t) if reading.date_known() && (0..=9999).contains(&t.year()) => {
            let _ = write!(out, "{:04}-{:02}-{:02}", t.year(), t.month(), t.day());
        }
        _ => {
            let _ = out.push_str(DATE_PLACEHOLDER);
        }
    }
    out
}
