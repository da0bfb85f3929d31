//! Serial command grammar
//!
//! Each line is routed by prefix in a fixed priority order; the first
//! matching prefix wins and anything else is a literal message.

use core::num::IntErrorKind;

use crate::network::{NETWORK_NAME_CAPACITY, NETWORK_SECRET_CAPACITY};
use crate::state::{ClockMode, FontLevel};

const PREFIX_CLOCK: &str = "t/";
const PREFIX_TIMEZONE: &str = "tz/";
const PREFIX_VISIBILITY: &str = "h/";
const PREFIX_SCROLL: &str = "s/";
const PREFIX_FONT: &str = "f/";
const PREFIX_SET_TIME: &str = "ts/";
const PREFIX_NETWORK_NAME: &str = "w/";
const PREFIX_NETWORK_SECRET: &str = "wp/";
const PREFIX_CONNECT: &str = "wc/";
const PREFIX_FORGET: &str = "wf/";

/// Timezone offsets accepted by `tz/`, in hours
pub const TZ_MIN_HOURS: i8 = -12;
pub const TZ_MAX_HOURS: i8 = 14;

const MIN_SCROLL_INTERVAL_MS: u32 = 5;
const MAX_SCROLL_INTERVAL_MS: u32 = 100;

/// Scroll speed level `0..=9`; zero stops scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSpeed(u8);

impl ScrollSpeed {
    pub const fn new(level: u8) -> Option<Self> {
        if level <= 9 { Some(Self(level)) } else { None }
    }

    pub const fn level(self) -> u8 {
        self.0
    }

    /// Milliseconds per one-pixel step, `None` when scrolling is off.
    ///
    /// Levels 1..=9 map to 100..=20 ms, so the 5 ms lower bound is never
    /// reached.
    pub const fn interval_ms(self) -> Option<u32> {
        if self.0 == 0 {
            return None;
        }
        let raw = 110_u32.saturating_sub(self.0 as u32 * 10);
        Some(if raw < MIN_SCROLL_INTERVAL_MS {
            MIN_SCROLL_INTERVAL_MS
        } else if raw > MAX_SCROLL_INTERVAL_MS {
            MAX_SCROLL_INTERVAL_MS
        } else {
            raw
        })
    }
}

/// Parsed command line, borrowing its payload from the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `t/` - full-screen clock mode
    ClockMode(ClockMode),
    /// `tz/` - timezone offset in hours, already clamped
    Timezone(i8),
    /// `h/` - ticker visibility
    TickerVisible(bool),
    /// `s/` - scroll speed
    ScrollSpeed(ScrollSpeed),
    /// `f/` - ticker font
    Font(FontLevel),
    /// `ts/HH:MM:SS` - seed the manual clock; fields are not range-checked yet
    SetTime { hour: u8, minute: u8, second: u8 },
    /// `w/` - network name
    NetworkName(&'a str),
    /// `wp/` - network secret
    NetworkSecret(&'a str),
    /// `wc/` - connect now
    Connect,
    /// `wf/` - forget credentials and disconnect
    Forget,
    /// Anything else - new message text
    Text(&'a str),
}

/// Reasons a routed command was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    InvalidTimezone,
    InvalidVisibility,
    InvalidScrollSpeed,
    InvalidFont,
    InvalidTime,
    NetworkNameTooLong,
    NetworkSecretTooLong,
}

impl<'a> Command<'a> {
    /// Parse one line without its terminator.
    ///
    /// Errors only come from lines that matched a prefix but carry a
    /// malformed argument.
    pub fn parse(line: &'a str) -> Result<Self, CommandError> {
        if let Some(arg) = line.strip_prefix(PREFIX_CLOCK) {
            return Ok(Self::ClockMode(parse_clock_mode(arg)));
        }
        if let Some(arg) = line.strip_prefix(PREFIX_TIMEZONE) {
            return parse_timezone(arg).map(Self::Timezone);
        }
        if let Some(arg) = line.strip_prefix(PREFIX_VISIBILITY) {
            return match arg {
                "1" => Ok(Self::TickerVisible(true)),
                "0" => Ok(Self::TickerVisible(false)),
                _ => Err(CommandError::InvalidVisibility),
            };
        }
        if let Some(arg) = line.strip_prefix(PREFIX_SCROLL) {
            return single_digit(arg)
                .and_then(ScrollSpeed::new)
                .map(Self::ScrollSpeed)
                .ok_or(CommandError::InvalidScrollSpeed);
        }
        if let Some(arg) = line.strip_prefix(PREFIX_FONT) {
            return match arg {
                "1" => Ok(Self::Font(FontLevel::Small)),
                "2" => Ok(Self::Font(FontLevel::Medium)),
                "3" => Ok(Self::Font(FontLevel::Large)),
                _ => Err(CommandError::InvalidFont),
            };
        }
        if let Some(arg) = line.strip_prefix(PREFIX_SET_TIME) {
            return parse_time_literal(arg).ok_or(CommandError::InvalidTime);
        }
        if let Some(arg) = line.strip_prefix(PREFIX_NETWORK_NAME) {
            if arg.len() > NETWORK_NAME_CAPACITY {
                return Err(CommandError::NetworkNameTooLong);
            }
            return Ok(Self::NetworkName(arg));
        }
        if let Some(arg) = line.strip_prefix(PREFIX_NETWORK_SECRET) {
            if arg.len() > NETWORK_SECRET_CAPACITY {
                return Err(CommandError::NetworkSecretTooLong);
            }
            return Ok(Self::NetworkSecret(arg));
        }
        if line.starts_with(PREFIX_CONNECT) {
            return Ok(Self::Connect);
        }
        if line.starts_with(PREFIX_FORGET) {
            return Ok(Self::Forget);
        }
        Ok(Self::Text(line))
    }

    /// Whether handling this command leaves the full-screen clock
    pub const fn exits_clock(&self) -> bool {
        !matches!(self, Self::ClockMode(_))
    }
}

fn parse_clock_mode(arg: &str) -> ClockMode {
    match arg {
        "1" => ClockMode::TimeOnly,
        "2" => ClockMode::TimeAndDate,
        _ => ClockMode::Off,
    }
}

/// Any integer is accepted and clamped, however many digits it has.
fn parse_timezone(arg: &str) -> Result<i8, CommandError> {
    let hours = match arg.parse::<i8>() {
        Ok(hours) => hours,
        Err(error) => match error.kind() {
            IntErrorKind::PosOverflow => TZ_MAX_HOURS,
            IntErrorKind::NegOverflow => TZ_MIN_HOURS,
            _ => return Err(CommandError::InvalidTimezone),
        },
    };
    Ok(hours.clamp(TZ_MIN_HOURS, TZ_MAX_HOURS))
}

fn single_digit(arg: &str) -> Option<u8> {
    match arg.as_bytes() {
        [d] if d.is_ascii_digit() => Some(d - b'0'),
        _ => None,
    }
}

fn two_digits(hi: u8, lo: u8) -> Option<u8> {
    if hi.is_ascii_digit() && lo.is_ascii_digit() {
        Some((hi - b'0') * 10 + (lo - b'0'))
    } else {
        None
    }
}

fn parse_time_literal(arg: &str) -> Option<Command<'static>> {
    let &[h1, h0, b':', m1, m0, b':', s1, s0] = arg.as_bytes() else {
        return None;
    };
    Some(Command::SetTime {
        hour: two_digits(h1, h0)?,
        minute: two_digits(m1, m0)?,
        second: two_digits(s1, s0)?,
    })
}
