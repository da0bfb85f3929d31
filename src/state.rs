//! Device state shared by the dispatcher, the scheduler and the renderer.

use heapless::String;

use crate::DisplayDriver;
use crate::network::Credentials;
use crate::time_source::ManualClock;

/// Maximum length of the displayed message in bytes
pub const TEXT_CAPACITY: usize = 256;

/// Message shown before the first text command arrives
pub const DEFAULT_TEXT: &str = "Hello!";

/// Scroll interval used until the first `s/` command (speed 5)
pub const DEFAULT_SCROLL_INTERVAL_MS: u32 = 60;

/// Font size of the ticker text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontLevel {
    Small,
    Medium,
    Large,
}

/// Full-screen clock mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    Off,
    TimeOnly,
    TimeAndDate,
}

/// How the ticker is shown while the clock is off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerMode {
    Scrolling,
    Static,
    Hidden,
}

/// Top-level display state, selected only by the clock mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Clock(ClockMode),
    Ticker(TickerMode),
}

/// Mutable state of the device
///
/// The cached text width is kept consistent with the current text and font:
/// both can only be changed through methods that re-measure.
#[derive(Debug, Clone)]
pub struct DeviceState {
    text: String<TEXT_CAPACITY>,
    text_width: i32,
    font: FontLevel,
    ticker_visible: bool,
    scroll_enabled: bool,
    scroll_interval_ms: u32,
    /// Current horizontal draw position of the ticker text
    pub scroll_offset: i32,
    clock_mode: ClockMode,
    tz_offset_minutes: i16,
    pub(crate) manual_clock: ManualClock,
    pub(crate) credentials: Credentials,
}

impl DeviceState {
    /// Create the power-on state and measure the default text
    pub fn new<D: DisplayDriver>(driver: &mut D) -> Self {
        let mut state = Self {
            text: String::new(),
            text_width: 1,
            font: FontLevel::Medium,
            ticker_visible: true,
            scroll_enabled: true,
            scroll_interval_ms: DEFAULT_SCROLL_INTERVAL_MS,
            scroll_offset: 0,
            clock_mode: ClockMode::Off,
            tz_offset_minutes: 0,
            manual_clock: ManualClock::default(),
            credentials: Credentials::default(),
        };
        state.set_text(DEFAULT_TEXT, driver);
        state
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cached width of the text in the current font, at least one pixel
    pub const fn text_width(&self) -> i32 {
        self.text_width
    }

    pub const fn font(&self) -> FontLevel {
        self.font
    }

    pub const fn ticker_visible(&self) -> bool {
        self.ticker_visible
    }

    pub const fn scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    /// Scroll step interval, zero while not scrolling
    pub const fn scroll_interval_ms(&self) -> u32 {
        if self.scroll_enabled {
            self.scroll_interval_ms
        } else {
            0
        }
    }

    pub const fn clock_mode(&self) -> ClockMode {
        self.clock_mode
    }

    pub const fn tz_offset_minutes(&self) -> i16 {
        self.tz_offset_minutes
    }

    pub const fn manual_clock(&self) -> &ManualClock {
        &self.manual_clock
    }

    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub const fn ticker_mode(&self) -> TickerMode {
        match (self.ticker_visible, self.scroll_enabled) {
            (false, _) => TickerMode::Hidden,
            (true, true) => TickerMode::Scrolling,
            (true, false) => TickerMode::Static,
        }
    }

    pub const fn display_mode(&self) -> DisplayMode {
        match self.clock_mode {
            ClockMode::Off => DisplayMode::Ticker(self.ticker_mode()),
            mode => DisplayMode::Clock(mode),
        }
    }

    /// Replace the message, truncating it to [`TEXT_CAPACITY`] on a
    /// character boundary, and rewind the scroll position.
    pub fn set_text<D: DisplayDriver>(&mut self, text: &str, driver: &mut D) {
        let mut end = text.len().min(TEXT_CAPACITY);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        self.text.clear();
        // Cannot fail: `end` is within capacity.
        let _ = self.text.push_str(&text[..end]);
        self.scroll_offset = 0;
        self.remeasure(driver);
    }

    pub fn set_font<D: DisplayDriver>(&mut self, font: FontLevel, driver: &mut D) {
        self.font = font;
        self.remeasure(driver);
    }

    pub fn set_ticker_visible(&mut self, visible: bool) {
        self.ticker_visible = visible;
    }

    /// Enable scrolling with the given step interval, or disable it with `None`
    pub fn set_scroll_interval(&mut self, interval_ms: Option<u32>) {
        match interval_ms {
            Some(interval) => {
                self.scroll_enabled = true;
                self.scroll_interval_ms = interval;
            }
            None => self.scroll_enabled = false,
        }
    }

    pub fn set_clock_mode(&mut self, mode: ClockMode) {
        self.clock_mode = mode;
    }

    /// Set the timezone offset in whole hours; the caller clamps the range
    pub fn set_tz_hours(&mut self, hours: i8) {
        self.tz_offset_minutes = i16::from(hours) * 60;
    }

    fn remeasure<D: DisplayDriver>(&mut self, driver: &mut D) {
        driver.select_font(self.font);
        let width = driver.measure_width(&self.text).max(1);
        self.text_width = i32::try_from(width).unwrap_or(i32::MAX);
    }
}
