//! Static configuration for the scheduler and the frame layout.

use embassy_time::Duration;

use crate::state::FontLevel;

/// Periods of the independent activities driven by the scheduler
#[derive(Debug, Clone, Copy)]
pub struct SchedulerTimings {
    /// Frame period while the ticker is shown (~30 Hz)
    pub ticker_frame: Duration,
    /// Frame period while the full-screen clock is shown (5 Hz)
    pub clock_frame: Duration,
    /// Period of the time-source validity probe
    pub probe: Duration,
    /// How long a network connection attempt may take before giving up
    pub connect_timeout: Duration,
}

impl SchedulerTimings {
    pub const DEFAULT: Self = Self {
        ticker_frame: Duration::from_millis(33),
        clock_frame: Duration::from_millis(200),
        probe: Duration::from_millis(1000),
        connect_timeout: Duration::from_secs(15),
    };
}

impl Default for SchedulerTimings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Text baselines for one font level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Baselines {
    pub small: i32,
    pub medium: i32,
    pub large: i32,
}

impl Baselines {
    pub const fn for_level(&self, level: FontLevel) -> i32 {
        match level {
            FontLevel::Small => self.small,
            FontLevel::Medium => self.medium,
            FontLevel::Large => self.large,
        }
    }
}

/// Geometry of the panel and where each kind of frame draws its text
#[derive(Debug, Clone, Copy)]
pub struct DisplayLayout {
    /// Visible width in pixels
    pub screen_width: i32,
    /// Gap between the two copies of scrolling text
    pub scroll_gap: i32,
    /// Ticker baseline per font level
    pub ticker: Baselines,
    /// Baseline of the time when it is shown alone
    pub clock_time_only: i32,
    /// Baseline of the time when the date is shown below it
    pub clock_time_with_date: i32,
    /// Baseline of the date line
    pub clock_date: i32,
}

impl DisplayLayout {
    /// Layout for a 128x32 monochrome panel
    pub const DEFAULT: Self = Self {
        screen_width: 128,
        scroll_gap: 24,
        ticker: Baselines {
            small: 20,
            medium: 23,
            large: 27,
        },
        clock_time_only: 26,
        clock_time_with_date: 15,
        clock_date: 30,
    };
}

impl Default for DisplayLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete configuration of the marquee core
#[derive(Debug, Clone, Copy, Default)]
pub struct MarqueeConfig {
    pub timings: SchedulerTimings,
    pub layout: DisplayLayout,
}
