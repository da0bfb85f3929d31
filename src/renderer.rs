//! Frame composition on top of a [`DisplayDriver`]
//!
//! The renderer decides what goes where; glyph drawing and buffer flushing
//! belong to the driver.

use crate::DisplayDriver;
use crate::config::DisplayLayout;
use crate::state::{ClockMode, DeviceState, FontLevel, TickerMode};
use crate::time_source::{Reading, format_date, format_time};

/// Kind of frame that was last pushed to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Clock(ClockMode),
    Ticker(TickerMode),
}

/// Composes clock and ticker frames
#[derive(Debug, Clone, Copy)]
pub struct FrameRenderer {
    layout: DisplayLayout,
}

impl FrameRenderer {
    pub const fn new(layout: DisplayLayout) -> Self {
        Self { layout }
    }

    pub const fn layout(&self) -> &DisplayLayout {
        &self.layout
    }

    /// Draw the full-screen clock for `reading`
    pub fn render_clock<D: DisplayDriver>(
        &self,
        driver: &mut D,
        mode: ClockMode,
        reading: Reading,
        tz_offset_minutes: i16,
    ) -> Frame {
        driver.clear();
        let time = format_time(reading, tz_offset_minutes);
        match mode {
            ClockMode::TimeAndDate => {
                let date = format_date(reading, tz_offset_minutes);
                self.draw_centered(
                    driver,
                    FontLevel::Medium,
                    self.layout.clock_time_with_date,
                    &time,
                );
                self.draw_centered(driver, FontLevel::Small, self.layout.clock_date, &date);
            }
            ClockMode::TimeOnly | ClockMode::Off => {
                self.draw_centered(driver, FontLevel::Large, self.layout.clock_time_only, &time);
            }
        }
        driver.present();
        Frame::Clock(mode)
    }

    /// Draw the ticker in its current sub-state
    pub fn render_ticker<D: DisplayDriver>(&self, driver: &mut D, state: &DeviceState) -> Frame {
        let mode = state.ticker_mode();
        driver.clear();

        let font = state.font();
        let baseline = self.layout.ticker.for_level(font);
        match mode {
            TickerMode::Hidden => {}
            TickerMode::Scrolling => {
                driver.select_font(font);
                let x = state.scroll_offset;
                driver.draw_text(x, baseline, state.text());
                // Second copy trails the first so the loop looks continuous.
                let trailing = x
                    .saturating_add(state.text_width())
                    .saturating_add(self.layout.scroll_gap);
                driver.draw_text(trailing, baseline, state.text());
            }
            TickerMode::Static => {
                driver.select_font(font);
                let x = centered_x(self.layout.screen_width, state.text_width());
                driver.draw_text(x, baseline, state.text());
            }
        }

        driver.present();
        Frame::Ticker(mode)
    }

    /// Move the ticker one pixel left, wrapping once it has fully left the
    /// screen together with the trailing gap.
    pub fn step_scroll(&self, state: &mut DeviceState) {
        state.scroll_offset -= 1;
        if state.scroll_offset < -state.text_width().saturating_add(self.layout.scroll_gap) {
            state.scroll_offset = self.layout.screen_width;
        }
    }

    fn draw_centered<D: DisplayDriver>(&self, driver: &mut D, font: FontLevel, y: i32, text: &str) {
        driver.select_font(font);
        let width = i32::try_from(driver.measure_width(text)).unwrap_or(i32::MAX);
        driver.draw_text(centered_x(self.layout.screen_width, width), y, text);
    }
}

const fn centered_x(screen_width: i32, text_width: i32) -> i32 {
    (screen_width - text_width) / 2
}
