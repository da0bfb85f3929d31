#![no_std]

#[macro_use]
mod logging;

pub mod command;
pub mod config;
pub mod dispatcher;
pub mod frame_scheduler;
pub mod line_buffer;
pub mod network;
pub mod renderer;
pub mod rx_queue;
pub mod state;
pub mod tick;
pub mod time_source;

pub use command::{Command, CommandError, ScrollSpeed};
pub use config::{DisplayLayout, MarqueeConfig, SchedulerTimings};
pub use dispatcher::{CommandEffects, dispatch_line};
pub use frame_scheduler::{FrameResult, FrameScheduler, Peripherals};
pub use line_buffer::LineBuffer;
pub use network::{CredentialStore, Credentials, LinkState, NetworkLink};
pub use renderer::{Frame, FrameRenderer};
pub use rx_queue::{RxQueue, RxReader, SerialInput};
pub use state::{ClockMode, DeviceState, DisplayMode, FontLevel, TickerMode};
pub use tick::{Deadline, Tick};
pub use time_source::{ManualClock, Reading, TimeSource, TimeSync};

pub use embassy_time::{Duration, Instant};

/// Abstract display backend
///
/// Implement this trait to drive a concrete panel. Calls are expected to be
/// synchronous and fast compared to the frame period.
pub trait DisplayDriver {
    /// Select the font used by later `measure_width` and `draw_text` calls
    fn select_font(&mut self, level: FontLevel);

    /// Width of `text` in pixels in the selected font
    fn measure_width(&mut self, text: &str) -> u32;

    /// Clear the frame buffer
    fn clear(&mut self);

    /// Draw `text` with its left edge at `x` and its baseline at `y`
    fn draw_text(&mut self, x: i32, y: i32, text: &str);

    /// Flush the frame buffer to the panel
    fn present(&mut self);
}
