//! Cooperative multi-rate scheduler.
//!
//! Drives input handling, the time-source probe, scrolling and frame
//! rendering from one loop, each against its own deadline. The caller owns
//! the loop: it reads the tick, calls [`FrameScheduler::tick`] and yields
//! for at most the returned sleep duration.

use embassy_time::Duration;

use crate::config::MarqueeConfig;
use crate::dispatcher::dispatch_line;
use crate::line_buffer::LineBuffer;
use crate::network::{ConnectionMonitor, CredentialStore, LinkState, NetworkLink, NetworkRequest};
use crate::renderer::{Frame, FrameRenderer};
use crate::rx_queue::SerialInput;
use crate::state::{DeviceState, DisplayMode, TickerMode};
use crate::tick::{Deadline, Tick, period_millis};
use crate::time_source::{Reading, TimeSource, TimeSync, network_epoch};
use crate::DisplayDriver;

/// Result of a loop iteration.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The nearest pending deadline.
    pub next_deadline: Tick,
    /// How long the caller may yield (zero if something is already due).
    pub sleep_duration: Duration,
    /// Frame pushed to the display during this iteration, if any.
    pub rendered: Option<Frame>,
}

/// External collaborators the scheduler talks to
pub struct Peripherals<D, T, S, N> {
    pub display: D,
    pub time_sync: T,
    pub store: S,
    pub network: N,
}

/// Single-threaded control loop of the device.
///
/// Owns the device state; nothing else mutates it, so no locking is needed.
pub struct FrameScheduler<D, T, S, N>
where
    D: DisplayDriver,
    T: TimeSync,
    S: CredentialStore,
    N: NetworkLink,
{
    peripherals: Peripherals<D, T, S, N>,
    state: DeviceState,
    lines: LineBuffer,
    renderer: FrameRenderer,
    connection: ConnectionMonitor,

    next_frame: Deadline,
    next_scroll: Deadline,
    next_probe: Deadline,
    ticker_frame_ms: u32,
    clock_frame_ms: u32,
    probe_ms: u32,

    showing_clock: bool,
    time_valid: bool,
}

impl<D, T, S, N> FrameScheduler<D, T, S, N>
where
    D: DisplayDriver,
    T: TimeSync,
    S: CredentialStore,
    N: NetworkLink,
{
    /// Create the scheduler with all deadlines due at `now`.
    ///
    /// Stored credentials are loaded and, when present, a connection attempt
    /// is started right away.
    pub fn new(config: &MarqueeConfig, mut peripherals: Peripherals<D, T, S, N>, now: Tick) -> Self {
        let mut state = DeviceState::new(&mut peripherals.display);
        let mut connection = ConnectionMonitor::new(period_millis(config.timings.connect_timeout));

        if let Some(credentials) = peripherals.store.load() {
            state.credentials = credentials;
            connection.connect(&mut peripherals.network, &state.credentials, now);
        }

        Self {
            time_valid: network_epoch(&peripherals.time_sync).is_some(),
            peripherals,
            state,
            lines: LineBuffer::new(),
            renderer: FrameRenderer::new(config.layout),
            connection,
            next_frame: Deadline::new(now),
            next_scroll: Deadline::new(now),
            next_probe: Deadline::new(now),
            ticker_frame_ms: period_millis(config.timings.ticker_frame),
            clock_frame_ms: period_millis(config.timings.clock_frame),
            probe_ms: period_millis(config.timings.probe),
            showing_clock: false,
        }
    }

    /// Run one loop iteration at `now`.
    pub fn tick<I: SerialInput>(&mut self, now: Tick, input: &mut I) -> FrameResult {
        self.drain_input(now, input);
        self.connection.poll(&mut self.peripherals.network, now);

        if self.next_probe.is_due(now) {
            self.probe_time_source();
            self.next_probe.advance(now, self.probe_ms);
        }

        let rendered = match self.state.display_mode() {
            DisplayMode::Clock(mode) => {
                self.enter_display(true, now);
                if self.next_frame.is_due(now) {
                    let reading = self.reading(now);
                    let frame = self.renderer.render_clock(
                        &mut self.peripherals.display,
                        mode,
                        reading,
                        self.state.tz_offset_minutes(),
                    );
                    self.next_frame.advance(now, self.clock_frame_ms);
                    Some(frame)
                } else {
                    None
                }
            }
            DisplayMode::Ticker(mode) => {
                self.enter_display(false, now);
                if mode == TickerMode::Scrolling && self.next_scroll.is_due(now) {
                    self.renderer.step_scroll(&mut self.state);
                    self.next_scroll.advance(now, self.state.scroll_interval_ms());
                }
                if self.next_frame.is_due(now) {
                    let frame = self
                        .renderer
                        .render_ticker(&mut self.peripherals.display, &self.state);
                    self.next_frame.advance(now, self.ticker_frame_ms);
                    Some(frame)
                } else {
                    None
                }
            }
        };

        self.result(now, rendered)
    }

    /// Dispatch one already-assembled command line.
    pub fn handle_line(&mut self, line: &str, now: Tick) {
        process_line(
            &mut self.state,
            &mut self.peripherals,
            &mut self.connection,
            &mut self.next_scroll,
            line,
            now,
        );
    }

    pub const fn state(&self) -> &DeviceState {
        &self.state
    }

    pub const fn peripherals(&self) -> &Peripherals<D, T, S, N> {
        &self.peripherals
    }

    pub fn peripherals_mut(&mut self) -> &mut Peripherals<D, T, S, N> {
        &mut self.peripherals
    }

    pub const fn link_state(&self) -> LinkState {
        self.connection.state()
    }

    /// Whether the last probe found a validated network epoch
    pub const fn time_valid(&self) -> bool {
        self.time_valid
    }

    /// Resolve "now" from the time sources
    pub fn reading(&self, now: Tick) -> Reading {
        TimeSource::new(&self.peripherals.time_sync, self.state.manual_clock(), now).now()
    }

    fn drain_input<I: SerialInput>(&mut self, now: Tick, input: &mut I) {
        while let Some(byte) = input.read_byte() {
            if let Some(line) = self.lines.push(byte) {
                process_line(
                    &mut self.state,
                    &mut self.peripherals,
                    &mut self.connection,
                    &mut self.next_scroll,
                    line,
                    now,
                );
            }
        }
    }

    fn probe_time_source(&mut self) {
        let valid = network_epoch(&self.peripherals.time_sync).is_some();
        if valid != self.time_valid {
            log!("[time] network time valid: {}", valid);
            self.time_valid = valid;
        }
    }

    /// Re-arm the shared frame deadline when switching between clock and
    /// ticker, so the new display appears without waiting out the old period.
    fn enter_display(&mut self, clock: bool, now: Tick) {
        if self.showing_clock != clock {
            self.showing_clock = clock;
            self.next_frame.rearm(now);
        }
    }

    fn result(&self, now: Tick, rendered: Option<Frame>) -> FrameResult {
        let mut next = self.next_frame;
        if self.next_probe.remaining(now) < next.remaining(now) {
            next = self.next_probe;
        }
        let scrolling = !self.showing_clock && self.state.ticker_mode() == TickerMode::Scrolling;
        if scrolling && self.next_scroll.remaining(now) < next.remaining(now) {
            next = self.next_scroll;
        }

        FrameResult {
            next_deadline: next.next(),
            sleep_duration: Duration::from_millis(u64::from(next.remaining(now))),
            rendered,
        }
    }
}

/// Dispatch one line and carry out the effects it reports.
///
/// Takes the scheduler's fields separately so a line still borrowed from the
/// line buffer can be handled in place.
fn process_line<D, T, S, N>(
    state: &mut DeviceState,
    peripherals: &mut Peripherals<D, T, S, N>,
    connection: &mut ConnectionMonitor,
    next_scroll: &mut Deadline,
    line: &str,
    now: Tick,
) where
    D: DisplayDriver,
    T: TimeSync,
    S: CredentialStore,
    N: NetworkLink,
{
    let effects = dispatch_line(
        state,
        line,
        &mut peripherals.display,
        &peripherals.time_sync,
        now,
    );
    if !effects.has_effects() {
        return;
    }
    if effects.restart_scroll {
        next_scroll.rearm(now);
    }

    let credentials = &state.credentials;
    match effects.network {
        Some(NetworkRequest::Save) => {
            peripherals
                .store
                .save(&credentials.name, &credentials.secret);
        }
        Some(NetworkRequest::Connect) => {
            connection.connect(&mut peripherals.network, credentials, now);
        }
        Some(NetworkRequest::Forget) => {
            peripherals.store.clear();
            connection.disconnect(&mut peripherals.network);
        }
        None => {}
    }
}
