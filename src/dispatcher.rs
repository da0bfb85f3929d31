//! Command dispatch
//!
//! Applies parsed commands to the device state and reports the side effects
//! that belong to other collaborators (network requests, scheduler re-arms).

use crate::command::{Command, CommandError};
use crate::network::NetworkRequest;
use crate::state::{ClockMode, DeviceState};
use crate::tick::Tick;
use crate::time_source::TimeSync;
use crate::DisplayDriver;

/// Side effects of a dispatched command that the scheduler should apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandEffects {
    /// Request for the network collaborator
    pub network: Option<NetworkRequest>,
    /// Scrolling was (re)enabled and its deadline should restart now
    pub restart_scroll: bool,
}

impl CommandEffects {
    /// Check if any effects need to be applied
    pub const fn has_effects(&self) -> bool {
        self.network.is_some() || self.restart_scroll
    }
}

/// Parse and apply one line.
///
/// Malformed arguments are dropped without touching the state, except that
/// any line routed to a command other than `t/` still leaves the clock.
pub fn dispatch_line<D, T>(
    state: &mut DeviceState,
    line: &str,
    driver: &mut D,
    sync: &T,
    now: Tick,
) -> CommandEffects
where
    D: DisplayDriver,
    T: TimeSync,
{
    let parsed = Command::parse(line);
    let exits_clock = match &parsed {
        Ok(command) => command.exits_clock(),
        Err(_) => true,
    };

    let effects = match parsed {
        Ok(command) => apply(state, command, driver, sync, now),
        Err(error) => {
            log_rejected(error);
            CommandEffects::default()
        }
    };

    if exits_clock && state.clock_mode() != ClockMode::Off {
        log!("[command] clock off");
        state.set_clock_mode(ClockMode::Off);
    }
    effects
}

/// Apply a parsed command to the state
///
/// Does not perform the clock-mode reset; see [`dispatch_line`].
pub fn apply<D, T>(
    state: &mut DeviceState,
    command: Command<'_>,
    driver: &mut D,
    sync: &T,
    now: Tick,
) -> CommandEffects
where
    D: DisplayDriver,
    T: TimeSync,
{
    let mut effects = CommandEffects::default();

    match command {
        Command::ClockMode(mode) => {
            log!("[command] clock mode {:?}", mode);
            state.set_clock_mode(mode);
        }
        Command::Timezone(hours) => state.set_tz_hours(hours),
        Command::TickerVisible(visible) => state.set_ticker_visible(visible),
        Command::ScrollSpeed(speed) => {
            let interval = speed.interval_ms();
            effects.restart_scroll = interval.is_some() && !state.scroll_enabled();
            state.set_scroll_interval(interval);
        }
        Command::Font(level) => state.set_font(level, driver),
        Command::SetTime {
            hour,
            minute,
            second,
        } => {
            if let Err(error) = state.manual_clock.seed(hour, minute, second, now, sync) {
                log!("[command] time rejected: {:?}", error);
            }
        }
        Command::NetworkName(name) => {
            state.credentials.name.clear();
            let _ = state.credentials.name.push_str(name);
            effects.network = Some(NetworkRequest::Save);
        }
        Command::NetworkSecret(secret) => {
            state.credentials.secret.clear();
            let _ = state.credentials.secret.push_str(secret);
            effects.network = Some(NetworkRequest::Save);
        }
        Command::Connect => effects.network = Some(NetworkRequest::Connect),
        Command::Forget => {
            state.credentials.name.clear();
            state.credentials.secret.clear();
            effects.network = Some(NetworkRequest::Forget);
        }
        Command::Text(text) => state.set_text(text, driver),
    }

    effects
}

fn log_rejected(error: CommandError) {
    log!("[command] rejected: {:?}", error);
}
