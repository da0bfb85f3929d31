//! Network credentials and a non-blocking connection monitor
//!
//! Connecting and persisting credentials are handled by external
//! collaborators. The core only issues requests and polls the link status
//! from the scheduler loop, so nothing here ever waits.

use heapless::String;

use crate::tick::{Deadline, Tick};

/// Longest network name accepted by `w/`
pub const NETWORK_NAME_CAPACITY: usize = 32;

/// Longest secret accepted by `wp/`
pub const NETWORK_SECRET_CAPACITY: usize = 64;

/// Pending network identifier and secret
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub name: String<NETWORK_NAME_CAPACITY>,
    pub secret: String<NETWORK_SECRET_CAPACITY>,
}

impl Credentials {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// Persistent key-value storage for the credential pair
pub trait CredentialStore {
    fn save(&mut self, name: &str, secret: &str);

    /// Stored pair, or `None` if nothing was saved
    fn load(&mut self) -> Option<Credentials>;

    fn clear(&mut self);
}

/// Network interface that connects in the background
pub trait NetworkLink {
    /// Start connecting; must return without waiting for the result
    fn begin_connect(&mut self, credentials: &Credentials);

    fn disconnect(&mut self);

    fn is_connected(&self) -> bool;
}

/// Request issued by the dispatcher for the network collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkRequest {
    /// Save the pending credentials
    Save,
    /// Connect with the pending credentials
    Connect,
    /// Clear stored credentials and disconnect
    Forget,
}

/// State of the connection attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Idle,
    Connecting,
    Connected,
    Failed,
}

/// Tracks a connection attempt against a timeout deadline
#[derive(Debug)]
pub struct ConnectionMonitor {
    state: LinkState,
    timeout: Deadline,
    timeout_ms: u32,
}

impl ConnectionMonitor {
    pub const fn new(timeout_ms: u32) -> Self {
        Self {
            state: LinkState::Idle,
            timeout: Deadline::new(Tick(0)),
            timeout_ms,
        }
    }

    pub const fn state(&self) -> LinkState {
        self.state
    }

    /// Start a connection attempt, unless there is nothing to connect with
    pub fn connect<L: NetworkLink>(&mut self, link: &mut L, credentials: &Credentials, now: Tick) {
        if credentials.is_empty() {
            log!("[network] no credentials, connect ignored");
            return;
        }
        log!("[network] connecting to {}", credentials.name.as_str());
        link.begin_connect(credentials);
        self.timeout.rearm(now.add_millis(self.timeout_ms));
        self.state = LinkState::Connecting;
    }

    pub fn disconnect<L: NetworkLink>(&mut self, link: &mut L) {
        link.disconnect();
        self.state = LinkState::Idle;
    }

    /// Advance the state machine; call once per loop iteration
    pub fn poll<L: NetworkLink>(&mut self, link: &mut L, now: Tick) {
        let connected = link.is_connected();
        match self.state {
            LinkState::Connecting if connected => {
                log!("[network] connected");
                self.state = LinkState::Connected;
            }
            LinkState::Connecting if self.timeout.is_due(now) => {
                log!("[network] connect timed out");
                link.disconnect();
                self.state = LinkState::Failed;
            }
            LinkState::Connected if !connected => {
                log!("[network] link lost");
                self.state = LinkState::Idle;
            }
            _ => {}
        }
    }
}
