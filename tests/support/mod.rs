#![allow(dead_code)]

use std::collections::VecDeque;

use myrtio_marquee::{
    CredentialStore, Credentials, DisplayDriver, FontLevel, NetworkLink, SerialInput, TimeSync,
};

/// Epoch of 2024-03-10T12:34:56Z
pub const SYNCED_EPOCH: u64 = 1_710_074_096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Font(FontLevel),
    Clear,
    Text(i32, i32, String),
    Present,
}

/// Display that records every call; glyphs are fixed-width per font
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub ops: Vec<DrawOp>,
    pub font: Option<FontLevel>,
    pub measure_calls: usize,
}

pub fn glyph_width(level: FontLevel) -> u32 {
    match level {
        FontLevel::Small => 6,
        FontLevel::Medium => 8,
        FontLevel::Large => 12,
    }
}

impl RecordingDisplay {
    /// Text drawn since the last clear
    pub fn last_frame_texts(&self) -> Vec<(i32, i32, String)> {
        let start = self
            .ops
            .iter()
            .rposition(|op| *op == DrawOp::Clear)
            .unwrap_or(0);
        self.ops[start..]
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(x, y, text) => Some((*x, *y, text.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn presents(&self) -> usize {
        self.ops.iter().filter(|op| **op == DrawOp::Present).count()
    }
}

impl DisplayDriver for RecordingDisplay {
    fn select_font(&mut self, level: FontLevel) {
        self.font = Some(level);
        self.ops.push(DrawOp::Font(level));
    }

    fn measure_width(&mut self, text: &str) -> u32 {
        self.measure_calls += 1;
        let per_glyph = glyph_width(self.font.unwrap_or(FontLevel::Medium));
        u32::try_from(text.chars().count()).unwrap() * per_glyph
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        self.ops.push(DrawOp::Text(x, y, text.to_string()));
    }

    fn present(&mut self) {
        self.ops.push(DrawOp::Present);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FakeSync {
    pub validated: bool,
    pub epoch: u64,
}

impl FakeSync {
    pub fn synced(epoch: u64) -> Self {
        Self {
            validated: true,
            epoch,
        }
    }
}

impl TimeSync for FakeSync {
    fn has_validated_epoch(&self) -> bool {
        self.validated
    }

    fn current_epoch_seconds(&self) -> u64 {
        self.epoch
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub saved: Option<(String, String)>,
    pub saves: usize,
    pub clears: usize,
}

impl CredentialStore for MemoryStore {
    fn save(&mut self, name: &str, secret: &str) {
        self.saves += 1;
        self.saved = Some((name.to_string(), secret.to_string()));
    }

    fn load(&mut self) -> Option<Credentials> {
        let (name, secret) = self.saved.as_ref()?;
        let mut credentials = Credentials::default();
        credentials.name.push_str(name).ok()?;
        credentials.secret.push_str(secret).ok()?;
        Some(credentials)
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.saved = None;
    }
}

#[derive(Debug, Default)]
pub struct FakeLink {
    pub connected: bool,
    pub connects: Vec<String>,
    pub disconnects: usize,
}

impl NetworkLink for FakeLink {
    fn begin_connect(&mut self, credentials: &Credentials) {
        self.connects.push(credentials.name.as_str().to_string());
    }

    fn disconnect(&mut self) {
        self.disconnects += 1;
        self.connected = false;
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Serial input backed by a byte queue
#[derive(Debug, Default)]
pub struct ScriptedInput(pub VecDeque<u8>);

impl ScriptedInput {
    pub fn lines(text: &str) -> Self {
        Self(text.bytes().collect())
    }
}

impl SerialInput for ScriptedInput {
    fn read_byte(&mut self) -> Option<u8> {
        self.0.pop_front()
    }
}
