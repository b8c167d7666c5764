// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Backend abstraction for blink(1) device control.
//!
//! A [`Backend`] is the capability set of the low-level device library:
//! opening and closing devices, color and fade commands, pattern memory
//! I/O, playback control, and the handle-independent configuration calls
//! (degamma, vendor/product id). [`Blink1Device`](crate::Blink1Device)
//! never talks to hardware directly; it dispatches every operation
//! through a backend.
//!
//! # Backends
//!
//! - [`SimBackend`](sim::SimBackend): deterministic in-memory simulation
//!   used to exercise the wrapper without hardware
//! - A binding to the real C device library can be supplied by
//!   implementing [`Backend`] over its FFI surface; USB/HID transport
//!   details stay on that side of the seam

pub mod sim;

use std::fmt;

use crate::error::CommandResult;
use crate::types::{IndexedPatternLine, IndexedRgb, PatternLine, PlayState, Rgb};

/// Opaque token for one open device.
///
/// A token is minted by [`Backend::open`] and owned by exactly one
/// [`Blink1Device`](crate::Blink1Device). It is deliberately not `Clone`:
/// [`Backend::close`] takes it by value, so release happens at most once
/// and is enforced by move semantics.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct DeviceToken {
    id: u64,
}

impl DeviceToken {
    /// Creates a token with the given backend-assigned id.
    ///
    /// Only backends should mint tokens.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self { id }
    }

    /// Returns the backend-assigned id.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}

/// Selects which device an open call should attach to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OpenTarget {
    /// The first available device.
    #[default]
    Default,
    /// The Nth enumerated device.
    Id(u32),
    /// The device at a filesystem path.
    Path(String),
    /// The device with a serial string.
    Serial(String),
}

impl fmt::Display for OpenTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "first available"),
            Self::Id(id) => write!(f, "id {id}"),
            Self::Path(path) => write!(f, "path {path}"),
            Self::Serial(serial) => write!(f, "serial {serial}"),
        }
    }
}

/// The operation set of the low-level blink(1) device library.
///
/// Command methods return [`CommandResult`]: `Err(NotOpen)` when the
/// token does not refer to an open device, `Err(Rejected)` when the
/// device refuses the command. Time-based commands are inherently
/// non-blocking at this layer; the blocking-mode wait lives entirely in
/// [`Blink1Device`](crate::Blink1Device).
pub trait Backend {
    /// Opens a device, returning a token iff one could be attached.
    fn open(&self, target: &OpenTarget) -> Option<DeviceToken>;

    /// Closes an open device, consuming its token.
    fn close(&self, token: DeviceToken);

    /// Reads the firmware version.
    fn version(&self, token: &DeviceToken) -> CommandResult<i32>;

    /// Fades every LED to `rgb` over `fade_millis` milliseconds.
    fn fade_to_rgb(&self, token: &DeviceToken, fade_millis: u16, rgb: Rgb) -> CommandResult<()>;

    /// Fades one LED to a color over `fade_millis` milliseconds.
    fn fade_to_rgbn(
        &self,
        token: &DeviceToken,
        fade_millis: u16,
        rgbn: IndexedRgb,
    ) -> CommandResult<()>;

    /// Sets every LED to `rgb` immediately.
    fn set_rgb(&self, token: &DeviceToken, rgb: Rgb) -> CommandResult<()>;

    /// Reads the color of one LED together with its fade time.
    fn read_rgb(&self, token: &DeviceToken, led: u8) -> CommandResult<PatternLine>;

    /// Starts (`play = true`) or stops playback at a pattern position.
    fn play(&self, token: &DeviceToken, play: bool, pos: u8) -> CommandResult<()>;

    /// Starts or stops looped playback over `start..=end`, repeating
    /// `count` times (0 means forever).
    fn play_loop(
        &self,
        token: &DeviceToken,
        play: bool,
        start: u8,
        end: u8,
        count: u8,
    ) -> CommandResult<()>;

    /// Reads the current playback state.
    fn read_play_state(&self, token: &DeviceToken) -> CommandResult<PlayState>;

    /// Selects the LED that subsequent pattern writes apply to.
    fn select_led(&self, token: &DeviceToken, led: u8) -> CommandResult<()>;

    /// Writes a pattern step at the given position.
    fn write_pattern_line(
        &self,
        token: &DeviceToken,
        line: &PatternLine,
        pos: u8,
    ) -> CommandResult<()>;

    /// Reads back the pattern step at the given position.
    fn read_pattern_line(&self, token: &DeviceToken, pos: u8) -> CommandResult<PatternLine>;

    /// Reads back the pattern step at the given position, including its
    /// LED index.
    fn read_pattern_line_indexed(
        &self,
        token: &DeviceToken,
        pos: u8,
    ) -> CommandResult<IndexedPatternLine>;

    /// Persists the in-memory pattern to non-volatile storage.
    fn save_pattern(&self, token: &DeviceToken) -> CommandResult<()>;

    /// Returns the device's cache slot index (`-1` means not cached).
    fn cache_index(&self, token: &DeviceToken) -> CommandResult<i32>;

    /// Clears the device's cache slot, returning the cleared index.
    fn clear_cache(&self, token: &DeviceToken) -> CommandResult<i32>;

    /// Reads the device serial string.
    fn serial(&self, token: &DeviceToken) -> CommandResult<String>;

    /// Returns whether the device is a mk2 hardware revision.
    fn is_mk2(&self, token: &DeviceToken) -> CommandResult<bool>;

    /// Enables the firmware gamma-correction curve.
    ///
    /// Global library configuration, not tied to any open device.
    fn enable_degamma(&self);

    /// Disables the firmware gamma-correction curve.
    fn disable_degamma(&self);

    /// USB vendor id of the device family.
    fn vendor_id(&self) -> i32;

    /// USB product id of the device family.
    fn product_id(&self) -> i32;
}
