// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pattern playback state.

use std::fmt;

/// Snapshot of the device's autonomous pattern playback.
///
/// Returned by [`Blink1Device::read_play_state`](crate::Blink1Device::read_play_state).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PlayState {
    pub(crate) playing: bool,
    pub(crate) start: u8,
    pub(crate) end: u8,
    pub(crate) count: u8,
    pub(crate) position: u8,
}

impl PlayState {
    /// Creates a new play state snapshot.
    #[must_use]
    pub const fn new(playing: bool, start: u8, end: u8, count: u8, position: u8) -> Self {
        Self {
            playing,
            start,
            end,
            count,
            position,
        }
    }

    /// Returns whether a pattern is currently playing.
    #[must_use]
    pub const fn playing(&self) -> bool {
        self.playing
    }

    /// Returns the loop start position.
    #[must_use]
    pub const fn start(&self) -> u8 {
        self.start
    }

    /// Returns the loop end position.
    #[must_use]
    pub const fn end(&self) -> u8 {
        self.end
    }

    /// Returns the remaining repeat count (0 means forever).
    #[must_use]
    pub const fn count(&self) -> u8 {
        self.count
    }

    /// Returns the current playback position.
    #[must_use]
    pub const fn position(&self) -> u8 {
        self.position
    }
}

impl fmt::Display for PlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.playing { "playing" } else { "stopped" };
        write!(
            f,
            "{state} {}..={} x{} at {}",
            self.start, self.end, self.count, self.position
        )
    }
}
