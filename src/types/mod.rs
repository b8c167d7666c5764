// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for blink(1) device control.
//!
//! Plain data carried between callers, the device handle, and backends.
//! All types here are small `Copy` records with field-wise equality and
//! a human-readable `Display`.
//!
//! # Types
//!
//! - [`Rgb`] - color triple, 8 bits per channel
//! - [`IndexedRgb`] - color plus the LED index it applies to
//! - [`PatternLine`] - one stored pattern step (color + fade time)
//! - [`IndexedPatternLine`] - pattern step plus LED index
//! - [`PlayState`] - snapshot of autonomous pattern playback

mod pattern;
mod play_state;
mod rgb;

pub use pattern::{IndexedPatternLine, PatternLine};
pub use play_state::PlayState;
pub use rgb::{IndexedRgb, Rgb};
