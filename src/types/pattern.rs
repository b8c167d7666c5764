// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pattern step types.
//!
//! A blink(1) stores a sequence of (color, fade time) steps in onboard
//! memory and can play them back autonomously. [`PatternLine`] is one
//! such step; [`IndexedPatternLine`] additionally records which LED the
//! step applies to.

use std::fmt;

use super::rgb::{IndexedRgb, Rgb};

/// One step of a stored pattern: a color plus the fade time to reach it.
///
/// Also used as the return value of color reads, which report the fade
/// time alongside the color.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PatternLine {
    fade_millis: u16,
    rgb: Rgb,
}

impl PatternLine {
    /// Creates a new pattern line.
    #[must_use]
    pub const fn new(rgb: Rgb, fade_millis: u16) -> Self {
        Self { fade_millis, rgb }
    }

    /// Returns the fade time in milliseconds.
    #[must_use]
    pub const fn fade_millis(&self) -> u16 {
        self.fade_millis
    }

    /// Returns the color.
    #[must_use]
    pub const fn rgb(&self) -> Rgb {
        self.rgb
    }
}

impl fmt::Display for PatternLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} over {}ms", self.rgb, self.fade_millis)
    }
}

/// A [`PatternLine`] addressed to one LED.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct IndexedPatternLine {
    fade_millis: u16,
    rgb: IndexedRgb,
}

impl IndexedPatternLine {
    /// Creates a new indexed pattern line.
    #[must_use]
    pub const fn new(rgb: IndexedRgb, fade_millis: u16) -> Self {
        Self { fade_millis, rgb }
    }

    /// Returns the fade time in milliseconds.
    #[must_use]
    pub const fn fade_millis(&self) -> u16 {
        self.fade_millis
    }

    /// Returns the indexed color.
    #[must_use]
    pub const fn rgb(&self) -> IndexedRgb {
        self.rgb
    }

    /// Returns the same step with the LED index dropped.
    #[must_use]
    pub const fn line(&self) -> PatternLine {
        PatternLine::new(self.rgb.rgb(), self.fade_millis)
    }
}

impl fmt::Display for IndexedPatternLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} over {}ms", self.rgb, self.fade_millis)
    }
}

impl From<IndexedPatternLine> for PatternLine {
    fn from(line: IndexedPatternLine) -> Self {
        line.line()
    }
}
