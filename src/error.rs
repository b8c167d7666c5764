// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the blink(1) control library.
//!
//! Errors here never cross the public [`Blink1Device`](crate::Blink1Device)
//! surface: every device method is total and reports failure through its
//! return value (`bool` or `Option`). [`CommandError`] travels across the
//! [`Backend`](crate::Backend) seam and is converted at the device layer;
//! [`ValueError`] covers value parsing such as hex color strings.

use thiserror::Error;

/// Errors reported by a [`Backend`](crate::Backend) command.
///
/// These mirror the two ways the underlying device library can refuse a
/// well-formed call: the handle does not refer to an open device, or the
/// device rejected the command (negative status code).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// The token does not refer to a currently open device.
    #[error("device is not open")]
    NotOpen,

    /// The device rejected the command.
    #[error("command rejected by device")]
    Rejected,
}

/// Errors related to value parsing and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A hex color string could not be parsed.
    #[error("invalid hex color: {0}")]
    InvalidHexColor(String),
}

/// Result type for backend commands.
pub type CommandResult<T> = std::result::Result<T, CommandError>;
