// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! blink(1) control - a Rust library to control blink(1) USB
//! notification lights.
//!
//! The crate is a thin object-oriented wrapper around the low-level
//! device library: [`Blink1Device`] owns one open device and exposes its
//! command set, while the [`Backend`] trait marks the seam to the
//! library itself. A deterministic [`SimBackend`] ships in-crate so the
//! wrapper can be exercised, and consuming code tested, without
//! hardware.
//!
//! # Supported Features
//!
//! - **Color control**: set or fade all LEDs or a single LED, read back
//!   stored colors and fade times
//! - **Pattern memory**: write, read and persist onboard pattern steps
//! - **Playback**: play, loop and stop the stored pattern; inspect the
//!   play state
//! - **Device info**: firmware version, serial, hardware revision,
//!   cache slot
//! - **Blocking mode**: opt-in waiting for fades to finish
//!
//! # Quick Start
//!
//! ```
//! use blink1_control::{Blink1Device, Rgb, SimBackend};
//!
//! // A simulated device; a real deployment would pass a backend
//! // implemented over the C device library instead.
//! let sim = SimBackend::new();
//! sim.set_open_succeeds(true);
//! sim.set_operations_succeed(true);
//!
//! let device = Blink1Device::open(sim.clone());
//! assert!(device.good());
//!
//! // Fade everything to orange over half a second.
//! assert!(device.fade_to_rgb(500, Rgb::new(255, 64, 0)));
//! assert_eq!(device.read_rgb(0), Some(Rgb::new(255, 64, 0)));
//! ```
//!
//! # Failure model
//!
//! Nothing here panics and no public method returns `Result`: a handle
//! whose open failed reports `good() == false` and every operation on it
//! fails softly (`false` or `None`), as do commands the device rejects.
//! Callers decide whether to retry, log or give up.

pub mod backend;
mod device;
pub mod error;
pub mod types;

pub use backend::sim::SimBackend;
pub use backend::{Backend, DeviceToken, OpenTarget};
pub use device::Blink1Device;
pub use error::{CommandError, CommandResult, ValueError};
pub use types::{IndexedPatternLine, IndexedRgb, PatternLine, PlayState, Rgb};
