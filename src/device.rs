// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level handle for one blink(1) device.
//!
//! [`Blink1Device`] owns the opaque resource for a single device and
//! translates high-level intents into [`Backend`] commands. Every public
//! operation is total: a handle whose open failed answers `false`/`None`
//! without touching the backend, and no method panics.

use std::thread;
use std::time::Duration;

use crate::backend::{Backend, DeviceToken, OpenTarget};
use crate::error::CommandResult;
use crate::types::{IndexedPatternLine, IndexedRgb, PatternLine, PlayState, Rgb};

/// A handle owning one open blink(1) device.
///
/// The handle is move-only: the device resource has single-owner
/// semantics, and dropping the handle releases it exactly once. Opening
/// never fails loudly - check [`good`](Self::good) to learn whether a
/// device was actually attached.
///
/// # Blocking mode
///
/// Fade commands return immediately by default. With
/// [`set_blocking`](Self::set_blocking) the handle sleeps out the fade
/// time after a successful send, emulating a synchronous fade on top of
/// the inherently non-blocking device library. The flag never reaches
/// the backend.
///
/// # Examples
///
/// ```
/// use blink1_control::{Blink1Device, Rgb, SimBackend};
///
/// let sim = SimBackend::new();
/// sim.set_open_succeeds(true);
/// sim.set_operations_succeed(true);
///
/// let mut device = Blink1Device::open(sim.clone());
/// assert!(device.good());
///
/// device.set_clear_on_exit(true);
/// device.set_clear_color(Rgb::black());
/// assert!(device.fade_to_rgb(500, Rgb::new(255, 64, 0)));
/// drop(device); // fades are cleared to black, resource released
/// assert!(sim.all_tokens_released());
/// ```
#[derive(Debug)]
pub struct Blink1Device<B: Backend> {
    backend: B,
    token: Option<DeviceToken>,
    blocking: bool,
    clear_color: Rgb,
    clear_on_exit: bool,
}

impl<B: Backend> Blink1Device<B> {
    /// Opens the first available device.
    #[must_use]
    pub fn open(backend: B) -> Self {
        Self::open_with(backend, OpenTarget::Default)
    }

    /// Opens the Nth enumerated device.
    #[must_use]
    pub fn open_by_id(backend: B, id: u32) -> Self {
        Self::open_with(backend, OpenTarget::Id(id))
    }

    /// Opens the device at a filesystem path.
    #[must_use]
    pub fn open_by_path(backend: B, path: impl Into<String>) -> Self {
        Self::open_with(backend, OpenTarget::Path(path.into()))
    }

    /// Opens the device with the given serial string.
    #[must_use]
    pub fn open_by_serial(backend: B, serial: impl Into<String>) -> Self {
        Self::open_with(backend, OpenTarget::Serial(serial.into()))
    }

    /// Opens the device selected by `target`.
    ///
    /// If no device could be attached the handle is still returned, in a
    /// not-[`good`](Self::good) state where every operation fails softly.
    #[must_use]
    pub fn open_with(backend: B, target: OpenTarget) -> Self {
        let token = backend.open(&target);
        if token.is_none() {
            tracing::debug!(target = %target, "no blink(1) device attached");
        }
        Self {
            backend,
            token,
            blocking: false,
            clear_color: Rgb::black(),
            clear_on_exit: false,
        }
    }

    /// Returns whether a device resource is held.
    #[must_use]
    pub fn good(&self) -> bool {
        self.token.is_some()
    }

    /// Returns the backend this handle dispatches through.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs one backend command against the held token, flattening both
    /// failure channels (no token, rejected command) into `None`.
    fn dispatch<T>(
        &self,
        command: &'static str,
        op: impl FnOnce(&B, &DeviceToken) -> CommandResult<T>,
    ) -> Option<T> {
        let Some(token) = self.token.as_ref() else {
            tracing::trace!(command, "no device, command skipped");
            return None;
        };
        match op(&self.backend, token) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::debug!(command, error = %error, "device command failed");
                None
            }
        }
    }

    /// Sleeps out a successful fade when blocking mode is on.
    fn wait_for_fade(&self, sent: bool, fade_millis: u16) {
        if sent && self.blocking {
            thread::sleep(Duration::from_millis(u64::from(fade_millis)));
        }
    }

    // ========== Color commands ==========

    /// Gets the firmware version of the connected device.
    #[must_use]
    pub fn version(&self) -> Option<i32> {
        self.dispatch("version", |backend, token| backend.version(token))
    }

    /// Fades all LEDs to `rgb` over `fade_millis` milliseconds.
    ///
    /// Returns true iff the command was accepted by the device. In
    /// blocking mode a successful call does not return until the fade
    /// time has elapsed.
    pub fn fade_to_rgb(&self, fade_millis: u16, rgb: Rgb) -> bool {
        let sent = self
            .dispatch("fade_to_rgb", |backend, token| {
                backend.fade_to_rgb(token, fade_millis, rgb)
            })
            .is_some();
        self.wait_for_fade(sent, fade_millis);
        sent
    }

    /// Fades one LED to a color over `fade_millis` milliseconds.
    ///
    /// Blocking mode applies as in [`fade_to_rgb`](Self::fade_to_rgb).
    pub fn fade_to_rgbn(&self, fade_millis: u16, rgbn: IndexedRgb) -> bool {
        let sent = self
            .dispatch("fade_to_rgbn", |backend, token| {
                backend.fade_to_rgbn(token, fade_millis, rgbn)
            })
            .is_some();
        self.wait_for_fade(sent, fade_millis);
        sent
    }

    /// Sets all LEDs to `rgb` immediately.
    pub fn set_rgb(&self, rgb: Rgb) -> bool {
        self.dispatch("set_rgb", |backend, token| backend.set_rgb(token, rgb))
            .is_some()
    }

    /// Sets one LED to a color immediately.
    ///
    /// Implemented as a zero-duration indexed fade; the device library
    /// has no direct per-LED set command.
    pub fn set_rgbn(&self, rgbn: IndexedRgb) -> bool {
        self.fade_to_rgbn(0, rgbn)
    }

    /// Reads the color of one LED together with the fade time reported
    /// alongside it.
    ///
    /// Whether the device reports the current or the target color during
    /// an in-flight fade is not documented; simulated backends report
    /// whatever was last written.
    #[must_use]
    pub fn read_rgb_with_fade(&self, led: u8) -> Option<PatternLine> {
        self.dispatch("read_rgb", |backend, token| backend.read_rgb(token, led))
    }

    /// Reads the color of one LED.
    #[must_use]
    pub fn read_rgb(&self, led: u8) -> Option<Rgb> {
        self.read_rgb_with_fade(led).map(|line| line.rgb())
    }

    // ========== Pattern playback ==========

    /// Starts playing the stored pattern from `pos`.
    pub fn play(&self, pos: u8) -> bool {
        self.dispatch("play", |backend, token| backend.play(token, true, pos))
            .is_some()
    }

    /// Plays the stored pattern in a loop over `start..=end`, repeating
    /// `count` times (0 repeats forever).
    pub fn play_loop(&self, start: u8, end: u8, count: u8) -> bool {
        self.dispatch("play_loop", |backend, token| {
            backend.play_loop(token, true, start, end, count)
        })
        .is_some()
    }

    /// Stops pattern playback.
    pub fn stop(&self) -> bool {
        self.dispatch("stop", |backend, token| backend.play(token, false, 0))
            .is_some()
    }

    /// Reads the current playback state.
    #[must_use]
    pub fn read_play_state(&self) -> Option<PlayState> {
        self.dispatch("read_play_state", |backend, token| {
            backend.read_play_state(token)
        })
    }

    // ========== Pattern memory ==========

    /// Writes a pattern step at `pos`.
    ///
    /// On mk2 devices this writes volatile memory; call
    /// [`save_pattern`](Self::save_pattern) to persist it.
    pub fn write_pattern_line(&self, line: &PatternLine, pos: u8) -> bool {
        self.dispatch("write_pattern_line", |backend, token| {
            backend.write_pattern_line(token, line, pos)
        })
        .is_some()
    }

    /// Writes a pattern step addressed to one LED at `pos`.
    ///
    /// Sends an LED-select command followed by the step write; both must
    /// be accepted for this to return true.
    pub fn write_pattern_line_indexed(&self, line: &IndexedPatternLine, pos: u8) -> bool {
        self.dispatch("write_pattern_line_indexed", |backend, token| {
            backend.select_led(token, line.rgb().led())?;
            backend.write_pattern_line(token, &line.line(), pos)
        })
        .is_some()
    }

    /// Reads back the pattern step stored at `pos`.
    #[must_use]
    pub fn read_pattern_line(&self, pos: u8) -> Option<PatternLine> {
        self.dispatch("read_pattern_line", |backend, token| {
            backend.read_pattern_line(token, pos)
        })
    }

    /// Reads back the pattern step stored at `pos`, including its LED
    /// index.
    #[must_use]
    pub fn read_pattern_line_indexed(&self, pos: u8) -> Option<IndexedPatternLine> {
        self.dispatch("read_pattern_line_indexed", |backend, token| {
            backend.read_pattern_line_indexed(token, pos)
        })
    }

    /// Persists the volatile pattern memory to non-volatile storage.
    ///
    /// Known to time out on some working hardware before the flash write
    /// completes; callers wanting certainty should retry themselves.
    pub fn save_pattern(&self) -> bool {
        self.dispatch("save_pattern", |backend, token| backend.save_pattern(token))
            .is_some()
    }

    // ========== Device info ==========

    /// Returns this device's cache slot index, if it is cached.
    #[must_use]
    pub fn cache_index(&self) -> Option<i32> {
        self.dispatch("cache_index", |backend, token| backend.cache_index(token))
            .filter(|index| *index != -1)
    }

    /// Clears this device's cache slot, returning the cleared index if
    /// anything was cleared.
    #[must_use]
    pub fn clear_cache(&self) -> Option<i32> {
        self.dispatch("clear_cache", |backend, token| backend.clear_cache(token))
            .filter(|index| *index != -1)
    }

    /// Returns the device's serial string.
    #[must_use]
    pub fn serial(&self) -> Option<String> {
        self.dispatch("serial", |backend, token| backend.serial(token))
    }

    /// Returns whether the device is a mk2 hardware revision.
    #[must_use]
    pub fn is_mk2(&self) -> Option<bool> {
        self.dispatch("is_mk2", |backend, token| backend.is_mk2(token))
    }

    // ========== Handle-independent backend configuration ==========

    /// Enables the device library's gamma-correction curve.
    ///
    /// Global backend configuration; works without an open device.
    pub fn enable_degamma(&self) {
        self.backend.enable_degamma();
    }

    /// Disables the device library's gamma-correction curve.
    pub fn disable_degamma(&self) {
        self.backend.disable_degamma();
    }

    /// USB vendor id of the blink(1) device family.
    #[must_use]
    pub fn vendor_id(&self) -> i32 {
        self.backend.vendor_id()
    }

    /// USB product id of the blink(1) device family.
    #[must_use]
    pub fn product_id(&self) -> i32 {
        self.backend.product_id()
    }

    // ========== Handle configuration ==========

    /// Sets whether fade commands wait out the fade time.
    pub fn set_blocking(&mut self, blocking: bool) {
        self.blocking = blocking;
    }

    /// Returns whether the handle is in blocking mode.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.blocking
    }

    /// Sets whether dropping the handle first clears all LEDs to the
    /// [`clear_color`](Self::clear_color).
    pub fn set_clear_on_exit(&mut self, clear: bool) {
        self.clear_on_exit = clear;
    }

    /// Returns whether the handle clears the LEDs on drop.
    #[must_use]
    pub fn clear_on_exit(&self) -> bool {
        self.clear_on_exit
    }

    /// Sets the color used by clear-on-exit. Defaults to black.
    pub fn set_clear_color(&mut self, color: Rgb) {
        self.clear_color = color;
    }

    /// Returns the color used by clear-on-exit.
    #[must_use]
    pub fn clear_color(&self) -> Rgb {
        self.clear_color
    }
}

impl<B: Backend> Drop for Blink1Device<B> {
    fn drop(&mut self) {
        if self.clear_on_exit && self.good() {
            // Best effort; the resource is released either way.
            let _ = self.set_rgb(self.clear_color);
        }
        if let Some(token) = self.token.take() {
            self.backend.close(token);
        }
    }
}
