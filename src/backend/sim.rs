// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deterministic simulation backend.
//!
//! [`SimBackend`] stands in for a physical blink(1) and its control
//! library so [`Blink1Device`](crate::Blink1Device) logic can be tested
//! without hardware. It reproduces every observable success and failure
//! behavior of the real library, including its quirks (whole-device
//! commands overwrite every LED touched so far; unindexed pattern writes
//! reuse the last selected LED).
//!
//! Besides the [`Backend`] command surface the simulation exposes a
//! control/introspection surface for test setup and assertions: success
//! toggles, cached value setters, state getters, [`clear_all`] and a
//! diagnostics list that records harness errors such as double-close or
//! reads of state nothing ever wrote.
//!
//! Cloning a `SimBackend` yields another front over the same simulated
//! device; construct a fresh one for an isolated device. Nothing is reset
//! automatically - state persists until [`clear_all`] so tests can
//! inspect residue after handles are dropped.
//!
//! [`clear_all`]: SimBackend::clear_all

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{CommandError, CommandResult};
use crate::types::{IndexedPatternLine, IndexedRgb, PatternLine, PlayState, Rgb};

use super::{Backend, DeviceToken, OpenTarget};

/// In-memory stand-in for a blink(1) device and its control library.
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
/// let device = Blink1Device::open(sim.clone());
/// assert!(device.set_rgb(Rgb::new(255, 0, 0)));
/// assert_eq!(sim.led_color(0), Some(Rgb::new(255, 0, 0)));
/// ```
#[derive(Clone, Default)]
pub struct SimBackend {
    state: Arc<Mutex<SimState>>,
}

#[derive(Default)]
struct SimState {
    next_token: u64,
    open_tokens: HashSet<u64>,
    led_colors: HashMap<u8, Rgb>,
    led_fade_millis: HashMap<u8, u16>,
    pattern_lines: HashMap<u8, IndexedPatternLine>,
    selected_led: u8,
    play_state: PlayState,
    version: i32,
    cache_index: i32,
    serial: String,
    mk2: bool,
    degamma_enabled: bool,
    vendor_id: i32,
    product_id: i32,
    open_succeeds: bool,
    operations_succeed: bool,
    diagnostics: Vec<String>,
}

impl SimState {
    /// Uniform gate for every device command: the token must be open and
    /// the operation toggle on.
    fn gate(&self, token: &DeviceToken) -> CommandResult<()> {
        if !self.open_tokens.contains(&token.id()) {
            return Err(CommandError::NotOpen);
        }
        if !self.operations_succeed {
            return Err(CommandError::Rejected);
        }
        Ok(())
    }

    /// Records a harness error: a caller bug, not a simulated device
    /// failure.
    fn diagnose(&mut self, detail: String) {
        tracing::error!(detail = %detail, "simulation harness error");
        self.diagnostics.push(detail);
    }
}

impl SimBackend {
    /// Creates a new simulated device with everything zeroed and both
    /// success toggles off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Control surface (test setup)
    // =========================================================================

    /// Sets whether open calls yield a device.
    pub fn set_open_succeeds(&self, succeeds: bool) {
        self.state.lock().open_succeeds = succeeds;
    }

    /// Sets whether device commands succeed.
    pub fn set_operations_succeed(&self, succeed: bool) {
        self.state.lock().operations_succeed = succeed;
    }

    /// Sets the reported firmware version.
    pub fn set_version(&self, version: i32) {
        self.state.lock().version = version;
    }

    /// Sets the reported cache index.
    pub fn set_cache_index(&self, index: i32) {
        self.state.lock().cache_index = index;
    }

    /// Sets the reported serial string.
    pub fn set_serial(&self, serial: impl Into<String>) {
        self.state.lock().serial = serial.into();
    }

    /// Sets the reported mk2 flag.
    pub fn set_mk2(&self, mk2: bool) {
        self.state.lock().mk2 = mk2;
    }

    /// Sets the reported USB vendor id.
    pub fn set_vendor_id(&self, vid: i32) {
        self.state.lock().vendor_id = vid;
    }

    /// Sets the reported USB product id.
    pub fn set_product_id(&self, pid: i32) {
        self.state.lock().product_id = pid;
    }

    /// Seeds the stored color for one LED.
    pub fn set_led_color(&self, led: u8, rgb: Rgb) {
        self.state.lock().led_colors.insert(led, rgb);
    }

    /// Seeds the stored fade time for one LED.
    pub fn set_led_fade_millis(&self, led: u8, fade_millis: u16) {
        self.state.lock().led_fade_millis.insert(led, fade_millis);
    }

    /// Seeds the pattern step stored at a position.
    pub fn set_pattern_line(&self, pos: u8, line: IndexedPatternLine) {
        self.state.lock().pattern_lines.insert(pos, line);
    }

    /// Seeds the playback state.
    pub fn set_play_state(&self, state: PlayState) {
        self.state.lock().play_state = state;
    }

    /// Resets the simulated device to its defaults, dropping all open
    /// tokens, maps, cached values, toggles and diagnostics.
    pub fn clear_all(&self) {
        *self.state.lock() = SimState::default();
    }

    // =========================================================================
    // Introspection surface (test assertions)
    // =========================================================================

    /// Returns the stored color for one LED, if any command or setter
    /// ever touched it.
    #[must_use]
    pub fn led_color(&self, led: u8) -> Option<Rgb> {
        self.state.lock().led_colors.get(&led).copied()
    }

    /// Returns the stored fade time for one LED, if ever touched.
    #[must_use]
    pub fn led_fade_millis(&self, led: u8) -> Option<u16> {
        self.state.lock().led_fade_millis.get(&led).copied()
    }

    /// Returns the pattern step stored at a position, if ever written.
    #[must_use]
    pub fn pattern_line(&self, pos: u8) -> Option<IndexedPatternLine> {
        self.state.lock().pattern_lines.get(&pos).copied()
    }

    /// Returns the LED index last selected for pattern writes.
    #[must_use]
    pub fn selected_led(&self) -> u8 {
        self.state.lock().selected_led
    }

    /// Returns the current playback state.
    #[must_use]
    pub fn play_state(&self) -> PlayState {
        self.state.lock().play_state
    }

    /// Returns whether the gamma-correction curve is enabled.
    #[must_use]
    pub fn degamma_enabled(&self) -> bool {
        self.state.lock().degamma_enabled
    }

    /// Returns the number of currently open tokens.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.state.lock().open_tokens.len()
    }

    /// Returns true when every opened token has been closed again.
    #[must_use]
    pub fn all_tokens_released(&self) -> bool {
        self.state.lock().open_tokens.is_empty()
    }

    /// Returns the harness errors recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<String> {
        self.state.lock().diagnostics.clone()
    }

    /// Returns and clears the harness errors recorded so far.
    #[must_use]
    pub fn take_diagnostics(&self) -> Vec<String> {
        std::mem::take(&mut self.state.lock().diagnostics)
    }
}

impl Backend for SimBackend {
    fn open(&self, target: &OpenTarget) -> Option<DeviceToken> {
        let mut state = self.state.lock();
        if !state.open_succeeds {
            tracing::debug!(target = %target, "simulated open refused");
            return None;
        }
        state.next_token += 1;
        let id = state.next_token;
        state.open_tokens.insert(id);
        tracing::trace!(target = %target, id, "simulated open");
        Some(DeviceToken::new(id))
    }

    fn close(&self, token: DeviceToken) {
        let mut state = self.state.lock();
        if !state.open_tokens.remove(&token.id()) {
            state.diagnose(format!("closed a token that was not open: {}", token.id()));
        }
    }

    // Gated on token validity only, not on the operation toggle: the real
    // library answers version queries as long as the handle is alive.
    fn version(&self, token: &DeviceToken) -> CommandResult<i32> {
        let mut state = self.state.lock();
        if !state.open_tokens.contains(&token.id()) {
            state.diagnose(format!(
                "version queried on a token that was not open: {}",
                token.id()
            ));
            return Err(CommandError::NotOpen);
        }
        Ok(state.version)
    }

    fn fade_to_rgb(&self, token: &DeviceToken, fade_millis: u16, rgb: Rgb) -> CommandResult<()> {
        let mut state = self.state.lock();
        state.gate(token)?;
        // A whole-device command: LED 0 first so it exists in the maps,
        // then every LED touched so far.
        state.led_fade_millis.insert(0, fade_millis);
        state.led_colors.insert(0, rgb);
        for millis in state.led_fade_millis.values_mut() {
            *millis = fade_millis;
        }
        for color in state.led_colors.values_mut() {
            *color = rgb;
        }
        Ok(())
    }

    fn fade_to_rgbn(
        &self,
        token: &DeviceToken,
        fade_millis: u16,
        rgbn: IndexedRgb,
    ) -> CommandResult<()> {
        let mut state = self.state.lock();
        state.gate(token)?;
        state.led_fade_millis.insert(rgbn.led(), fade_millis);
        state.led_colors.insert(rgbn.led(), rgbn.rgb());
        Ok(())
    }

    fn set_rgb(&self, token: &DeviceToken, rgb: Rgb) -> CommandResult<()> {
        let mut state = self.state.lock();
        state.gate(token)?;
        // Colors only; the set command carries no fade time.
        state.led_colors.insert(0, rgb);
        for color in state.led_colors.values_mut() {
            *color = rgb;
        }
        Ok(())
    }

    fn read_rgb(&self, token: &DeviceToken, led: u8) -> CommandResult<PatternLine> {
        let mut state = self.state.lock();
        state.gate(token)?;
        let rgb = match state.led_colors.get(&led) {
            Some(rgb) => *rgb,
            None => {
                state.diagnose(format!("LED color {led} has not been written"));
                Rgb::default()
            }
        };
        let fade_millis = match state.led_fade_millis.get(&led) {
            Some(millis) => *millis,
            None => {
                state.diagnose(format!("LED fade time {led} has not been written"));
                0
            }
        };
        Ok(PatternLine::new(rgb, fade_millis))
    }

    fn play(&self, token: &DeviceToken, play: bool, pos: u8) -> CommandResult<()> {
        let mut state = self.state.lock();
        state.gate(token)?;
        if play {
            state.play_state.playing = true;
            state.play_state.position = pos;
            state.play_state.end = pos;
        } else {
            // Stop leaves the positional fields as they were.
            state.play_state.playing = false;
        }
        Ok(())
    }

    fn play_loop(
        &self,
        token: &DeviceToken,
        play: bool,
        start: u8,
        end: u8,
        count: u8,
    ) -> CommandResult<()> {
        let mut state = self.state.lock();
        state.gate(token)?;
        state.play_state.playing = play;
        state.play_state.start = start;
        state.play_state.end = end;
        state.play_state.count = count;
        Ok(())
    }

    fn read_play_state(&self, token: &DeviceToken) -> CommandResult<PlayState> {
        let state = self.state.lock();
        state.gate(token)?;
        Ok(state.play_state)
    }

    fn select_led(&self, token: &DeviceToken, led: u8) -> CommandResult<()> {
        let mut state = self.state.lock();
        state.gate(token)?;
        state.selected_led = led;
        Ok(())
    }

    fn write_pattern_line(
        &self,
        token: &DeviceToken,
        line: &PatternLine,
        pos: u8,
    ) -> CommandResult<()> {
        let mut state = self.state.lock();
        state.gate(token)?;
        let rgbn = IndexedRgb::new(line.rgb(), state.selected_led);
        state
            .pattern_lines
            .insert(pos, IndexedPatternLine::new(rgbn, line.fade_millis()));
        Ok(())
    }

    fn read_pattern_line(&self, token: &DeviceToken, pos: u8) -> CommandResult<PatternLine> {
        self.read_pattern_line_indexed(token, pos)
            .map(|line| line.line())
    }

    fn read_pattern_line_indexed(
        &self,
        token: &DeviceToken,
        pos: u8,
    ) -> CommandResult<IndexedPatternLine> {
        let mut state = self.state.lock();
        state.gate(token)?;
        match state.pattern_lines.get(&pos) {
            Some(line) => Ok(*line),
            None => {
                state.diagnose(format!("pattern line {pos} has not been written"));
                Ok(IndexedPatternLine::default())
            }
        }
    }

    fn save_pattern(&self, token: &DeviceToken) -> CommandResult<()> {
        self.state.lock().gate(token)
    }

    fn cache_index(&self, token: &DeviceToken) -> CommandResult<i32> {
        let state = self.state.lock();
        state.gate(token)?;
        Ok(state.cache_index)
    }

    fn clear_cache(&self, token: &DeviceToken) -> CommandResult<i32> {
        let state = self.state.lock();
        state.gate(token)?;
        Ok(state.cache_index)
    }

    fn serial(&self, token: &DeviceToken) -> CommandResult<String> {
        let state = self.state.lock();
        state.gate(token)?;
        Ok(state.serial.clone())
    }

    fn is_mk2(&self, token: &DeviceToken) -> CommandResult<bool> {
        let state = self.state.lock();
        state.gate(token)?;
        Ok(state.mk2)
    }

    fn enable_degamma(&self) {
        self.state.lock().degamma_enabled = true;
    }

    fn disable_degamma(&self) {
        self.state.lock().degamma_enabled = false;
    }

    fn vendor_id(&self) -> i32 {
        self.state.lock().vendor_id
    }

    fn product_id(&self) -> i32 {
        self.state.lock().product_id
    }
}
