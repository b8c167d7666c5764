// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simulation bookkeeping seen through the public crate surface: reset,
//! diagnostics, and backend isolation.

use blink1_control::{Blink1Device, PlayState, Rgb, SimBackend};

fn ready() -> SimBackend {
    let sim = SimBackend::new();
    sim.set_open_succeeds(true);
    sim.set_operations_succeed(true);
    sim
}

#[test]
fn state_persists_until_cleared() {
    let sim = ready();
    {
        let device = Blink1Device::open(sim.clone());
        assert!(device.set_rgb(Rgb::new(1, 2, 3)));
        assert!(device.play(5));
    }
    // Residue survives the handle for post-mortem assertions.
    assert_eq!(sim.led_color(0), Some(Rgb::new(1, 2, 3)));
    assert!(sim.play_state().playing());

    sim.clear_all();
    assert!(sim.led_color(0).is_none());
    assert_eq!(sim.play_state(), PlayState::default());
}

#[test]
fn clear_all_turns_the_success_toggles_back_off() {
    let sim = ready();
    sim.clear_all();
    assert!(!Blink1Device::open(sim.clone()).good());
}

#[test]
fn dropping_a_handle_across_a_reset_is_diagnosed() {
    let sim = ready();
    let device = Blink1Device::open(sim.clone());
    assert!(device.good());

    // The reset forgets the token the handle still owns; the close in
    // Drop is then a stale release, which the harness reports.
    sim.clear_all();
    drop(device);

    let diagnostics = sim.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("not open"));
    assert!(sim.take_diagnostics().is_empty());
}

#[test]
fn uninitialized_reads_are_diagnosed_but_still_answer() {
    let sim = ready();
    let device = Blink1Device::open(sim.clone());

    // Nothing was ever written: zero-valued fallbacks, plus a harness
    // diagnostic per missing piece of state.
    assert_eq!(device.read_rgb_with_fade(3).map(|l| l.rgb()), Some(Rgb::black()));
    assert_eq!(sim.take_diagnostics().len(), 2);

    assert!(device.read_pattern_line(9).is_some());
    assert_eq!(sim.take_diagnostics().len(), 1);
}

#[test]
fn separate_backends_are_isolated() {
    let first = ready();
    let second = ready();

    let device = Blink1Device::open(first.clone());
    assert!(device.set_rgb(Rgb::red_color()));
    device.enable_degamma();

    assert!(second.led_color(0).is_none());
    assert!(!second.degamma_enabled());
    assert!(second.all_tokens_released());
}

#[test]
fn clones_observe_the_same_device() {
    let sim = ready();
    let clone = sim.clone();

    let device = Blink1Device::open(clone);
    assert!(device.set_rgb(Rgb::blue_color()));
    assert_eq!(sim.led_color(0), Some(Rgb::blue_color()));
    assert_eq!(sim.open_count(), 1);
}

#[test]
fn open_count_tracks_live_handles() {
    let sim = ready();
    let first = Blink1Device::open(sim.clone());
    let second = Blink1Device::open(sim.clone());
    assert_eq!(sim.open_count(), 2);

    drop(first);
    assert_eq!(sim.open_count(), 1);
    drop(second);
    assert!(sim.all_tokens_released());
}
