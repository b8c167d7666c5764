// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Blocking-mode contract: fade commands wait out the fade time only
//! when blocking is on and only after the command was accepted.

use std::time::{Duration, Instant};

use blink1_control::{Blink1Device, IndexedRgb, Rgb, SimBackend};

fn ready() -> SimBackend {
    let sim = SimBackend::new();
    sim.set_open_succeeds(true);
    sim.set_operations_succeed(true);
    sim
}

#[test]
fn blocking_defaults_to_off() {
    let device = Blink1Device::open(ready());
    assert!(!device.is_blocking());
}

#[test]
fn blocking_flag_getter_setter() {
    let mut device = Blink1Device::open(ready());

    device.set_blocking(true);
    assert!(device.is_blocking());

    device.set_blocking(false);
    assert!(!device.is_blocking());
}

#[test]
fn blocking_fade_waits_out_the_fade_time() {
    let mut device = Blink1Device::open(ready());
    device.set_blocking(true);

    let start = Instant::now();
    assert!(device.fade_to_rgb(100, Rgb::new(10, 11, 12)));
    assert!(start.elapsed() >= Duration::from_millis(100));

    let start = Instant::now();
    assert!(device.fade_to_rgbn(100, IndexedRgb::new(Rgb::new(10, 11, 12), 20)));
    assert!(start.elapsed() >= Duration::from_millis(100));
}

#[test]
fn non_blocking_fade_returns_immediately() {
    let device = Blink1Device::open(ready());

    let start = Instant::now();
    assert!(device.fade_to_rgb(500, Rgb::new(10, 11, 12)));
    assert!(start.elapsed() < Duration::from_millis(100));

    let start = Instant::now();
    assert!(device.fade_to_rgbn(500, IndexedRgb::new(Rgb::new(10, 11, 12), 20)));
    assert!(start.elapsed() < Duration::from_millis(100));
}

#[test]
fn rejected_fade_does_not_wait() {
    let sim = ready();
    let mut device = Blink1Device::open(sim.clone());
    device.set_blocking(true);
    sim.set_operations_succeed(false);

    let start = Instant::now();
    assert!(!device.fade_to_rgb(500, Rgb::new(10, 11, 12)));
    assert!(start.elapsed() < Duration::from_millis(100));
}

#[test]
fn fade_on_a_bad_handle_does_not_wait() {
    let sim = SimBackend::new(); // opens refused
    let mut device = Blink1Device::open(sim);
    device.set_blocking(true);

    let start = Instant::now();
    assert!(!device.fade_to_rgb(500, Rgb::new(10, 11, 12)));
    assert!(start.elapsed() < Duration::from_millis(100));
}
