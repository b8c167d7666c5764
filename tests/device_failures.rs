// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Soft-failure behavior: handles that never opened and commands the
//! device rejects.

use blink1_control::{
    Blink1Device, IndexedPatternLine, IndexedRgb, PatternLine, PlayState, Rgb, SimBackend,
};

// ============================================================================
// Open failed: the handle exists but holds no resource
// ============================================================================

mod failed_open {
    use super::*;

    fn no_device() -> (SimBackend, Blink1Device<SimBackend>) {
        let sim = SimBackend::new();
        sim.set_operations_succeed(true); // opens still refused
        let device = Blink1Device::open(sim.clone());
        (sim, device)
    }

    #[test]
    fn handle_is_not_good() {
        let (_, device) = no_device();
        assert!(!device.good());
    }

    #[test]
    fn every_open_variant_fails_softly() {
        let sim = SimBackend::new();
        assert!(!Blink1Device::open_by_id(sim.clone(), 1).good());
        assert!(!Blink1Device::open_by_path(sim.clone(), "/dev/hidraw0").good());
        assert!(!Blink1Device::open_by_serial(sim.clone(), "deadbeef").good());
        assert!(sim.diagnostics().is_empty());
    }

    #[test]
    fn commands_return_failure_without_backend_traffic() {
        let (sim, device) = no_device();

        assert_eq!(device.version(), None);
        assert!(!device.fade_to_rgb(100, Rgb::red_color()));
        assert!(!device.fade_to_rgbn(100, IndexedRgb::new(Rgb::red_color(), 1)));
        assert!(!device.set_rgb(Rgb::red_color()));
        assert!(!device.set_rgbn(IndexedRgb::new(Rgb::red_color(), 1)));
        assert_eq!(device.read_rgb_with_fade(0), None);
        assert_eq!(device.read_rgb(0), None);
        assert!(!device.play(5));
        assert!(!device.play_loop(5, 6, 7));
        assert!(!device.stop());
        assert_eq!(device.read_play_state(), None);
        assert!(!device.write_pattern_line(&PatternLine::new(Rgb::white(), 10), 0));
        assert!(!device.write_pattern_line_indexed(
            &IndexedPatternLine::new(IndexedRgb::new(Rgb::white(), 1), 10),
            0
        ));
        assert_eq!(device.read_pattern_line(0), None);
        assert_eq!(device.read_pattern_line_indexed(0), None);
        assert!(!device.save_pattern());
        assert_eq!(device.cache_index(), None);
        assert_eq!(device.clear_cache(), None);
        assert_eq!(device.serial(), None);
        assert_eq!(device.is_mk2(), None);

        // Nothing observable happened on the simulated device.
        assert!(sim.led_color(0).is_none());
        assert!(sim.led_fade_millis(0).is_none());
        assert!(sim.pattern_line(0).is_none());
        assert_eq!(sim.play_state(), PlayState::default());
        assert_eq!(sim.selected_led(), 0);
    }

    #[test]
    fn global_configuration_still_works() {
        let (sim, device) = no_device();
        sim.set_vendor_id(10168);
        sim.set_product_id(493);

        device.enable_degamma();
        assert!(sim.degamma_enabled());
        assert_eq!(device.vendor_id(), 10168);
        assert_eq!(device.product_id(), 493);
    }

    #[test]
    fn drop_is_safe_and_silent() {
        let (sim, device) = no_device();
        drop(device);
        assert!(sim.all_tokens_released());
        assert!(sim.diagnostics().is_empty());
    }

    #[test]
    fn clear_on_exit_sends_nothing_without_a_resource() {
        let sim = SimBackend::new();
        {
            let mut device = Blink1Device::open(sim.clone());
            device.set_clear_on_exit(true);
            device.set_clear_color(Rgb::red_color());
        }
        assert!(sim.led_color(0).is_none());
    }
}

// ============================================================================
// Open succeeded but the device rejects commands
// ============================================================================

mod rejected_commands {
    use super::*;

    fn rejecting_device() -> (SimBackend, Blink1Device<SimBackend>) {
        let sim = SimBackend::new();
        sim.set_open_succeeds(true);
        // operations_succeed stays false
        let device = Blink1Device::open(sim.clone());
        (sim, device)
    }

    #[test]
    fn handle_is_still_good() {
        let (_, device) = rejecting_device();
        assert!(device.good());
    }

    #[test]
    fn version_survives_rejected_operations() {
        // Version queries only need a live handle; the operation toggle
        // does not apply to them.
        let (sim, device) = rejecting_device();
        sim.set_version(1337);
        assert_eq!(device.version(), Some(1337));
    }

    #[test]
    fn commands_fail_without_side_effects() {
        let (sim, device) = rejecting_device();

        assert!(!device.fade_to_rgb(100, Rgb::new(10, 11, 12)));
        assert!(!device.fade_to_rgbn(100, IndexedRgb::new(Rgb::new(10, 11, 12), 20)));
        assert!(!device.set_rgb(Rgb::new(10, 11, 12)));
        assert!(!device.set_rgbn(IndexedRgb::new(Rgb::new(10, 11, 12), 20)));
        assert!(!device.play(5));
        assert!(!device.play_loop(5, 6, 7));
        assert!(!device.stop());
        assert!(!device.write_pattern_line(&PatternLine::new(Rgb::white(), 4), 20));
        assert!(!device.save_pattern());

        assert!(sim.led_color(0).is_none());
        assert!(sim.led_color(20).is_none());
        assert!(sim.pattern_line(20).is_none());
        assert_eq!(sim.play_state(), PlayState::default());
    }

    #[test]
    fn reads_are_absent() {
        let (sim, device) = rejecting_device();
        sim.set_led_color(20, Rgb::white());
        sim.set_led_fade_millis(20, 97);
        sim.set_cache_index(98);
        sim.set_serial("3C0FFEE5");
        sim.set_mk2(true);

        assert_eq!(device.read_rgb_with_fade(20), None);
        assert_eq!(device.read_rgb(20), None);
        assert_eq!(device.read_play_state(), None);
        assert_eq!(device.read_pattern_line(20), None);
        assert_eq!(device.read_pattern_line_indexed(20), None);
        assert_eq!(device.cache_index(), None);
        assert_eq!(device.clear_cache(), None);
        assert_eq!(device.serial(), None);
        assert_eq!(device.is_mk2(), None);
    }

    #[test]
    fn clear_on_exit_failure_is_ignored_and_resource_released() {
        let sim = SimBackend::new();
        sim.set_open_succeeds(true);
        {
            let mut device = Blink1Device::open(sim.clone());
            device.set_clear_on_exit(true);
            device.set_clear_color(Rgb::red_color());
        }
        // The clear was rejected, but the close still happened.
        assert!(sim.led_color(0).is_none());
        assert!(sim.all_tokens_released());
        assert!(sim.diagnostics().is_empty());
    }
}
