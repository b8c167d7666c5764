// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color types with hex parsing.
//!
//! [`Rgb`] is the plain color triple used by whole-device commands;
//! [`IndexedRgb`] pairs a color with the LED index it applies to on
//! multi-LED devices (the mk2 has two).

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// RGB color with 8-bit channels (0-255).
///
/// # Examples
///
/// ```
/// use blink1_control::Rgb;
///
/// let color = Rgb::new(255, 128, 0);
/// assert_eq!(color.red(), 255);
/// assert_eq!(color.green(), 128);
/// assert_eq!(color.blue(), 0);
///
/// // Parse from hex string
/// let red = Rgb::from_hex("#FF0000").unwrap();
/// assert_eq!(red, Rgb::red_color());
///
/// // Convert to hex
/// assert_eq!(red.to_hex(), "FF0000");
/// assert_eq!(red.to_hex_with_hash(), "#FF0000");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Creates a new RGB color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses an RGB color from a hex string.
    ///
    /// Accepts formats: `#RRGGBB`, `RRGGBB`, `#RGB`, `RGB`
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if the hex string is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use blink1_control::Rgb;
    ///
    /// let color = Rgb::from_hex("#FF5733").unwrap();
    /// assert_eq!(color.red(), 255);
    /// assert_eq!(color.green(), 87);
    /// assert_eq!(color.blue(), 51);
    ///
    /// // Short format
    /// let color = Rgb::from_hex("#F00").unwrap();
    /// assert_eq!(color.red(), 255);
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ValueError> {
        let hex = hex.trim_start_matches('#');

        match hex.len() {
            3 => {
                // Short format: RGB -> RRGGBB
                let chars: Vec<char> = hex.chars().collect();
                let r = parse_hex_char(chars[0])?;
                let g = parse_hex_char(chars[1])?;
                let b = parse_hex_char(chars[2])?;
                Ok(Self::new(r * 17, g * 17, b * 17)) // Expand 0-F to 0-255
            }
            6 => {
                let r = parse_hex_pair(&hex[0..2])?;
                let g = parse_hex_pair(&hex[2..4])?;
                let b = parse_hex_pair(&hex[4..6])?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ValueError::InvalidHexColor(hex.to_string())),
        }
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Returns the color as a hex string without the hash prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Returns the color as a hex string with the hash prefix.
    #[must_use]
    pub fn to_hex_with_hash(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Creates a pure red color.
    #[must_use]
    pub const fn red_color() -> Self {
        Self::new(255, 0, 0)
    }

    /// Creates a pure green color.
    #[must_use]
    pub const fn green_color() -> Self {
        Self::new(0, 255, 0)
    }

    /// Creates a pure blue color.
    #[must_use]
    pub const fn blue_color() -> Self {
        Self::new(0, 0, 255)
    }

    /// Creates a white color.
    #[must_use]
    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Creates a black (off) color.
    ///
    /// This is also the `Default` value, matching the device's state
    /// after power-up and the default clear-on-exit color.
    #[must_use]
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_with_hash())
    }
}

impl FromStr for Rgb {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<&str> for Rgb {
    type Error = ValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_hex(value)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

/// An RGB color addressed to one LED on a multi-LED device.
///
/// LED index 0 means "all LEDs" in device commands; indexes 1 and up
/// address individual LEDs.
///
/// # Examples
///
/// ```
/// use blink1_control::{IndexedRgb, Rgb};
///
/// let top = IndexedRgb::new(Rgb::new(0, 255, 0), 1);
/// assert_eq!(top.rgb(), Rgb::green_color());
/// assert_eq!(top.led(), 1);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct IndexedRgb {
    rgb: Rgb,
    led: u8,
}

impl IndexedRgb {
    /// Creates a new indexed color.
    #[must_use]
    pub const fn new(rgb: Rgb, led: u8) -> Self {
        Self { rgb, led }
    }

    /// Returns the color.
    #[must_use]
    pub const fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// Returns the LED index.
    #[must_use]
    pub const fn led(&self) -> u8 {
        self.led
    }
}

impl fmt::Display for IndexedRgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.rgb, self.led)
    }
}

impl From<(Rgb, u8)> for IndexedRgb {
    fn from((rgb, led): (Rgb, u8)) -> Self {
        Self::new(rgb, led)
    }
}

// Helper function to parse a single hex character
fn parse_hex_char(c: char) -> Result<u8, ValueError> {
    c.to_digit(16)
        .and_then(|d| u8::try_from(d).ok())
        .ok_or_else(|| ValueError::InvalidHexColor(c.to_string()))
}

// Helper function to parse a two-character hex pair
fn parse_hex_pair(s: &str) -> Result<u8, ValueError> {
    u8::from_str_radix(s, 16).map_err(|_| ValueError::InvalidHexColor(s.to_string()))
}
