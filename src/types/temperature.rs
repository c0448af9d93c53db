// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color temperature on the mesh percent scale.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Color temperature as a 0-100 percent value understood by the receiver.
///
/// The control plane supplies color temperature in hundreds of Kelvin; the
/// receiver expects a percentage where higher Kelvin maps to a lower percent.
///
/// # Examples
///
/// ```
/// use meshbridge::types::ColorTemperaturePercent;
///
/// assert_eq!(ColorTemperaturePercent::from_kelvin_hundreds(150).value(), 42);
/// assert_eq!(ColorTemperaturePercent::from_kelvin_hundreds(300).value(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTemperaturePercent(u8);

impl ColorTemperaturePercent {
    /// Upper end of the reference scale, in hundreds of Kelvin.
    pub const REFERENCE_HUNDREDS: u32 = 300;

    /// Width of the scale, in hundreds of Kelvin.
    pub const SPAN_HUNDREDS: u32 = 350;

    /// Wraps an already converted percent value.
    #[must_use]
    pub const fn new(percent: u8) -> Self {
        Self(percent)
    }

    /// Converts hundreds of Kelvin to the percent scale.
    ///
    /// Computes `(300 - k) * 100 / 350` in wrapping 32-bit unsigned
    /// arithmetic and keeps the low byte, which is what deployed receivers
    /// were built against. Inputs above 300 therefore wrap instead of
    /// saturating (`500` yields `173`); callers are expected to pre-scale into
    /// the `150..=300` range.
    #[must_use]
    pub const fn from_kelvin_hundreds(kelvin_hundreds: u32) -> Self {
        let scaled = Self::REFERENCE_HUNDREDS
            .wrapping_sub(kelvin_hundreds)
            .wrapping_mul(100)
            / Self::SPAN_HUNDREDS;
        #[allow(clippy::cast_possible_truncation)]
        let percent = scaled as u8;
        Self(percent)
    }

    /// Returns the percent value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for ColorTemperaturePercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kelvin_conversion_reference_points() {
        assert_eq!(ColorTemperaturePercent::from_kelvin_hundreds(150).value(), 42);
        assert_eq!(ColorTemperaturePercent::from_kelvin_hundreds(200).value(), 28);
        assert_eq!(ColorTemperaturePercent::from_kelvin_hundreds(250).value(), 14);
        assert_eq!(ColorTemperaturePercent::from_kelvin_hundreds(300).value(), 0);
    }

    #[test]
    fn higher_kelvin_gives_lower_percent() {
        let warm = ColorTemperaturePercent::from_kelvin_hundreds(160);
        let cool = ColorTemperaturePercent::from_kelvin_hundreds(280);
        assert!(warm > cool);
    }

    #[test]
    fn above_reference_wraps() {
        assert_eq!(ColorTemperaturePercent::from_kelvin_hundreds(301).value(), 230);
        assert_eq!(ColorTemperaturePercent::from_kelvin_hundreds(400).value(), 202);
        assert_eq!(ColorTemperaturePercent::from_kelvin_hundreds(500).value(), 173);
    }

    #[test]
    fn below_scale_truncates_to_low_byte() {
        // 300 * 100 / 350 = 85
        assert_eq!(ColorTemperaturePercent::from_kelvin_hundreds(0).value(), 85);
    }

    #[test]
    fn display() {
        assert_eq!(ColorTemperaturePercent::new(42).to_string(), "42%");
    }
}
