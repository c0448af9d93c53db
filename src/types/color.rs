// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HSV color for the color attribute group.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Converts a hue in degrees to the integer stored in the shadow.
///
/// Truncates toward zero. Negative values and NaN become `0`, values beyond
/// `u16::MAX` saturate.
///
/// # Examples
///
/// ```
/// use meshbridge::types::hue_from_degrees;
///
/// assert_eq!(hue_from_degrees(120.9), 120);
/// assert_eq!(hue_from_degrees(-5.0), 0);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hue_from_degrees(degrees: f32) -> u16 {
    degrees as u16
}

/// Converts a floating point percentage to the byte stored in the shadow.
///
/// Same truncating conversion as [`hue_from_degrees`], saturating at `255`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percent_from_float(percent: f32) -> u8 {
    percent as u8
}

/// HSV color as sent in a single wire message.
///
/// No range validation is performed: the bridge forwards whatever the control
/// plane stored, and the receiver owns interpretation of out-of-range values.
///
/// # Examples
///
/// ```
/// use meshbridge::types::HsvColor;
///
/// let teal = HsvColor::new(180, 100, 60);
/// assert_eq!(teal.hue(), 180);
/// assert_eq!(teal.to_string(), "HSV(180, 100%, 60%)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HsvColor {
    hue: u16,
    saturation: u8,
    value: u8,
}

impl HsvColor {
    /// Creates a color from raw components.
    #[must_use]
    pub const fn new(hue: u16, saturation: u8, value: u8) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Returns the hue in degrees.
    #[must_use]
    pub const fn hue(&self) -> u16 {
        self.hue
    }

    /// Returns the saturation percentage.
    #[must_use]
    pub const fn saturation(&self) -> u8 {
        self.saturation
    }

    /// Returns the value (brightness) percentage.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }
}

impl fmt::Display for HsvColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HSV({}, {}%, {}%)",
            self.hue, self.saturation, self.value
        )
    }
}
