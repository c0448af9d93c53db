// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shadow change representation.
//!
//! Changes are the unit the control plane hands to an endpoint task. Each
//! variant corresponds to one setter; the conversions from the control
//! plane's value types happen when the change is built, so the task only
//! ever stores wire-width integers.
//!
//! # Examples
//!
//! ```
//! use meshbridge::state::LightChange;
//!
//! let hue = LightChange::hue(200.5);
//! assert_eq!(hue, LightChange::Hue(200));
//!
//! let warm = LightChange::color_temperature(150);
//! assert!(warm.is_white());
//!
//! // Several writes that must land in the same reconcile cycle
//! let scene = LightChange::batch(vec![
//!     LightChange::hue(30.0),
//!     LightChange::saturation(80.0),
//!     LightChange::Power(true),
//! ]);
//! assert_eq!(scene.change_count(), 3);
//! ```

use crate::types::{ColorTemperaturePercent, hue_from_degrees, percent_from_float};

/// A change to a [`LightShadow`](super::LightShadow).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightChange {
    /// Desired power; the mode is left alone.
    Power(bool),

    /// Power written through the color service; selects the color group.
    ColorPower(bool),

    /// Power written through the white service; selects the white group.
    WhitePower(bool),

    /// Hue in whole degrees.
    Hue(u16),

    /// Saturation percentage.
    Saturation(u8),

    /// Color value percentage.
    ColorValue(u8),

    /// White brightness percentage.
    WhiteBrightness(u8),

    /// White color temperature, already on the percent scale.
    ColorTemperature(ColorTemperaturePercent),

    /// Several changes applied together, in order, within one cycle.
    Batch(Vec<LightChange>),
}

impl LightChange {
    /// Creates a hue change from degrees.
    #[must_use]
    pub fn hue(degrees: f32) -> Self {
        Self::Hue(hue_from_degrees(degrees))
    }

    /// Creates a saturation change from a percentage.
    #[must_use]
    pub fn saturation(percent: f32) -> Self {
        Self::Saturation(percent_from_float(percent))
    }

    /// Creates a color temperature change from hundreds of Kelvin.
    #[must_use]
    pub fn color_temperature(kelvin_hundreds: u32) -> Self {
        Self::ColorTemperature(ColorTemperaturePercent::from_kelvin_hundreds(
            kelvin_hundreds,
        ))
    }

    /// Creates a batch of changes.
    #[must_use]
    pub fn batch(changes: Vec<LightChange>) -> Self {
        Self::Batch(changes)
    }

    /// Returns `true` if this change touches the color group.
    #[must_use]
    pub fn is_color(&self) -> bool {
        matches!(
            self,
            Self::ColorPower(_) | Self::Hue(_) | Self::Saturation(_) | Self::ColorValue(_)
        )
    }

    /// Returns `true` if this change touches the white group.
    #[must_use]
    pub fn is_white(&self) -> bool {
        matches!(
            self,
            Self::WhitePower(_) | Self::WhiteBrightness(_) | Self::ColorTemperature(_)
        )
    }

    /// Returns the number of individual changes.
    ///
    /// For batches, returns the total count of nested changes.
    #[must_use]
    pub fn change_count(&self) -> usize {
        match self {
            Self::Batch(changes) => changes.iter().map(Self::change_count).sum(),
            _ => 1,
        }
    }
}

/// A change to a [`SwitchShadow`](super::SwitchShadow).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchChange {
    /// Desired power.
    Power(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_convert_values() {
        assert_eq!(LightChange::hue(359.9), LightChange::Hue(359));
        assert_eq!(LightChange::saturation(-3.0), LightChange::Saturation(0));
        assert_eq!(
            LightChange::color_temperature(300),
            LightChange::ColorTemperature(ColorTemperaturePercent::new(0))
        );
    }

    #[test]
    fn group_classification() {
        assert!(LightChange::Hue(1).is_color());
        assert!(LightChange::ColorPower(true).is_color());
        assert!(!LightChange::Hue(1).is_white());
        assert!(LightChange::WhiteBrightness(1).is_white());
        assert!(!LightChange::Power(true).is_color());
        assert!(!LightChange::Power(true).is_white());
    }

    #[test]
    fn change_count() {
        assert_eq!(LightChange::Power(true).change_count(), 1);

        let batch = LightChange::batch(vec![LightChange::Hue(1), LightChange::ColorValue(2)]);
        assert_eq!(batch.change_count(), 2);

        let nested = LightChange::batch(vec![batch, LightChange::Power(false)]);
        assert_eq!(nested.change_count(), 3);
    }
}
