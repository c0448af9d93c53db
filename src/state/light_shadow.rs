// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light endpoint shadow.

use serde::Serialize;

use crate::types::{
    ColorTemperaturePercent, HsvColor, LightMode, hue_from_degrees, percent_from_float,
};

use super::{LightChange, Shadow};

/// Desired (or last sent) state of a light endpoint.
///
/// The light has two attribute groups. Hue, saturation and value form the
/// color group; brightness and color temperature form the white group. Every
/// setter of a group makes that group the active [`LightMode`]; the power
/// setter leaves the mode alone.
///
/// Setters never validate: values are stored as given (after the fixed-width
/// conversions of [`crate::types`]).
///
/// # Examples
///
/// ```
/// use meshbridge::state::LightShadow;
/// use meshbridge::types::LightMode;
///
/// let mut light = LightShadow::new();
/// light.set_hue(120.0);
/// light.set_white_brightness(40);
///
/// // The last group written wins
/// assert_eq!(light.mode(), LightMode::White);
/// assert_eq!(light.hue(), 120);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LightShadow {
    power: bool,
    mode: LightMode,
    hue: u16,
    saturation: u8,
    value: u8,
    brightness: u8,
    temperature: ColorTemperaturePercent,
}

impl LightShadow {
    /// Creates a zeroed shadow: off, white mode, all attributes 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Getters ==========

    /// Returns the active attribute group.
    #[must_use]
    pub fn mode(&self) -> LightMode {
        self.mode
    }

    /// Returns the hue in degrees.
    #[must_use]
    pub fn hue(&self) -> u16 {
        self.hue
    }

    /// Returns the color saturation.
    #[must_use]
    pub fn saturation(&self) -> u8 {
        self.saturation
    }

    /// Returns the color value (brightness of the color group).
    #[must_use]
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Returns the color group as one HSV triple.
    #[must_use]
    pub fn hsv(&self) -> HsvColor {
        HsvColor::new(self.hue, self.saturation, self.value)
    }

    /// Returns the white brightness.
    #[must_use]
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Returns the white color temperature.
    #[must_use]
    pub fn temperature(&self) -> ColorTemperaturePercent {
        self.temperature
    }

    // ========== Setters ==========

    /// Sets the desired power state. Does not change the mode.
    pub fn set_power(&mut self, on: bool) {
        self.power = on;
    }

    /// Sets power from the color service and selects the color group.
    pub fn set_color_power(&mut self, on: bool) {
        self.power = on;
        self.mode = LightMode::Color;
    }

    /// Sets power from the white service and selects the white group.
    pub fn set_white_power(&mut self, on: bool) {
        self.power = on;
        self.mode = LightMode::White;
    }

    /// Sets the hue from degrees and selects the color group.
    pub fn set_hue(&mut self, degrees: f32) {
        self.hue = hue_from_degrees(degrees);
        self.mode = LightMode::Color;
    }

    /// Sets the saturation from a percentage and selects the color group.
    pub fn set_saturation(&mut self, percent: f32) {
        self.saturation = percent_from_float(percent);
        self.mode = LightMode::Color;
    }

    /// Sets the color value and selects the color group.
    pub fn set_color_value(&mut self, value: u8) {
        self.value = value;
        self.mode = LightMode::Color;
    }

    /// Sets the white brightness and selects the white group.
    pub fn set_white_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
        self.mode = LightMode::White;
    }

    /// Sets the color temperature from hundreds of Kelvin and selects the
    /// white group.
    ///
    /// The value is converted to the mesh percent scale immediately, see
    /// [`ColorTemperaturePercent::from_kelvin_hundreds`].
    pub fn set_color_temperature(&mut self, kelvin_hundreds: u32) {
        self.temperature = ColorTemperaturePercent::from_kelvin_hundreds(kelvin_hundreds);
        self.mode = LightMode::White;
    }

    // ========== Sent-state bookkeeping ==========
    //
    // The reconciler records what it put on the wire without the mode side
    // effects of the public setters.

    pub(crate) fn record_power(&mut self, on: bool) {
        self.power = on;
    }

    pub(crate) fn record_mode(&mut self, mode: LightMode) {
        self.mode = mode;
    }

    pub(crate) fn record_hsv(&mut self, color: HsvColor) {
        self.hue = color.hue();
        self.saturation = color.saturation();
        self.value = color.value();
    }

    pub(crate) fn record_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    pub(crate) fn record_temperature(&mut self, temperature: ColorTemperaturePercent) {
        self.temperature = temperature;
    }
}

impl Shadow for LightShadow {
    type Change = LightChange;

    fn apply(&mut self, change: &LightChange) -> bool {
        let before = self.clone();
        match change {
            LightChange::Power(on) => self.set_power(*on),
            LightChange::ColorPower(on) => self.set_color_power(*on),
            LightChange::WhitePower(on) => self.set_white_power(*on),
            LightChange::Hue(hue) => {
                self.hue = *hue;
                self.mode = LightMode::Color;
            }
            LightChange::Saturation(saturation) => {
                self.saturation = *saturation;
                self.mode = LightMode::Color;
            }
            LightChange::ColorValue(value) => self.set_color_value(*value),
            LightChange::WhiteBrightness(brightness) => self.set_white_brightness(*brightness),
            LightChange::ColorTemperature(percent) => {
                self.temperature = *percent;
                self.mode = LightMode::White;
            }
            LightChange::Batch(changes) => {
                for c in changes {
                    self.apply(c);
                }
            }
        }
        *self != before
    }

    fn power(&self) -> bool {
        self.power
    }

    fn converged_with(&self, sent: &Self) -> bool {
        if self.power != sent.power {
            return false;
        }
        if !self.power {
            return true;
        }
        self.mode == sent.mode
            && match self.mode {
                LightMode::White => {
                    self.brightness == sent.brightness && self.temperature == sent.temperature
                }
                LightMode::Color => self.hsv() == sent.hsv(),
            }
    }
}
