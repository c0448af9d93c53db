// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light attribute commands.
//!
//! This module provides the commands for the two light attribute groups:
//! HSV for the color group, brightness and color temperature for the white
//! group.

use crate::command::{MeshCommand, Opcode, fixed_params};
use crate::error::DecodeError;
use crate::types::{ColorTemperaturePercent, HsvColor};

/// Command to set hue, saturation and value in one message.
///
/// The hue is written as a little-endian 16-bit integer; saturation and
/// value are single bytes.
///
/// # Examples
///
/// ```
/// use meshbridge::command::{HsvCommand, MeshCommand};
/// use meshbridge::types::HsvColor;
///
/// let cmd = HsvCommand::new(HsvColor::new(120, 100, 75));
/// assert_eq!(cmd.encode(0), [0x00, 0x23, 0x01, 0x78, 0x00, 100, 75]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvCommand {
    color: HsvColor,
}

impl HsvCommand {
    /// Creates an HSV command.
    #[must_use]
    pub const fn new(color: HsvColor) -> Self {
        Self { color }
    }

    /// Returns the color.
    #[must_use]
    pub const fn color(&self) -> HsvColor {
        self.color
    }
}

impl MeshCommand for HsvCommand {
    const OPCODE: Opcode = Opcode::HSV;
    const FRAME_LEN: usize = 7;

    fn write_params(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.color.hue().to_le_bytes());
        out.push(self.color.saturation());
        out.push(self.color.value());
    }

    fn read_params(params: &[u8]) -> Result<Self, DecodeError> {
        let [hue_lo, hue_hi, saturation, value] = fixed_params::<4>(params)?;
        let hue = u16::from_le_bytes([hue_lo, hue_hi]);
        Ok(Self::new(HsvColor::new(hue, saturation, value)))
    }
}

/// Command to set the white brightness level.
///
/// The level field is 16 bits wide on the wire, but the bridge only ever
/// stores 8-bit levels, so the high byte is always zero.
///
/// # Examples
///
/// ```
/// use meshbridge::command::{BrightnessCommand, MeshCommand};
///
/// let cmd = BrightnessCommand::new(80);
/// assert_eq!(cmd.encode(0), [0x00, 0x21, 0x01, 80, 0x00]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessCommand {
    level: u8,
}

impl BrightnessCommand {
    /// Creates a brightness command.
    #[must_use]
    pub const fn new(level: u8) -> Self {
        Self { level }
    }

    /// Returns the brightness level.
    #[must_use]
    pub const fn level(&self) -> u8 {
        self.level
    }
}

impl MeshCommand for BrightnessCommand {
    const OPCODE: Opcode = Opcode::BRIGHTNESS;
    const FRAME_LEN: usize = 5;

    fn write_params(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&u16::from(self.level).to_le_bytes());
    }

    fn read_params(params: &[u8]) -> Result<Self, DecodeError> {
        let [lo, hi] = fixed_params::<2>(params)?;
        let level = u16::from_le_bytes([lo, hi]);
        let level = u8::try_from(level).map_err(|_| DecodeError::ValueOutOfRange {
            field: "brightness",
            actual: level,
        })?;
        Ok(Self::new(level))
    }
}

/// Command to set the white color temperature as a percentage.
///
/// # Examples
///
/// ```
/// use meshbridge::command::{ColorTemperatureCommand, MeshCommand};
/// use meshbridge::types::ColorTemperaturePercent;
///
/// let percent = ColorTemperaturePercent::from_kelvin_hundreds(150);
/// let cmd = ColorTemperatureCommand::new(percent);
/// assert_eq!(cmd.encode(0), [0x00, 0xF1, 0x01, 42]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTemperatureCommand {
    percent: ColorTemperaturePercent,
}

impl ColorTemperatureCommand {
    /// Creates a color temperature command.
    #[must_use]
    pub const fn new(percent: ColorTemperaturePercent) -> Self {
        Self { percent }
    }

    /// Returns the percent value.
    #[must_use]
    pub const fn percent(&self) -> ColorTemperaturePercent {
        self.percent
    }
}

impl MeshCommand for ColorTemperatureCommand {
    const OPCODE: Opcode = Opcode::COLOR_TEMPERATURE_PERCENT;
    const FRAME_LEN: usize = 4;

    fn write_params(&self, out: &mut Vec<u8>) {
        out.push(self.percent.value());
    }

    fn read_params(params: &[u8]) -> Result<Self, DecodeError> {
        let [percent] = fixed_params::<1>(params)?;
        Ok(Self::new(ColorTemperaturePercent::new(percent)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsv_hue_is_little_endian() {
        let bytes = HsvCommand::new(HsvColor::new(0x0168, 10, 20)).encode(0);
        assert_eq!(&bytes[3..5], &[0x68, 0x01]);
    }

    #[test]
    fn hsv_frame_length() {
        assert_eq!(HsvCommand::new(HsvColor::default()).encode(0).len(), 7);
    }

    #[test]
    fn brightness_high_byte_is_zero() {
        let bytes = BrightnessCommand::new(u8::MAX).encode(0);
        assert_eq!(bytes, [0x00, 0x21, 0x01, 0xFF, 0x00]);
    }

    #[test]
    fn brightness_decode_rejects_wide_level() {
        assert_eq!(
            BrightnessCommand::read_params(&[0x00, 0x01]),
            Err(DecodeError::ValueOutOfRange {
                field: "brightness",
                actual: 256
            })
        );
    }

    #[test]
    fn color_temperature_zero_percent() {
        let percent = ColorTemperaturePercent::from_kelvin_hundreds(300);
        assert_eq!(
            ColorTemperatureCommand::new(percent).encode(0),
            [0x00, 0xF1, 0x01, 0x00]
        );
    }
}
