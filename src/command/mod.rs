// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh wire commands.
//!
//! This module serializes logical commands into the fixed-layout byte buffers
//! the mesh receiver understands, and parses them back.
//!
//! # Frame Layout
//!
//! Every frame starts with a one-byte transaction id (TID) followed by a
//! little-endian 16-bit opcode, then the command parameters:
//!
//! | Command | Size | Layout |
//! |---------|------|--------|
//! | [`OnOffCommand`] | 4 | `[TID][0x00][0x01][on]` |
//! | [`HsvCommand`] | 7 | `[TID][0x23][0x01][hue_lo][hue_hi][sat][val]` |
//! | [`BrightnessCommand`] | 5 | `[TID][0x21][0x01][bri_lo][bri_hi]` |
//! | [`ColorTemperatureCommand`] | 4 | `[TID][0xF1][0x01][percent]` |
//!
//! # Examples
//!
//! ```
//! use meshbridge::command::{Frame, HsvCommand, MeshCommand, WireCommand};
//! use meshbridge::types::HsvColor;
//!
//! let cmd = HsvCommand::new(HsvColor::new(300, 50, 80));
//! let bytes = cmd.encode(0);
//! assert_eq!(bytes, [0x00, 0x23, 0x01, 0x2C, 0x01, 50, 80]);
//!
//! let frame = Frame::decode(&bytes).unwrap();
//! assert_eq!(frame.command, WireCommand::Hsv(cmd));
//! ```

mod light;
mod message;
mod power;
mod tid;

use std::fmt;

pub use light::{BrightnessCommand, ColorTemperatureCommand, HsvCommand};
pub use message::MeshMessage;
pub use power::OnOffCommand;
pub use tid::{TidPolicy, TransactionIds};

use crate::error::DecodeError;
use crate::types::MeshAddress;

/// Bytes preceding the parameters in every frame: TID plus opcode.
pub const HEADER_LEN: usize = 3;

/// 16-bit type id identifying the meaning of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode(u16);

impl Opcode {
    /// Generic on/off.
    pub const ON_OFF: Self = Self(0x0100);

    /// Light brightness (16-bit level).
    pub const BRIGHTNESS: Self = Self(0x0121);

    /// Light hue, saturation and value.
    pub const HSV: Self = Self(0x0123);

    /// Light color temperature as a percentage.
    pub const COLOR_TEMPERATURE_PERCENT: Self = Self(0x01F1);

    /// Creates an opcode from its raw value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Returns the little-endian wire bytes.
    #[must_use]
    pub const fn to_le_bytes(&self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// A command that can be serialized into a mesh frame.
pub trait MeshCommand: Sized {
    /// The opcode written after the TID.
    const OPCODE: Opcode;

    /// Total frame length in bytes, header included.
    const FRAME_LEN: usize;

    /// Appends the parameter bytes (everything after the opcode).
    fn write_params(&self, out: &mut Vec<u8>);

    /// Parses the parameter bytes of a frame whose header was already read.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` if the parameters do not match the layout.
    fn read_params(params: &[u8]) -> Result<Self, DecodeError>;

    /// Serializes the command into a complete frame.
    fn encode(&self, tid: u8) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::FRAME_LEN);
        out.push(tid);
        out.extend_from_slice(&Self::OPCODE.to_le_bytes());
        self.write_params(&mut out);
        debug_assert_eq!(out.len(), Self::FRAME_LEN);
        out
    }

    /// Serializes the command into a message for `destination`.
    fn to_message(&self, destination: MeshAddress, tid: u8) -> MeshMessage {
        MeshMessage::new(destination, self.encode(tid))
    }
}

/// Splits off exactly `N` parameter bytes, reporting sizes as whole frames.
pub(crate) fn fixed_params<const N: usize>(params: &[u8]) -> Result<[u8; N], DecodeError> {
    match params.len() {
        len if len < N => Err(DecodeError::Truncated {
            expected: HEADER_LEN + N,
            actual: HEADER_LEN + len,
        }),
        len if len > N => Err(DecodeError::TrailingBytes { extra: len - N }),
        _ => {
            let mut out = [0u8; N];
            out.copy_from_slice(params);
            Ok(out)
        }
    }
}

/// Any command this bridge puts on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireCommand {
    /// Power on or off.
    OnOff(OnOffCommand),
    /// Color group: hue, saturation and value together.
    Hsv(HsvCommand),
    /// White group: brightness.
    Brightness(BrightnessCommand),
    /// White group: color temperature.
    ColorTemperature(ColorTemperatureCommand),
}

impl WireCommand {
    /// Returns the opcode of the wrapped command.
    #[must_use]
    pub const fn opcode(&self) -> Opcode {
        match self {
            Self::OnOff(_) => OnOffCommand::OPCODE,
            Self::Hsv(_) => HsvCommand::OPCODE,
            Self::Brightness(_) => BrightnessCommand::OPCODE,
            Self::ColorTemperature(_) => ColorTemperatureCommand::OPCODE,
        }
    }

    /// Serializes the wrapped command into a complete frame.
    #[must_use]
    pub fn encode(&self, tid: u8) -> Vec<u8> {
        match self {
            Self::OnOff(cmd) => cmd.encode(tid),
            Self::Hsv(cmd) => cmd.encode(tid),
            Self::Brightness(cmd) => cmd.encode(tid),
            Self::ColorTemperature(cmd) => cmd.encode(tid),
        }
    }

    /// Serializes the wrapped command into a message for `destination`.
    #[must_use]
    pub fn to_message(&self, destination: MeshAddress, tid: u8) -> MeshMessage {
        MeshMessage::new(destination, self.encode(tid))
    }
}

impl fmt::Display for WireCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnOff(cmd) => write!(f, "OnOff({})", cmd.state()),
            Self::Hsv(cmd) => write!(f, "{}", cmd.color()),
            Self::Brightness(cmd) => write!(f, "Brightness({})", cmd.level()),
            Self::ColorTemperature(cmd) => write!(f, "ColorTemperature({})", cmd.percent()),
        }
    }
}

impl From<OnOffCommand> for WireCommand {
    fn from(cmd: OnOffCommand) -> Self {
        Self::OnOff(cmd)
    }
}

impl From<HsvCommand> for WireCommand {
    fn from(cmd: HsvCommand) -> Self {
        Self::Hsv(cmd)
    }
}

impl From<BrightnessCommand> for WireCommand {
    fn from(cmd: BrightnessCommand) -> Self {
        Self::Brightness(cmd)
    }
}

impl From<ColorTemperatureCommand> for WireCommand {
    fn from(cmd: ColorTemperatureCommand) -> Self {
        Self::ColorTemperature(cmd)
    }
}

/// A decoded frame: transaction id plus command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Transaction id byte.
    pub tid: u8,
    /// The command carried by the frame.
    pub command: WireCommand,
}

impl Frame {
    /// Creates a frame.
    #[must_use]
    pub fn new(tid: u8, command: impl Into<WireCommand>) -> Self {
        Self {
            tid,
            command: command.into(),
        }
    }

    /// Parses a complete frame.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::Truncated` when the buffer is too short,
    /// `DecodeError::UnknownOpcode` for opcodes this bridge does not speak,
    /// `DecodeError::TrailingBytes` when the buffer is too long and
    /// `DecodeError::ValueOutOfRange` when a field exceeds what is encoded.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let [tid, op_lo, op_hi, params @ ..] = bytes else {
            return Err(DecodeError::Truncated {
                expected: HEADER_LEN,
                actual: bytes.len(),
            });
        };

        let command = match Opcode::new(u16::from_le_bytes([*op_lo, *op_hi])) {
            Opcode::ON_OFF => OnOffCommand::read_params(params)?.into(),
            Opcode::HSV => HsvCommand::read_params(params)?.into(),
            Opcode::BRIGHTNESS => BrightnessCommand::read_params(params)?.into(),
            Opcode::COLOR_TEMPERATURE_PERCENT => {
                ColorTemperatureCommand::read_params(params)?.into()
            }
            other => return Err(DecodeError::UnknownOpcode(other.value())),
        };

        Ok(Self { tid: *tid, command })
    }

    /// Serializes the frame.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        self.command.encode(self.tid)
    }
}
