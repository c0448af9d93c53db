// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generic on/off command.

use crate::command::{MeshCommand, Opcode, fixed_params};
use crate::error::DecodeError;
use crate::types::PowerState;

/// Command to switch an endpoint on or off.
///
/// # Examples
///
/// ```
/// use meshbridge::command::{MeshCommand, OnOffCommand};
/// use meshbridge::types::PowerState;
///
/// let cmd = OnOffCommand::new(PowerState::On);
/// assert_eq!(cmd.encode(0), [0x00, 0x00, 0x01, 0x01]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnOffCommand {
    state: PowerState,
}

impl OnOffCommand {
    /// Creates an on/off command.
    #[must_use]
    pub const fn new(state: PowerState) -> Self {
        Self { state }
    }

    /// Creates a command to turn the endpoint on.
    #[must_use]
    pub const fn on() -> Self {
        Self::new(PowerState::On)
    }

    /// Creates a command to turn the endpoint off.
    #[must_use]
    pub const fn off() -> Self {
        Self::new(PowerState::Off)
    }

    /// Returns the requested state.
    #[must_use]
    pub const fn state(&self) -> PowerState {
        self.state
    }
}

impl From<bool> for OnOffCommand {
    fn from(on: bool) -> Self {
        Self::new(PowerState::from(on))
    }
}

impl MeshCommand for OnOffCommand {
    const OPCODE: Opcode = Opcode::ON_OFF;
    const FRAME_LEN: usize = 4;

    fn write_params(&self, out: &mut Vec<u8>) {
        out.push(self.state.as_num());
    }

    fn read_params(params: &[u8]) -> Result<Self, DecodeError> {
        let [value] = fixed_params::<1>(params)?;
        Ok(Self::new(PowerState::from_num(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_on_and_off() {
        assert_eq!(OnOffCommand::on().encode(0), [0x00, 0x00, 0x01, 0x01]);
        assert_eq!(OnOffCommand::off().encode(0), [0x00, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn encode_carries_tid() {
        assert_eq!(OnOffCommand::on().encode(0x5A)[0], 0x5A);
    }

    #[test]
    fn from_bool() {
        assert_eq!(OnOffCommand::from(true), OnOffCommand::on());
        assert_eq!(OnOffCommand::from(false), OnOffCommand::off());
    }
}
