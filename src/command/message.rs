// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Encoded messages ready for a transport.

use std::fmt;

use crate::command::Frame;
use crate::error::DecodeError;
use crate::types::MeshAddress;

/// An encoded frame bound for one mesh address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MeshMessage {
    /// Destination address.
    pub destination: MeshAddress,
    /// Encoded frame bytes.
    pub payload: Vec<u8>,
}

impl MeshMessage {
    /// Creates a message.
    #[must_use]
    pub fn new(destination: MeshAddress, payload: Vec<u8>) -> Self {
        Self {
            destination,
            payload,
        }
    }

    /// Decodes the payload.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` if the payload is not a valid frame.
    pub fn frame(&self) -> Result<Frame, DecodeError> {
        Frame::decode(&self.payload)
    }
}

impl fmt::Display for MeshMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-", self.destination)?;
        for byte in &self.payload {
            write!(f, " {byte:02X}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{MeshCommand, OnOffCommand};

    #[test]
    fn display_shows_hex_payload() {
        let msg = OnOffCommand::on().to_message(MeshAddress::DEFAULT_LIGHT, 0);
        assert_eq!(msg.to_string(), "0x0004 <- 00 00 01 01");
    }

    #[test]
    fn frame_decodes_payload() {
        let msg = OnOffCommand::off().to_message(MeshAddress::DEFAULT_SWITCH, 9);
        let frame = msg.frame().unwrap();
        assert_eq!(frame.tid, 9);
    }
}
