// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh destination addresses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 16-bit mesh address.
///
/// The transport treats the address as opaque; the bridge only uses it to
/// pick the endpoint a message is meant for.
///
/// # Examples
///
/// ```
/// use meshbridge::types::MeshAddress;
///
/// let light = MeshAddress::DEFAULT_LIGHT;
/// assert_eq!(light.value(), 0x0004);
/// assert_eq!(light.to_string(), "0x0004");
/// assert!(MeshAddress::UNASSIGNED.is_unassigned());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeshAddress(u16);

impl MeshAddress {
    /// The unassigned address. Never a valid destination.
    pub const UNASSIGNED: Self = Self(0x0000);

    /// Default address of the light endpoint.
    pub const DEFAULT_LIGHT: Self = Self(0x0004);

    /// Default address of the switch endpoint.
    pub const DEFAULT_SWITCH: Self = Self(0x0005);

    /// Creates an address from its raw value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the raw 16-bit value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Returns `true` for the unassigned address `0x0000`.
    #[must_use]
    pub const fn is_unassigned(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for MeshAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

impl From<u16> for MeshAddress {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_zero_padded_hex() {
        assert_eq!(MeshAddress::new(0x1A).to_string(), "0x001A");
        assert_eq!(MeshAddress::new(0xC001).to_string(), "0xC001");
    }

    #[test]
    fn defaults_are_distinct_and_assigned() {
        assert_ne!(MeshAddress::DEFAULT_LIGHT, MeshAddress::DEFAULT_SWITCH);
        assert!(!MeshAddress::DEFAULT_LIGHT.is_unassigned());
        assert!(!MeshAddress::DEFAULT_SWITCH.is_unassigned());
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&MeshAddress::new(5)).unwrap();
        assert_eq!(json, "5");
        let addr: MeshAddress = serde_json::from_str("4").unwrap();
        assert_eq!(addr, MeshAddress::DEFAULT_LIGHT);
    }
}
