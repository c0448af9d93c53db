// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light attribute groups.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which attribute group of a light is authoritative.
///
/// Writing any attribute of a group makes that group active. Only the active
/// group is ever sent to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightMode {
    /// Brightness and color temperature.
    #[default]
    White,
    /// Hue, saturation and value.
    Color,
}

impl LightMode {
    /// Returns the lowercase name of the group.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Color => "color",
        }
    }
}

impl fmt::Display for LightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_white() {
        assert_eq!(LightMode::default(), LightMode::White);
    }

    #[test]
    fn display() {
        assert_eq!(LightMode::Color.to_string(), "color");
        assert_eq!(LightMode::White.to_string(), "white");
    }
}
