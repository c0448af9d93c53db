// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch endpoint shadow.

use serde::Serialize;

use super::{Shadow, SwitchChange};

/// Desired (or last sent) state of an on/off switch endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SwitchShadow {
    power: bool,
}

impl SwitchShadow {
    /// Creates a shadow in the off state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the desired power state.
    pub fn set_power(&mut self, on: bool) {
        self.power = on;
    }
}

impl Shadow for SwitchShadow {
    type Change = SwitchChange;

    fn apply(&mut self, change: &SwitchChange) -> bool {
        match change {
            SwitchChange::Power(on) => {
                let changed = self.power != *on;
                self.power = *on;
                changed
            }
        }
    }

    fn power(&self) -> bool {
        self.power
    }

    fn converged_with(&self, sent: &Self) -> bool {
        self.power == sent.power
    }
}
