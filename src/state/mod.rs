// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shadow records for mesh endpoints.
//!
//! A shadow holds the configuration the control plane asked for. The same
//! types also serve as the reconciler's record of what was last put on the
//! wire, so that both sides can be compared field by field.
//!
//! Writes arrive as change values ([`LightChange`], [`SwitchChange`]) so they
//! can travel through a channel to the task that owns the shadow.
//!
//! # Examples
//!
//! ```
//! use meshbridge::state::{LightChange, LightShadow, Shadow};
//! use meshbridge::types::LightMode;
//!
//! let mut shadow = LightShadow::new();
//!
//! // Writing a color attribute selects the color group
//! assert!(shadow.apply(&LightChange::hue(200.0)));
//! assert_eq!(shadow.mode(), LightMode::Color);
//!
//! // Applying the same change again reports no change
//! assert!(!shadow.apply(&LightChange::hue(200.0)));
//! ```

mod light_shadow;
mod shadow_change;
mod switch_shadow;

use std::fmt;

pub use light_shadow::LightShadow;
pub use shadow_change::{LightChange, SwitchChange};
pub use switch_shadow::SwitchShadow;

/// A desired-state record that can be updated through change values.
pub trait Shadow: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// The change type accepted by [`apply`](Shadow::apply).
    type Change: fmt::Debug + Send + 'static;

    /// Applies a change and returns whether the record actually changed.
    fn apply(&mut self, change: &Self::Change) -> bool;

    /// Returns the desired power state.
    fn power(&self) -> bool;

    /// Returns `true` if `sent` leaves nothing for the reconciler to emit.
    ///
    /// Only the fields that reach the wire are compared, so values that are
    /// held back (attributes written while off, the inactive light group) do
    /// not count.
    fn converged_with(&self, sent: &Self) -> bool;
}
