// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for mesh light control.
//!
//! Unlike a validating client API, the bridge accepts whatever the control
//! plane hands it and narrows values with fixed-width casts. These types
//! capture those conversions in one place so the wire encoder and the shadow
//! store agree on them.
//!
//! # Types
//!
//! - [`MeshAddress`] - 16-bit unicast destination on the mesh
//! - [`PowerState`] - On/Off as carried by the on/off opcode
//! - [`LightMode`] - Which attribute group (white or color) is authoritative
//! - [`HsvColor`] - Hue (degrees), saturation and value as sent on the wire
//! - [`ColorTemperaturePercent`] - Color temperature on the mesh's 0-100 scale

mod address;
mod color;
mod mode;
mod power;
mod temperature;

pub use address::MeshAddress;
pub use color::{HsvColor, hue_from_degrees, percent_from_float};
pub use mode::LightMode;
pub use power::PowerState;
pub use temperature::ColorTemperaturePercent;
