// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `meshbridge` - shadow-state reconciliation for mesh lighting endpoints.
//!
//! A home-automation control plane writes desired attributes (power, hue,
//! brightness, color temperature) for a light and an on/off switch. The
//! bridge keeps those writes in a shadow record per endpoint, compares the
//! shadow against what was last put on the wire every poll tick, and emits
//! the minimal set of fixed-layout mesh frames needed to bring the endpoint
//! in line.
//!
//! # Features
//!
//! - **Shadow store**: typed setters that never fail and never send
//! - **Wire codec**: On/Off, HSV, Brightness and Color-Temperature-Percent
//!   frames, encoded and decoded
//! - **Reconciler**: diff-gated, with whole-group resends on mode changes
//!   and attribute flushes before power-on
//! - **Endpoint tasks**: one tokio task per endpoint, fed through a channel
//! - **Transports**: pluggable; in-memory and tokio channel flavours
//!   included
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use meshbridge::{Bridge, BridgeConfig};
//! use meshbridge::transport::ChannelTransport;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> meshbridge::Result<()> {
//!     // Frames come out of this channel for the radio task
//!     let (transport, mut radio) = ChannelTransport::unbounded();
//!     let bridge = Bridge::spawn(BridgeConfig::default(), Arc::new(transport))?;
//!
//!     let light = bridge.light();
//!     light.set_hue(300.0);
//!     light.set_saturation(50.0);
//!     light.set_color_value(80);
//!     light.set_power(true);
//!     light.reconciled().await?;
//!
//!     let hsv = radio.recv().await.unwrap();
//!     assert_eq!(hsv.payload, [0x00, 0x23, 0x01, 0x2C, 0x01, 50, 80]);
//!     let on = radio.recv().await.unwrap();
//!     assert_eq!(on.payload, [0x00, 0x00, 0x01, 0x01]);
//!     Ok(())
//! }
//! ```
//!
//! # Using the Reconciler Directly
//!
//! The endpoint tasks are a thin loop around [`reconciler::Reconciler`],
//! which can be driven synchronously:
//!
//! ```
//! use meshbridge::reconciler::LightReconciler;
//! use meshbridge::state::LightShadow;
//! use meshbridge::transport::RecordingTransport;
//! use meshbridge::types::MeshAddress;
//!
//! let transport = RecordingTransport::new();
//! let mut reconciler = LightReconciler::with_defaults(MeshAddress::DEFAULT_LIGHT);
//!
//! let mut light = LightShadow::new();
//! light.set_power(true);
//! light.set_white_brightness(75);
//!
//! reconciler.reconcile(&light, &transport);
//! assert_eq!(transport.len(), 2);
//! ```

pub mod bridge;
pub mod command;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod reconciler;
pub mod state;
pub mod transport;
pub mod types;

pub use bridge::Bridge;
pub use command::{Frame, MeshMessage, TidPolicy, WireCommand};
pub use config::BridgeConfig;
pub use endpoint::{EndpointHandle, EndpointSnapshot, LightHandle, SwitchHandle};
pub use error::{ConfigError, DecodeError, Error, Result, TransportError};
pub use reconciler::{DeliveryPolicy, TickReport};
pub use state::{LightChange, LightShadow, SwitchChange, SwitchShadow};
pub use transport::{ChannelTransport, MeshTransport, RecordingTransport};
pub use types::{ColorTemperaturePercent, HsvColor, LightMode, MeshAddress, PowerState};
