// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Endpoint runtime.
//!
//! Each endpoint runs as one tokio task that exclusively owns its desired
//! shadow and its [`Reconciler`](crate::reconciler::Reconciler). The control
//! plane talks to it through a cloneable [`Handle`]:
//!
//! - setters push a change into the task's inbox and return immediately
//! - on every poll tick the task drains the inbox, reconciles once against
//!   the resulting shadow, and publishes an [`EndpointSnapshot`]
//! - when the last handle is dropped the task reconciles one final time and
//!   exits
//!
//! Setters are synchronous and may be called from any thread, including
//! threads that are not part of a tokio runtime.
//!
//! # Examples
//!
//! ```
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> meshbridge::Result<()> {
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use meshbridge::endpoint;
//! use meshbridge::reconciler::LightReconciler;
//! use meshbridge::transport::RecordingTransport;
//! use meshbridge::types::MeshAddress;
//!
//! let transport = Arc::new(RecordingTransport::new());
//! let light = endpoint::spawn(
//!     LightReconciler::with_defaults(MeshAddress::DEFAULT_LIGHT),
//!     transport.clone(),
//!     Duration::from_millis(10),
//! );
//!
//! light.set_hue(240.0);
//! light.set_power(true);
//!
//! let snapshot = light.reconciled().await?;
//! assert_eq!(snapshot.sent.hue(), 240);
//! assert_eq!(transport.len(), 2);
//! # Ok(())
//! # }
//! ```

mod handle;
mod task;

use std::fmt;

use serde::Serialize;

pub use handle::{Handle, LightHandle, SwitchHandle};
pub use task::spawn;

use crate::state::{LightShadow, Shadow, SwitchShadow};
use crate::types::MeshAddress;

/// Point-in-time view of an endpoint task.
///
/// Serializes to JSON for status endpoints and logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EndpointSnapshot<S> {
    /// Shadow as requested by the control plane.
    pub desired: S,
    /// Last state put on the wire.
    pub sent: S,
    /// Number of changes the task has applied so far.
    pub applied: u64,
}

impl<S: Shadow> EndpointSnapshot<S> {
    /// Returns `true` if the reconciler has nothing left to send.
    ///
    /// Attributes held back by the reconciler do not count: writes made while
    /// the endpoint is off, and the light group that is not active. Use
    /// `desired == sent` for plain record equality.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.desired.converged_with(&self.sent)
    }
}

/// Handle to either kind of endpoint, as returned by address lookups.
#[derive(Debug, Clone)]
pub enum EndpointHandle {
    /// A light endpoint.
    Light(LightHandle),
    /// An on/off switch endpoint.
    Switch(SwitchHandle),
}

impl EndpointHandle {
    /// Returns the mesh address of the endpoint.
    #[must_use]
    pub fn address(&self) -> MeshAddress {
        match self {
            Self::Light(h) => h.address(),
            Self::Switch(h) => h.address(),
        }
    }

    /// Sets the desired power state, whatever the endpoint kind.
    pub fn set_power(&self, on: bool) {
        match self {
            Self::Light(h) => h.set_power(on),
            Self::Switch(h) => h.set_power(on),
        }
    }

    /// Returns the light handle, if this is a light.
    #[must_use]
    pub fn as_light(&self) -> Option<&LightHandle> {
        match self {
            Self::Light(h) => Some(h),
            Self::Switch(_) => None,
        }
    }

    /// Returns the switch handle, if this is a switch.
    #[must_use]
    pub fn as_switch(&self) -> Option<&SwitchHandle> {
        match self {
            Self::Switch(h) => Some(h),
            Self::Light(_) => None,
        }
    }

    /// Returns the kind of endpoint as a string.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Light(_) => "light",
            Self::Switch(_) => "switch",
        }
    }
}

impl fmt::Display for EndpointHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind(), self.address())
    }
}

impl From<LightHandle> for EndpointHandle {
    fn from(handle: LightHandle) -> Self {
        Self::Light(handle)
    }
}

impl From<SwitchHandle> for EndpointHandle {
    fn from(handle: SwitchHandle) -> Self {
        Self::Switch(handle)
    }
}

/// Snapshot of a light endpoint.
pub type LightSnapshot = EndpointSnapshot<LightShadow>;

/// Snapshot of a switch endpoint.
pub type SwitchSnapshot = EndpointSnapshot<SwitchShadow>;
