// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound mesh transports.
//!
//! The bridge never touches the radio. It hands each encoded frame to a
//! [`MeshTransport`], which owns delivery.
//!
//! # Transports
//!
//! - [`RecordingTransport`]: keeps every message in memory, with scripted
//!   failures; useful for tests and dry runs
//! - [`ChannelTransport`]: forwards messages to an async radio task over a
//!   tokio channel

mod channel;
mod recording;

use std::sync::Arc;

pub use channel::{BoundedReceiver, ChannelTransport, UnboundedReceiver};
pub use recording::RecordingTransport;

pub use crate::command::MeshMessage;
use crate::error::TransportError;
use crate::types::MeshAddress;

/// Sink for encoded mesh frames.
///
/// `send` is called from the reconciler loop and must not block. Transports
/// that cannot observe delivery should return `Ok(())`; a returned error is
/// only acted upon under [`DeliveryPolicy::RetryOnFailure`](crate::reconciler::DeliveryPolicy).
pub trait MeshTransport: Send + Sync {
    /// Hands one frame to the mesh.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the frame could not be queued.
    fn send(&self, destination: MeshAddress, payload: &[u8]) -> Result<(), TransportError>;
}

impl<T: MeshTransport + ?Sized> MeshTransport for Arc<T> {
    fn send(&self, destination: MeshAddress, payload: &[u8]) -> Result<(), TransportError> {
        (**self).send(destination, payload)
    }
}

impl<T: MeshTransport + ?Sized> MeshTransport for &T {
    fn send(&self, destination: MeshAddress, payload: &[u8]) -> Result<(), TransportError> {
        (**self).send(destination, payload)
    }
}
