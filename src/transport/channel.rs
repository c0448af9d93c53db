// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport that forwards frames over a tokio channel.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::command::MeshMessage;
use crate::error::TransportError;
use crate::types::MeshAddress;

use super::MeshTransport;

/// Forwards every frame to a receiver, typically an async radio task.
///
/// Sending never waits. A bounded channel reports
/// [`TransportError::Busy`] when full; either flavour reports
/// [`TransportError::Closed`] once the receiver is dropped.
///
/// # Examples
///
/// ```
/// use meshbridge::transport::{ChannelTransport, MeshTransport};
/// use meshbridge::types::MeshAddress;
///
/// let (transport, mut rx) = ChannelTransport::bounded(8);
/// transport.send(MeshAddress::DEFAULT_LIGHT, &[0, 0, 1, 1]).unwrap();
///
/// let msg = rx.try_recv().unwrap();
/// assert_eq!(msg.destination, MeshAddress::DEFAULT_LIGHT);
/// ```
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    sender: Sender,
}

#[derive(Debug, Clone)]
enum Sender {
    Bounded(mpsc::Sender<MeshMessage>),
    Unbounded(mpsc::UnboundedSender<MeshMessage>),
}

/// Receiving half for a bounded [`ChannelTransport`].
pub type BoundedReceiver = mpsc::Receiver<MeshMessage>;

/// Receiving half for an unbounded [`ChannelTransport`].
pub type UnboundedReceiver = mpsc::UnboundedReceiver<MeshMessage>;

impl ChannelTransport {
    /// Creates a transport backed by a bounded channel.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn bounded(capacity: usize) -> (Self, BoundedReceiver) {
        let (tx, rx) = mpsc::channel(capacity);
        (
            Self {
                sender: Sender::Bounded(tx),
            },
            rx,
        )
    }

    /// Creates a transport backed by an unbounded channel.
    #[must_use]
    pub fn unbounded() -> (Self, UnboundedReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                sender: Sender::Unbounded(tx),
            },
            rx,
        )
    }

    /// Returns `true` once the receiving side has been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match &self.sender {
            Sender::Bounded(tx) => tx.is_closed(),
            Sender::Unbounded(tx) => tx.is_closed(),
        }
    }
}

impl MeshTransport for ChannelTransport {
    fn send(&self, destination: MeshAddress, payload: &[u8]) -> Result<(), TransportError> {
        let message = MeshMessage::new(destination, payload.to_vec());
        match &self.sender {
            Sender::Bounded(tx) => tx.try_send(message).map_err(|e| match e {
                TrySendError::Full(_) => TransportError::Busy,
                TrySendError::Closed(_) => TransportError::Closed,
            }),
            Sender::Unbounded(tx) => tx.send(message).map_err(|_| TransportError::Closed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_reports_busy_when_full() {
        let (transport, _rx) = ChannelTransport::bounded(1);
        transport.send(MeshAddress::new(1), &[1]).unwrap();
        assert_eq!(
            transport.send(MeshAddress::new(1), &[2]),
            Err(TransportError::Busy)
        );
    }

    #[test]
    fn reports_closed_after_receiver_drop() {
        let (transport, rx) = ChannelTransport::unbounded();
        drop(rx);
        assert!(transport.is_closed());
        assert_eq!(
            transport.send(MeshAddress::new(1), &[1]),
            Err(TransportError::Closed)
        );
    }

    #[tokio::test]
    async fn delivers_to_async_receiver() {
        let (transport, mut rx) = ChannelTransport::unbounded();
        transport.send(MeshAddress::DEFAULT_SWITCH, &[0, 0, 1, 0]).unwrap();

        let msg = rx.recv().await.unwrap();
        assert_eq!(msg.destination, MeshAddress::DEFAULT_SWITCH);
        assert_eq!(msg.payload, vec![0, 0, 1, 0]);
    }
}
