// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory transport.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::command::{Frame, MeshMessage};
use crate::error::TransportError;
use crate::types::MeshAddress;

use super::MeshTransport;

/// Transport that records every accepted message.
///
/// Failures can be scripted with [`fail_next`](Self::fail_next); a failed
/// send is counted as an attempt but not recorded as a message.
///
/// # Examples
///
/// ```
/// use meshbridge::error::TransportError;
/// use meshbridge::transport::{MeshTransport, RecordingTransport};
/// use meshbridge::types::MeshAddress;
///
/// let transport = RecordingTransport::new();
/// transport.fail_next(TransportError::Busy);
///
/// assert!(transport.send(MeshAddress::DEFAULT_LIGHT, &[0, 0, 1, 1]).is_err());
/// assert!(transport.send(MeshAddress::DEFAULT_LIGHT, &[0, 0, 1, 1]).is_ok());
/// assert_eq!(transport.attempts(), 2);
/// assert_eq!(transport.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RecordingTransport {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    messages: Vec<MeshMessage>,
    failures: VecDeque<TransportError>,
    attempts: usize,
}

impl RecordingTransport {
    /// Creates an empty transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next send fail with `error`. Calls queue up in order.
    pub fn fail_next(&self, error: TransportError) {
        self.inner.lock().failures.push_back(error);
    }

    /// Returns a copy of every recorded message.
    #[must_use]
    pub fn messages(&self) -> Vec<MeshMessage> {
        self.inner.lock().messages.clone()
    }

    /// Removes and returns every recorded message.
    pub fn take(&self) -> Vec<MeshMessage> {
        std::mem::take(&mut self.inner.lock().messages)
    }

    /// Decodes every recorded message, skipping payloads that do not parse.
    #[must_use]
    pub fn frames(&self) -> Vec<Frame> {
        self.inner
            .lock()
            .messages
            .iter()
            .filter_map(|m| m.frame().ok())
            .collect()
    }

    /// Returns the number of recorded messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().messages.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().messages.is_empty()
    }

    /// Returns the number of send calls, failed ones included.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.inner.lock().attempts
    }

    /// Forgets recorded messages and counters. Scripted failures remain.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.messages.clear();
        inner.attempts = 0;
    }
}

impl MeshTransport for RecordingTransport {
    fn send(&self, destination: MeshAddress, payload: &[u8]) -> Result<(), TransportError> {
        let mut inner = self.inner.lock();
        inner.attempts += 1;
        if let Some(error) = inner.failures.pop_front() {
            return Err(error);
        }
        inner
            .messages
            .push(MeshMessage::new(destination, payload.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{MeshCommand, OnOffCommand, WireCommand};

    #[test]
    fn records_in_order() {
        let transport = RecordingTransport::new();
        transport.send(MeshAddress::new(1), &[1]).unwrap();
        transport.send(MeshAddress::new(2), &[2]).unwrap();

        let messages = transport.messages();
        assert_eq!(messages[0].destination, MeshAddress::new(1));
        assert_eq!(messages[1].payload, vec![2]);
    }

    #[test]
    fn take_drains() {
        let transport = RecordingTransport::new();
        transport.send(MeshAddress::new(1), &[1]).unwrap();
        assert_eq!(transport.take().len(), 1);
        assert!(transport.is_empty());
    }

    #[test]
    fn scripted_failures_are_consumed_in_order() {
        let transport = RecordingTransport::new();
        transport.fail_next(TransportError::Busy);
        transport.fail_next(TransportError::Closed);

        assert_eq!(
            transport.send(MeshAddress::new(1), &[0]),
            Err(TransportError::Busy)
        );
        assert_eq!(
            transport.send(MeshAddress::new(1), &[0]),
            Err(TransportError::Closed)
        );
        assert!(transport.send(MeshAddress::new(1), &[0]).is_ok());
        assert_eq!(transport.attempts(), 3);
    }

    #[test]
    fn frames_decodes_payloads() {
        let transport = RecordingTransport::new();
        let bytes = OnOffCommand::on().encode(0);
        transport.send(MeshAddress::DEFAULT_SWITCH, &bytes).unwrap();
        transport.send(MeshAddress::DEFAULT_SWITCH, &[0xFF]).unwrap();

        let frames = transport.frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].command, WireCommand::OnOff(OnOffCommand::on()));
    }
}
