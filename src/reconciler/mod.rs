// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shadow-to-wire reconciliation.
//!
//! A [`Reconciler`] keeps the record of what was last put on the wire for one
//! endpoint (the sent state). Each call to [`Reconciler::reconcile`] compares
//! a desired shadow against that record, emits the minimal set of frames
//! that closes the gap, and records what was emitted.
//!
//! # Examples
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
//! let mut desired = LightShadow::new();
//! desired.set_hue(120.0);
//! desired.set_power(true);
//!
//! // Color group first, then the power transition
//! let report = reconciler.reconcile(&desired, &transport);
//! assert_eq!(report.sent, 2);
//!
//! // Nothing left to do
//! assert!(reconciler.reconcile(&desired, &transport).is_idle());
//! ```

mod light;
mod switch;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::command::{TidPolicy, TransactionIds, WireCommand};
use crate::error::TransportError;
use crate::state::{LightShadow, Shadow, SwitchShadow};
use crate::transport::MeshTransport;
use crate::types::MeshAddress;

/// What to do with the sent state when the transport reports a failure.
///
/// The mesh offers no acknowledgement, so even a successful `send` only
/// means the frame was queued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryPolicy {
    /// Record every emitted field as sent, whatever the transport returned.
    ///
    /// A frame lost in transit is only repaired by a later change to the
    /// same field. Failures are still logged and counted.
    #[default]
    Optimistic,

    /// Record a field as sent only when the transport accepted it, so the
    /// next tick retries it.
    RetryOnFailure,
}

impl DeliveryPolicy {
    /// Returns whether a send outcome allows the sent state to advance.
    #[must_use]
    pub const fn commits(&self, outcome: &Result<(), TransportError>) -> bool {
        match self {
            Self::Optimistic => true,
            Self::RetryOnFailure => outcome.is_ok(),
        }
    }
}

/// Counters for one reconcile pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Frames the transport accepted.
    pub sent: usize,
    /// Frames the transport refused.
    pub failed: usize,
}

impl TickReport {
    /// Returns `true` if the pass emitted nothing.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.sent == 0 && self.failed == 0
    }

    /// Returns the number of frames handed to the transport.
    #[must_use]
    pub const fn attempted(&self) -> usize {
        self.sent + self.failed
    }
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sent, {} failed", self.sent, self.failed)
    }
}

/// Emission context for one reconcile pass.
///
/// Assigns transaction ids, hands frames to the transport, logs, and keeps
/// the [`TickReport`].
pub struct Outbox<'a, T: MeshTransport + ?Sized> {
    transport: &'a T,
    destination: MeshAddress,
    tids: &'a mut TransactionIds,
    delivery: DeliveryPolicy,
    report: TickReport,
}

impl<'a, T: MeshTransport + ?Sized> Outbox<'a, T> {
    fn new(
        transport: &'a T,
        destination: MeshAddress,
        tids: &'a mut TransactionIds,
        delivery: DeliveryPolicy,
    ) -> Self {
        Self {
            transport,
            destination,
            tids,
            delivery,
            report: TickReport::default(),
        }
    }

    /// Sends one command and returns whether the caller may record it as
    /// sent.
    pub fn emit(&mut self, command: impl Into<WireCommand>) -> bool {
        let command = command.into();
        let tid = self.tids.next_tid();
        let payload = command.encode(tid);

        let outcome = self.transport.send(self.destination, &payload);
        match &outcome {
            Ok(()) => {
                self.report.sent += 1;
                tracing::debug!(
                    address = %self.destination,
                    opcode = %command.opcode(),
                    tid,
                    %command,
                    "Sent mesh frame"
                );
            }
            Err(e) => {
                self.report.failed += 1;
                tracing::warn!(
                    address = %self.destination,
                    opcode = %command.opcode(),
                    tid,
                    error = %e,
                    "Transport refused mesh frame"
                );
            }
        }
        self.delivery.commits(&outcome)
    }

    fn finish(self) -> TickReport {
        self.report
    }
}

/// A shadow type that knows how to diff itself against a sent state.
pub trait Reconcile: Shadow {
    /// Emits the frames that bring `sent` in line with `self`, recording in
    /// `sent` every field the outbox allows to be committed.
    fn reconcile_into<T: MeshTransport + ?Sized>(&self, sent: &mut Self, out: &mut Outbox<'_, T>);
}

/// Per-endpoint reconciler: sent state plus emission settings.
#[derive(Debug, Clone)]
pub struct Reconciler<S> {
    destination: MeshAddress,
    sent: S,
    tids: TransactionIds,
    delivery: DeliveryPolicy,
}

/// Reconciler for a light endpoint.
pub type LightReconciler = Reconciler<LightShadow>;

/// Reconciler for a switch endpoint.
pub type SwitchReconciler = Reconciler<SwitchShadow>;

impl<S: Reconcile> Reconciler<S> {
    /// Creates a reconciler whose sent state is the zeroed record.
    #[must_use]
    pub fn new(destination: MeshAddress, tid: TidPolicy, delivery: DeliveryPolicy) -> Self {
        Self {
            destination,
            sent: S::default(),
            tids: TransactionIds::new(tid),
            delivery,
        }
    }

    /// Creates a reconciler with a fixed zero TID and optimistic delivery.
    #[must_use]
    pub fn with_defaults(destination: MeshAddress) -> Self {
        Self::new(destination, TidPolicy::default(), DeliveryPolicy::default())
    }

    /// Returns the destination address.
    #[must_use]
    pub fn destination(&self) -> MeshAddress {
        self.destination
    }

    /// Returns the last state put on the wire.
    #[must_use]
    pub fn sent(&self) -> &S {
        &self.sent
    }

    /// Returns the delivery policy.
    #[must_use]
    pub fn delivery(&self) -> DeliveryPolicy {
        self.delivery
    }

    /// Runs one pass against `desired`.
    pub fn reconcile<T: MeshTransport + ?Sized>(&mut self, desired: &S, transport: &T) -> TickReport {
        let mut out = Outbox::new(transport, self.destination, &mut self.tids, self.delivery);
        desired.reconcile_into(&mut self.sent, &mut out);
        let report = out.finish();

        if report.is_idle() {
            tracing::trace!(address = %self.destination, "Reconcile idle");
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_policy_commits() {
        let ok = Ok(());
        let err = Err(TransportError::Busy);
        assert!(DeliveryPolicy::Optimistic.commits(&ok));
        assert!(DeliveryPolicy::Optimistic.commits(&err));
        assert!(DeliveryPolicy::RetryOnFailure.commits(&ok));
        assert!(!DeliveryPolicy::RetryOnFailure.commits(&err));
    }

    #[test]
    fn delivery_policy_serde() {
        assert_eq!(
            serde_json::to_string(&DeliveryPolicy::RetryOnFailure).unwrap(),
            "\"retry_on_failure\""
        );
        let policy: DeliveryPolicy = serde_json::from_str("\"optimistic\"").unwrap();
        assert_eq!(policy, DeliveryPolicy::Optimistic);
    }

    #[test]
    fn tick_report_display() {
        let report = TickReport { sent: 2, failed: 1 };
        assert_eq!(report.to_string(), "2 sent, 1 failed");
        assert_eq!(report.attempted(), 3);
        assert!(!report.is_idle());
        assert!(TickReport::default().is_idle());
    }
}
