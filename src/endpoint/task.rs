// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The per-endpoint reconcile loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

use crate::reconciler::{Reconcile, Reconciler};
use crate::transport::MeshTransport;

use super::{EndpointSnapshot, Handle};

/// Shortest poll period the loop accepts.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Spawns the task for one endpoint and returns its first handle.
///
/// The task starts from a zeroed shadow and polls every `poll_interval`.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn spawn<S: Reconcile>(
    reconciler: Reconciler<S>,
    transport: Arc<dyn MeshTransport>,
    poll_interval: Duration,
) -> Handle<S> {
    let (changes_tx, changes_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(EndpointSnapshot::default());
    let address = reconciler.destination();

    tokio::spawn(run(
        reconciler,
        transport,
        poll_interval.max(MIN_POLL_INTERVAL),
        changes_rx,
        snapshot_tx,
    ));

    Handle::new(address, changes_tx, snapshot_rx)
}

async fn run<S: Reconcile>(
    mut reconciler: Reconciler<S>,
    transport: Arc<dyn MeshTransport>,
    poll_interval: Duration,
    mut changes: mpsc::UnboundedReceiver<S::Change>,
    snapshots: watch::Sender<EndpointSnapshot<S>>,
) {
    let address = reconciler.destination();
    tracing::info!(
        %address,
        ?poll_interval,
        delivery = ?reconciler.delivery(),
        "Endpoint task started"
    );

    let mut desired = S::default();
    let mut applied: u64 = 0;
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let open = drain(&mut changes, &mut desired, &mut applied);
        let report = reconciler.reconcile(&desired, transport.as_ref());
        if !report.is_idle() {
            tracing::debug!(%address, %report, "Reconciled");
        }

        snapshots.send_if_modified(|snapshot| {
            if snapshot.applied == applied && snapshot.sent == *reconciler.sent() {
                return false;
            }
            snapshot.desired.clone_from(&desired);
            snapshot.sent.clone_from(reconciler.sent());
            snapshot.applied = applied;
            true
        });

        if !open {
            break;
        }
    }

    tracing::info!(%address, applied, "Endpoint task stopped");
}

/// Applies every queued change in arrival order.
///
/// Returns `false` once every sender has been dropped and the queue is empty.
fn drain<S: Reconcile>(
    changes: &mut mpsc::UnboundedReceiver<S::Change>,
    desired: &mut S,
    applied: &mut u64,
) -> bool {
    loop {
        match changes.try_recv() {
            Ok(change) => {
                if !desired.apply(&change) {
                    tracing::trace!(?change, "Change left shadow unchanged");
                }
                *applied += 1;
            }
            Err(TryRecvError::Empty) => return true,
            Err(TryRecvError::Disconnected) => return false,
        }
    }
}
