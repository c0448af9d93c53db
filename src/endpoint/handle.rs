// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control-plane handles to endpoint tasks.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{mpsc, watch};

use crate::error::{Error, Result};
use crate::state::{LightChange, LightShadow, Shadow, SwitchChange, SwitchShadow};
use crate::types::MeshAddress;

use super::EndpointSnapshot;

/// Cloneable handle to one endpoint task.
///
/// Every clone feeds the same task. The task keeps running while at least
/// one clone is alive.
#[derive(Debug, Clone)]
pub struct Handle<S: Shadow> {
    address: MeshAddress,
    changes: mpsc::UnboundedSender<S::Change>,
    snapshots: watch::Receiver<EndpointSnapshot<S>>,
    submitted: Arc<AtomicU64>,
}

/// Handle to a light endpoint.
pub type LightHandle = Handle<LightShadow>;

/// Handle to a switch endpoint.
pub type SwitchHandle = Handle<SwitchShadow>;

impl<S: Shadow> Handle<S> {
    pub(super) fn new(
        address: MeshAddress,
        changes: mpsc::UnboundedSender<S::Change>,
        snapshots: watch::Receiver<EndpointSnapshot<S>>,
    ) -> Self {
        Self {
            address,
            changes,
            snapshots,
            submitted: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Returns the mesh address the endpoint sends to.
    #[must_use]
    pub fn address(&self) -> MeshAddress {
        self.address
    }

    /// Queues a change for the next poll tick.
    ///
    /// Never blocks. If the task has stopped the change is dropped and a
    /// warning is logged.
    pub fn apply(&self, change: S::Change) {
        tracing::debug!(address = %self.address, ?change, "Queued shadow change");
        self.submitted.fetch_add(1, Ordering::SeqCst);
        if let Err(mpsc::error::SendError(change)) = self.changes.send(change) {
            tracing::warn!(
                address = %self.address,
                ?change,
                "Endpoint task has stopped, change dropped"
            );
        }
    }

    /// Returns the latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> EndpointSnapshot<S> {
        self.snapshots.borrow().clone()
    }

    /// Returns a receiver that observes every published snapshot.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<EndpointSnapshot<S>> {
        self.snapshots.clone()
    }

    /// Waits until every change queued so far has been applied and
    /// reconciled, then returns the resulting snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EndpointClosed`] if the task stopped first.
    pub async fn reconciled(&self) -> Result<EndpointSnapshot<S>> {
        let target = self.submitted.load(Ordering::SeqCst);
        let mut snapshots = self.snapshots.clone();
        let snapshot = snapshots
            .wait_for(|s| s.applied >= target)
            .await
            .map_err(|_| Error::EndpointClosed)?;
        Ok(snapshot.clone())
    }

    /// Returns `true` once the task has stopped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.changes.is_closed()
    }
}

impl Handle<LightShadow> {
    /// Sets the desired power state without changing the mode.
    pub fn set_power(&self, on: bool) {
        self.apply(LightChange::Power(on));
    }

    /// Sets power through the color service, selecting the color group.
    pub fn set_color_power(&self, on: bool) {
        self.apply(LightChange::ColorPower(on));
    }

    /// Sets power through the white service, selecting the white group.
    pub fn set_white_power(&self, on: bool) {
        self.apply(LightChange::WhitePower(on));
    }

    /// Sets the hue in degrees.
    pub fn set_hue(&self, degrees: f32) {
        self.apply(LightChange::hue(degrees));
    }

    /// Sets the saturation percentage.
    pub fn set_saturation(&self, percent: f32) {
        self.apply(LightChange::saturation(percent));
    }

    /// Sets the color value.
    pub fn set_color_value(&self, value: u8) {
        self.apply(LightChange::ColorValue(value));
    }

    /// Sets the white brightness.
    pub fn set_white_brightness(&self, brightness: u8) {
        self.apply(LightChange::WhiteBrightness(brightness));
    }

    /// Sets the color temperature in hundreds of Kelvin.
    pub fn set_color_temperature(&self, kelvin_hundreds: u32) {
        self.apply(LightChange::color_temperature(kelvin_hundreds));
    }

    /// Queues several changes that land in the same poll tick.
    pub fn batch(&self, changes: Vec<LightChange>) {
        self.apply(LightChange::batch(changes));
    }
}

impl Handle<SwitchShadow> {
    /// Sets the desired power state.
    pub fn set_power(&self, on: bool) {
        self.apply(SwitchChange::Power(on));
    }
}
