// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The bridge: one light and one switch endpoint sharing a transport.

use std::sync::Arc;

use crate::config::BridgeConfig;
use crate::endpoint::{self, EndpointHandle, LightHandle, SwitchHandle};
use crate::error::Result;
use crate::reconciler::{LightReconciler, SwitchReconciler};
use crate::transport::MeshTransport;
use crate::types::MeshAddress;

/// Running bridge.
///
/// Owns one handle per endpoint. Dropping the bridge and every handle taken
/// from it lets the endpoint tasks flush their last state and exit.
///
/// # Examples
///
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> meshbridge::Result<()> {
/// use std::sync::Arc;
///
/// use meshbridge::{Bridge, BridgeConfig};
/// use meshbridge::transport::RecordingTransport;
/// use meshbridge::types::MeshAddress;
///
/// let transport = Arc::new(RecordingTransport::new());
/// let bridge = Bridge::spawn(BridgeConfig::default(), transport.clone())?;
///
/// bridge.light().set_color_temperature(150);
/// bridge.light().set_power(true);
/// bridge.light().reconciled().await?;
///
/// // Brightness already matches the zeroed sent state
/// let frames = transport.messages();
/// assert_eq!(frames.len(), 2);
/// assert_eq!(frames[0].payload, [0x00, 0xF1, 0x01, 42]);
/// assert_eq!(frames[1].payload, [0x00, 0x00, 0x01, 0x01]);
///
/// // Address routing
/// let switch = bridge.endpoint(MeshAddress::DEFAULT_SWITCH).unwrap();
/// assert_eq!(switch.kind(), "switch");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Bridge {
    config: BridgeConfig,
    light: LightHandle,
    switch: SwitchHandle,
}

impl Bridge {
    /// Validates `config` and starts both endpoint tasks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the configuration
    /// is invalid.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn<T>(config: BridgeConfig, transport: Arc<T>) -> Result<Self>
    where
        T: MeshTransport + 'static,
    {
        config.validate()?;
        let transport: Arc<dyn MeshTransport> = transport;

        let light = endpoint::spawn(
            LightReconciler::new(config.light_address, config.tid, config.delivery),
            Arc::clone(&transport),
            config.poll_interval(),
        );
        let switch = endpoint::spawn(
            SwitchReconciler::new(config.switch_address, config.tid, config.delivery),
            transport,
            config.poll_interval(),
        );

        tracing::info!(
            light = %config.light_address,
            switch = %config.switch_address,
            "Bridge started"
        );

        Ok(Self {
            config,
            light,
            switch,
        })
    }

    /// Returns the configuration the bridge was started with.
    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Returns the light endpoint handle.
    #[must_use]
    pub fn light(&self) -> &LightHandle {
        &self.light
    }

    /// Returns the switch endpoint handle.
    #[must_use]
    pub fn switch(&self) -> &SwitchHandle {
        &self.switch
    }

    /// Resolves a mesh address to the endpoint bound to it.
    #[must_use]
    pub fn endpoint(&self, address: MeshAddress) -> Option<EndpointHandle> {
        if address == self.light.address() {
            Some(self.light.clone().into())
        } else if address == self.switch.address() {
            Some(self.switch.clone().into())
        } else {
            tracing::debug!(%address, "No endpoint bound to address");
            None
        }
    }

    /// Returns handles to every endpoint.
    #[must_use]
    pub fn endpoints(&self) -> Vec<EndpointHandle> {
        vec![self.light.clone().into(), self.switch.clone().into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};
    use crate::state::Shadow;
    use crate::transport::RecordingTransport;

    #[tokio::test(start_paused = true)]
    async fn routes_by_address() {
        let bridge =
            Bridge::spawn(BridgeConfig::default(), Arc::new(RecordingTransport::new())).unwrap();

        assert!(matches!(
            bridge.endpoint(MeshAddress::DEFAULT_LIGHT),
            Some(EndpointHandle::Light(_))
        ));
        assert!(matches!(
            bridge.endpoint(MeshAddress::DEFAULT_SWITCH),
            Some(EndpointHandle::Switch(_))
        ));
        assert!(bridge.endpoint(MeshAddress::new(0x0099)).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn endpoints_send_to_their_own_address() {
        let transport = Arc::new(RecordingTransport::new());
        let bridge = Bridge::spawn(BridgeConfig::default(), transport.clone()).unwrap();

        for handle in bridge.endpoints() {
            handle.set_power(true);
        }
        bridge.light().reconciled().await.unwrap();
        let snapshot = bridge.switch().reconciled().await.unwrap();
        assert!(snapshot.sent.power());

        let mut destinations: Vec<_> = transport.messages().iter().map(|m| m.destination).collect();
        destinations.sort();
        assert_eq!(
            destinations,
            vec![MeshAddress::DEFAULT_LIGHT, MeshAddress::DEFAULT_SWITCH]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn rejects_invalid_config() {
        let config = BridgeConfig::new().with_light_address(MeshAddress::UNASSIGNED);
        let result = Bridge::spawn(config, Arc::new(RecordingTransport::new()));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::UnassignedAddress { endpoint: "light" }))
        ));
    }
}
