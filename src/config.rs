// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::command::TidPolicy;
use crate::error::ConfigError;
use crate::reconciler::DeliveryPolicy;
use crate::types::MeshAddress;

/// Configuration for a [`Bridge`](crate::Bridge).
///
/// Every field has a default, so a partial (or empty) JSON object is a valid
/// configuration.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use meshbridge::BridgeConfig;
/// use meshbridge::command::TidPolicy;
/// use meshbridge::types::MeshAddress;
///
/// // Defaults: light at 0x0004, switch at 0x0005, 10 ms poll
/// let config = BridgeConfig::new();
/// assert_eq!(config.poll_interval(), Duration::from_millis(10));
///
/// // Builder style
/// let config = BridgeConfig::new()
///     .with_light_address(MeshAddress::new(0x0010))
///     .with_tid(TidPolicy::Rolling);
///
/// // From JSON
/// let config = BridgeConfig::from_json(r#"{ "poll_interval_ms": 25 }"#).unwrap();
/// assert_eq!(config.poll_interval_ms, 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Reconcile period in milliseconds.
    pub poll_interval_ms: u64,
    /// Mesh address of the light endpoint.
    pub light_address: MeshAddress,
    /// Mesh address of the switch endpoint.
    pub switch_address: MeshAddress,
    /// Transaction id policy for every endpoint.
    pub tid: TidPolicy,
    /// What to do with the sent state when a send fails.
    pub delivery: DeliveryPolicy,
}

impl BridgeConfig {
    /// Default reconcile period.
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10;

    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON and validates it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if the document does not parse, or any
    /// error from [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sets the reconcile period.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the light endpoint address.
    #[must_use]
    pub fn with_light_address(mut self, address: MeshAddress) -> Self {
        self.light_address = address;
        self
    }

    /// Sets the switch endpoint address.
    #[must_use]
    pub fn with_switch_address(mut self, address: MeshAddress) -> Self {
        self.switch_address = address;
        self
    }

    /// Sets the transaction id policy.
    #[must_use]
    pub fn with_tid(mut self, tid: TidPolicy) -> Self {
        self.tid = tid;
        self
    }

    /// Sets the delivery policy.
    #[must_use]
    pub fn with_delivery(mut self, delivery: DeliveryPolicy) -> Self {
        self.delivery = delivery;
        self
    }

    /// Returns the reconcile period.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Checks the configuration for values the bridge cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroPollInterval`,
    /// `ConfigError::UnassignedAddress` or `ConfigError::DuplicateAddress`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.light_address.is_unassigned() {
            return Err(ConfigError::UnassignedAddress { endpoint: "light" });
        }
        if self.switch_address.is_unassigned() {
            return Err(ConfigError::UnassignedAddress { endpoint: "switch" });
        }
        if self.light_address == self.switch_address {
            return Err(ConfigError::DuplicateAddress(self.light_address));
        }
        Ok(())
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: Self::DEFAULT_POLL_INTERVAL_MS,
            light_address: MeshAddress::DEFAULT_LIGHT,
            switch_address: MeshAddress::DEFAULT_SWITCH,
            tid: TidPolicy::default(),
            delivery: DeliveryPolicy::default(),
        }
    }
}
