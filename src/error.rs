// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `meshbridge` library.
//!
//! Shadow setters and reconciliation are total: they never fail. Errors only
//! come from the surfaces around the core: loading configuration, decoding
//! wire frames, handing bytes to a transport, and talking to an endpoint task
//! that has already stopped.

use thiserror::Error;

use crate::types::MeshAddress;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The bridge configuration is invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A wire frame could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The transport refused a message.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The endpoint task is no longer running.
    #[error("endpoint task has stopped")]
    EndpointClosed,
}

/// Errors raised while loading or validating a [`BridgeConfig`](crate::BridgeConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The polling interval must be at least one millisecond.
    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,

    /// An endpoint was given the unassigned mesh address `0x0000`.
    #[error("{endpoint} endpoint uses the unassigned address 0x0000")]
    UnassignedAddress {
        /// Name of the offending endpoint.
        endpoint: &'static str,
    },

    /// Two endpoints share one mesh address.
    #[error("address {0} is assigned to more than one endpoint")]
    DuplicateAddress(MeshAddress),
}

/// Errors raised while decoding a wire frame.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer is shorter than the layout requires.
    #[error("frame truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Number of bytes the layout requires.
        expected: usize,
        /// Number of bytes available.
        actual: usize,
    },

    /// The type id is not one this bridge speaks.
    #[error("unknown opcode 0x{0:04X}")]
    UnknownOpcode(u16),

    /// The buffer is longer than the layout allows.
    #[error("frame has {extra} trailing bytes")]
    TrailingBytes {
        /// Number of unexpected bytes after the payload.
        extra: usize,
    },

    /// A field does not fit the range this bridge encodes.
    #[error("{field} value {actual} does not fit in 8 bits")]
    ValueOutOfRange {
        /// Name of the field.
        field: &'static str,
        /// The decoded value.
        actual: u16,
    },
}

/// Errors a [`MeshTransport`](crate::transport::MeshTransport) may report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The radio side has gone away.
    #[error("transport is closed")]
    Closed,

    /// The outbound queue is full.
    #[error("transport queue is full")]
    Busy,

    /// The transport rejected the message.
    #[error("message rejected: {0}")]
    Rejected(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
