// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transaction id allocation.

use serde::{Deserialize, Serialize};

/// How transaction ids are assigned to outgoing frames.
///
/// Deployed receivers were paired with a sender that always wrote `0x00`, so
/// that remains the default. `Rolling` gives every frame from an endpoint a
/// fresh id, which lets receivers tell a new command apart from a
/// retransmission of the previous one.
///
/// # Examples
///
/// ```
/// use meshbridge::command::{TidPolicy, TransactionIds};
///
/// let mut ids = TransactionIds::new(TidPolicy::Rolling);
/// assert_eq!(ids.next_tid(), 0);
/// assert_eq!(ids.next_tid(), 1);
///
/// let mut fixed = TransactionIds::new(TidPolicy::default());
/// assert_eq!(fixed.next_tid(), 0);
/// assert_eq!(fixed.next_tid(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TidPolicy {
    /// Every frame carries the same id.
    Fixed(u8),
    /// Ids count up from zero and wrap at 255.
    Rolling,
}

impl Default for TidPolicy {
    fn default() -> Self {
        Self::Fixed(0)
    }
}

/// Per-endpoint transaction id generator.
#[derive(Debug, Clone)]
pub struct TransactionIds {
    policy: TidPolicy,
    next: u8,
}

impl TransactionIds {
    /// Creates a generator for the given policy.
    #[must_use]
    pub const fn new(policy: TidPolicy) -> Self {
        let next = match policy {
            TidPolicy::Fixed(tid) => tid,
            TidPolicy::Rolling => 0,
        };
        Self { policy, next }
    }

    /// Returns the policy in use.
    #[must_use]
    pub const fn policy(&self) -> TidPolicy {
        self.policy
    }

    /// Returns the id for the next frame.
    pub fn next_tid(&mut self) -> u8 {
        let tid = self.next;
        if self.policy == TidPolicy::Rolling {
            self.next = self.next.wrapping_add(1);
        }
        tid
    }
}

impl Default for TransactionIds {
    fn default() -> Self {
        Self::new(TidPolicy::default())
    }
}
