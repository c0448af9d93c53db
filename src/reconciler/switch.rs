// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch endpoint reconciliation: one On/Off frame per power change.

use crate::command::OnOffCommand;
use crate::state::{Shadow, SwitchShadow};
use crate::transport::MeshTransport;

use super::{Outbox, Reconcile};

impl Reconcile for SwitchShadow {
    fn reconcile_into<T: MeshTransport + ?Sized>(&self, sent: &mut Self, out: &mut Outbox<'_, T>) {
        let on = self.power();
        if on != sent.power() && out.emit(OnOffCommand::from(on)) {
            sent.set_power(on);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::command::TidPolicy;
    use crate::error::TransportError;
    use crate::reconciler::{DeliveryPolicy, SwitchReconciler};
    use crate::state::{Shadow, SwitchShadow};
    use crate::transport::RecordingTransport;
    use crate::types::MeshAddress;

    #[test]
    fn sends_on_off_per_transition() {
        let mut reconciler = SwitchReconciler::with_defaults(MeshAddress::DEFAULT_SWITCH);
        let transport = RecordingTransport::new();
        let mut desired = SwitchShadow::new();

        assert!(reconciler.reconcile(&desired, &transport).is_idle());

        desired.set_power(true);
        assert_eq!(reconciler.reconcile(&desired, &transport).sent, 1);
        assert!(reconciler.reconcile(&desired, &transport).is_idle());

        desired.set_power(false);
        assert_eq!(reconciler.reconcile(&desired, &transport).sent, 1);

        let messages = transport.messages();
        assert_eq!(messages[0].destination, MeshAddress::DEFAULT_SWITCH);
        assert_eq!(messages[0].payload, [0x00, 0x00, 0x01, 0x01]);
        assert_eq!(messages[1].payload, [0x00, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn retry_policy_resends_power() {
        let mut reconciler = SwitchReconciler::new(
            MeshAddress::DEFAULT_SWITCH,
            TidPolicy::default(),
            DeliveryPolicy::RetryOnFailure,
        );
        let transport = RecordingTransport::new();
        let mut desired = SwitchShadow::new();
        desired.set_power(true);
        transport.fail_next(TransportError::Rejected("no route".into()));

        assert_eq!(reconciler.reconcile(&desired, &transport).failed, 1);
        assert!(!reconciler.sent().power());
        assert_eq!(reconciler.reconcile(&desired, &transport).sent, 1);
        assert!(reconciler.sent().power());
    }
}
