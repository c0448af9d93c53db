// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light endpoint reconciliation rules.
//!
//! - Power turning on: flush the active group, then send On/Off. If part of
//!   the flush was not committed, On/Off waits for the next pass.
//! - Power turning off: send On/Off only.
//! - Power steady on: flush the active group.
//! - Power steady off: nothing.
//!
//! A group flush sends only the fields that differ from the sent state,
//! unless the active mode differs from the sent mode, in which case the whole
//! group goes out. The white group sends brightness before temperature; the
//! color group always goes out as one HSV frame.

use crate::command::{BrightnessCommand, ColorTemperatureCommand, HsvCommand, OnOffCommand};
use crate::state::{LightShadow, Shadow};
use crate::transport::MeshTransport;
use crate::types::LightMode;

use super::{Outbox, Reconcile};

impl Reconcile for LightShadow {
    fn reconcile_into<T: MeshTransport + ?Sized>(&self, sent: &mut Self, out: &mut Outbox<'_, T>) {
        match (self.power(), sent.power()) {
            (true, false) => {
                if flush_group(self, sent, out) && out.emit(OnOffCommand::on()) {
                    sent.record_power(true);
                }
            }
            (false, true) => {
                if out.emit(OnOffCommand::off()) {
                    sent.record_power(false);
                }
            }
            (true, true) => {
                flush_group(self, sent, out);
            }
            (false, false) => {}
        }
    }
}

/// Sends the active group and returns whether every emitted field was
/// committed to `sent`.
fn flush_group<T: MeshTransport + ?Sized>(
    desired: &LightShadow,
    sent: &mut LightShadow,
    out: &mut Outbox<'_, T>,
) -> bool {
    let mode_changed = desired.mode() != sent.mode();

    match desired.mode() {
        LightMode::White => {
            let mut complete = true;

            if mode_changed || desired.brightness() != sent.brightness() {
                if out.emit(BrightnessCommand::new(desired.brightness())) {
                    sent.record_brightness(desired.brightness());
                } else {
                    complete = false;
                }
            }

            if mode_changed || desired.temperature() != sent.temperature() {
                if out.emit(ColorTemperatureCommand::new(desired.temperature())) {
                    sent.record_temperature(desired.temperature());
                } else {
                    complete = false;
                }
            }

            // A partial flush keeps the old mode so the next pass resends
            // the whole group.
            if mode_changed && complete {
                sent.record_mode(LightMode::White);
            }
            complete
        }
        LightMode::Color => {
            if !mode_changed && desired.hsv() == sent.hsv() {
                return true;
            }
            if !out.emit(HsvCommand::new(desired.hsv())) {
                return false;
            }
            sent.record_hsv(desired.hsv());
            sent.record_mode(LightMode::Color);
            true
        }
    }
}
