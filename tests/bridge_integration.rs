// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end tests: control-plane setters through endpoint tasks to the
//! transport.

use std::sync::Arc;
use std::time::Duration;

use meshbridge::command::{
    BrightnessCommand, ColorTemperatureCommand, HsvCommand, OnOffCommand, WireCommand,
};
use meshbridge::transport::{ChannelTransport, RecordingTransport};
use meshbridge::{
    Bridge, BridgeConfig, ColorTemperaturePercent, DeliveryPolicy, EndpointHandle, Frame,
    HsvColor, LightMode, MeshAddress, TidPolicy, TransportError,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn bridge(config: BridgeConfig) -> (Bridge, Arc<RecordingTransport>) {
    init_tracing();
    let transport = Arc::new(RecordingTransport::new());
    let bridge = Bridge::spawn(config, transport.clone()).unwrap();
    (bridge, transport)
}

fn commands(transport: &RecordingTransport) -> Vec<WireCommand> {
    transport.take().iter().map(|m| m.frame().unwrap().command).collect()
}

// ============================================================================
// Light endpoint
// ============================================================================

mod light {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn nothing_is_sent_while_off() {
        let (bridge, transport) = bridge(BridgeConfig::default());
        let light = bridge.light();

        light.set_hue(100.0);
        light.set_white_brightness(30);
        light.set_color_temperature(200);
        light.reconciled().await.unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(transport.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn power_on_flushes_color_then_switches_on() {
        let (bridge, transport) = bridge(BridgeConfig::default());
        let light = bridge.light();

        light.set_hue(300.0);
        light.set_saturation(50.0);
        light.set_color_value(80);
        light.set_power(true);
        let snapshot = light.reconciled().await.unwrap();

        assert!(snapshot.is_settled());
        assert_eq!(
            commands(&transport),
            vec![
                WireCommand::Hsv(HsvCommand::new(HsvColor::new(300, 50, 80))),
                WireCommand::OnOff(OnOffCommand::on()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn power_off_sends_single_frame() {
        let (bridge, transport) = bridge(BridgeConfig::default());
        let light = bridge.light();
        light.set_white_brightness(50);
        light.set_power(true);
        light.reconciled().await.unwrap();
        transport.clear();

        light.set_white_brightness(90);
        light.set_power(false);
        light.reconciled().await.unwrap();

        assert_eq!(commands(&transport), vec![WireCommand::OnOff(OnOffCommand::off())]);
    }

    #[tokio::test(start_paused = true)]
    async fn temperature_reaches_the_wire_as_percent() {
        let (bridge, transport) = bridge(BridgeConfig::default());
        let light = bridge.light();
        light.set_power(true);
        light.reconciled().await.unwrap();
        transport.clear();

        for (kelvin_hundreds, percent) in [(150, 42), (200, 28), (300, 0), (500, 173)] {
            light.set_color_temperature(kelvin_hundreds);
            light.reconciled().await.unwrap();
            assert_eq!(
                commands(&transport),
                vec![WireCommand::ColorTemperature(ColorTemperatureCommand::new(
                    ColorTemperaturePercent::new(percent)
                ))],
                "kelvin_hundreds = {kelvin_hundreds}"
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn mode_switch_sends_only_the_new_group() {
        let (bridge, transport) = bridge(BridgeConfig::default());
        let light = bridge.light();
        light.set_hue(90.0);
        light.set_power(true);
        light.reconciled().await.unwrap();
        transport.clear();

        light.set_hue(180.0);
        light.set_white_brightness(40);
        let snapshot = light.reconciled().await.unwrap();

        assert_eq!(snapshot.desired.mode(), LightMode::White);
        assert_eq!(
            commands(&transport),
            vec![
                WireCommand::Brightness(BrightnessCommand::new(40)),
                WireCommand::ColorTemperature(ColorTemperatureCommand::new(
                    ColorTemperaturePercent::new(0)
                )),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn service_power_selects_group() {
        let (bridge, transport) = bridge(BridgeConfig::default());
        let light = bridge.light();
        light.set_hue(45.0);
        light.set_white_power(true);
        let snapshot = light.reconciled().await.unwrap();

        assert_eq!(snapshot.sent.mode(), LightMode::White);
        assert!(commands(&transport)
            .iter()
            .all(|c| !matches!(c, WireCommand::Hsv(_))));
    }
}

// ============================================================================
// Switch endpoint and routing
// ============================================================================

mod switch {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn routed_setter_reaches_switch_address() {
        let (bridge, transport) = bridge(BridgeConfig::default());

        let Some(EndpointHandle::Switch(switch)) = bridge.endpoint(MeshAddress::new(0x0005))
        else {
            panic!("switch should be bound to 0x0005");
        };
        switch.set_power(true);
        switch.reconciled().await.unwrap();

        let messages = transport.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].destination, MeshAddress::DEFAULT_SWITCH);
        assert_eq!(messages[0].payload, [0x00, 0x00, 0x01, 0x01]);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_addresses_are_honoured() {
        let config = BridgeConfig::new()
            .with_light_address(MeshAddress::new(0x0100))
            .with_switch_address(MeshAddress::new(0x0101));
        let (bridge, transport) = bridge(config);

        assert!(bridge.endpoint(MeshAddress::DEFAULT_LIGHT).is_none());
        let light = bridge.endpoint(MeshAddress::new(0x0100)).unwrap();
        light.set_power(true);
        light.as_light().unwrap().reconciled().await.unwrap();

        assert_eq!(transport.messages()[0].destination, MeshAddress::new(0x0100));
    }
}

// ============================================================================
// Delivery and transaction ids
// ============================================================================

mod delivery {
    use super::*;
    use meshbridge::state::Shadow;

    #[tokio::test(start_paused = true)]
    async fn retry_policy_resends_after_failure() {
        let config = BridgeConfig::new().with_delivery(DeliveryPolicy::RetryOnFailure);
        let (bridge, transport) = bridge(config);
        transport.fail_next(TransportError::Busy);

        let switch = bridge.switch();
        switch.set_power(true);
        switch.reconciled().await.unwrap();

        let mut watcher = switch.watch();
        watcher.wait_for(|s| s.sent.power()).await.unwrap();
        assert_eq!(transport.attempts(), 2);
        assert_eq!(transport.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn optimistic_policy_drops_failed_frame() {
        let (bridge, transport) = bridge(BridgeConfig::default());
        transport.fail_next(TransportError::Closed);

        let switch = bridge.switch();
        switch.set_power(true);
        let snapshot = switch.reconciled().await.unwrap();
        assert!(snapshot.sent.power());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(transport.attempts(), 1);
        assert!(transport.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn rolling_tids_count_per_endpoint() {
        let config = BridgeConfig::new().with_tid(TidPolicy::Rolling);
        let (bridge, transport) = bridge(config);
        let light = bridge.light();

        light.set_white_brightness(10);
        light.set_power(true);
        light.reconciled().await.unwrap();
        light.set_white_brightness(20);
        light.reconciled().await.unwrap();

        let tids: Vec<u8> = transport.frames().iter().map(|f| f.tid).collect();
        assert_eq!(tids, vec![0, 1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn channel_transport_feeds_radio_task() {
        init_tracing();
        let (transport, mut radio) = ChannelTransport::bounded(16);
        let bridge = Bridge::spawn(BridgeConfig::default(), Arc::new(transport)).unwrap();

        let radio_task = tokio::spawn(async move {
            let mut frames = Vec::new();
            while let Some(message) = radio.recv().await {
                frames.push(Frame::decode(&message.payload).unwrap());
            }
            frames
        });

        bridge.light().set_power(true);
        bridge.switch().set_power(true);
        bridge.light().reconciled().await.unwrap();
        bridge.switch().reconciled().await.unwrap();

        // Dropping every handle stops both endpoint tasks, which closes the
        // channel once their transport clones are gone.
        drop(bridge);
        let frames = radio_task.await.unwrap();
        assert_eq!(frames.len(), 2);
        assert!(frames
            .iter()
            .all(|f| f.command == WireCommand::OnOff(OnOffCommand::on())));
    }
}
