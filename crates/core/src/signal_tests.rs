// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn properties_on_v2_interface_are_subscribed() {
    let signal = BackendSignal::PropertiesChanged {
        interface: HIOMAPD_IFACE_V2.to_string(),
        changed: BTreeMap::from([("DaemonReady".to_string(), true)]),
    };
    assert!(signal.is_subscribed());
}

#[test]
fn properties_on_base_interface_are_ignored() {
    let signal = BackendSignal::PropertiesChanged {
        interface: HIOMAPD_IFACE.to_string(),
        changed: BTreeMap::new(),
    };
    assert!(!signal.is_subscribed());
}

#[yare::parameterized(
    protocol_reset = { "ProtocolReset", true },
    window_reset   = { "WindowReset",   true },
    daemon_ready   = { "DaemonReady",   false },
    unknown        = { "Bogus",         false },
)]
fn named_signal_subscription(name: &str, expected: bool) {
    let signal = BackendSignal::Signal { name: name.to_string() };
    assert_eq!(signal.is_subscribed(), expected);
}

#[test]
fn signal_json_is_tagged_by_type() {
    let signal = BackendSignal::Signal { name: "WindowReset".to_string() };
    let json = serde_json::to_string(&signal).unwrap();
    assert_eq!(json, r#"{"type":"Signal","name":"WindowReset"}"#);

    let parsed: BackendSignal = serde_json::from_str(
        r#"{"type":"PropertiesChanged","interface":"x","changed":{"FlashControlLost":false}}"#,
    )
    .unwrap();
    assert_eq!(
        parsed,
        BackendSignal::PropertiesChanged {
            interface: "x".to_string(),
            changed: BTreeMap::from([("FlashControlLost".to_string(), false)]),
        }
    );
}
