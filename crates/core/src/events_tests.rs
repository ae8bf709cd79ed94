// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    daemon_ready       = { "DaemonReady",      0b1000_0000 },
    flash_control_lost = { "FlashControlLost", 0b0100_0000 },
    window_reset       = { "WindowReset",      0b0000_0010 },
    protocol_reset     = { "ProtocolReset",    0b0000_0001 },
)]
fn table_maps_names_to_bits(name: &str, bits: u8) {
    assert_eq!(event_for_name(name).map(BmcEvents::to_wire), Some(bits));
}

#[yare::parameterized(
    unknown    = { "Bogus" },
    lowercase  = { "windowreset" },
    empty      = { "" },
)]
fn unknown_names_have_no_bit(name: &str) {
    assert_eq!(event_for_name(name), None);
}

#[test]
fn table_bits_are_distinct() {
    let mut seen = BmcEvents::empty();
    for (name, bit) in EVENT_TABLE {
        assert!(!seen.intersects(*bit), "{} overlaps another condition", name);
        seen |= *bit;
    }
    assert_eq!(seen, BmcEvents::all());
}

#[test]
fn from_wire_retains_unnamed_bits() {
    let events = BmcEvents::from_wire(0b0011_0101);
    assert_eq!(events.to_wire(), 0b0011_0101);
    assert!(events.contains(BmcEvents::PROTOCOL_RESET));
}

#[test]
fn remove_clears_only_requested_bits() {
    let mut events = BmcEvents::from_wire(0b0000_0111);
    events.remove(BmcEvents::from_wire(0b0000_0011));
    assert_eq!(events.to_wire(), 0b0000_0100);
}
