// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! BMC event bitmask reported to the host.
//!
//! Each bit mirrors one boolean condition published by the backend. The host
//! learns about changes through an event notification and clears bits with
//! the Ack command.

bitflags::bitflags! {
    /// Conditions the BMC reports to the host
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BmcEvents: u8 {
        const PROTOCOL_RESET = 1 << 0;
        const WINDOW_RESET = 1 << 1;
        const FLASH_CONTROL_LOST = 1 << 6;
        const DAEMON_READY = 1 << 7;
    }
}

/// Backend condition names and the bit each one drives.
pub const EVENT_TABLE: &[(&str, BmcEvents)] = &[
    ("DaemonReady", BmcEvents::DAEMON_READY),
    ("FlashControlLost", BmcEvents::FLASH_CONTROL_LOST),
    ("WindowReset", BmcEvents::WINDOW_RESET),
    ("ProtocolReset", BmcEvents::PROTOCOL_RESET),
];

/// Look up the bit for a backend condition name.
pub fn event_for_name(name: &str) -> Option<BmcEvents> {
    EVENT_TABLE.iter().find(|(n, _)| *n == name).map(|(_, bit)| *bit)
}

impl BmcEvents {
    /// Bitmask as sent to the host, including bits this side has no name for.
    pub fn to_wire(self) -> u8 {
        self.bits()
    }

    /// Mask received from the host. Unknown bits are kept so an Ack clears
    /// exactly what was requested.
    pub fn from_wire(mask: u8) -> Self {
        Self::from_bits_retain(mask)
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
