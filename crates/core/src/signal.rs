// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Asynchronous notifications published by the backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Base protocol interface of the backend daemon
pub const HIOMAPD_IFACE: &str = "xyz.openbmc_project.Hiomapd.Protocol";

/// Version 2 interface; owns the event properties and signals
pub const HIOMAPD_IFACE_V2: &str = "xyz.openbmc_project.Hiomapd.Protocol.V2";

/// Conditions that arrive as bare signals rather than property changes.
pub const SIGNAL_CONDITIONS: &[&str] = &["ProtocolReset", "WindowReset"];

/// Notification from the backend's signal stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BackendSignal {
    /// Boolean properties changed on `interface`
    PropertiesChanged { interface: String, changed: BTreeMap<String, bool> },
    /// A named condition fired; carries no value
    Signal { name: String },
}

impl BackendSignal {
    /// Whether the bridge acts on this notification.
    pub fn is_subscribed(&self) -> bool {
        match self {
            BackendSignal::PropertiesChanged { interface, .. } => interface == HIOMAPD_IFACE_V2,
            BackendSignal::Signal { name } => SIGNAL_CONDITIONS.contains(&name.as_str()),
        }
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
