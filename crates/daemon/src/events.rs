// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event cache: the BMC event bitmask and its delivery to the host.
//!
//! Three sources mutate the bitmask: property-change notifications, named
//! backend signals, and the host's Ack command. All of them go through one
//! lock. The host notification is sent after the lock is released and its
//! outcome never affects the mutation.

use std::collections::BTreeMap;
use std::sync::Arc;

use hiomap_adapters::HostNotifier;
use hiomap_core::{event_for_name, BmcEvents};
use hiomap_wire::HostCommand;
use parking_lot::Mutex;
use tracing::{debug, error};

/// Current event bitmask, shared by the dispatcher and the signal watcher
pub struct EventCache {
    events: Mutex<BmcEvents>,
    notifier: Arc<dyn HostNotifier>,
}

impl EventCache {
    pub fn new(notifier: Arc<dyn HostNotifier>) -> Self {
        Self { events: Mutex::new(BmcEvents::empty()), notifier }
    }

    pub fn snapshot(&self) -> BmcEvents {
        *self.events.lock()
    }

    /// Apply a batch of boolean conditions. Unknown names are skipped.
    ///
    /// Notifies the host when at least one known condition was present.
    pub fn apply_named_conditions(&self, updates: &BTreeMap<String, bool>) -> BmcEvents {
        let mut applied = false;
        let events = {
            let mut events = self.events.lock();
            for (name, value) in updates {
                match event_for_name(name) {
                    Some(bit) => {
                        events.set(bit, *value);
                        applied = true;
                    }
                    None => debug!(condition = %name, "ignoring unknown condition"),
                }
            }
            *events
        };

        if applied {
            self.deliver(events);
        }
        events
    }

    /// Set the bit for a condition that arrived as a bare signal.
    pub fn apply_single_condition(&self, name: &str) -> BmcEvents {
        let Some(bit) = event_for_name(name) else {
            debug!(condition = %name, "ignoring unknown condition");
            return self.snapshot();
        };

        let events = {
            let mut events = self.events.lock();
            events.insert(bit);
            *events
        };
        self.deliver(events);
        events
    }

    /// Clear exactly the bits in `mask`.
    pub fn acknowledge(&self, mask: u8) -> BmcEvents {
        let events = {
            let mut events = self.events.lock();
            events.remove(BmcEvents::from_wire(mask));
            *events
        };
        self.deliver(events);
        events
    }

    fn deliver(&self, events: BmcEvents) {
        let command = HostCommand::event(events);
        match self.notifier.send(command) {
            Ok(()) => debug!(events = events.to_wire(), "queued host event notification"),
            Err(e) => error!(
                command = command.command,
                events = events.to_wire(),
                error = %e,
                "failed to deliver host command"
            ),
        }
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
