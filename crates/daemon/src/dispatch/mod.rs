// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command dispatcher.
//!
//! Validates the envelope, enforces the anti-replay sequence check, runs the
//! command handler and builds the response data. One frame is processed to
//! completion before the next; the listener owns the dispatcher.

mod handlers;

use std::sync::Arc;

use hiomap_adapters::FlashBackend;
use hiomap_wire::{Command, CompletionCode, Envelope};
use tracing::{debug, warn};

use crate::events::EventCache;

/// Outcome of dispatching one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReply {
    pub code: CompletionCode,
    /// `[command][sequence][handler payload]` on success, empty otherwise
    pub data: Vec<u8>,
}

impl DispatchReply {
    fn failure(code: CompletionCode) -> Self {
        Self { code, data: Vec::new() }
    }
}

pub struct Dispatcher {
    backend: Arc<dyn FlashBackend>,
    events: Arc<EventCache>,
    last_sequence: u8,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn FlashBackend>, events: Arc<EventCache>) -> Self {
        Self { backend, events, last_sequence: 0 }
    }

    /// Sequence value of the last frame that passed envelope validation
    pub fn last_sequence(&self) -> u8 {
        self.last_sequence
    }

    pub async fn dispatch(&mut self, frame: &[u8]) -> DispatchReply {
        let envelope = match Envelope::parse(frame) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(error = %e, "rejecting short frame");
                return DispatchReply::failure(CompletionCode::RequestDataLengthInvalid);
            }
        };

        let command = match Command::try_from(envelope.command) {
            Ok(command) => command,
            Err(e) => {
                warn!(error = %e, "rejecting command");
                return DispatchReply::failure(CompletionCode::ParamOutOfRange);
            }
        };

        let sequence = envelope.sequence;
        let replay = !command.is_version_exempt() && sequence == self.last_sequence;
        self.last_sequence = sequence;
        if replay {
            warn!(%command, sequence, "duplicate sequence, rejecting");
            return DispatchReply::failure(CompletionCode::InvalidFieldRequest);
        }

        debug!(%command, sequence, len = envelope.payload.len(), "dispatching");
        match handlers::handle(command, envelope.payload, &*self.backend, &self.events).await {
            Ok(payload) => {
                let mut data = Vec::with_capacity(2 + payload.len());
                data.push(command.id());
                data.push(sequence);
                data.extend_from_slice(&payload);
                DispatchReply { code: CompletionCode::Ok, data }
            }
            Err(code) => {
                debug!(%command, sequence, %code, "command failed");
                DispatchReply::failure(code)
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
