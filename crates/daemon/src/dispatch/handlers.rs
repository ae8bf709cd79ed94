// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-command handlers.
//!
//! Each handler sees only the payload after the envelope header and returns
//! the encoded reply body, or the completion code to report.

use hiomap_adapters::FlashBackend;
use hiomap_core::BackendError;
use hiomap_wire::{
    AckRequest, CloseWindowRequest, Command, CompletionCode, FixedLayout, GetInfoRequest,
    NoPayload, RangeRequest,
};
use tracing::{debug, warn};

use crate::events::EventCache;

type HandlerResult = Result<Vec<u8>, CompletionCode>;

pub(super) async fn handle(
    command: Command,
    payload: &[u8],
    backend: &dyn FlashBackend,
    events: &EventCache,
) -> HandlerResult {
    match command {
        Command::Reset => {
            decode::<NoPayload>(command, payload)?;
            done(command, backend.reset().await)
        }
        Command::GetInfo => {
            let req = decode::<GetInfoRequest>(command, payload)?;
            reply(command, backend.get_info(req.version_hint).await)
        }
        Command::GetFlashInfo => {
            decode::<NoPayload>(command, payload)?;
            reply(command, backend.get_flash_info().await)
        }
        Command::CreateReadWindow => {
            let req = decode::<RangeRequest>(command, payload)?;
            reply(command, backend.create_read_window(req.offset, req.size).await)
        }
        Command::CloseWindow => {
            let req = decode::<CloseWindowRequest>(command, payload)?;
            done(command, backend.close_window(req.handle).await)
        }
        Command::CreateWriteWindow => {
            let req = decode::<RangeRequest>(command, payload)?;
            reply(command, backend.create_write_window(req.offset, req.size).await)
        }
        Command::MarkDirty => {
            let req = decode::<RangeRequest>(command, payload)?;
            done(command, backend.mark_dirty(req.offset, req.size).await)
        }
        Command::Flush => {
            decode::<NoPayload>(command, payload)?;
            done(command, backend.flush().await)
        }
        Command::Ack => {
            let req = decode::<AckRequest>(command, payload)?;
            match backend.ack(req.mask).await {
                Ok(()) => {
                    events.acknowledge(req.mask);
                    Ok(Vec::new())
                }
                Err(e) => failure(command, &e),
            }
        }
        Command::Erase => {
            let req = decode::<RangeRequest>(command, payload)?;
            done(command, backend.erase(req.offset, req.size).await)
        }
    }
}

fn decode<T: FixedLayout>(command: Command, payload: &[u8]) -> Result<T, CompletionCode> {
    T::decode(payload).map_err(|e| {
        warn!(%command, error = %e, "bad payload");
        CompletionCode::RequestDataLengthInvalid
    })
}

fn reply<T: FixedLayout>(command: Command, result: Result<T, BackendError>) -> HandlerResult {
    match result {
        Ok(body) => Ok(body.encode()),
        Err(e) => failure(command, &e),
    }
}

fn done(command: Command, result: Result<(), BackendError>) -> HandlerResult {
    match result {
        Ok(()) => Ok(Vec::new()),
        Err(e) => failure(command, &e),
    }
}

/// Translate a backend failure. An errno that maps to `Ok` yields an empty
/// reply body and skips any handler side effect.
fn failure(command: Command, err: &BackendError) -> HandlerResult {
    let code = CompletionCode::from(err);
    if code.is_ok() {
        debug!(%command, error = %err, "backend reported failure without an errno");
        return Ok(Vec::new());
    }
    warn!(%command, errno = err.raw, %code, error = %err, "backend call failed");
    Err(code)
}
