// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command envelopes and transport messages.

use hiomap_core::BmcEvents;
use thiserror::Error;

use crate::command::HIOMAP_EVENT;
use crate::completion::CompletionCode;

/// Length of the `[command][sequence]` header on every frame
pub const HEADER_LEN: usize = 2;

const KIND_REQUEST: u8 = 0x01;
const KIND_RESPONSE: u8 = 0x02;
const KIND_HOST_COMMAND: u8 = 0x03;

/// Errors parsing frames and transport messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("frame too short: need {need} bytes, got {got}")]
    TooShort { need: usize, got: usize },

    #[error("unknown message kind {0:#04x}")]
    UnknownKind(u8),

    #[error("unknown completion code {0:#04x}")]
    UnknownCompletionCode(u8),
}

/// A command frame split into header fields and payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    pub command: u8,
    pub sequence: u8,
    pub payload: &'a [u8],
}

impl<'a> Envelope<'a> {
    pub fn parse(frame: &'a [u8]) -> Result<Self, FrameError> {
        match frame {
            [command, sequence, payload @ ..] => {
                Ok(Self { command: *command, sequence: *sequence, payload })
            }
            _ => Err(FrameError::TooShort { need: HEADER_LEN, got: frame.len() }),
        }
    }
}

/// Command pushed from the BMC to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCommand {
    pub command: u8,
    pub data: u8,
}

impl HostCommand {
    /// Event notification carrying the current bitmask
    pub fn event(events: BmcEvents) -> Self {
        Self { command: HIOMAP_EVENT, data: events.to_wire() }
    }
}

/// Message exchanged with the transport peer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportMessage {
    /// Raw command frame from the host
    Request(Vec<u8>),
    /// Result of dispatching a request
    Response { code: CompletionCode, data: Vec<u8> },
    /// Asynchronous command for the host
    HostCommand(HostCommand),
}

impl TransportMessage {
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            TransportMessage::Request(frame) => {
                let mut out = Vec::with_capacity(1 + frame.len());
                out.push(KIND_REQUEST);
                out.extend_from_slice(frame);
                out
            }
            TransportMessage::Response { code, data } => {
                let mut out = Vec::with_capacity(2 + data.len());
                out.push(KIND_RESPONSE);
                out.push(code.as_byte());
                out.extend_from_slice(data);
                out
            }
            TransportMessage::HostCommand(cmd) => vec![KIND_HOST_COMMAND, cmd.command, cmd.data],
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FrameError> {
        match bytes {
            [KIND_REQUEST, frame @ ..] => Ok(TransportMessage::Request(frame.to_vec())),
            [KIND_RESPONSE, code, data @ ..] => {
                let code = CompletionCode::from_byte(*code)
                    .ok_or(FrameError::UnknownCompletionCode(*code))?;
                Ok(TransportMessage::Response { code, data: data.to_vec() })
            }
            [KIND_HOST_COMMAND, command, data, ..] => {
                Ok(TransportMessage::HostCommand(HostCommand { command: *command, data: *data }))
            }
            [KIND_RESPONSE] => Err(FrameError::TooShort { need: 2, got: 1 }),
            [KIND_HOST_COMMAND, ..] => Err(FrameError::TooShort { need: 3, got: bytes.len() }),
            [kind, ..] => Err(FrameError::UnknownKind(*kind)),
            [] => Err(FrameError::TooShort { need: 1, got: 0 }),
        }
    }
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
