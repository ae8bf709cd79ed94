// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HIOMAP command identifiers.

use std::fmt;

use thiserror::Error;

use crate::payload::{
    AckRequest, CloseWindowRequest, FixedLayout, GetInfoRequest, NoPayload, RangeRequest,
};

/// Host command id used to push the event bitmask to the host
pub const HIOMAP_EVENT: u8 = 0x0f;

/// Commands the host may send. Id 0 is reserved as invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    Reset = 1,
    GetInfo = 2,
    GetFlashInfo = 3,
    CreateReadWindow = 4,
    CloseWindow = 5,
    CreateWriteWindow = 6,
    MarkDirty = 7,
    Flush = 8,
    Ack = 9,
    Erase = 10,
}

/// Command byte outside the known range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown command id {0:#04x}")]
pub struct UnknownCommand(pub u8);

impl Command {
    pub const ALL: [Command; 10] = [
        Command::Reset,
        Command::GetInfo,
        Command::GetFlashInfo,
        Command::CreateReadWindow,
        Command::CloseWindow,
        Command::CreateWriteWindow,
        Command::MarkDirty,
        Command::Flush,
        Command::Ack,
        Command::Erase,
    ];

    /// Highest id the dispatcher accepts
    pub const MAX_ID: u8 = Command::Erase as u8;

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Commands that may legitimately repeat a sequence number.
    ///
    /// Reset, GetInfo and Ack are used to (re)establish a session and to
    /// acknowledge events, so they bypass the replay check.
    pub fn is_version_exempt(self) -> bool {
        matches!(self, Command::Reset | Command::GetInfo | Command::Ack)
    }

    /// Bytes of payload required after the envelope header.
    pub fn min_payload_len(self) -> usize {
        match self {
            Command::Reset | Command::GetFlashInfo | Command::Flush => NoPayload::LEN,
            Command::GetInfo => GetInfoRequest::LEN,
            Command::CloseWindow => CloseWindowRequest::LEN,
            Command::Ack => AckRequest::LEN,
            Command::CreateReadWindow
            | Command::CreateWriteWindow
            | Command::MarkDirty
            | Command::Erase => RangeRequest::LEN,
        }
    }
}

impl TryFrom<u8> for Command {
    type Error = UnknownCommand;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Command::Reset),
            2 => Ok(Command::GetInfo),
            3 => Ok(Command::GetFlashInfo),
            4 => Ok(Command::CreateReadWindow),
            5 => Ok(Command::CloseWindow),
            6 => Ok(Command::CreateWriteWindow),
            7 => Ok(Command::MarkDirty),
            8 => Ok(Command::Flush),
            9 => Ok(Command::Ack),
            10 => Ok(Command::Erase),
            other => Err(UnknownCommand(other)),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Command::Reset => "reset",
            Command::GetInfo => "get_info",
            Command::GetFlashInfo => "get_flash_info",
            Command::CreateReadWindow => "create_read_window",
            Command::CloseWindow => "close_window",
            Command::CreateWriteWindow => "create_write_window",
            Command::MarkDirty => "mark_dirty",
            Command::Flush => "flush",
            Command::Ack => "ack",
            Command::Erase => "erase",
        })
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
