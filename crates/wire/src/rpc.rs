// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON messages exchanged with the backend flash-window daemon.

use hiomap_core::{
    BackendError, FlashInfo, ProtocolInfo, WindowDescriptor, HIOMAPD_IFACE, HIOMAPD_IFACE_V2,
};
use serde::{Deserialize, Serialize};

/// Method call on the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum BackendRequest {
    Reset,
    GetInfo { version: u8 },
    GetFlashInfo,
    CreateReadWindow { offset: u16, size: u16 },
    CreateWriteWindow { offset: u16, size: u16 },
    CloseWindow { handle: u8 },
    MarkDirty { offset: u16, size: u16 },
    Flush,
    Ack { mask: u8 },
    Erase { offset: u16, size: u16 },
}

impl BackendRequest {
    pub fn method(&self) -> &'static str {
        match self {
            BackendRequest::Reset => "Reset",
            BackendRequest::GetInfo { .. } => "GetInfo",
            BackendRequest::GetFlashInfo => "GetFlashInfo",
            BackendRequest::CreateReadWindow { .. } => "CreateReadWindow",
            BackendRequest::CreateWriteWindow { .. } => "CreateWriteWindow",
            BackendRequest::CloseWindow { .. } => "CloseWindow",
            BackendRequest::MarkDirty { .. } => "MarkDirty",
            BackendRequest::Flush => "Flush",
            BackendRequest::Ack { .. } => "Ack",
            BackendRequest::Erase { .. } => "Erase",
        }
    }

    /// Backend interface that owns the method
    pub fn interface(&self) -> &'static str {
        match self {
            BackendRequest::Reset | BackendRequest::GetInfo { .. } => HIOMAPD_IFACE,
            _ => HIOMAPD_IFACE_V2,
        }
    }
}

/// Reply from the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum BackendReply {
    /// Call succeeded with no return value
    Done,
    Info { info: ProtocolInfo },
    FlashInfo { info: FlashInfo },
    Window { window: WindowDescriptor },
    Error { errno: i32, message: String },
}

impl From<&BackendError> for BackendReply {
    fn from(err: &BackendError) -> Self {
        BackendReply::Error { errno: err.raw, message: err.message.clone() }
    }
}

#[cfg(test)]
#[path = "rpc_tests.rs"]
mod tests;
