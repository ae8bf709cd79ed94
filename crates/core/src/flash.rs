// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Descriptors returned by the backend.
//!
//! These are transient: the dispatcher copies them into a reply payload and
//! drops them. All sizes and offsets are in units of the negotiated block
//! size, as the protocol defines them.

use serde::{Deserialize, Serialize};

/// Reply to GetInfo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolInfo {
    pub version: u8,
    /// log2 of the block size
    pub block_size_shift: u8,
    /// Suggested host timeout in seconds
    pub timeout: u16,
}

/// Reply to GetFlashInfo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashInfo {
    pub flash_size: u16,
    pub erase_size: u16,
}

/// A window mapped into LPC space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowDescriptor {
    pub lpc_address: u16,
    pub size: u16,
    pub offset: u16,
}
