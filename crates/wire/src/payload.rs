// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-layout command payloads.
//!
//! Every body is a handful of fields at fixed offsets. Multi-byte fields are
//! little-endian. Decoding checks the minimum length before reading anything
//! and ignores trailing bytes.

use hiomap_core::{FlashInfo, ProtocolInfo, WindowDescriptor};
use thiserror::Error;

/// Errors decoding a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("payload too short: need {need} bytes, got {got}")]
    TooShort { need: usize, got: usize },
}

/// A payload with a fixed byte layout
pub trait FixedLayout: Sized {
    /// Encoded length, and the minimum accepted by `decode`
    const LEN: usize;

    fn decode(buf: &[u8]) -> Result<Self, WireError>;

    fn encode(&self) -> Vec<u8>;
}

fn check_len<T: FixedLayout>(buf: &[u8]) -> Result<(), WireError> {
    if buf.len() < T::LEN {
        return Err(WireError::TooShort { need: T::LEN, got: buf.len() });
    }
    Ok(())
}

fn le16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

/// Body of commands that carry no fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoPayload;

impl FixedLayout for NoPayload {
    const LEN: usize = 0;

    fn decode(_buf: &[u8]) -> Result<Self, WireError> {
        Ok(NoPayload)
    }

    fn encode(&self) -> Vec<u8> {
        Vec::new()
    }
}

/// GetInfo request: the highest protocol version the host speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetInfoRequest {
    pub version_hint: u8,
}

impl FixedLayout for GetInfoRequest {
    const LEN: usize = 1;

    fn decode(buf: &[u8]) -> Result<Self, WireError> {
        check_len::<Self>(buf)?;
        Ok(Self { version_hint: buf[0] })
    }

    fn encode(&self) -> Vec<u8> {
        vec![self.version_hint]
    }
}

/// Offset and size pair.
///
/// Shared by CreateReadWindow, CreateWriteWindow, MarkDirty and Erase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRequest {
    pub offset: u16,
    pub size: u16,
}

impl FixedLayout for RangeRequest {
    const LEN: usize = 4;

    fn decode(buf: &[u8]) -> Result<Self, WireError> {
        check_len::<Self>(buf)?;
        Ok(Self { offset: le16(buf, 0), size: le16(buf, 2) })
    }

    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::LEN);
        out.extend_from_slice(&self.offset.to_le_bytes());
        out.extend_from_slice(&self.size.to_le_bytes());
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseWindowRequest {
    pub handle: u8,
}

impl FixedLayout for CloseWindowRequest {
    const LEN: usize = 1;

    fn decode(buf: &[u8]) -> Result<Self, WireError> {
        check_len::<Self>(buf)?;
        Ok(Self { handle: buf[0] })
    }

    fn encode(&self) -> Vec<u8> {
        vec![self.handle]
    }
}

/// Ack request: event bits the host has seen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AckRequest {
    pub mask: u8,
}

impl FixedLayout for AckRequest {
    const LEN: usize = 1;

    fn decode(buf: &[u8]) -> Result<Self, WireError> {
        check_len::<Self>(buf)?;
        Ok(Self { mask: buf[0] })
    }

    fn encode(&self) -> Vec<u8> {
        vec![self.mask]
    }
}

// NOTE(v2): reply layouts below are the protocol version 2 layouts only.

impl FixedLayout for ProtocolInfo {
    const LEN: usize = 4;

    fn decode(buf: &[u8]) -> Result<Self, WireError> {
        check_len::<Self>(buf)?;
        Ok(Self { version: buf[0], block_size_shift: buf[1], timeout: le16(buf, 2) })
    }

    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::LEN);
        out.push(self.version);
        out.push(self.block_size_shift);
        out.extend_from_slice(&self.timeout.to_le_bytes());
        out
    }
}

impl FixedLayout for FlashInfo {
    const LEN: usize = 4;

    fn decode(buf: &[u8]) -> Result<Self, WireError> {
        check_len::<Self>(buf)?;
        Ok(Self { flash_size: le16(buf, 0), erase_size: le16(buf, 2) })
    }

    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::LEN);
        out.extend_from_slice(&self.flash_size.to_le_bytes());
        out.extend_from_slice(&self.erase_size.to_le_bytes());
        out
    }
}

impl FixedLayout for WindowDescriptor {
    const LEN: usize = 6;

    fn decode(buf: &[u8]) -> Result<Self, WireError> {
        check_len::<Self>(buf)?;
        Ok(Self { lpc_address: le16(buf, 0), size: le16(buf, 2), offset: le16(buf, 4) })
    }

    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::LEN);
        out.extend_from_slice(&self.lpc_address.to_le_bytes());
        out.extend_from_slice(&self.size.to_le_bytes());
        out.extend_from_slice(&self.offset.to_le_bytes());
        out
    }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
