// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Completion codes returned to the host, and the errno translation table.

use std::fmt;

use hiomap_core::{BackendError, Errno};

/// IPMI completion code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CompletionCode {
    Ok = 0x00,
    Busy = 0xc0,
    InvalidCommand = 0xc1,
    Timeout = 0xc3,
    OutOfSpace = 0xc4,
    RequestDataLengthInvalid = 0xc7,
    /// Also used for command ids outside the known range
    ParamOutOfRange = 0xc9,
    InvalidTarget = 0xcb,
    /// Duplicate sequence number
    InvalidFieldRequest = 0xcc,
    InsufficientPrivilege = 0xd4,
    UnspecifiedError = 0xff,
}

impl CompletionCode {
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0x00 => CompletionCode::Ok,
            0xc0 => CompletionCode::Busy,
            0xc1 => CompletionCode::InvalidCommand,
            0xc3 => CompletionCode::Timeout,
            0xc4 => CompletionCode::OutOfSpace,
            0xc7 => CompletionCode::RequestDataLengthInvalid,
            0xc9 => CompletionCode::ParamOutOfRange,
            0xcb => CompletionCode::InvalidTarget,
            0xcc => CompletionCode::InvalidFieldRequest,
            0xd4 => CompletionCode::InsufficientPrivilege,
            0xff => CompletionCode::UnspecifiedError,
            _ => return None,
        })
    }

    pub fn is_ok(self) -> bool {
        self == CompletionCode::Ok
    }
}

impl fmt::Display for CompletionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({:#04x})", self, self.as_byte())
    }
}

/// Left-hand side of an [`ERRNO_TABLE`] row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrnoMatch {
    /// Raw value 0: the backend reported no error code
    NoError,
    Exact(Errno),
    Any,
}

impl ErrnoMatch {
    fn matches(self, raw: i32) -> bool {
        match self {
            ErrnoMatch::NoError => raw == 0,
            ErrnoMatch::Exact(e) => e as i32 == raw,
            ErrnoMatch::Any => true,
        }
    }
}

/// Ordered errno → completion code table. First match wins; the final row
/// must be the wildcard.
pub const ERRNO_TABLE: &[(ErrnoMatch, CompletionCode)] = &[
    (ErrnoMatch::NoError, CompletionCode::Ok),
    (ErrnoMatch::Exact(Errno::EBUSY), CompletionCode::Busy),
    (ErrnoMatch::Exact(Errno::ENOTSUP), CompletionCode::InvalidCommand),
    (ErrnoMatch::Exact(Errno::ETIMEDOUT), CompletionCode::Timeout),
    (ErrnoMatch::Exact(Errno::ENOSPC), CompletionCode::OutOfSpace),
    (ErrnoMatch::Exact(Errno::EINVAL), CompletionCode::ParamOutOfRange),
    (ErrnoMatch::Exact(Errno::ENODEV), CompletionCode::InvalidTarget),
    (ErrnoMatch::Exact(Errno::EPERM), CompletionCode::InsufficientPrivilege),
    (ErrnoMatch::Exact(Errno::EACCES), CompletionCode::InsufficientPrivilege),
    (ErrnoMatch::Any, CompletionCode::UnspecifiedError),
];

/// Translate a raw backend errno into the code reported to the host.
pub fn translate_errno(raw: i32) -> CompletionCode {
    ERRNO_TABLE
        .iter()
        .find(|(m, _)| m.matches(raw))
        .map(|(_, code)| *code)
        .unwrap_or(CompletionCode::UnspecifiedError)
}

impl From<&BackendError> for CompletionCode {
    fn from(err: &BackendError) -> Self {
        translate_errno(err.raw)
    }
}

#[cfg(test)]
#[path = "completion_tests.rs"]
mod tests;
