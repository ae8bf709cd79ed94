// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure causes reported by the flash-window backend.
//!
//! The backend speaks errno: every failed call carries one, and the wire crate
//! turns it into a completion code for the host. The raw value is kept as
//! received; `Errno` folds every value it does not list into `UnknownErrno`,
//! including 0.

use nix::errno::Errno;
use thiserror::Error;

/// A failed backend call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({})", describe(.raw))]
pub struct BackendError {
    /// errno as carried on the RPC wire; 0 means the backend gave no code
    pub raw: i32,
    pub message: String,
}

fn describe(raw: &i32) -> String {
    match BackendError::known_errno(*raw) {
        Some(errno) => errno.to_string(),
        None => format!("errno {}", raw),
    }
}

impl BackendError {
    pub fn new(errno: Errno, message: impl Into<String>) -> Self {
        Self { raw: errno as i32, message: message.into() }
    }

    /// Build from a raw errno value as carried on the RPC wire.
    pub fn from_raw(raw: i32, message: impl Into<String>) -> Self {
        Self { raw, message: message.into() }
    }

    /// The errno, or `None` when the raw value is 0 or one `nix` does not list
    pub fn errno(&self) -> Option<Errno> {
        Self::known_errno(self.raw)
    }

    fn known_errno(raw: i32) -> Option<Errno> {
        match Errno::from_raw(raw) {
            Errno::UnknownErrno => None,
            errno => Some(errno),
        }
    }
}

impl From<Errno> for BackendError {
    fn from(errno: Errno) -> Self {
        Self::new(errno, errno.desc())
    }
}

#[cfg(test)]
#[path = "backend_error_tests.rs"]
mod tests;
