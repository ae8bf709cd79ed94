// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::time::Duration;

use crate::lifecycle::LifecycleError;

/// Resolve state directory: HIOMAP_STATE_DIR > XDG_RUNTIME_DIR/hiomap > /run/hiomap
pub fn state_dir() -> Result<PathBuf, LifecycleError> {
    if let Ok(dir) = std::env::var("HIOMAP_STATE_DIR") {
        if dir.is_empty() {
            return Err(LifecycleError::NoStateDir);
        }
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_RUNTIME_DIR") {
        return Ok(PathBuf::from(xdg).join("hiomap"));
    }
    Ok(PathBuf::from("/run/hiomap"))
}

/// Backend RPC socket override
pub fn backend_socket() -> Option<PathBuf> {
    path_var("HIOMAP_BACKEND_SOCKET")
}

/// Backend signal socket override
pub fn signal_socket() -> Option<PathBuf> {
    path_var("HIOMAP_SIGNAL_SOCKET")
}

/// Transport read/write timeout
pub fn ipc_timeout() -> Duration {
    millis_var("HIOMAP_IPC_TIMEOUT_MS").unwrap_or(Duration::from_secs(5))
}

/// Per-call backend timeout
pub fn backend_timeout() -> Duration {
    millis_var("HIOMAP_BACKEND_TIMEOUT_MS").unwrap_or(Duration::from_secs(25))
}

/// Depth of the host notification queue (default 16)
pub fn host_queue_depth() -> usize {
    std::env::var("HIOMAP_HOST_QUEUE_DEPTH")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|depth| *depth > 0)
        .unwrap_or(16)
}

/// Log filter directive (default `info`)
pub fn log_filter() -> String {
    std::env::var("HIOMAP_LOG").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| "info".into())
}

/// Directory for the log file. Logs go to stderr when unset.
pub fn log_dir() -> Option<PathBuf> {
    path_var("HIOMAP_LOG_DIR")
}

fn path_var(name: &str) -> Option<PathBuf> {
    std::env::var(name).ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

fn millis_var(name: &str) -> Option<Duration> {
    std::env::var(name).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
