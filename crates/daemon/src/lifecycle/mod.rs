// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup and shutdown.

mod startup;
pub use startup::startup;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::env;
use crate::events::EventCache;
use crate::listener::Listener;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the socket and pid file
    pub state_dir: PathBuf,
    /// Socket the transport peer connects to
    pub socket_path: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Backend RPC endpoint
    pub backend_socket: PathBuf,
    /// Backend notification stream
    pub signal_socket: PathBuf,
    pub ipc_timeout: Duration,
    pub backend_timeout: Duration,
    pub host_queue_depth: usize,
}

impl Config {
    /// Load configuration from the environment.
    pub fn load() -> Result<Self, LifecycleError> {
        Ok(Self::with_state_dir(env::state_dir()?))
    }

    /// Configuration rooted at `state_dir`, with environment overrides applied.
    pub fn with_state_dir(state_dir: PathBuf) -> Self {
        Self {
            socket_path: state_dir.join("hiomap-bridge.sock"),
            lock_path: state_dir.join("hiomap-bridge.pid"),
            backend_socket: env::backend_socket()
                .unwrap_or_else(|| state_dir.join("hiomapd.sock")),
            signal_socket: env::signal_socket()
                .unwrap_or_else(|| state_dir.join("hiomapd-signals.sock")),
            ipc_timeout: env::ipc_timeout(),
            backend_timeout: env::backend_timeout(),
            host_queue_depth: env::host_queue_depth(),
            state_dir,
        }
    }
}

/// Daemon state during operation.
pub struct Daemon {
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    /// Event bitmask shared with the dispatcher and signal watcher
    pub events: Arc<EventCache>,
    /// Cancelled on shutdown; observed by the listener and watcher tasks
    pub cancel: CancellationToken,
    watcher: Option<JoinHandle<()>>,
}

/// Result of daemon startup: the daemon state and the listener to spawn.
pub struct StartupResult {
    pub daemon: Daemon,
    pub listener: Listener,
}

impl Daemon {
    /// Whether backend signals are being applied
    pub fn has_signal_watcher(&self) -> bool {
        self.watcher.is_some()
    }

    /// Stop background tasks and remove the socket and pid files.
    pub fn shutdown(&mut self) -> Result<(), LifecycleError> {
        info!("Shutting down bridge...");
        self.cancel.cancel();
        if let Some(watcher) = self.watcher.take() {
            watcher.abort();
        }

        if self.config.socket_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.socket_path) {
                warn!("Failed to remove socket file: {}", e);
            }
        }

        if self.config.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.lock_path) {
                warn!("Failed to remove PID file: {}", e);
            }
        }

        info!("Bridge shutdown complete");
        Ok(())
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to acquire lock: bridge already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Failed to bind socket at {0}: {1}")]
    BindFailed(PathBuf, std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
