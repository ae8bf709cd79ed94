// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bridge startup and initialization logic.

use std::io::Write;
use std::sync::Arc;

use fs2::FileExt;
use hiomap_adapters::{subscribe_signals, QueueHostNotifier, RpcFlashBackend};
use tokio::net::UnixListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::{Config, Daemon, LifecycleError, StartupResult};
use crate::dispatch::Dispatcher;
use crate::events::EventCache;
use crate::listener::Listener;
use crate::watcher::spawn_signal_watcher;

/// Buffered backend signals awaiting the watcher
const SIGNAL_QUEUE_DEPTH: usize = 32;

/// Start the bridge
pub async fn startup(config: &Config) -> Result<StartupResult, LifecycleError> {
    match startup_inner(config).await {
        Ok(result) => Ok(result),
        Err(e) => {
            // Files belong to the running bridge when the lock was taken
            if !matches!(e, LifecycleError::LockFailed(_)) {
                cleanup_on_failure(config);
            }
            Err(e)
        }
    }
}

async fn startup_inner(config: &Config) -> Result<StartupResult, LifecycleError> {
    // 1. State directory
    std::fs::create_dir_all(&config.state_dir)?;

    // 2. Acquire lock before touching anything else. Open without truncating
    // so a running bridge keeps its PID if the lock fails.
    let lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)?;
    lock_file.try_lock_exclusive().map_err(LifecycleError::LockFailed)?;

    let mut lock_file = lock_file;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;
    let lock_file = lock_file;

    // 3. Adapters and the shared event cache
    let backend = RpcFlashBackend::new(config.backend_socket.clone(), config.backend_timeout);
    let (notifier, host_rx) = QueueHostNotifier::channel(config.host_queue_depth);
    let events = Arc::new(EventCache::new(Arc::new(notifier)));
    let dispatcher = Dispatcher::new(Arc::new(backend), Arc::clone(&events));
    let cancel = CancellationToken::new();

    // 4. Remove stale socket and bind
    if config.socket_path.exists() {
        std::fs::remove_file(&config.socket_path)?;
    }
    let unix = UnixListener::bind(&config.socket_path)
        .map_err(|e| LifecycleError::BindFailed(config.socket_path.clone(), e))?;

    // 5. Backend signals are optional; nothing after this can fail
    let watcher =
        match subscribe_signals(&config.signal_socket, SIGNAL_QUEUE_DEPTH, cancel.child_token())
            .await
        {
            Ok(rx) => Some(spawn_signal_watcher(rx, Arc::clone(&events), cancel.child_token())),
            Err(e) => {
                warn!(error = %e, "continuing without backend signals");
                None
            }
        };

    info!(
        socket = %config.socket_path.display(),
        backend = %config.backend_socket.display(),
        "bridge started"
    );

    let listener = Listener::new(unix, dispatcher, host_rx, config.ipc_timeout);
    let daemon = Daemon { config: config.clone(), lock_file, events, cancel, watcher };
    Ok(StartupResult { daemon, listener })
}

fn cleanup_on_failure(config: &Config) {
    if config.socket_path.exists() {
        let _ = std::fs::remove_file(&config.socket_path);
    }
    if config.lock_path.exists() {
        let _ = std::fs::remove_file(&config.lock_path);
    }
}
