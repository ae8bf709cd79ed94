// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subscription to the backend's signal stream.
//!
//! The backend pushes length-prefixed JSON `BackendSignal` messages on a
//! dedicated socket. A reader task forwards them onto a channel.

use std::path::{Path, PathBuf};

use hiomap_core::BackendSignal;
use hiomap_wire::{decode, read_message, ProtocolError};
use thiserror::Error;
use tokio::io::AsyncRead;
use tokio::net::UnixStream;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors from subscribing to backend signals
#[derive(Debug, Error)]
pub enum SubscribeError {
    #[error("failed to connect to signal socket {0}: {1}")]
    Connect(PathBuf, #[source] std::io::Error),
}

/// Connect to the signal socket and spawn a reader task.
///
/// The task ends when the backend closes the stream, the receiver is dropped,
/// or `cancel` fires.
pub async fn subscribe_signals(
    path: &Path,
    depth: usize,
    cancel: CancellationToken,
) -> Result<mpsc::Receiver<BackendSignal>, SubscribeError> {
    let stream = UnixStream::connect(path)
        .await
        .map_err(|e| SubscribeError::Connect(path.to_path_buf(), e))?;
    let (tx, rx) = mpsc::channel(depth.max(1));
    info!(path = %path.display(), "subscribed to backend signals");

    tokio::spawn(async move {
        tokio::select! {
            _ = forward_signals(stream, tx) => {}
            _ = cancel.cancelled() => debug!("signal subscription cancelled"),
        }
    });

    Ok(rx)
}

/// Read signals from `reader` until it closes, forwarding each to `tx`.
///
/// Malformed messages are logged and skipped.
pub async fn forward_signals<R: AsyncRead + Unpin>(mut reader: R, tx: mpsc::Sender<BackendSignal>) {
    loop {
        let body = match read_message(&mut reader).await {
            Ok(body) => body,
            Err(ProtocolError::ConnectionClosed) => {
                info!("backend signal stream closed");
                return;
            }
            Err(e) => {
                warn!(error = %e, "backend signal stream failed");
                return;
            }
        };

        let signal: BackendSignal = match decode(&body) {
            Ok(signal) => signal,
            Err(e) => {
                warn!(error = %e, "ignoring malformed backend signal");
                continue;
            }
        };

        if tx.send(signal).await.is_err() {
            debug!("signal receiver dropped");
            return;
        }
    }
}

#[cfg(test)]
#[path = "signals_tests.rs"]
mod tests;
