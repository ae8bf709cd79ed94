// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Applies backend signals to the event cache.

use std::sync::Arc;

use hiomap_core::BackendSignal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::events::EventCache;

/// Apply one signal. Returns false when the signal is outside the subscription.
pub fn apply_signal(cache: &EventCache, signal: BackendSignal) -> bool {
    if !signal.is_subscribed() {
        debug!(?signal, "ignoring unsubscribed backend signal");
        return false;
    }

    match signal {
        BackendSignal::PropertiesChanged { changed, .. } => {
            cache.apply_named_conditions(&changed);
        }
        BackendSignal::Signal { name } => {
            cache.apply_single_condition(&name);
        }
    }
    true
}

/// Drain `rx` until the sender side closes.
pub async fn watch_signals(mut rx: mpsc::Receiver<BackendSignal>, cache: Arc<EventCache>) {
    while let Some(signal) = rx.recv().await {
        apply_signal(&cache, signal);
    }
    info!("backend signal watcher stopped");
}

pub fn spawn_signal_watcher(
    rx: mpsc::Receiver<BackendSignal>,
    cache: Arc<EventCache>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = watch_signals(rx, cache) => {}
            _ = cancel.cancelled() => debug!("signal watcher cancelled"),
        }
    })
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
