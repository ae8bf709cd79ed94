// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host notification channel.
//!
//! Delivery is fire-and-forget: the caller hands a command to a bounded queue
//! and the transport listener forwards it to the host when it can.

use hiomap_wire::HostCommand;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Errors from host notification delivery
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("host queue full")]
    QueueFull,

    #[error("host queue closed")]
    Closed,
}

/// Adapter for pushing commands to the host
pub trait HostNotifier: Send + Sync + 'static {
    /// Queue a command without blocking
    fn send(&self, command: HostCommand) -> Result<(), NotifyError>;
}

/// Bounded queue drained by the transport listener
#[derive(Clone, Debug)]
pub struct QueueHostNotifier {
    tx: mpsc::Sender<HostCommand>,
}

impl QueueHostNotifier {
    /// Create the notifier and the receiving end for the transport
    pub fn channel(depth: usize) -> (Self, mpsc::Receiver<HostCommand>) {
        let (tx, rx) = mpsc::channel(depth.max(1));
        (Self { tx }, rx)
    }
}

impl HostNotifier for QueueHostNotifier {
    fn send(&self, command: HostCommand) -> Result<(), NotifyError> {
        self.tx.try_send(command).map_err(|e| match e {
            TrySendError::Full(_) => NotifyError::QueueFull,
            TrySendError::Closed(_) => NotifyError::Closed,
        })
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{HostNotifier, NotifyError};
    use hiomap_wire::HostCommand;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct FakeHostState {
        sent: Vec<HostCommand>,
        failure: Option<NotifyError>,
    }

    /// Fake host notifier for testing
    #[derive(Clone)]
    pub struct FakeHostNotifier {
        inner: Arc<Mutex<FakeHostState>>,
    }

    impl Default for FakeHostNotifier {
        fn default() -> Self {
            Self { inner: Arc::new(Mutex::new(FakeHostState { sent: Vec::new(), failure: None })) }
        }
    }

    impl FakeHostNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        /// Every delivery attempt, including failed ones
        pub fn sent(&self) -> Vec<HostCommand> {
            self.inner.lock().sent.clone()
        }

        /// Make subsequent deliveries fail
        pub fn fail_with(&self, err: Option<NotifyError>) {
            self.inner.lock().failure = err;
        }
    }

    impl HostNotifier for FakeHostNotifier {
        fn send(&self, command: HostCommand) -> Result<(), NotifyError> {
            let mut inner = self.inner.lock();
            inner.sent.push(command);
            match &inner.failure {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeHostNotifier;

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
