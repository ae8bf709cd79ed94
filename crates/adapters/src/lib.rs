// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapters for external I/O: the backend flash-window daemon, its signal
//! stream, and the host notification channel.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod backend;
pub mod host;
pub mod signals;

pub use backend::{FlashBackend, RpcFlashBackend};
pub use host::{HostNotifier, NotifyError, QueueHostNotifier};
pub use signals::{forward_signals, subscribe_signals, SubscribeError};

#[cfg(any(test, feature = "test-support"))]
pub use backend::FakeFlashBackend;
#[cfg(any(test, feature = "test-support"))]
pub use host::FakeHostNotifier;
