// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HIOMAP bridge daemon
//!
//! Sits between the IPMI transport peer and the backend flash-window daemon:
//! validates and sequences host commands, forwards them to the backend, and
//! pushes event notifications back to the host.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod dispatch;
pub mod env;
pub mod events;
pub mod lifecycle;
pub mod listener;
pub mod watcher;

pub use dispatch::{DispatchReply, Dispatcher};
pub use events::EventCache;
pub use lifecycle::{startup, Config, Daemon, LifecycleError, StartupResult};
pub use listener::{ConnectionError, Listener};
pub use watcher::{apply_signal, spawn_signal_watcher, watch_signals};
