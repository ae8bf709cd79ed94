// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hiomap-core: Domain types shared by the HIOMAP bridge crates

pub mod backend_error;
pub mod events;
pub mod flash;
pub mod signal;

pub use backend_error::BackendError;
pub use events::{event_for_name, BmcEvents, EVENT_TABLE};
pub use flash::{FlashInfo, ProtocolInfo, WindowDescriptor};
pub use signal::{BackendSignal, HIOMAPD_IFACE, HIOMAPD_IFACE_V2, SIGNAL_CONDITIONS};
pub use nix::errno::Errno;
