// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HIOMAP wire protocol.
//!
//! Command frames: `[command][sequence][payload...]`, fixed-layout
//! little-endian payloads. Transport and backend RPC messages: 4-byte length
//! prefix (big-endian) + body.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod command;
mod completion;
mod frame;
mod payload;
mod rpc;
mod wire;

pub use command::{Command, UnknownCommand, HIOMAP_EVENT};
pub use completion::{translate_errno, CompletionCode, ErrnoMatch, ERRNO_TABLE};
pub use frame::{Envelope, FrameError, HostCommand, TransportMessage, HEADER_LEN};
pub use payload::{AckRequest, CloseWindowRequest, FixedLayout, GetInfoRequest, NoPayload};
pub use payload::{RangeRequest, WireError};
pub use rpc::{BackendReply, BackendRequest};
pub use wire::{decode, encode, read_message, write_message, ProtocolError, MAX_MESSAGE_SIZE};
pub use wire::{read_transport, write_transport};
