// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backend flash-window service
//!
//! The `FlashBackend` trait is the port the dispatcher calls for every host
//! command. Each method maps 1:1 onto a backend RPC and either returns the
//! backend's typed reply or the errno it failed with.

mod rpc;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeFlashBackend;

pub use rpc::RpcFlashBackend;

use async_trait::async_trait;
use hiomap_core::{BackendError, FlashInfo, ProtocolInfo, WindowDescriptor};

/// Operations offered by the backend flash-window daemon
#[async_trait]
pub trait FlashBackend: Send + Sync + 'static {
    /// Drop all windows and return the flash to the BMC
    async fn reset(&self) -> Result<(), BackendError>;

    /// Negotiate the protocol version
    async fn get_info(&self, version: u8) -> Result<ProtocolInfo, BackendError>;

    async fn get_flash_info(&self) -> Result<FlashInfo, BackendError>;

    async fn create_read_window(
        &self,
        offset: u16,
        size: u16,
    ) -> Result<WindowDescriptor, BackendError>;

    async fn create_write_window(
        &self,
        offset: u16,
        size: u16,
    ) -> Result<WindowDescriptor, BackendError>;

    async fn close_window(&self, handle: u8) -> Result<(), BackendError>;

    /// Mark a range of the current write window as modified
    async fn mark_dirty(&self, offset: u16, size: u16) -> Result<(), BackendError>;

    /// Write dirty ranges back to flash
    async fn flush(&self) -> Result<(), BackendError>;

    /// Acknowledge event bits
    async fn ack(&self, mask: u8) -> Result<(), BackendError>;

    /// Erase a range of the current write window
    async fn erase(&self, offset: u16, size: u16) -> Result<(), BackendError>;
}
