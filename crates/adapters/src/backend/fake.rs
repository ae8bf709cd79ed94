// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use hiomap_core::{BackendError, FlashInfo, ProtocolInfo, WindowDescriptor};
use hiomap_wire::BackendRequest;
use parking_lot::Mutex;

use super::FlashBackend;

struct FakeBackendState {
    calls: Vec<BackendRequest>,
    failures: HashMap<&'static str, BackendError>,
    info: ProtocolInfo,
    flash_info: FlashInfo,
    window: WindowDescriptor,
}

/// Fake backend for testing.
///
/// Records every call and returns canned descriptors; individual methods can
/// be made to fail by RPC method name.
#[derive(Clone)]
pub struct FakeFlashBackend {
    inner: Arc<Mutex<FakeBackendState>>,
}

impl Default for FakeFlashBackend {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeBackendState {
                calls: Vec::new(),
                failures: HashMap::new(),
                info: ProtocolInfo { version: 2, block_size_shift: 12, timeout: 30 },
                flash_info: FlashInfo { flash_size: 0x4000, erase_size: 1 },
                window: WindowDescriptor { lpc_address: 0x0100, size: 0x0020, offset: 0 },
            })),
        }
    }
}

impl FakeFlashBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls received, in order
    pub fn calls(&self) -> Vec<BackendRequest> {
        self.inner.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().calls.len()
    }

    /// Make `method` (e.g. "CloseWindow") fail with `err` until cleared
    pub fn fail(&self, method: &'static str, err: BackendError) {
        self.inner.lock().failures.insert(method, err);
    }

    pub fn clear_failures(&self) {
        self.inner.lock().failures.clear();
    }

    pub fn set_info(&self, info: ProtocolInfo) {
        self.inner.lock().info = info;
    }

    pub fn set_flash_info(&self, flash_info: FlashInfo) {
        self.inner.lock().flash_info = flash_info;
    }

    pub fn set_window(&self, window: WindowDescriptor) {
        self.inner.lock().window = window;
    }

    fn record(&self, request: BackendRequest) -> Result<(), BackendError> {
        let mut inner = self.inner.lock();
        inner.calls.push(request);
        match inner.failures.get(request.method()) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FlashBackend for FakeFlashBackend {
    async fn reset(&self) -> Result<(), BackendError> {
        self.record(BackendRequest::Reset)
    }

    async fn get_info(&self, version: u8) -> Result<ProtocolInfo, BackendError> {
        self.record(BackendRequest::GetInfo { version })?;
        Ok(self.inner.lock().info)
    }

    async fn get_flash_info(&self) -> Result<FlashInfo, BackendError> {
        self.record(BackendRequest::GetFlashInfo)?;
        Ok(self.inner.lock().flash_info)
    }

    async fn create_read_window(
        &self,
        offset: u16,
        size: u16,
    ) -> Result<WindowDescriptor, BackendError> {
        self.record(BackendRequest::CreateReadWindow { offset, size })?;
        Ok(self.inner.lock().window)
    }

    async fn create_write_window(
        &self,
        offset: u16,
        size: u16,
    ) -> Result<WindowDescriptor, BackendError> {
        self.record(BackendRequest::CreateWriteWindow { offset, size })?;
        Ok(self.inner.lock().window)
    }

    async fn close_window(&self, handle: u8) -> Result<(), BackendError> {
        self.record(BackendRequest::CloseWindow { handle })
    }

    async fn mark_dirty(&self, offset: u16, size: u16) -> Result<(), BackendError> {
        self.record(BackendRequest::MarkDirty { offset, size })
    }

    async fn flush(&self) -> Result<(), BackendError> {
        self.record(BackendRequest::Flush)
    }

    async fn ack(&self, mask: u8) -> Result<(), BackendError> {
        self.record(BackendRequest::Ack { mask })
    }

    async fn erase(&self, offset: u16, size: u16) -> Result<(), BackendError> {
        self.record(BackendRequest::Erase { offset, size })
    }
}
