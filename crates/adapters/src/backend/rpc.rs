// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backend client over a Unix socket.
//!
//! One connection per call: write a length-prefixed JSON `BackendRequest`,
//! read back a `BackendReply`. The whole exchange is bounded by the configured
//! timeout, which surfaces as `ETIMEDOUT`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use hiomap_core::{BackendError, Errno, FlashInfo, ProtocolInfo, WindowDescriptor};
use hiomap_wire::{
    decode, encode, read_message, write_message, BackendReply, BackendRequest, ProtocolError,
};
use tokio::net::UnixStream;
use tracing::debug;

use super::FlashBackend;

/// `FlashBackend` that talks to the backend daemon's RPC socket
#[derive(Debug, Clone)]
pub struct RpcFlashBackend {
    socket_path: PathBuf,
    timeout: Duration,
}

impl RpcFlashBackend {
    pub fn new(socket_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self { socket_path: socket_path.into(), timeout }
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Perform one call. A backend `Error` reply becomes `Err`.
    async fn call(&self, request: BackendRequest) -> Result<BackendReply, BackendError> {
        debug!(method = request.method(), interface = request.interface(), "backend call");
        let reply = tokio::time::timeout(self.timeout, self.exchange(&request))
            .await
            .map_err(|_| {
                BackendError::new(Errno::ETIMEDOUT, format!("{} timed out", request.method()))
            })??;

        match reply {
            BackendReply::Error { errno, message } => {
                debug!(method = request.method(), errno, %message, "backend call failed");
                Err(BackendError::from_raw(errno, message))
            }
            reply => Ok(reply),
        }
    }

    async fn exchange(&self, request: &BackendRequest) -> Result<BackendReply, BackendError> {
        let method = request.method();
        let mut stream = UnixStream::connect(&self.socket_path).await.map_err(|e| {
            BackendError::new(
                Errno::ENODEV,
                format!("{}: connect {}: {}", method, self.socket_path.display(), e),
            )
        })?;

        let body = encode(request).map_err(|e| protocol_error(method, e))?;
        write_message(&mut stream, &body).await.map_err(|e| protocol_error(method, e))?;
        let reply = read_message(&mut stream).await.map_err(|e| protocol_error(method, e))?;
        decode(&reply).map_err(|e| protocol_error(method, e))
    }
}

fn protocol_error(method: &str, err: ProtocolError) -> BackendError {
    let raw = match &err {
        ProtocolError::Timeout => Errno::ETIMEDOUT as i32,
        ProtocolError::ConnectionClosed => Errno::ECONNRESET as i32,
        ProtocolError::Io(e) => {
            e.raw_os_error().filter(|raw| *raw != 0).unwrap_or(Errno::EIO as i32)
        }
        ProtocolError::MessageTooLarge { .. }
        | ProtocolError::Json(_)
        | ProtocolError::Frame(_) => Errno::EPROTO as i32,
    };
    BackendError::from_raw(raw, format!("{}: {}", method, err))
}

fn unexpected(method: &str, reply: BackendReply) -> BackendError {
    BackendError::new(Errno::EPROTO, format!("{}: unexpected reply {:?}", method, reply))
}

impl RpcFlashBackend {
    async fn call_done(&self, request: BackendRequest) -> Result<(), BackendError> {
        match self.call(request).await? {
            BackendReply::Done => Ok(()),
            other => Err(unexpected(request.method(), other)),
        }
    }

    async fn call_window(&self, request: BackendRequest) -> Result<WindowDescriptor, BackendError> {
        match self.call(request).await? {
            BackendReply::Window { window } => Ok(window),
            other => Err(unexpected(request.method(), other)),
        }
    }
}

#[async_trait]
impl FlashBackend for RpcFlashBackend {
    async fn reset(&self) -> Result<(), BackendError> {
        self.call_done(BackendRequest::Reset).await
    }

    async fn get_info(&self, version: u8) -> Result<ProtocolInfo, BackendError> {
        let request = BackendRequest::GetInfo { version };
        match self.call(request).await? {
            BackendReply::Info { info } => Ok(info),
            other => Err(unexpected(request.method(), other)),
        }
    }

    async fn get_flash_info(&self) -> Result<FlashInfo, BackendError> {
        let request = BackendRequest::GetFlashInfo;
        match self.call(request).await? {
            BackendReply::FlashInfo { info } => Ok(info),
            other => Err(unexpected(request.method(), other)),
        }
    }

    async fn create_read_window(
        &self,
        offset: u16,
        size: u16,
    ) -> Result<WindowDescriptor, BackendError> {
        self.call_window(BackendRequest::CreateReadWindow { offset, size }).await
    }

    async fn create_write_window(
        &self,
        offset: u16,
        size: u16,
    ) -> Result<WindowDescriptor, BackendError> {
        self.call_window(BackendRequest::CreateWriteWindow { offset, size }).await
    }

    async fn close_window(&self, handle: u8) -> Result<(), BackendError> {
        self.call_done(BackendRequest::CloseWindow { handle }).await
    }

    async fn mark_dirty(&self, offset: u16, size: u16) -> Result<(), BackendError> {
        self.call_done(BackendRequest::MarkDirty { offset, size }).await
    }

    async fn flush(&self) -> Result<(), BackendError> {
        self.call_done(BackendRequest::Flush).await
    }

    async fn ack(&self, mask: u8) -> Result<(), BackendError> {
        self.call_done(BackendRequest::Ack { mask }).await
    }

    async fn erase(&self, offset: u16, size: u16) -> Result<(), BackendError> {
        self.call_done(BackendRequest::Erase { offset, size }).await
    }
}

#[cfg(test)]
#[path = "rpc_tests.rs"]
mod tests;
