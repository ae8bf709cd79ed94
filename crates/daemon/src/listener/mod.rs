// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transport listener.
//!
//! Accepts the transport peer on a Unix socket and serves one peer at a time.
//! While connected, inbound requests are dispatched in order and queued host
//! commands are written out between them. Host commands queued while no peer
//! is connected wait in the bounded queue.

use std::time::Duration;

use hiomap_wire::{read_transport, write_transport, HostCommand, ProtocolError, TransportMessage};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::UnixListener;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::dispatch::Dispatcher;

/// Listener task owning the dispatcher and the host command queue.
pub struct Listener {
    unix: UnixListener,
    dispatcher: Dispatcher,
    host_rx: mpsc::Receiver<HostCommand>,
    io_timeout: Duration,
}

/// Errors from serving a connection.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl Listener {
    pub fn new(
        unix: UnixListener,
        dispatcher: Dispatcher,
        host_rx: mpsc::Receiver<HostCommand>,
        io_timeout: Duration,
    ) -> Self {
        Self { unix, dispatcher, host_rx, io_timeout }
    }

    /// Accept and serve peers until `cancel` fires.
    pub async fn run(mut self, cancel: CancellationToken) {
        loop {
            let stream = tokio::select! {
                _ = cancel.cancelled() => break,
                result = self.unix.accept() => match result {
                    Ok((stream, _)) => stream,
                    Err(e) => {
                        error!("Unix accept error: {}", e);
                        continue;
                    }
                },
            };

            info!("transport peer connected");
            let (reader, writer) = stream.into_split();
            match self.serve(reader, writer, &cancel).await {
                Ok(()) => info!("transport peer disconnected"),
                Err(e) => log_connection_error(e),
            }
        }
        debug!("listener stopped");
    }

    /// Serve one connected peer.
    ///
    /// Reads happen on a separate task: a partially read message must not be
    /// lost when a host command wins the race.
    pub async fn serve<R, W>(
        &mut self,
        mut reader: R,
        mut writer: W,
        cancel: &CancellationToken,
    ) -> Result<(), ConnectionError>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin,
    {
        let (inbound_tx, inbound_rx) = mpsc::channel(1);
        let read_task = tokio::spawn(async move {
            loop {
                let result = read_transport(&mut reader).await;
                let failed = result.is_err();
                if inbound_tx.send(result).await.is_err() || failed {
                    break;
                }
            }
        });

        let result = self.serve_inner(inbound_rx, &mut writer, cancel).await;
        read_task.abort();
        result
    }

    async fn serve_inner<W: AsyncWrite + Unpin>(
        &mut self,
        mut inbound_rx: mpsc::Receiver<Result<TransportMessage, ProtocolError>>,
        writer: &mut W,
        cancel: &CancellationToken,
    ) -> Result<(), ConnectionError> {
        let Self { dispatcher, host_rx, io_timeout, .. } = self;
        let io_timeout = *io_timeout;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                inbound = inbound_rx.recv() => match inbound {
                    None | Some(Err(ProtocolError::ConnectionClosed)) => return Ok(()),
                    Some(Err(e)) => return Err(e.into()),
                    Some(Ok(TransportMessage::Request(frame))) => {
                        let reply = dispatcher.dispatch(&frame).await;
                        debug!(code = %reply.code, len = reply.data.len(), "sending response");
                        let response =
                            TransportMessage::Response { code: reply.code, data: reply.data };
                        write_transport(writer, &response, io_timeout).await?;
                    }
                    Some(Ok(other)) => warn!(unexpected = ?other, "ignoring unexpected message from peer"),
                },
                Some(command) = host_rx.recv() => {
                    debug!(command = command.command, data = command.data, "sending host command");
                    write_transport(writer, &TransportMessage::HostCommand(command), io_timeout)
                        .await?;
                }
            }
        }
    }
}

fn log_connection_error(e: ConnectionError) {
    match e {
        ConnectionError::Protocol(ProtocolError::Timeout) => warn!("Connection timeout"),
        _ => error!("Connection error: {}", e),
    }
}

#[cfg(test)]
#[path = "../listener_tests.rs"]
mod tests;
