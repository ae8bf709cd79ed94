// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use hiomap_core::{BackendSignal, BmcEvents};
use hiomap_wire::{
    encode, read_transport, write_message, write_transport, CompletionCode, HostCommand,
    TransportMessage,
};
use serial_test::serial;
use tempfile::tempdir;
use tokio::net::{UnixListener, UnixStream};

use super::*;

const TIMEOUT: Duration = Duration::from_secs(2);

fn test_config(dir: &std::path::Path) -> Config {
    let mut config = Config::with_state_dir(dir.join("state"));
    config.backend_socket = dir.join("backend.sock");
    config.signal_socket = dir.join("signals.sock");
    config.ipc_timeout = TIMEOUT;
    config.backend_timeout = TIMEOUT;
    config
}

#[test]
#[serial]
fn config_paths_derive_from_state_dir() {
    std::env::remove_var("HIOMAP_BACKEND_SOCKET");
    std::env::remove_var("HIOMAP_SIGNAL_SOCKET");

    let config = Config::with_state_dir(PathBuf::from("/run/hiomap"));

    assert_eq!(config.socket_path, PathBuf::from("/run/hiomap/hiomap-bridge.sock"));
    assert_eq!(config.lock_path, PathBuf::from("/run/hiomap/hiomap-bridge.pid"));
    assert_eq!(config.backend_socket, PathBuf::from("/run/hiomap/hiomapd.sock"));
    assert_eq!(config.signal_socket, PathBuf::from("/run/hiomap/hiomapd-signals.sock"));
}

#[test]
#[serial]
fn config_honors_socket_overrides() {
    std::env::set_var("HIOMAP_BACKEND_SOCKET", "/tmp/other-backend.sock");

    let config = Config::with_state_dir(PathBuf::from("/run/hiomap"));
    std::env::remove_var("HIOMAP_BACKEND_SOCKET");

    assert_eq!(config.backend_socket, PathBuf::from("/tmp/other-backend.sock"));
}

#[tokio::test]
#[serial]
async fn startup_writes_pid_and_binds_socket() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());

    let StartupResult { mut daemon, .. } = startup(&config).await.unwrap();

    let pid = std::fs::read_to_string(&config.lock_path).unwrap();
    assert_eq!(pid.trim(), std::process::id().to_string());
    assert!(config.socket_path.exists());
    assert!(!daemon.has_signal_watcher());

    daemon.shutdown().unwrap();
    assert!(!config.socket_path.exists());
    assert!(!config.lock_path.exists());
    assert!(daemon.cancel.is_cancelled());
}

#[tokio::test]
#[serial]
async fn second_startup_fails_on_lock_and_leaves_files() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    let StartupResult { mut daemon, .. } = startup(&config).await.unwrap();

    let second = startup(&config).await;

    assert!(matches!(second, Err(LifecycleError::LockFailed(_))));
    assert!(config.socket_path.exists());
    assert!(config.lock_path.exists());
    daemon.shutdown().unwrap();
}

#[tokio::test]
#[serial]
async fn startup_replaces_stale_socket() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    std::fs::create_dir_all(&config.state_dir).unwrap();
    std::fs::write(&config.socket_path, b"stale").unwrap();

    let StartupResult { mut daemon, .. } = startup(&config).await.unwrap();

    UnixStream::connect(&config.socket_path).await.unwrap();
    daemon.shutdown().unwrap();
}

#[tokio::test]
#[serial]
async fn unreachable_backend_reports_invalid_target() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    let StartupResult { mut daemon, listener } = startup(&config).await.unwrap();
    let task = tokio::spawn(listener.run(daemon.cancel.clone()));

    let mut stream = UnixStream::connect(&config.socket_path).await.unwrap();
    let request = TransportMessage::Request(vec![0x03, 0x01]);
    write_transport(&mut stream, &request, TIMEOUT).await.unwrap();
    let reply = tokio::time::timeout(TIMEOUT, read_transport(&mut stream)).await.unwrap().unwrap();

    assert_eq!(
        reply,
        TransportMessage::Response { code: CompletionCode::InvalidTarget, data: vec![] }
    );

    daemon.shutdown().unwrap();
    tokio::time::timeout(TIMEOUT, task).await.unwrap().unwrap();
}

#[tokio::test]
#[serial]
async fn backend_signals_reach_the_host() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    let signals = UnixListener::bind(&config.signal_socket).unwrap();

    let StartupResult { mut daemon, listener } = startup(&config).await.unwrap();
    assert!(daemon.has_signal_watcher());
    let task = tokio::spawn(listener.run(daemon.cancel.clone()));

    let (mut backend, _) = signals.accept().await.unwrap();
    let signal = BackendSignal::Signal { name: "WindowReset".to_string() };
    write_message(&mut backend, &encode(&signal).unwrap()).await.unwrap();

    let mut stream = UnixStream::connect(&config.socket_path).await.unwrap();
    let pushed = tokio::time::timeout(TIMEOUT, read_transport(&mut stream)).await.unwrap().unwrap();

    assert_eq!(
        pushed,
        TransportMessage::HostCommand(HostCommand::event(BmcEvents::WINDOW_RESET))
    );
    assert_eq!(daemon.events.snapshot(), BmcEvents::WINDOW_RESET);

    daemon.shutdown().unwrap();
    tokio::time::timeout(TIMEOUT, task).await.unwrap().unwrap();
}
