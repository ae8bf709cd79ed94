// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn envelope_splits_header_from_payload() {
    let frame = [0x04, 0x2a, 0x10, 0x00, 0x20, 0x00];
    let env = Envelope::parse(&frame).unwrap();
    assert_eq!(env.command, 0x04);
    assert_eq!(env.sequence, 0x2a);
    assert_eq!(env.payload, &[0x10, 0x00, 0x20, 0x00]);
}

#[test]
fn envelope_with_header_only_has_empty_payload() {
    let env = Envelope::parse(&[0x08, 0x01]).unwrap();
    assert!(env.payload.is_empty());
}

#[yare::parameterized(
    empty    = { &[] },
    one_byte = { &[0x01] },
)]
fn envelope_rejects_short_frames(frame: &[u8]) {
    assert_eq!(
        Envelope::parse(frame),
        Err(FrameError::TooShort { need: HEADER_LEN, got: frame.len() })
    );
}

#[test]
fn host_event_command_carries_bitmask() {
    let cmd = HostCommand::event(BmcEvents::DAEMON_READY | BmcEvents::WINDOW_RESET);
    assert_eq!(cmd, HostCommand { command: 0x0f, data: 0b1000_0010 });
}

#[test]
fn transport_messages_have_kind_prefix() {
    assert_eq!(TransportMessage::Request(vec![1, 2]).to_bytes(), vec![0x01, 1, 2]);
    assert_eq!(
        TransportMessage::Response { code: CompletionCode::Busy, data: vec![] }.to_bytes(),
        vec![0x02, 0xc0]
    );
    assert_eq!(
        TransportMessage::HostCommand(HostCommand { command: 0x0f, data: 0x81 }).to_bytes(),
        vec![0x03, 0x0f, 0x81]
    );
}

#[test]
fn transport_messages_parse_back() {
    let messages = [
        TransportMessage::Request(vec![0x09, 0x05, 0x03]),
        TransportMessage::Response { code: CompletionCode::Ok, data: vec![0x02, 0x07, 1, 2, 3, 4] },
        TransportMessage::HostCommand(HostCommand::event(BmcEvents::PROTOCOL_RESET)),
    ];
    for msg in messages {
        assert_eq!(TransportMessage::from_bytes(&msg.to_bytes()), Ok(msg));
    }
}

#[yare::parameterized(
    empty             = { &[],                 FrameError::TooShort { need: 1, got: 0 } },
    bad_kind          = { &[0x7f, 0x00],       FrameError::UnknownKind(0x7f) },
    response_no_code  = { &[0x02],             FrameError::TooShort { need: 2, got: 1 } },
    bad_code          = { &[0x02, 0x42],       FrameError::UnknownCompletionCode(0x42) },
    short_host_cmd    = { &[0x03, 0x0f],       FrameError::TooShort { need: 3, got: 2 } },
)]
fn transport_message_errors(bytes: &[u8], expected: FrameError) {
    assert_eq!(TransportMessage::from_bytes(bytes), Err(expected));
}
