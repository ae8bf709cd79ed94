// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn range_request_is_little_endian() {
    let req = RangeRequest::decode(&[0x10, 0x00, 0x20, 0x00]).unwrap();
    assert_eq!(req, RangeRequest { offset: 0x0010, size: 0x0020 });
}

#[test]
fn window_descriptor_encodes_at_fixed_offsets() {
    let window = WindowDescriptor { lpc_address: 0x0100, size: 0x0020, offset: 0x0000 };
    assert_eq!(window.encode(), vec![0x00, 0x01, 0x20, 0x00, 0x00, 0x00]);
}

#[test]
fn protocol_info_layout() {
    let info = ProtocolInfo { version: 2, block_size_shift: 12, timeout: 0x1234 };
    assert_eq!(info.encode(), vec![0x02, 0x0c, 0x34, 0x12]);
}

#[test]
fn flash_info_layout() {
    let info = FlashInfo { flash_size: 0x4000, erase_size: 0x0001 };
    assert_eq!(info.encode(), vec![0x00, 0x40, 0x01, 0x00]);
}

#[yare::parameterized(
    empty_get_info    = { GetInfoRequest::decode(&[]).err(),                 1, 0 },
    short_range       = { RangeRequest::decode(&[1, 2, 3]).err(),           4, 3 },
    empty_close       = { CloseWindowRequest::decode(&[]).err(),            1, 0 },
    empty_ack         = { AckRequest::decode(&[]).err(),                    1, 0 },
    short_info        = { ProtocolInfo::decode(&[2, 12]).err(),             4, 2 },
    short_window      = { WindowDescriptor::decode(&[0, 1, 2, 3, 4]).err(), 6, 5 },
)]
fn short_payloads_are_rejected(err: Option<WireError>, need: usize, got: usize) {
    assert_eq!(err, Some(WireError::TooShort { need, got }));
}

#[test]
fn trailing_bytes_are_ignored() {
    let req = AckRequest::decode(&[0x03, 0xff, 0xee]).unwrap();
    assert_eq!(req.mask, 0x03);
    let req = RangeRequest::decode(&[0xff, 0xff, 0x00, 0x00, 0x99]).unwrap();
    assert_eq!(req, RangeRequest { offset: 0xffff, size: 0 });
}

#[test]
fn no_payload_accepts_anything() {
    assert_eq!(NoPayload::decode(&[]), Ok(NoPayload));
    assert_eq!(NoPayload::decode(&[1, 2]), Ok(NoPayload));
    assert!(NoPayload.encode().is_empty());
}
