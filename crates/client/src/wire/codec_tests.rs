// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;
use zksoak_core::EventKind;

#[test]
fn integers_are_big_endian() {
    let mut buf = Vec::new();
    put_i32(&mut buf, 1);
    put_i64(&mut buf, 2);
    assert_eq!(buf, [0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 2]);
}

#[test]
fn strings_are_length_prefixed() {
    let mut buf = Vec::new();
    put_str(&mut buf, "/x");
    assert_eq!(buf, [0, 0, 0, 2, b'/', b'x']);
}

#[test]
fn reader_round_trips_scalars() {
    let mut buf = Vec::new();
    put_i32(&mut buf, -4);
    put_i64(&mut buf, 0x0102030405060708);
    put_bool(&mut buf, true);
    put_buffer(&mut buf, b"test");

    let mut r = Reader::new(&buf);
    assert_eq!(r.i32().unwrap(), -4);
    assert_eq!(r.i64().unwrap(), 0x0102030405060708);
    assert!(r.bool().unwrap());
    assert_eq!(r.buffer().unwrap(), b"test");
    assert_eq!(r.remaining(), 0);
}

#[test]
fn negative_length_buffer_decodes_empty() {
    let mut buf = Vec::new();
    put_i32(&mut buf, -1);
    let mut r = Reader::new(&buf);
    assert!(r.buffer().unwrap().is_empty());
}

#[test]
fn string_vector_round_trip() {
    let mut buf = Vec::new();
    put_i32(&mut buf, 2);
    put_str(&mut buf, "a");
    put_str(&mut buf, "b");
    let mut r = Reader::new(&buf);
    assert_eq!(r.string_vec().unwrap(), vec!["a", "b"]);
}

#[test]
fn truncated_frame_is_a_marshalling_error() {
    let mut r = Reader::new(&[0, 0]);
    assert_eq!(r.i32(), Err(ZkError::Marshalling));
}

#[parameterized(
    session = { -1, Some(EventKind::Session) },
    created = { 1, Some(EventKind::NodeCreated) },
    deleted = { 2, Some(EventKind::NodeDeleted) },
    data_changed = { 3, Some(EventKind::NodeDataChanged) },
    children = { 4, Some(EventKind::NodeChildrenChanged) },
    unknown = { 42, None },
)]
fn event_kind_codes(code: i32, expected: Option<EventKind>) {
    assert_eq!(event_kind_from_code(code), expected);
}

#[parameterized(
    connected = { 3, SessionState::Connected },
    read_only = { 5, SessionState::ConnectedReadOnly },
    expired = { -112, SessionState::Expired },
    auth_failed = { 4, SessionState::AuthFailed },
    disconnected = { 0, SessionState::Connecting },
)]
fn session_state_codes(code: i32, expected: SessionState) {
    assert_eq!(session_state_from_code(code), expected);
}
