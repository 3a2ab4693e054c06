// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn ok_code_is_not_an_error() {
    assert_eq!(ZkError::from_code(0), None);
}

#[parameterized(
    connection_loss = { -4, ZkError::ConnectionLoss },
    marshalling = { -5, ZkError::Marshalling },
    bad_arguments = { -8, ZkError::BadArguments },
    invalid_state = { -9, ZkError::InvalidState },
    no_node = { -101, ZkError::NoNode },
    node_exists = { -110, ZkError::NodeExists },
    session_expired = { -112, ZkError::SessionExpired },
    auth_failed = { -115, ZkError::AuthFailed },
)]
fn known_codes_map_to_variants(code: i32, expected: ZkError) {
    assert_eq!(ZkError::from_code(code), Some(expected));
}

#[test]
fn unknown_codes_keep_the_raw_value() {
    assert_eq!(ZkError::from_code(-999), Some(ZkError::Server(-999)));
}
