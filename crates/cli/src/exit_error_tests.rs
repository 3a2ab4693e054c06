// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use zksoak_client::ZkError;

#[test]
fn displays_the_message() {
    let err = ExitError::new(2, "fork failed");
    assert_eq!(err.to_string(), "fork failed");
    assert_eq!(err.code, 2);
}

#[test]
fn engine_errors_keep_their_exit_code() {
    let err: ExitError = EngineError::Client(ZkError::AuthFailed).into();
    assert_eq!(err.code, 3);
    let err: ExitError = EngineError::Io(std::io::Error::other("epoll")).into();
    assert_eq!(err.code, 2);
}
