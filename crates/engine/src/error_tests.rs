// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use nix::errno::Errno;

#[test]
fn os_failures_exit_2() {
    assert_eq!(EngineError::Sys(Errno::ENOMEM).exit_code(), EXIT_SYSTEM_CALL);
    let io = EngineError::Io(std::io::Error::other("spawn failed"));
    assert_eq!(io.exit_code(), EXIT_SYSTEM_CALL);
}

#[test]
fn zookeeper_failures_exit_3() {
    let err = EngineError::Client(ZkError::AuthFailed);
    assert_eq!(err.exit_code(), EXIT_ZOOKEEPER_CALL);
}
