// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn usernames_follow_the_prefix_scheme() {
    assert_eq!(username_for(0), "zk-client0");
    assert_eq!(username_for(19), "zk-client19");
}

#[test]
fn missing_user_is_a_system_call_failure() {
    // No system provisions users under this name.
    let err = resolve_uid(usize::MAX).unwrap_err();
    assert_eq!(err.code, EXIT_SYSTEM_CALL);
}
