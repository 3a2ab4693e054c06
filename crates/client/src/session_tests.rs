// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    persistent = { CreateMode::Persistent, 0 },
    ephemeral = { CreateMode::Ephemeral, 1 },
    persistent_seq = { CreateMode::PersistentSequential, 2 },
    ephemeral_seq = { CreateMode::EphemeralSequential, 3 },
)]
fn create_mode_flag_words(mode: CreateMode, flags: i32) {
    assert_eq!(mode.flags(), flags);
}

#[test]
fn open_unsafe_is_world_anyone_all() {
    let acl = Acl::open_unsafe();
    assert_eq!(acl.len(), 1);
    assert_eq!(acl[0].perms, PERM_ALL);
    assert_eq!(acl[0].scheme, "world");
    assert_eq!(acl[0].id, "anyone");
}
