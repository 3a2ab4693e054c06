// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn empty_by_default() {
    let mask = IoInterest::default();
    assert!(mask.is_empty());
    assert!(!mask.readable());
    assert!(!mask.writable());
}

#[test]
fn read_and_write_bits_are_distinct() {
    assert!(IoInterest::READ.readable());
    assert!(!IoInterest::READ.writable());
    assert!(IoInterest::WRITE.writable());
    assert!(!IoInterest::WRITE.readable());
}

#[test]
fn union_merges_bits() {
    let both = IoInterest::READ | IoInterest::WRITE;
    assert!(both.readable());
    assert!(both.writable());
    assert_eq!(both, both.union(IoInterest::READ));
}

#[test]
fn debug_formats_named_bits() {
    assert_eq!(format!("{:?}", IoInterest::NONE), "NONE");
    assert_eq!(format!("{:?}", IoInterest::READ | IoInterest::WRITE), "READ|WRITE");
}
