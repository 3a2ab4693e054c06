// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Keeps a children watch armed on the configured path, re-arming it after
//! every delivery.

use zksoak_engine::ChildrenWatcher;

fn main() {
    std::process::exit(zksoak::run(ChildrenWatcher::new));
}
