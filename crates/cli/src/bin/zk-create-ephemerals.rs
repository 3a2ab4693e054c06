// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Creates an ephemeral, sequential node per session on connect.

use zksoak_engine::EphemeralCreator;

fn main() {
    std::process::exit(zksoak::run(EphemeralCreator::new));
}
