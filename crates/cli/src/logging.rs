// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing bootstrap: line-oriented output to stdout.
//!
//! Thread names are included so the engine roles (`creator`, `interests`,
//! `poller`, `work[j]`) are visible per line; `RUST_LOG` overrides the
//! default `info` filter.

use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .with_target(false)
        .init();
}
