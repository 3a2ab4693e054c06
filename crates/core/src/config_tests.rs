// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn defaults_match_cli_table() {
    let cfg = RunConfig::default();
    assert_eq!(cfg.max_events, 100);
    assert_eq!(cfg.num_clients, 500);
    assert_eq!(cfg.num_procs, 20);
    assert_eq!(cfg.num_workers, 1);
    assert_eq!(cfg.wait_time_ms, 50);
    assert_eq!(cfg.session_timeout_ms, 10_000);
    assert_eq!(&*cfg.path, "/");
    assert!(!cfg.switch_uid);
    assert_eq!(cfg.sleep_after_clients, 0);
    assert_eq!(cfg.sleep_in_between, 5);
}

#[parameterized(
    disabled = { 0, 10, false },
    first_session = { 5, 0, false },
    on_boundary = { 5, 5, true },
    off_boundary = { 5, 7, false },
    later_boundary = { 5, 20, true },
)]
fn pacing_boundaries(after: usize, index: usize, expected: bool) {
    let cfg = RunConfig {
        sleep_after_clients: after,
        ..RunConfig::default()
    };
    assert_eq!(cfg.pace_after(index), expected);
}
