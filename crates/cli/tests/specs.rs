// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box checks of the binaries' usage and exit-code contract.

#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use yare::parameterized;

const BINS: [&str; 2] = ["zk-create-ephemerals", "zk-watch-children"];

#[test]
fn help_prints_usage_to_stdout_and_exits_zero() {
    for bin in BINS {
        let output = Command::cargo_bin(bin).unwrap().arg("--help").output().unwrap();
        assert!(output.status.success(), "{bin} --help should exit 0");
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("--num-clients"));
        assert!(stdout.contains("--watched-paths"));
        assert!(stdout.contains("SERVER"));
        // The internal fan-out flag stays hidden.
        assert!(!stdout.contains("--child-num"));
    }
}

#[parameterized(
    missing_server = { &[] as &[&str] },
    unknown_flag = { &["--frobnicate", "host"] },
    zero_clients = { &["-c", "0", "host"] },
    negative_workers = { &["-W", "-1", "host"] },
)]
fn bad_parameters_exit_one(argv: &[&str]) {
    for bin in BINS {
        let output = Command::cargo_bin(bin).unwrap().args(argv).output().unwrap();
        assert_eq!(output.status.code(), Some(1), "{bin} {argv:?}");
    }
}
