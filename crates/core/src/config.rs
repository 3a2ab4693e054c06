// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run configuration for a soak run.
//!
//! One value describes the whole run: the supervisor reads the fan-out
//! fields, each engine reads the per-process fields. Defaults match the
//! long-standing CLI defaults; parsing and validation live in the CLI crate.

use std::sync::Arc;

/// Username prefix for `--switch-uid`; child K runs as `zk-client<K>`.
pub const USERNAME_PREFIX: &str = "zk-client";

/// Placeholder payload written by the ephemeral-creator workload.
pub const CREATE_PAYLOAD: &[u8] = b"test";

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Target server, `host:port`.
    pub server: Arc<str>,
    /// Path the workloads operate on.
    pub path: Arc<str>,
    /// Batch size for one readiness wait.
    pub max_events: usize,
    /// Sessions per worker process.
    pub num_clients: usize,
    /// Worker processes to fan out.
    pub num_procs: usize,
    /// Protocol-processing threads per engine.
    pub num_workers: usize,
    /// Readiness wait timeout, milliseconds.
    pub wait_time_ms: u16,
    /// ZooKeeper session timeout, milliseconds.
    pub session_timeout_ms: u32,
    /// Drop each child to `zk-client<child_num>` after spawning.
    pub switch_uid: bool,
    /// Pace the initial ramp: sleep after every this many sessions
    /// (0 disables pacing).
    pub sleep_after_clients: usize,
    /// Seconds to sleep at each pacing point.
    pub sleep_in_between: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            server: Arc::from(""),
            path: Arc::from("/"),
            max_events: 100,
            num_clients: 500,
            num_procs: 20,
            num_workers: 1,
            wait_time_ms: 50,
            session_timeout_ms: 10_000,
            switch_uid: false,
            sleep_after_clients: 0,
            sleep_in_between: 5,
        }
    }
}

impl RunConfig {
    /// True when the ramp should sleep after creating session `index`.
    pub fn pace_after(&self, index: usize) -> bool {
        self.sleep_after_clients > 0 && index > 0 && index % self.sleep_after_clients == 0
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
