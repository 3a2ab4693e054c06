// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process fan-out.
//!
//! The supervisor re-executes the current binary once per worker process
//! with the hidden `--child-num` flag appended, then waits on the children.
//! Workers never exit in the happy path, so an exiting child is logged as an
//! operational failure. With `--switch-uid`, user `zk-client<K>` is resolved
//! up front and child K is spawned under that uid; a missing user is fatal.

use crate::exit_error::ExitError;
use nix::unistd::User;
use std::os::unix::process::CommandExt;
use std::process::Command;
use tracing::{error, info};
use zksoak_core::config::USERNAME_PREFIX;
use zksoak_core::RunConfig;
use zksoak_engine::error::EXIT_SYSTEM_CALL;

pub fn run(cfg: &RunConfig) -> Result<(), ExitError> {
    banner(cfg);

    let exe = std::env::current_exe()
        .map_err(|err| ExitError::new(EXIT_SYSTEM_CALL, format!("cannot locate executable: {err}")))?;
    let forwarded: Vec<String> = std::env::args().skip(1).collect();

    let mut children = Vec::with_capacity(cfg.num_procs);
    for child_num in 0..cfg.num_procs {
        let mut command = Command::new(&exe);
        command
            .args(&forwarded)
            .arg("--child-num")
            .arg(child_num.to_string());
        if cfg.switch_uid {
            command.uid(resolve_uid(child_num)?);
        }
        let child = command.spawn().map_err(|err| {
            ExitError::new(
                EXIT_SYSTEM_CALL,
                format!("failed to spawn worker process {child_num}: {err}"),
            )
        })?;
        children.push(child);
    }
    info!(procs = children.len(), "worker processes running");

    for mut child in children {
        let pid = child.id();
        match child.wait() {
            Ok(status) => error!(pid, %status, "worker process exited"),
            Err(err) => error!(pid, %err, "failed to wait on worker process"),
        }
    }
    Err(ExitError::new(
        EXIT_SYSTEM_CALL,
        "all worker processes exited",
    ))
}

/// Uid for worker `child_num` under the `--switch-uid` scheme.
fn resolve_uid(child_num: usize) -> Result<u32, ExitError> {
    let username = username_for(child_num);
    match User::from_name(&username) {
        Ok(Some(user)) => Ok(user.uid.as_raw()),
        Ok(None) => Err(ExitError::new(
            EXIT_SYSTEM_CALL,
            format!("no such user: {username}"),
        )),
        Err(err) => Err(ExitError::new(
            EXIT_SYSTEM_CALL,
            format!("failed to look up {username}: {err}"),
        )),
    }
}

fn username_for(child_num: usize) -> String {
    format!("{USERNAME_PREFIX}{child_num}")
}

fn banner(cfg: &RunConfig) {
    info!(
        pid = std::process::id(),
        server = %cfg.server,
        path = %cfg.path,
        max_events = cfg.max_events,
        num_clients = cfg.num_clients,
        num_procs = cfg.num_procs,
        num_workers = cfg.num_workers,
        wait_time_ms = cfg.wait_time_ms,
        session_timeout_ms = cfg.session_timeout_ms,
        sleep_after_clients = cfg.sleep_after_clients,
        sleep_in_between = cfg.sleep_in_between,
        switch_uid = cfg.switch_uid,
        username_prefix = USERNAME_PREFIX,
        "running with"
    );
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
