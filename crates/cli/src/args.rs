// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line surface.
//!
//! `prog [OPTIONS] SERVER`. Bad parameters (unknown flags, out-of-range
//! integers, missing server) exit 1; `--help` exits 0.

use clap::error::ErrorKind;
use clap::Parser;
use std::sync::Arc;
use zksoak_core::RunConfig;

/// Exit code for unparseable or invalid parameters.
pub const EXIT_BAD_PARAMS: i32 = 1;

#[derive(Parser, Debug)]
#[command(about = "Create and maintain a given number of ZooKeeper clients")]
pub struct Args {
    /// Max number of events per readiness wait
    #[arg(short = 'e', long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_events: u32,

    /// Number of clients per worker process
    #[arg(short = 'c', long, default_value_t = 500, value_parser = clap::value_parser!(u32).range(1..))]
    pub num_clients: u32,

    /// Number of worker processes
    #[arg(short = 'p', long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
    pub num_procs: u32,

    /// Readiness wait timeout in milliseconds
    #[arg(short = 'w', long, default_value_t = 50)]
    pub wait_time: u16,

    /// Session timeout for ZooKeeper clients, milliseconds
    #[arg(short = 's', long, default_value_t = 10_000, value_parser = clap::value_parser!(u32).range(1..))]
    pub session_timeout: u32,

    /// Switch UID after spawning each worker process
    #[arg(short = 'u', long)]
    pub switch_uid: bool,

    /// Sleep after starting this many clients (0 disables pacing)
    #[arg(short = 'N', long, default_value_t = 0)]
    pub sleep_after_clients: u32,

    /// Seconds to sleep in between client batches
    #[arg(short = 'n', long, default_value_t = 5)]
    pub sleep_in_between: u32,

    /// Watched path
    #[arg(short = 'z', long, default_value = "/")]
    pub watched_paths: String,

    /// Number of protocol-processing worker threads
    #[arg(short = 'W', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub num_workers: u32,

    /// Server hostname or connect string
    pub server: String,

    /// Worker-process index; set internally by the supervisor.
    #[arg(long, hide = true)]
    pub child_num: Option<u32>,
}

impl Args {
    pub fn to_config(&self) -> RunConfig {
        RunConfig {
            server: Arc::from(self.server.as_str()),
            path: Arc::from(self.watched_paths.as_str()),
            max_events: self.max_events as usize,
            num_clients: self.num_clients as usize,
            num_procs: self.num_procs as usize,
            num_workers: self.num_workers as usize,
            wait_time_ms: self.wait_time,
            session_timeout_ms: self.session_timeout,
            switch_uid: self.switch_uid,
            sleep_after_clients: self.sleep_after_clients as usize,
            sleep_in_between: u64::from(self.sleep_in_between),
        }
    }
}

/// Parse the process arguments; on failure the error (or the help text) has
/// already been printed and the returned value is the exit code.
pub fn parse() -> Result<Args, i32> {
    Args::try_parse().map_err(|err| {
        let code = match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
            _ => EXIT_BAD_PARAMS,
        };
        let _ = err.print();
        code
    })
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
