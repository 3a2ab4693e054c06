// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! zksoak: CLI front end for the soak harness.
//!
//! A binary supplies a workload; everything else (flag parsing, logging,
//! process fan-out, the per-process engine bootstrap) is shared here.
//! The same binary serves as supervisor and worker: the supervisor re-execs
//! itself with the hidden `--child-num` flag once per worker process.

pub mod args;
pub mod child;
pub mod exit_error;
pub mod logging;
pub mod supervisor;

use std::sync::Arc;
use tracing::error;
use zksoak_engine::Workload;

pub use exit_error::ExitError;

/// Full program flow for one binary. Returns the process exit code;
/// in the happy path this call never returns (the harness runs forever).
pub fn run<W, F>(make_workload: F) -> i32
where
    W: Workload,
    F: FnOnce(Arc<str>) -> W,
{
    logging::init();
    let args = match args::parse() {
        Ok(args) => args,
        Err(code) => return code,
    };
    let cfg = args.to_config();
    let result = match args.child_num {
        Some(child_num) => {
            let workload = make_workload(Arc::clone(&cfg.path));
            child::run(child_num, cfg, workload)
        }
        None => supervisor::run(&cfg),
    };
    match result {
        Ok(()) => 0,
        Err(err) => {
            error!("{}", err.message);
            err.code
        }
    }
}
