// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker-process bootstrap: one engine over the wire client.

use crate::exit_error::ExitError;
use std::sync::Arc;
use tracing::info;
use zksoak_client::WireConnector;
use zksoak_core::RunConfig;
use zksoak_engine::{Engine, Workload};

pub fn run<W: Workload>(child_num: u32, cfg: RunConfig, workload: W) -> Result<(), ExitError> {
    info!(
        child_num,
        pid = std::process::id(),
        clients = cfg.num_clients,
        workers = cfg.num_workers,
        "worker process starting"
    );
    let engine = Arc::new(Engine::new(cfg, WireConnector, workload)?);
    engine.run()?;
    Ok(())
}
