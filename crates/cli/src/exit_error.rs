// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! The supervisor and the worker bootstrap return `ExitError` instead of
//! calling `std::process::exit()` directly, so termination happens in one
//! place in `main()`.

use std::fmt;
use zksoak_engine::EngineError;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

impl From<EngineError> for ExitError {
    fn from(err: EngineError) -> Self {
        ExitError::new(err.exit_code(), err.to_string())
    }
}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
