// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for environment orchestration

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Required tool '{tool}' is not available: {detail}")]
    MissingPrerequisite { tool: String, detail: String },

    #[error("{what} not found at {}. Run 'setup' first", .path.display())]
    MissingSetup { what: String, path: PathBuf },

    #[error("Configuration template not found at {}", .0.display())]
    MissingTemplate(PathBuf),

    #[error("Command '{command}' failed with exit code {}: {stderr}", .code.map(|c| c.to_string()).unwrap_or_else(|| "none".to_string()))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Service at {url} not ready after {attempts} attempts. Check 'docker compose logs'")]
    ServiceNotReady { url: String, attempts: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
