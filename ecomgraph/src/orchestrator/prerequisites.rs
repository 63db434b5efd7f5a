// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Host tool checks

use log::info;

use super::error::{OrchestratorError, OrchestratorResult};
use super::runner::{CommandRunner, CommandSpec};

/// A tool the environment needs, plus the command that proves it is installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prerequisite {
    pub name: &'static str,
    pub check: CommandSpec,
}

pub fn default_prerequisites() -> Vec<Prerequisite> {
    vec![
        Prerequisite {
            name: "docker",
            check: CommandSpec::new("docker").arg("--version"),
        },
        Prerequisite {
            name: "docker compose",
            check: CommandSpec::new("docker").args(["compose", "version"]),
        },
        Prerequisite {
            name: "python3",
            check: CommandSpec::new("python3").arg("--version"),
        },
    ]
}

/// Check each tool in order and stop at the first one missing
///
/// Returns the version line each tool reported.
pub fn check_prerequisites<R: CommandRunner + ?Sized>(
    runner: &R,
    prerequisites: &[Prerequisite],
) -> OrchestratorResult<Vec<(String, String)>> {
    let mut versions = Vec::with_capacity(prerequisites.len());

    for prerequisite in prerequisites {
        let output = runner.run(&prerequisite.check).map_err(|err| {
            OrchestratorError::MissingPrerequisite {
                tool: prerequisite.name.to_string(),
                detail: err.to_string(),
            }
        })?;

        if !output.success() {
            return Err(OrchestratorError::MissingPrerequisite {
                tool: prerequisite.name.to_string(),
                detail: format!("'{}' exited with {:?}", prerequisite.check, output.code),
            });
        }

        let version = output.stdout.lines().next().unwrap_or("").trim().to_string();
        info!("Found {}: {}", prerequisite.name, version);
        versions.push((prerequisite.name.to_string(), version));
    }

    Ok(versions)
}
