// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Environment lifecycle operations
//!
//! Drives the docker compose stack, the demo's Python environment and the
//! active configuration file. All process execution goes through a
//! [`CommandRunner`] and all reachability checks through a [`HealthProbe`].

use log::info;
use serde::Serialize;
use std::fs;

use super::error::{OrchestratorError, OrchestratorResult};
use super::layout::ProjectLayout;
use super::prerequisites::{check_prerequisites, default_prerequisites, Prerequisite};
use super::probe::{wait_until_ready, HealthCheckPolicy, HealthProbe};
use super::runner::{run_checked, CommandOutput, CommandRunner, CommandSpec};

/// What `setup` did with the active configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvFileAction {
    Created,
    Kept,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupReport {
    /// Tool name and the version it reported
    pub tools: Vec<(String, String)>,
    pub venv_created: bool,
    pub requirements_installed: bool,
    pub env_file: EnvFileAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub containers: String,
    pub health_url: String,
    pub reachable: bool,
}

pub struct Orchestrator<R, P> {
    layout: ProjectLayout,
    runner: R,
    probe: P,
    health: HealthCheckPolicy,
    prerequisites: Vec<Prerequisite>,
}

impl<R: CommandRunner, P: HealthProbe> Orchestrator<R, P> {
    pub fn new(layout: ProjectLayout, runner: R, probe: P, health: HealthCheckPolicy) -> Self {
        Self {
            layout,
            runner,
            probe,
            health,
            prerequisites: default_prerequisites(),
        }
    }

    pub fn with_prerequisites(mut self, prerequisites: Vec<Prerequisite>) -> Self {
        self.prerequisites = prerequisites;
        self
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Check tools, prepare the venv, and materialize `.env`
    ///
    /// Nothing on disk changes when a prerequisite is missing. An existing
    /// `.env` is never overwritten.
    pub fn setup(&self) -> OrchestratorResult<SetupReport> {
        let tools = check_prerequisites(&self.runner, &self.prerequisites)?;

        let venv_created = if self.layout.has_venv() {
            info!("Virtual environment already present at {}", self.layout.venv_dir().display());
            false
        } else {
            info!("Creating virtual environment at {}", self.layout.venv_dir().display());
            run_checked(
                &self.runner,
                &CommandSpec::new("python3")
                    .args(["-m", "venv"])
                    .arg(self.layout.venv_dir())
                    .current_dir(self.layout.root()),
            )?;
            true
        };

        let requirements_installed = if self.layout.requirements().is_file() {
            info!("Installing Python requirements");
            run_checked(
                &self.runner,
                &CommandSpec::new(self.layout.venv_pip())
                    .args(["install", "-r"])
                    .arg(self.layout.requirements())
                    .current_dir(self.layout.root()),
            )?;
            true
        } else {
            info!("No {} found, skipping dependency install", self.layout.requirements().display());
            false
        };

        let env_file = self.materialize_env_file()?;

        Ok(SetupReport {
            tools,
            venv_created,
            requirements_installed,
            env_file,
        })
    }

    fn materialize_env_file(&self) -> OrchestratorResult<EnvFileAction> {
        let active = self.layout.env_file();
        if active.exists() {
            info!("Keeping existing {}", active.display());
            return Ok(EnvFileAction::Kept);
        }

        let template = self.layout.env_template();
        if !template.is_file() {
            return Err(OrchestratorError::MissingTemplate(template));
        }

        fs::copy(&template, &active)?;
        info!("Created {} from {}", active.display(), template.display());
        Ok(EnvFileAction::Created)
    }

    /// Recreate the stack and wait for the health endpoint
    ///
    /// Returns the number of probes it took for the service to answer.
    pub fn start(&self) -> OrchestratorResult<u32> {
        info!("Stopping any running services");
        self.compose(&["down"])?;
        info!("Starting services");
        self.compose(&["up", "-d"])?;
        info!("Waiting for {} to become reachable", self.health.url);
        wait_until_ready(&self.probe, &self.health)
    }

    pub fn stop(&self) -> OrchestratorResult<()> {
        info!("Stopping services");
        self.compose(&["down"])?;
        Ok(())
    }

    /// Tear down containers and volumes, then prune dangling volumes
    pub fn clean(&self) -> OrchestratorResult<()> {
        info!("Removing services, volumes and orphans");
        self.compose(&["down", "-v", "--remove-orphans"])?;
        run_checked(
            &self.runner,
            &CommandSpec::new("docker")
                .args(["volume", "prune", "-f"])
                .current_dir(self.layout.root()),
        )?;
        Ok(())
    }

    pub fn status(&self) -> OrchestratorResult<StatusReport> {
        let output = self.compose(&["ps"])?;
        let reachable = self.probe.probe(&self.health.url);
        Ok(StatusReport {
            containers: output.stdout,
            health_url: self.health.url.clone(),
            reachable,
        })
    }

    /// Fail with `MissingSetup` unless the venv and demo script exist
    pub fn require_environment(&self) -> OrchestratorResult<()> {
        if !self.layout.has_venv() {
            return Err(OrchestratorError::MissingSetup {
                what: "Python virtual environment".to_string(),
                path: self.layout.venv_dir(),
            });
        }
        if !self.layout.demo_script().is_file() {
            return Err(OrchestratorError::MissingSetup {
                what: "Demo script".to_string(),
                path: self.layout.demo_script(),
            });
        }
        Ok(())
    }

    /// Run the demo script through the venv's Python
    pub fn run_demo(&self) -> OrchestratorResult<()> {
        self.require_environment()?;
        info!("Running {}", self.layout.demo_script().display());
        run_checked(
            &self.runner,
            &CommandSpec::new(self.layout.venv_python())
                .arg(self.layout.demo_script())
                .current_dir(self.layout.root())
                .interactive(),
        )?;
        Ok(())
    }

    fn compose(&self, args: &[&str]) -> OrchestratorResult<CommandOutput> {
        run_checked(
            &self.runner,
            &CommandSpec::new("docker")
                .arg("compose")
                .args(args.iter().copied())
                .current_dir(self.layout.root()),
        )
    }
}
