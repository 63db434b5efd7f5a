// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Local environment orchestration for the JanusGraph stack and demo

pub mod error;
pub mod layout;
pub mod lifecycle;
pub mod prerequisites;
pub mod probe;
pub mod runner;

pub use error::{OrchestratorError, OrchestratorResult};
pub use layout::ProjectLayout;
pub use lifecycle::{EnvFileAction, Orchestrator, SetupReport, StatusReport};
pub use prerequisites::{check_prerequisites, default_prerequisites, Prerequisite};
pub use probe::{wait_until_ready, HealthCheckPolicy, HealthProbe, HttpProbe};
pub use runner::{run_checked, CommandOutput, CommandRunner, CommandSpec, SystemRunner};
