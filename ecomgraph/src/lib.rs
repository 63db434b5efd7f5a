// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! EcomGraph - schema provisioning and environment tooling for a JanusGraph
//! e-commerce graph
//!
//! # Features
//!
//! - **Declarative Schema**: property keys, labels, property constraints and
//!   indexes as typed values
//! - **Idempotent Provisioning**: only the missing delta is declared, in one
//!   management transaction
//! - **Index Readiness**: status read-back and bounded polling until `ENABLED`
//! - **Environment Orchestration**: docker compose lifecycle, demo venv and
//!   `.env` materialization
//!
//! # Usage
//!
//! ```bash
//! # Prepare the environment and start the stack
//! ecomgraph setup
//! ecomgraph start
//!
//! # Provision the schema and wait for indexes
//! ecomgraph provision --wait
//! ```
//!
//! As a library:
//!
//! ```ignore
//! use ecomgraph::{ecommerce_schema, MemoryGraph, Reconciler};
//!
//! let graph = MemoryGraph::new();
//! let report = Reconciler::apply(&graph, &ecommerce_schema())?;
//! ```

pub mod config;
pub mod management;
pub mod orchestrator;
pub mod provision;
pub mod schema;

pub use config::{ConfigError, Settings};
pub use management::{
    GremlinClient, GremlinGraph, ManagementError, ManagementSession, ManagementSystem,
    MemoryGraph,
};
pub use orchestrator::{
    HealthCheckPolicy, HttpProbe, Orchestrator, OrchestratorError, ProjectLayout, SystemRunner,
};
pub use provision::{
    observe_index_status, ProvisionError, ProvisionReport, ReadinessPoller, Reconciler,
};
pub use schema::{ecommerce_schema, SchemaDefinition, SchemaElement};

/// EcomGraph version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// EcomGraph crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
