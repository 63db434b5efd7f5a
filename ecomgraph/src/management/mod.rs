// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph management layer
//!
//! Schema provisioning talks to a graph through the [`ManagementSystem`] and
//! [`ManagementSession`] traits. Two implementations are provided: a remote
//! JanusGraph reached through Gremlin Server, and an in-memory store with the
//! same transactional and referential behaviour.

pub mod error;
pub mod gremlin;
pub mod memory;
pub mod traits;
pub mod view;

pub use error::{ManagementError, ManagementResult};
pub use gremlin::{GremlinClient, GremlinGraph, GremlinSession};
pub use memory::{MemoryGraph, MemorySession};
pub use traits::{ManagementSession, ManagementSystem};
pub use view::SchemaView;
