// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! JanusGraph management through Gremlin Server script submission

pub mod client;
pub mod script;
pub mod session;

pub use client::GremlinClient;
pub use session::{GremlinGraph, GremlinSession};
