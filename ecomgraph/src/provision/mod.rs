// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema provisioning
//!
//! - [`Reconciler`] applies the delta between a desired schema and a graph
//! - [`observe_index_status`] reads back index state without mutating it
//! - [`ReadinessPoller`] waits for indexes to reach `ENABLED`

pub mod error;
pub mod readiness;
pub mod reconciler;

pub use error::{IndexProblem, ProvisionError, ProvisionResult};
pub use readiness::{assess, IndexStatusSource, Readiness, ReadinessPoller};
pub use reconciler::{
    enable_registered_indexes, observe_index_status, ProvisionPlan, ProvisionReport, Reconciler,
};
