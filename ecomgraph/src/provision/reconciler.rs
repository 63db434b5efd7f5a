// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema reconciler
//!
//! Compares the desired [`SchemaDefinition`] with what a management session
//! observes and declares only the missing elements. Everything happens in one
//! management transaction: it is committed once at the end, or rolled back in
//! full if any declaration fails.
//!
//! ```ignore
//! let graph = MemoryGraph::new();
//! let report = Reconciler::apply(&graph, &ecommerce_schema())?;
//! let statuses = observe_index_status(&graph)?;
//! ```

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::error::{ProvisionError, ProvisionResult};
use crate::management::{ManagementError, ManagementSession, ManagementSystem};
use crate::schema::{
    ElementRef, IndexKind, IndexStatus, IndexStatusEntry, SchemaDefinition, SchemaElement,
};

/// Delta between desired and observed schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisionPlan {
    /// Missing elements, in the order they would be declared
    pub to_create: Vec<SchemaElement>,
    pub already_present: Vec<ElementRef>,
}

impl ProvisionPlan {
    pub fn is_noop(&self) -> bool {
        self.to_create.is_empty()
    }
}

/// Outcome of a committed reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisionReport {
    pub created: Vec<ElementRef>,
    pub skipped: Vec<ElementRef>,
    /// Newly created indexes, which build asynchronously after commit
    pub pending_indexes: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Stateless reconciler; the session carries all state
pub struct Reconciler;

impl Reconciler {
    /// Compute what `apply` would declare, without declaring anything
    pub fn plan<S: ManagementSession>(
        session: &S,
        schema: &SchemaDefinition,
    ) -> ProvisionResult<ProvisionPlan> {
        let ordered = schema.dependency_order()?;
        let mut to_create = Vec::new();
        let mut already_present = Vec::new();

        for element in ordered.elements() {
            if session.contains(element)? {
                already_present.push(element.identity());
            } else {
                to_create.push(element.clone());
            }
        }

        Ok(ProvisionPlan {
            to_create,
            already_present,
        })
    }

    /// Plan against a fresh session that is always rolled back
    pub fn dry_run<M: ManagementSystem>(
        system: &M,
        schema: &SchemaDefinition,
    ) -> ProvisionResult<ProvisionPlan> {
        let session = system.open_management()?;
        let plan = Self::plan(&session, schema);
        session.rollback()?;
        plan
    }

    /// Bring the graph's schema up to `schema`
    ///
    /// Re-running against a graph that already holds the full schema declares
    /// nothing. On the first failing declaration the session is rolled back
    /// and the error is returned tagged with the failing element.
    pub fn apply<M: ManagementSystem>(
        system: &M,
        schema: &SchemaDefinition,
    ) -> ProvisionResult<ProvisionReport> {
        let started_at = Utc::now();
        let ordered = schema.dependency_order()?;
        let mut session = system.open_management()?;

        let mut created = Vec::new();
        let mut skipped = Vec::new();
        let mut pending_indexes = Vec::new();

        for element in ordered.elements() {
            match Self::reconcile_element(&mut session, element) {
                Ok(true) => {
                    info!("Created {}", element);
                    if element.is_index() {
                        pending_indexes.push(element.name().to_string());
                    }
                    created.push(element.identity());
                }
                Ok(false) => {
                    debug!("Skipped {} (already present)", element);
                    skipped.push(element.identity());
                }
                Err(source) => {
                    warn!("Declaring {} failed, rolling back: {}", element, source);
                    if let Err(rollback_err) = session.rollback() {
                        warn!("Rollback after failed declaration also failed: {}", rollback_err);
                    }
                    return Err(ProvisionError::Declaration {
                        element: element.identity(),
                        source,
                    });
                }
            }
        }

        session.commit()?;
        info!(
            "Schema reconciled: {} created, {} already present",
            created.len(),
            skipped.len()
        );

        Ok(ProvisionReport {
            created,
            skipped,
            pending_indexes,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Check-then-create for one element; `Ok(true)` when it was declared
    fn reconcile_element<S: ManagementSession>(
        session: &mut S,
        element: &SchemaElement,
    ) -> Result<bool, ManagementError> {
        if session.contains(element)? {
            return Ok(false);
        }
        session.declare(element)?;
        Ok(true)
    }
}

/// Read back index status in a fresh, read-only session
///
/// The session is rolled back on every path, success included: nothing was
/// mutated, so there is nothing to commit.
pub fn observe_index_status<M: ManagementSystem>(
    system: &M,
) -> ProvisionResult<Vec<IndexStatusEntry>> {
    let session = system.open_management()?;
    let statuses = session.index_statuses();
    session.rollback()?;
    Ok(statuses?)
}

/// Request `ENABLE_INDEX` for every registered composite index
///
/// Returns the names of the indexes it enabled. When nothing is registered
/// the session is rolled back instead of committed.
pub fn enable_registered_indexes<M: ManagementSystem>(system: &M) -> ProvisionResult<Vec<String>> {
    let mut session = system.open_management()?;

    let registered: Vec<String> = match session.index_statuses() {
        Ok(statuses) => statuses
            .into_iter()
            .filter(|s| s.kind == IndexKind::Composite && s.status == IndexStatus::Registered)
            .map(|s| s.name)
            .collect(),
        Err(err) => {
            session.rollback()?;
            return Err(err.into());
        }
    };

    if registered.is_empty() {
        session.rollback()?;
        return Ok(registered);
    }

    for name in &registered {
        if let Err(err) = session.enable_graph_index(name) {
            warn!("Could not enable index {}: {}", name, err);
            session.rollback()?;
            return Err(err.into());
        }
        info!("Requested ENABLE_INDEX for {}", name);
    }

    session.commit()?;
    Ok(registered)
}
