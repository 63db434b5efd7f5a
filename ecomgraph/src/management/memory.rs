// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory graph management store
//!
//! Behaves like a JanusGraph management system for provisioning purposes:
//! sessions stage declarations on a private copy of the committed schema and
//! publish it on commit, missing references fail with `NotFound`, and new
//! indexes walk through `INSTALLED -> REGISTERED -> ENABLED` as sessions are
//! opened. Used by the test suite and by in-process dry runs of the reconciler.

use log::debug;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use super::error::{ManagementError, ManagementResult};
use super::traits::{ManagementSession, ManagementSystem};
use super::view::SchemaView;
use crate::schema::{
    CompositeIndexDef, EdgeLabelDef, IndexKind, IndexStatus, IndexStatusEntry,
    PropertyConstraintDef, PropertyKeyDef, RelationIndexDef, SchemaElement, VertexLabelDef,
};

#[derive(Debug, Clone)]
struct StoredIndex {
    kind: IndexKind,
    edge_label: Option<String>,
    status: IndexStatus,
    remaining_steps: usize,
}

#[derive(Debug, Clone, Default)]
struct StoreState {
    view: SchemaView,
    /// Keyed by (edge label or empty, index name)
    indexes: BTreeMap<(String, String), StoredIndex>,
}

#[derive(Debug, Default)]
struct Inner {
    committed: StoreState,
    build_steps: usize,
    manual_enable: bool,
    fail_on: HashSet<String>,
    creation_calls: usize,
    commits: usize,
    rollbacks: usize,
    sessions_opened: usize,
}

impl Inner {
    /// One unit of background index-build progress
    fn tick(&mut self) {
        let manual_enable = self.manual_enable;
        for index in self.committed.indexes.values_mut() {
            if !index.status.is_building() || index.remaining_steps == 0 {
                continue;
            }
            index.remaining_steps -= 1;
            index.status = build_status(index.remaining_steps, manual_enable);
        }
    }
}

fn build_status(remaining_steps: usize, manual_enable: bool) -> IndexStatus {
    match remaining_steps {
        0 if manual_enable => IndexStatus::Registered,
        0 => IndexStatus::Enabled,
        1 => IndexStatus::Registered,
        _ => IndexStatus::Installed,
    }
}

/// Shared handle to an in-memory management store
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryGraph {
    /// Empty store whose indexes are enabled as soon as they are committed
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes need `steps` further sessions after commit to become enabled
    pub fn with_index_build_steps(self, steps: usize) -> Self {
        self.inner.lock().build_steps = steps;
        self
    }

    /// Indexes stop at `REGISTERED` until explicitly enabled
    pub fn with_manual_enable(self) -> Self {
        self.inner.lock().manual_enable = true;
        self
    }

    /// Reject any declaration of an element with this name
    pub fn fail_on(&self, name: &str) {
        self.inner.lock().fail_on.insert(name.to_string());
    }

    pub fn clear_failures(&self) {
        self.inner.lock().fail_on.clear();
    }

    /// Force the status of a committed index (e.g. to simulate a disabled index)
    pub fn set_index_status(&self, name: &str, status: IndexStatus) -> bool {
        let mut inner = self.inner.lock();
        let mut found = false;
        for ((_, index_name), index) in inner.committed.indexes.iter_mut() {
            if index_name == name {
                index.status = status;
                index.remaining_steps = 0;
                found = true;
            }
        }
        found
    }

    /// Committed schema state
    pub fn snapshot(&self) -> SchemaView {
        self.inner.lock().committed.view.clone()
    }

    /// Number of `make*`/`build*` calls made across all sessions
    pub fn creation_calls(&self) -> usize {
        self.inner.lock().creation_calls
    }

    pub fn commits(&self) -> usize {
        self.inner.lock().commits
    }

    pub fn rollbacks(&self) -> usize {
        self.inner.lock().rollbacks
    }

    pub fn sessions_opened(&self) -> usize {
        self.inner.lock().sessions_opened
    }
}

impl ManagementSystem for MemoryGraph {
    type Session = MemorySession;

    fn open_management(&self) -> ManagementResult<MemorySession> {
        let mut inner = self.inner.lock();
        inner.sessions_opened += 1;
        inner.tick();
        debug!("Opened in-memory management session #{}", inner.sessions_opened);

        Ok(MemorySession {
            graph: Arc::clone(&self.inner),
            working: inner.committed.clone(),
            build_steps: inner.build_steps,
            manual_enable: inner.manual_enable,
        })
    }
}

/// Management transaction over a [`MemoryGraph`]
#[derive(Debug)]
pub struct MemorySession {
    graph: Arc<Mutex<Inner>>,
    working: StoreState,
    build_steps: usize,
    manual_enable: bool,
}

impl MemorySession {
    fn declare_element(&mut self, element: &SchemaElement) -> ManagementResult<()> {
        {
            let mut inner = self.graph.lock();
            inner.creation_calls += 1;
            if inner.fail_on.contains(element.name()) {
                return Err(ManagementError::Rejected(element.identity().to_string()));
            }
        }

        self.working.view.check_declarable(element)?;
        self.working.view.insert(element);

        let index = match element {
            SchemaElement::CompositeIndex(def) => {
                Some((String::new(), def.name.clone(), IndexKind::Composite, None))
            }
            SchemaElement::RelationIndex(def) => Some((
                def.edge_label.clone(),
                def.name.clone(),
                IndexKind::Relation,
                Some(def.edge_label.clone()),
            )),
            _ => None,
        };
        if let Some((scope, name, kind, edge_label)) = index {
            self.working.indexes.insert(
                (scope, name),
                StoredIndex {
                    kind,
                    edge_label,
                    status: build_status(self.build_steps, self.manual_enable),
                    remaining_steps: self.build_steps,
                },
            );
        }

        Ok(())
    }
}

impl ManagementSession for MemorySession {
    fn contains_property_key(&self, name: &str) -> ManagementResult<bool> {
        Ok(self.working.view.property_keys.contains_key(name))
    }

    fn contains_vertex_label(&self, name: &str) -> ManagementResult<bool> {
        Ok(self.working.view.vertex_labels.contains(name))
    }

    fn contains_edge_label(&self, name: &str) -> ManagementResult<bool> {
        Ok(self.working.view.edge_labels.contains(name))
    }

    fn contains_property_constraint(&self, label: &str, keys: &[String]) -> ManagementResult<bool> {
        Ok(self.working.view.contains(&SchemaElement::PropertyConstraint(PropertyConstraintDef {
            label: label.to_string(),
            keys: keys.to_vec(),
        })))
    }

    fn contains_graph_index(&self, name: &str) -> ManagementResult<bool> {
        Ok(self.working.view.graph_indexes.contains(name))
    }

    fn contains_relation_index(&self, edge_label: &str, name: &str) -> ManagementResult<bool> {
        Ok(self
            .working
            .view
            .relation_indexes
            .contains(&(edge_label.to_string(), name.to_string())))
    }

    fn make_property_key(&mut self, def: &PropertyKeyDef) -> ManagementResult<()> {
        self.declare_element(&SchemaElement::PropertyKey(def.clone()))
    }

    fn make_vertex_label(&mut self, def: &VertexLabelDef) -> ManagementResult<()> {
        self.declare_element(&SchemaElement::VertexLabel(def.clone()))
    }

    fn make_edge_label(&mut self, def: &EdgeLabelDef) -> ManagementResult<()> {
        self.declare_element(&SchemaElement::EdgeLabel(def.clone()))
    }

    fn add_properties(&mut self, def: &PropertyConstraintDef) -> ManagementResult<()> {
        self.declare_element(&SchemaElement::PropertyConstraint(def.clone()))
    }

    fn build_composite_index(&mut self, def: &CompositeIndexDef) -> ManagementResult<()> {
        self.declare_element(&SchemaElement::CompositeIndex(def.clone()))
    }

    fn build_edge_index(&mut self, def: &RelationIndexDef) -> ManagementResult<()> {
        self.declare_element(&SchemaElement::RelationIndex(def.clone()))
    }

    fn index_statuses(&self) -> ManagementResult<Vec<IndexStatusEntry>> {
        Ok(self
            .working
            .indexes
            .iter()
            .map(|((_, name), index)| IndexStatusEntry {
                name: name.clone(),
                kind: index.kind,
                edge_label: index.edge_label.clone(),
                status: index.status,
            })
            .collect())
    }

    fn enable_graph_index(&mut self, name: &str) -> ManagementResult<()> {
        let index = self
            .working
            .indexes
            .get_mut(&(String::new(), name.to_string()))
            .ok_or_else(|| {
                ManagementError::InvalidOperation(format!("No composite index named '{}'", name))
            })?;

        match index.status {
            IndexStatus::Enabled => Ok(()),
            IndexStatus::Registered => {
                index.status = IndexStatus::Enabled;
                index.remaining_steps = 0;
                Ok(())
            }
            other => Err(ManagementError::InvalidOperation(format!(
                "Index '{}' cannot be enabled from status {}",
                name, other
            ))),
        }
    }

    fn commit(self) -> ManagementResult<()> {
        let mut inner = self.graph.lock();
        inner.committed = self.working;
        inner.commits += 1;
        Ok(())
    }

    fn rollback(self) -> ManagementResult<()> {
        self.graph.lock().rollbacks += 1;
        Ok(())
    }
}
