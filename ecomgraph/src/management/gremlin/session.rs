// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Management sessions backed by a remote Gremlin Server
//!
//! Gremlin Server's HTTP endpoint is stateless, so a session is emulated:
//! opening it introspects the existing schema, declarations are checked
//! against that snapshot and staged as Groovy statements, and commit sends
//! every staged statement in one server-side management transaction.

use log::{debug, info};
use serde::Deserialize;

use super::client::GremlinClient;
use super::script;
use crate::management::error::{ManagementError, ManagementResult};
use crate::management::traits::{ManagementSession, ManagementSystem};
use crate::management::view::SchemaView;
use crate::schema::validator::validate_identifier;
use crate::schema::{
    CompositeIndexDef, EdgeLabelDef, ElementKind, IndexKind, IndexStatus, IndexStatusEntry,
    PropertyConstraintDef, PropertyKeyDef, RelationIndexDef, SchemaElement, VertexLabelDef,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIndexStatus {
    name: String,
    kind: IndexKind,
    #[serde(default)]
    edge_label: Option<String>,
    status: String,
}

#[derive(Debug, Deserialize)]
struct CommitAck {
    committed: usize,
}

/// A JanusGraph instance reached through Gremlin Server
#[derive(Debug, Clone)]
pub struct GremlinGraph {
    client: GremlinClient,
}

impl GremlinGraph {
    pub fn new(client: GremlinClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GremlinClient {
        &self.client
    }
}

impl ManagementSystem for GremlinGraph {
    type Session = GremlinSession;

    fn open_management(&self) -> ManagementResult<GremlinSession> {
        let observed: SchemaView = self.client.submit_json(&script::introspection_script())?;
        debug!(
            "Introspected {} existing schema elements from {}",
            observed.len(),
            self.client.endpoint()
        );

        Ok(GremlinSession {
            client: self.client.clone(),
            view: observed,
            staged: Vec::new(),
        })
    }
}

/// Management transaction against a Gremlin Server
#[derive(Debug)]
pub struct GremlinSession {
    client: GremlinClient,
    /// Introspected schema plus staged declarations
    view: SchemaView,
    staged: Vec<String>,
}

impl GremlinSession {
    fn stage(&mut self, element: &SchemaElement) -> ManagementResult<()> {
        self.view.check_declarable(element)?;

        // Keys already mapped onto the label are not mapped again
        let statement = match element {
            SchemaElement::PropertyConstraint(def) => {
                script::declaration(&SchemaElement::PropertyConstraint(PropertyConstraintDef {
                    label: def.label.clone(),
                    keys: self.view.unmapped_keys(def),
                }))
            }
            other => script::declaration(other),
        };

        self.view.insert(element);
        self.staged.push(statement);
        Ok(())
    }

    /// Statements that commit would send
    pub fn staged_statements(&self) -> &[String] {
        &self.staged
    }
}

impl ManagementSession for GremlinSession {
    fn contains_property_key(&self, name: &str) -> ManagementResult<bool> {
        Ok(self.view.property_keys.contains_key(name))
    }

    fn contains_vertex_label(&self, name: &str) -> ManagementResult<bool> {
        Ok(self.view.vertex_labels.contains(name))
    }

    fn contains_edge_label(&self, name: &str) -> ManagementResult<bool> {
        Ok(self.view.edge_labels.contains(name))
    }

    fn contains_property_constraint(&self, label: &str, keys: &[String]) -> ManagementResult<bool> {
        Ok(self.view.contains(&SchemaElement::PropertyConstraint(PropertyConstraintDef {
            label: label.to_string(),
            keys: keys.to_vec(),
        })))
    }

    fn contains_graph_index(&self, name: &str) -> ManagementResult<bool> {
        Ok(self.view.graph_indexes.contains(name))
    }

    fn contains_relation_index(&self, edge_label: &str, name: &str) -> ManagementResult<bool> {
        Ok(self
            .view
            .relation_indexes
            .contains(&(edge_label.to_string(), name.to_string())))
    }

    fn make_property_key(&mut self, def: &PropertyKeyDef) -> ManagementResult<()> {
        self.stage(&SchemaElement::PropertyKey(def.clone()))
    }

    fn make_vertex_label(&mut self, def: &VertexLabelDef) -> ManagementResult<()> {
        self.stage(&SchemaElement::VertexLabel(def.clone()))
    }

    fn make_edge_label(&mut self, def: &EdgeLabelDef) -> ManagementResult<()> {
        self.stage(&SchemaElement::EdgeLabel(def.clone()))
    }

    fn add_properties(&mut self, def: &PropertyConstraintDef) -> ManagementResult<()> {
        self.stage(&SchemaElement::PropertyConstraint(def.clone()))
    }

    fn build_composite_index(&mut self, def: &CompositeIndexDef) -> ManagementResult<()> {
        self.stage(&SchemaElement::CompositeIndex(def.clone()))
    }

    fn build_edge_index(&mut self, def: &RelationIndexDef) -> ManagementResult<()> {
        self.stage(&SchemaElement::RelationIndex(def.clone()))
    }

    fn index_statuses(&self) -> ManagementResult<Vec<IndexStatusEntry>> {
        let raw: Vec<RawIndexStatus> = self.client.submit_json(&script::index_status_script())?;
        raw.into_iter()
            .map(|entry| {
                let status = IndexStatus::parse(&entry.status).ok_or_else(|| {
                    ManagementError::Protocol(format!(
                        "unknown status '{}' for index '{}'",
                        entry.status, entry.name
                    ))
                })?;
                Ok(IndexStatusEntry {
                    name: entry.name,
                    kind: entry.kind,
                    edge_label: entry.edge_label,
                    status,
                })
            })
            .collect()
    }

    fn enable_graph_index(&mut self, name: &str) -> ManagementResult<()> {
        validate_identifier(ElementKind::CompositeIndex, name)?;
        if !self.view.graph_indexes.contains(name) {
            return Err(ManagementError::InvalidOperation(format!(
                "No composite index named '{}'",
                name
            )));
        }
        self.staged.push(script::enable_graph_index(name));
        Ok(())
    }

    fn commit(self) -> ManagementResult<()> {
        if self.staged.is_empty() {
            debug!("Nothing staged; commit is a no-op");
            return Ok(());
        }

        let ack: CommitAck = self
            .client
            .submit_json(&script::transaction(&self.staged))?;
        info!("Committed {} management statements", ack.committed);
        Ok(())
    }

    fn rollback(self) -> ManagementResult<()> {
        debug!("Discarding {} staged management statements", self.staged.len());
        Ok(())
    }
}
