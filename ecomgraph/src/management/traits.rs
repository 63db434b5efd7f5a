// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph management session traits
//!
//! These traits mirror the JanusGraph `JanusGraphManagement` surface that
//! schema provisioning needs: existence checks, declarations, index status
//! read-back, and the commit/rollback transaction boundary.

use super::error::ManagementResult;
use crate::schema::{
    CompositeIndexDef, EdgeLabelDef, IndexStatusEntry, PropertyConstraintDef, PropertyKeyDef,
    RelationIndexDef, SchemaElement, VertexLabelDef,
};

/// A source of management sessions (a graph instance)
pub trait ManagementSystem {
    type Session: ManagementSession;

    /// Open a fresh management transaction
    ///
    /// Declarations made in the returned session are invisible to other
    /// sessions until [`ManagementSession::commit`] succeeds.
    fn open_management(&self) -> ManagementResult<Self::Session>;
}

/// A transactional handle for schema mutations
///
/// Declaring an element that already exists fails with
/// `ManagementError::AlreadyExists`. Declaring an element whose references
/// are missing fails with `ManagementError::NotFound` and stages nothing.
pub trait ManagementSession {
    fn contains_property_key(&self, name: &str) -> ManagementResult<bool>;

    fn contains_vertex_label(&self, name: &str) -> ManagementResult<bool>;

    fn contains_edge_label(&self, name: &str) -> ManagementResult<bool>;

    /// Whether every key in `keys` is mapped onto the vertex label
    fn contains_property_constraint(&self, label: &str, keys: &[String]) -> ManagementResult<bool>;

    fn contains_graph_index(&self, name: &str) -> ManagementResult<bool>;

    /// Relation indexes are looked up within their edge label
    fn contains_relation_index(&self, edge_label: &str, name: &str) -> ManagementResult<bool>;

    fn make_property_key(&mut self, def: &PropertyKeyDef) -> ManagementResult<()>;

    fn make_vertex_label(&mut self, def: &VertexLabelDef) -> ManagementResult<()>;

    fn make_edge_label(&mut self, def: &EdgeLabelDef) -> ManagementResult<()>;

    /// Map property keys onto a vertex label (`mgmt.addProperties`)
    fn add_properties(&mut self, def: &PropertyConstraintDef) -> ManagementResult<()>;

    fn build_composite_index(&mut self, def: &CompositeIndexDef) -> ManagementResult<()>;

    fn build_edge_index(&mut self, def: &RelationIndexDef) -> ManagementResult<()>;

    /// Status of every composite and relation index visible to this session
    fn index_statuses(&self) -> ManagementResult<Vec<IndexStatusEntry>>;

    /// Request `ENABLE_INDEX` for a registered composite index
    fn enable_graph_index(&mut self, name: &str) -> ManagementResult<()>;

    /// Make every declaration of this session durable
    fn commit(self) -> ManagementResult<()>
    where
        Self: Sized;

    /// Discard every declaration of this session
    fn rollback(self) -> ManagementResult<()>
    where
        Self: Sized;

    /// Existence check dispatched on the element kind
    fn contains(&self, element: &SchemaElement) -> ManagementResult<bool> {
        match element {
            SchemaElement::PropertyKey(def) => self.contains_property_key(&def.name),
            SchemaElement::VertexLabel(def) => self.contains_vertex_label(&def.name),
            SchemaElement::EdgeLabel(def) => self.contains_edge_label(&def.name),
            SchemaElement::PropertyConstraint(def) => {
                self.contains_property_constraint(&def.label, &def.keys)
            }
            SchemaElement::CompositeIndex(def) => self.contains_graph_index(&def.name),
            SchemaElement::RelationIndex(def) => {
                self.contains_relation_index(&def.edge_label, &def.name)
            }
        }
    }

    /// Declaration dispatched on the element kind
    fn declare(&mut self, element: &SchemaElement) -> ManagementResult<()> {
        match element {
            SchemaElement::PropertyKey(def) => self.make_property_key(def),
            SchemaElement::VertexLabel(def) => self.make_vertex_label(def),
            SchemaElement::EdgeLabel(def) => self.make_edge_label(def),
            SchemaElement::PropertyConstraint(def) => self.add_properties(def),
            SchemaElement::CompositeIndex(def) => self.build_composite_index(def),
            SchemaElement::RelationIndex(def) => self.build_edge_index(def),
        }
    }
}
