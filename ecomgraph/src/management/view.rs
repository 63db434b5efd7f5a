// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Observed schema state as seen by a management session
//!
//! Both session implementations keep one of these: the in-memory store as
//! its working copy, the Gremlin session as the introspected snapshot plus
//! everything staged since.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::error::{ManagementError, ManagementResult};
use crate::schema::validator::validate_identifier;
use crate::schema::{ElementKind, ElementRef, PropertyConstraintDef, SchemaElement};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaView {
    /// Property key name to Java class name of its data type
    pub property_keys: BTreeMap<String, String>,
    pub vertex_labels: BTreeSet<String>,
    pub edge_labels: BTreeSet<String>,
    /// Vertex label to the property keys mapped onto it
    pub property_constraints: BTreeMap<String, BTreeSet<String>>,
    pub graph_indexes: BTreeSet<String>,
    /// (edge label, index name)
    pub relation_indexes: BTreeSet<(String, String)>,
}

impl SchemaView {
    pub fn has(&self, element: &ElementRef) -> bool {
        match element.kind {
            ElementKind::PropertyKey => self.property_keys.contains_key(&element.name),
            ElementKind::VertexLabel => self.vertex_labels.contains(&element.name),
            ElementKind::EdgeLabel => self.edge_labels.contains(&element.name),
            ElementKind::PropertyConstraint => self
                .property_constraints
                .get(&element.name)
                .is_some_and(|keys| !keys.is_empty()),
            ElementKind::CompositeIndex => self.graph_indexes.contains(&element.name),
            ElementKind::RelationIndex => match &element.scope {
                Some(edge_label) => self
                    .relation_indexes
                    .contains(&(edge_label.clone(), element.name.clone())),
                None => false,
            },
        }
    }

    /// A property constraint counts as present once every one of its keys is mapped
    pub fn contains(&self, element: &SchemaElement) -> bool {
        match element {
            SchemaElement::PropertyConstraint(def) => self.unmapped_keys(def).is_empty(),
            other => self.has(&other.identity()),
        }
    }

    /// Keys of `def` not yet mapped onto its vertex label
    pub fn unmapped_keys(&self, def: &PropertyConstraintDef) -> Vec<String> {
        let mapped = self.property_constraints.get(&def.label);
        def.keys
            .iter()
            .filter(|key| !mapped.is_some_and(|keys| keys.contains(*key)))
            .cloned()
            .collect()
    }

    /// Existing property key or edge label already using `name`
    pub fn relation_type(&self, name: &str) -> Option<ElementRef> {
        if self.property_keys.contains_key(name) {
            Some(ElementRef::new(ElementKind::PropertyKey, name))
        } else if self.edge_labels.contains(name) {
            Some(ElementRef::new(ElementKind::EdgeLabel, name))
        } else {
            None
        }
    }

    /// Check that `element` could be declared on top of this view
    ///
    /// Fails with `NotFound` for the first missing reference and with
    /// `AlreadyExists` when the element itself is present. A property key or
    /// edge label whose name is taken by either kind also fails with
    /// `AlreadyExists`, naming the element that holds the name.
    pub fn check_declarable(&self, element: &SchemaElement) -> ManagementResult<()> {
        validate_identifier(element.kind(), element.name())?;

        if element.kind().is_relation_type() {
            if let Some(existing) = self.relation_type(element.name()) {
                return Err(ManagementError::AlreadyExists(existing));
            }
        }

        for dependency in element.dependencies() {
            validate_identifier(dependency.kind, &dependency.name)?;
            if !self.has(&dependency) {
                return Err(ManagementError::NotFound(dependency));
            }
        }

        if self.contains(element) {
            return Err(ManagementError::AlreadyExists(element.identity()));
        }

        Ok(())
    }

    pub fn insert(&mut self, element: &SchemaElement) {
        match element {
            SchemaElement::PropertyKey(def) => {
                self.property_keys
                    .insert(def.name.clone(), def.data_type.java_class().to_string());
            }
            SchemaElement::VertexLabel(def) => {
                self.vertex_labels.insert(def.name.clone());
            }
            SchemaElement::EdgeLabel(def) => {
                self.edge_labels.insert(def.name.clone());
            }
            SchemaElement::PropertyConstraint(def) => {
                self.property_constraints
                    .entry(def.label.clone())
                    .or_default()
                    .extend(def.keys.iter().cloned());
            }
            SchemaElement::CompositeIndex(def) => {
                self.graph_indexes.insert(def.name.clone());
            }
            SchemaElement::RelationIndex(def) => {
                self.relation_indexes
                    .insert((def.edge_label.clone(), def.name.clone()));
            }
        }
    }

    /// Total number of declared elements
    pub fn len(&self) -> usize {
        self.property_keys.len()
            + self.vertex_labels.len()
            + self.edge_labels.len()
            + self.property_constraints.len()
            + self.graph_indexes.len()
            + self.relation_indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
