// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Declarative schema definition: an ordered list of typed declarations

use serde::{Deserialize, Serialize};

use crate::schema::types::{
    CompositeIndexDef, DataType, Direction, EdgeLabelDef, ElementRef, PropertyConstraintDef, PropertyKeyDef,
    RelationIndexDef, SchemaElement, SortOrder, VertexLabelDef,
};
use crate::schema::validator::{validate_definition, ValidationError};

/// Desired schema state
///
/// Elements are kept in declaration order. [`SchemaDefinition::dependency_order`]
/// yields the order in which they can be applied to a management session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    elements: Vec<SchemaElement>,
}

impl SchemaDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_elements(elements: Vec<SchemaElement>) -> Self {
        Self { elements }
    }

    pub fn push(&mut self, element: SchemaElement) {
        self.elements.push(element);
    }

    pub fn property_key(mut self, name: &str, data_type: DataType) -> Self {
        self.push(SchemaElement::PropertyKey(PropertyKeyDef {
            name: name.to_string(),
            data_type,
        }));
        self
    }

    pub fn vertex_label(mut self, name: &str) -> Self {
        self.push(SchemaElement::VertexLabel(VertexLabelDef {
            name: name.to_string(),
        }));
        self
    }

    pub fn edge_label(mut self, name: &str) -> Self {
        self.push(SchemaElement::EdgeLabel(EdgeLabelDef {
            name: name.to_string(),
        }));
        self
    }

    /// Restrict `label` to carry the given property keys
    pub fn property_constraint(mut self, label: &str, keys: &[&str]) -> Self {
        self.push(SchemaElement::PropertyConstraint(PropertyConstraintDef {
            label: label.to_string(),
            keys: keys.iter().map(|k| k.to_string()).collect(),
        }));
        self
    }

    pub fn composite_index(mut self, name: &str, label: &str, keys: &[&str], unique: bool) -> Self {
        self.push(SchemaElement::CompositeIndex(CompositeIndexDef {
            name: name.to_string(),
            keys: keys.iter().map(|k| k.to_string()).collect(),
            label: label.to_string(),
            unique,
        }));
        self
    }

    pub fn relation_index(
        mut self,
        name: &str,
        edge_label: &str,
        direction: Direction,
        order: SortOrder,
        sort_keys: &[&str],
    ) -> Self {
        self.push(SchemaElement::RelationIndex(RelationIndexDef {
            name: name.to_string(),
            edge_label: edge_label.to_string(),
            direction,
            order,
            sort_keys: sort_keys.iter().map(|k| k.to_string()).collect(),
        }));
        self
    }

    pub fn elements(&self) -> &[SchemaElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Validate the definition as written, including declaration order
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_definition(self)
    }

    /// Reorder so every element follows what it references
    ///
    /// Property keys come first, then vertex labels, edge labels, property
    /// constraints, composite indexes and relation indexes. Ties keep declaration order. The result is
    /// validated, so dangling references and duplicates are still reported.
    pub fn dependency_order(&self) -> Result<SchemaDefinition, ValidationError> {
        let mut elements = self.elements.clone();
        elements.sort_by_key(|e| e.kind());
        let ordered = SchemaDefinition { elements };
        ordered.validate()?;
        Ok(ordered)
    }

    /// Identities of every index declared in the definition
    pub fn index_refs(&self) -> Vec<ElementRef> {
        self.elements
            .iter()
            .filter(|e| e.is_index())
            .map(|e| e.identity())
            .collect()
    }
}
