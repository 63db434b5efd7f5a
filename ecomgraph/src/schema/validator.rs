// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Static validation of schema definitions

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::schema::definition::SchemaDefinition;
use crate::schema::types::{ElementKind, ElementRef, SchemaElement};

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Schema validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid identifier for {kind}: '{name}'")]
    InvalidIdentifier { kind: ElementKind, name: String },

    #[error("Duplicate declaration of {0}")]
    Duplicate(ElementRef),

    #[error("{element} references undeclared {missing}")]
    UnknownReference {
        element: ElementRef,
        missing: ElementRef,
    },

    #[error("{element} is declared before {dependency}")]
    OutOfOrder {
        element: ElementRef,
        dependency: ElementRef,
    },

    #[error("{0} must reference at least one property key")]
    EmptyKeys(ElementRef),
}

/// Check that a name can be embedded safely in a management script
pub fn validate_identifier(kind: ElementKind, name: &str) -> Result<(), ValidationError> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidIdentifier {
            kind,
            name: name.to_string(),
        })
    }
}

/// Validate every element of a definition
///
/// Enforces identifier syntax, at-most-once declaration, non-empty key lists,
/// that every reference resolves to a declared element, and that each element
/// is declared after everything it references. Property keys and edge labels
/// share one namespace, so a name used by one cannot be reused by the other.
pub fn validate_definition(definition: &SchemaDefinition) -> Result<(), ValidationError> {
    let all: HashSet<ElementRef> = definition.elements().iter().map(|e| e.identity()).collect();
    let mut seen: HashSet<ElementRef> = HashSet::new();
    let mut relation_types: HashMap<&str, ElementKind> = HashMap::new();

    for element in definition.elements() {
        validate_element_names(element)?;

        let identity = element.identity();
        if seen.contains(&identity) {
            return Err(ValidationError::Duplicate(identity));
        }
        if element.kind().is_relation_type() {
            if let Some(kind) = relation_types.insert(element.name(), element.kind()) {
                return Err(ValidationError::Duplicate(ElementRef::new(kind, element.name())));
            }
        }

        for dependency in element.dependencies() {
            if !all.contains(&dependency) {
                return Err(ValidationError::UnknownReference {
                    element: identity,
                    missing: dependency,
                });
            }
            if !seen.contains(&dependency) {
                return Err(ValidationError::OutOfOrder {
                    element: identity,
                    dependency,
                });
            }
        }

        seen.insert(identity);
    }

    Ok(())
}

fn validate_element_names(element: &SchemaElement) -> Result<(), ValidationError> {
    validate_identifier(element.kind(), element.name())?;

    match element {
        SchemaElement::PropertyConstraint(def) => {
            if def.keys.is_empty() {
                return Err(ValidationError::EmptyKeys(element.identity()));
            }
            for key in &def.keys {
                validate_identifier(ElementKind::PropertyKey, key)?;
            }
        }
        SchemaElement::CompositeIndex(def) => {
            if def.keys.is_empty() {
                return Err(ValidationError::EmptyKeys(element.identity()));
            }
            validate_identifier(ElementKind::VertexLabel, &def.label)?;
            for key in &def.keys {
                validate_identifier(ElementKind::PropertyKey, key)?;
            }
        }
        SchemaElement::RelationIndex(def) => {
            if def.sort_keys.is_empty() {
                return Err(ValidationError::EmptyKeys(element.identity()));
            }
            validate_identifier(ElementKind::EdgeLabel, &def.edge_label)?;
            for key in &def.sort_keys {
                validate_identifier(ElementKind::PropertyKey, key)?;
            }
        }
        _ => {}
    }

    Ok(())
}
