// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Schema module - declarative graph schema for JanusGraph provisioning
//
// The desired schema is an ordered list of typed declarations (property keys,
// labels, property constraints, composite and vertex-centric indexes) that can be validated and
// ordered without a live database.

pub mod definition;
pub mod ecommerce;
pub mod types;
pub mod validator;

pub use definition::SchemaDefinition;
pub use ecommerce::ecommerce_schema;
pub use types::{
    CompositeIndexDef, DataType, Direction, EdgeLabelDef, ElementKind, ElementRef, IndexKind,
    IndexStatus, IndexStatusEntry, PropertyConstraintDef, PropertyKeyDef, RelationIndexDef,
    SchemaElement, SortOrder, VertexLabelDef,
};
pub use validator::ValidationError;
