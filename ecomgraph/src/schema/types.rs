// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Core schema element definitions for JanusGraph management

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive data types a property key can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    String,
    Boolean,
    Double,
    Integer,
}

impl DataType {
    /// Java class name used by `makePropertyKey(..).dataType(X.class)`
    pub fn java_class(&self) -> &'static str {
        match self {
            DataType::String => "String",
            DataType::Boolean => "Boolean",
            DataType::Double => "Double",
            DataType::Integer => "Integer",
        }
    }

    /// Parse a Java class name (simple or fully qualified) reported by the server
    pub fn from_java_class(class: &str) -> Option<Self> {
        let simple = class.rsplit('.').next().unwrap_or(class);
        match simple {
            "String" => Some(DataType::String),
            "Boolean" => Some(DataType::Boolean),
            "Double" => Some(DataType::Double),
            "Integer" => Some(DataType::Integer),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.java_class())
    }
}

/// Edge direction covered by a vertex-centric index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Out,
    In,
    Both,
}

impl Direction {
    pub fn as_gremlin(&self) -> &'static str {
        match self {
            Direction::Out => "OUT",
            Direction::In => "IN",
            Direction::Both => "BOTH",
        }
    }
}

/// Sort order of a vertex-centric index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_gremlin(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyKeyDef {
    pub name: String,
    pub data_type: DataType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexLabelDef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeLabelDef {
    pub name: String,
}

/// Property keys a vertex label is allowed to carry (`mgmt.addProperties`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyConstraintDef {
    pub label: String,
    pub keys: Vec<String>,
}

/// Composite graph index scoped to a single vertex label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeIndexDef {
    pub name: String,
    pub keys: Vec<String>,
    pub label: String,
    pub unique: bool,
}

/// Vertex-centric index over an edge label's sort keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationIndexDef {
    pub name: String,
    pub edge_label: String,
    pub direction: Direction,
    pub order: SortOrder,
    pub sort_keys: Vec<String>,
}

/// Kinds of schema elements, in the order they must be declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementKind {
    PropertyKey,
    VertexLabel,
    EdgeLabel,
    PropertyConstraint,
    CompositeIndex,
    RelationIndex,
}

impl ElementKind {
    /// Property keys and edge labels are both relation types and share one namespace
    pub fn is_relation_type(&self) -> bool {
        matches!(self, ElementKind::PropertyKey | ElementKind::EdgeLabel)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ElementKind::PropertyKey => "property key",
            ElementKind::VertexLabel => "vertex label",
            ElementKind::EdgeLabel => "edge label",
            ElementKind::PropertyConstraint => "property constraint",
            ElementKind::CompositeIndex => "composite index",
            ElementKind::RelationIndex => "relation index",
        };
        write!(f, "{}", s)
    }
}

/// Identity of a schema element. Relation indexes are scoped to their edge label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementRef {
    pub kind: ElementKind,
    pub scope: Option<String>,
    pub name: String,
}

impl ElementRef {
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            scope: None,
            name: name.into(),
        }
    }

    pub fn scoped(kind: ElementKind, scope: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            scope: Some(scope.into()),
            name: name.into(),
        }
    }

    /// `scope.name` for scoped elements, plain `name` otherwise
    pub fn qualified_name(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{}.{}", scope, self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{} '{}' on '{}'", self.kind, self.name, scope),
            None => write!(f, "{} '{}'", self.kind, self.name),
        }
    }
}

/// A single typed schema declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaElement {
    PropertyKey(PropertyKeyDef),
    VertexLabel(VertexLabelDef),
    EdgeLabel(EdgeLabelDef),
    PropertyConstraint(PropertyConstraintDef),
    CompositeIndex(CompositeIndexDef),
    RelationIndex(RelationIndexDef),
}

impl SchemaElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            SchemaElement::PropertyKey(_) => ElementKind::PropertyKey,
            SchemaElement::VertexLabel(_) => ElementKind::VertexLabel,
            SchemaElement::EdgeLabel(_) => ElementKind::EdgeLabel,
            SchemaElement::PropertyConstraint(_) => ElementKind::PropertyConstraint,
            SchemaElement::CompositeIndex(_) => ElementKind::CompositeIndex,
            SchemaElement::RelationIndex(_) => ElementKind::RelationIndex,
        }
    }

    /// Element name; a property constraint is named after its vertex label
    pub fn name(&self) -> &str {
        match self {
            SchemaElement::PropertyKey(def) => &def.name,
            SchemaElement::VertexLabel(def) => &def.name,
            SchemaElement::EdgeLabel(def) => &def.name,
            SchemaElement::PropertyConstraint(def) => &def.label,
            SchemaElement::CompositeIndex(def) => &def.name,
            SchemaElement::RelationIndex(def) => &def.name,
        }
    }

    pub fn identity(&self) -> ElementRef {
        match self {
            SchemaElement::RelationIndex(def) => {
                ElementRef::scoped(ElementKind::RelationIndex, &def.edge_label, &def.name)
            }
            other => ElementRef::new(other.kind(), other.name()),
        }
    }

    /// Elements that must exist before this one can be declared
    pub fn dependencies(&self) -> Vec<ElementRef> {
        match self {
            SchemaElement::PropertyKey(_)
            | SchemaElement::VertexLabel(_)
            | SchemaElement::EdgeLabel(_) => Vec::new(),
            SchemaElement::PropertyConstraint(def) => {
                let mut deps = vec![ElementRef::new(ElementKind::VertexLabel, &def.label)];
                deps.extend(
                    def.keys
                        .iter()
                        .map(|k| ElementRef::new(ElementKind::PropertyKey, k)),
                );
                deps
            }
            SchemaElement::CompositeIndex(def) => {
                let mut deps: Vec<ElementRef> = def
                    .keys
                    .iter()
                    .map(|k| ElementRef::new(ElementKind::PropertyKey, k))
                    .collect();
                deps.push(ElementRef::new(ElementKind::VertexLabel, &def.label));
                deps
            }
            SchemaElement::RelationIndex(def) => {
                let mut deps = vec![ElementRef::new(ElementKind::EdgeLabel, &def.edge_label)];
                deps.extend(
                    def.sort_keys
                        .iter()
                        .map(|k| ElementRef::new(ElementKind::PropertyKey, k)),
                );
                deps
            }
        }
    }

    /// Whether the element is an index that builds asynchronously after commit
    pub fn is_index(&self) -> bool {
        matches!(
            self,
            SchemaElement::CompositeIndex(_) | SchemaElement::RelationIndex(_)
        )
    }
}

impl fmt::Display for SchemaElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identity())
    }
}

/// JanusGraph `SchemaStatus` of an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexStatus {
    Installed,
    Registered,
    Enabled,
    Disabled,
    Discarded,
}

impl IndexStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INSTALLED" => Some(IndexStatus::Installed),
            "REGISTERED" => Some(IndexStatus::Registered),
            "ENABLED" => Some(IndexStatus::Enabled),
            "DISABLED" => Some(IndexStatus::Disabled),
            "DISCARDED" => Some(IndexStatus::Discarded),
            _ => None,
        }
    }

    /// Still on the way to `Enabled`
    pub fn is_building(&self) -> bool {
        matches!(self, IndexStatus::Installed | IndexStatus::Registered)
    }

    /// Will never become `Enabled` without operator action
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, IndexStatus::Disabled | IndexStatus::Discarded)
    }
}

impl fmt::Display for IndexStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IndexStatus::Installed => "INSTALLED",
            IndexStatus::Registered => "REGISTERED",
            IndexStatus::Enabled => "ENABLED",
            IndexStatus::Disabled => "DISABLED",
            IndexStatus::Discarded => "DISCARDED",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    Composite,
    Relation,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Composite => write!(f, "composite"),
            IndexKind::Relation => write!(f, "relation"),
        }
    }
}

/// Status of one index as read back from a management session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStatusEntry {
    pub name: String,
    pub kind: IndexKind,
    /// Edge label a relation index belongs to
    pub edge_label: Option<String>,
    pub status: IndexStatus,
}

impl IndexStatusEntry {
    /// Relation indexes are identified within their edge label
    pub fn identity(&self) -> ElementRef {
        match (self.kind, &self.edge_label) {
            (IndexKind::Relation, Some(edge_label)) => {
                ElementRef::scoped(ElementKind::RelationIndex, edge_label, &self.name)
            }
            (IndexKind::Relation, None) => ElementRef::new(ElementKind::RelationIndex, &self.name),
            (IndexKind::Composite, _) => ElementRef::new(ElementKind::CompositeIndex, &self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_java_class_round_trip() {
        assert_eq!(DataType::from_java_class("java.lang.Double"), Some(DataType::Double));
        assert_eq!(DataType::from_java_class("Integer"), Some(DataType::Integer));
        assert_eq!(DataType::from_java_class("java.util.Date"), None);
    }

    #[test]
    fn test_relation_index_dependencies() {
        let element = SchemaElement::RelationIndex(RelationIndexDef {
            name: "userOrdersByDate".to_string(),
            edge_label: "placed_order".to_string(),
            direction: Direction::Out,
            order: SortOrder::Desc,
            sort_keys: vec!["order_date".to_string()],
        });

        let deps = element.dependencies();
        assert_eq!(deps[0], ElementRef::new(ElementKind::EdgeLabel, "placed_order"));
        assert_eq!(deps[1], ElementRef::new(ElementKind::PropertyKey, "order_date"));
        assert_eq!(
            element.identity(),
            ElementRef::scoped(ElementKind::RelationIndex, "placed_order", "userOrdersByDate")
        );
    }

    #[test]
    fn test_property_constraint_ranks_between_labels_and_indexes() {
        let element = SchemaElement::PropertyConstraint(PropertyConstraintDef {
            label: "order".to_string(),
            keys: vec!["order_id".to_string(), "user_id".to_string()],
        });

        assert!(ElementKind::EdgeLabel < element.kind());
        assert!(element.kind() < ElementKind::CompositeIndex);
        assert!(!element.is_index());
        assert_eq!(element.identity(), ElementRef::new(ElementKind::PropertyConstraint, "order"));
        assert_eq!(
            element.dependencies(),
            vec![
                ElementRef::new(ElementKind::VertexLabel, "order"),
                ElementRef::new(ElementKind::PropertyKey, "order_id"),
                ElementRef::new(ElementKind::PropertyKey, "user_id"),
            ]
        );
    }

    #[test]
    fn test_index_status_parse() {
        assert_eq!(IndexStatus::parse("enabled"), Some(IndexStatus::Enabled));
        assert_eq!(IndexStatus::parse(" REGISTERED "), Some(IndexStatus::Registered));
        assert!(IndexStatus::Installed.is_building());
        assert!(IndexStatus::Discarded.is_terminal_failure());
        assert_eq!(IndexStatus::parse("bogus"), None);
    }
}
