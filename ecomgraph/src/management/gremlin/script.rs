// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Groovy management script rendering
//!
//! Names are embedded as single-quoted Groovy strings. Callers must have
//! validated them as identifiers first, which rules out quotes and newlines.

use crate::schema::{CompositeIndexDef, PropertyConstraintDef, RelationIndexDef, SchemaElement};

const DIRECTION_CLASS: &str = "org.apache.tinkerpop.gremlin.structure.Direction";
const ORDER_CLASS: &str = "org.apache.tinkerpop.gremlin.process.traversal.Order";
const SCHEMA_ACTION_CLASS: &str = "org.janusgraph.core.schema.SchemaAction";
const PROPERTY_KEY_CLASS: &str = "org.janusgraph.core.PropertyKey";
const EDGE_LABEL_CLASS: &str = "org.janusgraph.core.EdgeLabel";

/// Read-only script returning the existing schema as JSON
pub fn introspection_script() -> String {
    format!(
        r#"mgmt = graph.openManagement()
try {{
    relationIndexes = []
    mgmt.getRelationTypes({edge}.class).each {{ label ->
        mgmt.getRelationIndexes(label).each {{ index -> relationIndexes << [label.name(), index.name()] }}
    }}
    result = [
        propertyKeys: mgmt.getRelationTypes({key}.class).collectEntries {{ [(it.name()): it.dataType().getSimpleName()] }},
        vertexLabels: mgmt.getVertexLabels().collect {{ it.name() }},
        edgeLabels: mgmt.getRelationTypes({edge}.class).collect {{ it.name() }},
        propertyConstraints: mgmt.getVertexLabels().collectEntries {{ [(it.name()): it.mappedProperties().collect {{ key -> key.name() }}] }},
        graphIndexes: mgmt.getGraphIndexes(Vertex.class).collect {{ it.name() }},
        relationIndexes: relationIndexes
    ]
    groovy.json.JsonOutput.toJson(result)
}} finally {{
    mgmt.rollback()
}}"#,
        key = PROPERTY_KEY_CLASS,
        edge = EDGE_LABEL_CLASS,
    )
}

/// Read-only script returning the status of every index as JSON
pub fn index_status_script() -> String {
    format!(
        r#"mgmt = graph.openManagement()
try {{
    statuses = []
    mgmt.getGraphIndexes(Vertex.class).each {{ index ->
        keys = index.getFieldKeys()
        status = keys.size() > 0 ? index.getIndexStatus(keys[0]).toString() : 'ENABLED'
        statuses << [name: index.name(), kind: 'composite', edgeLabel: null, status: status]
    }}
    mgmt.getRelationTypes({edge}.class).each {{ label ->
        mgmt.getRelationIndexes(label).each {{ index ->
            statuses << [name: index.name(), kind: 'relation', edgeLabel: label.name(), status: index.getIndexStatus().toString()]
        }}
    }}
    groovy.json.JsonOutput.toJson(statuses)
}} finally {{
    mgmt.rollback()
}}"#,
        edge = EDGE_LABEL_CLASS,
    )
}

/// One management statement declaring `element`
pub fn declaration(element: &SchemaElement) -> String {
    match element {
        SchemaElement::PropertyKey(def) => format!(
            "mgmt.makePropertyKey('{}').dataType({}.class).make()",
            def.name,
            def.data_type.java_class()
        ),
        SchemaElement::VertexLabel(def) => {
            format!("mgmt.makeVertexLabel('{}').make()", def.name)
        }
        SchemaElement::EdgeLabel(def) => format!("mgmt.makeEdgeLabel('{}').make()", def.name),
        SchemaElement::PropertyConstraint(def) => add_properties(def),
        SchemaElement::CompositeIndex(def) => composite_index(def),
        SchemaElement::RelationIndex(def) => edge_index(def),
    }
}

fn add_properties(def: &PropertyConstraintDef) -> String {
    let mut statement = format!("mgmt.addProperties(mgmt.getVertexLabel('{}')", def.label);
    for key in &def.keys {
        statement.push_str(&format!(", mgmt.getPropertyKey('{}')", key));
    }
    statement.push(')');
    statement
}

fn composite_index(def: &CompositeIndexDef) -> String {
    let mut statement = format!("mgmt.buildIndex('{}', Vertex.class)", def.name);
    for key in &def.keys {
        statement.push_str(&format!(".addKey(mgmt.getPropertyKey('{}'))", key));
    }
    statement.push_str(&format!(".indexOnly(mgmt.getVertexLabel('{}'))", def.label));
    if def.unique {
        statement.push_str(".unique()");
    }
    statement.push_str(".buildCompositeIndex()");
    statement
}

fn edge_index(def: &RelationIndexDef) -> String {
    let sort_keys = def
        .sort_keys
        .iter()
        .map(|k| format!("mgmt.getPropertyKey('{}')", k))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "mgmt.buildEdgeIndex(mgmt.getEdgeLabel('{}'), '{}', {}.{}, {}.{}, {})",
        def.edge_label,
        def.name,
        DIRECTION_CLASS,
        def.direction.as_gremlin(),
        ORDER_CLASS,
        def.order.as_gremlin(),
        sort_keys
    )
}

/// Statement requesting `ENABLE_INDEX` on a composite index
pub fn enable_graph_index(name: &str) -> String {
    format!(
        "mgmt.updateIndex(mgmt.getGraphIndex('{}'), {}.ENABLE_INDEX)",
        name, SCHEMA_ACTION_CLASS
    )
}

/// Wrap staged statements in a single management transaction
///
/// Any exception rolls the whole transaction back and is rethrown, so the
/// server never commits a partial schema.
pub fn transaction(statements: &[String]) -> String {
    let mut body = String::new();
    for statement in statements {
        body.push_str("    ");
        body.push_str(statement);
        body.push('\n');
    }

    format!(
        r#"mgmt = graph.openManagement()
try {{
{body}    mgmt.commit()
    groovy.json.JsonOutput.toJson([committed: {count}])
}} catch (Exception e) {{
    mgmt.rollback()
    throw e
}}"#,
        body = body,
        count = statements.len(),
    )
}
