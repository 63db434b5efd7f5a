// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Graph schema for the e-commerce dataset (users, products, orders, reviews)

use crate::schema::definition::SchemaDefinition;
use crate::schema::types::{DataType, Direction, SortOrder};

const PROPERTY_KEYS: &[(&str, DataType)] = &[
    // user
    ("user_id", DataType::String),
    ("username", DataType::String),
    ("email", DataType::String),
    ("first_name", DataType::String),
    ("last_name", DataType::String),
    ("registration_date", DataType::String),
    ("is_active", DataType::Boolean),
    ("address", DataType::String),
    ("phone", DataType::String),
    // product
    ("product_id", DataType::String),
    ("name", DataType::String),
    ("description", DataType::String),
    ("price", DataType::Double),
    ("category", DataType::String),
    ("brand", DataType::String),
    ("sku", DataType::String),
    ("stock_quantity", DataType::Integer),
    ("created_date", DataType::String),
    // order
    ("order_id", DataType::String),
    ("order_date", DataType::String),
    ("status", DataType::String),
    ("total_amount", DataType::Double),
    ("shipping_address", DataType::String),
    ("payment_method", DataType::String),
    // review
    ("review_id", DataType::String),
    ("rating", DataType::Integer),
    ("title", DataType::String),
    ("comment", DataType::String),
    ("review_date", DataType::String),
    ("is_verified_purchase", DataType::Boolean),
];

const VERTEX_LABELS: &[&str] = &["user", "product", "order", "review"];

const EDGE_LABELS: &[&str] = &["placed_order", "wrote_review", "has_review"];

/// Property keys each vertex label may carry
const PROPERTY_CONSTRAINTS: &[(&str, &[&str])] = &[
    (
        "user",
        &[
            "user_id",
            "username",
            "email",
            "first_name",
            "last_name",
            "registration_date",
            "is_active",
            "address",
            "phone",
        ],
    ),
    (
        "product",
        &[
            "product_id",
            "name",
            "description",
            "price",
            "category",
            "brand",
            "sku",
            "stock_quantity",
            "created_date",
            "is_active",
        ],
    ),
    (
        "order",
        &[
            "order_id",
            "user_id",
            "order_date",
            "status",
            "total_amount",
            "shipping_address",
            "payment_method",
        ],
    ),
    (
        "review",
        &[
            "review_id",
            "product_id",
            "user_id",
            "rating",
            "title",
            "comment",
            "review_date",
            "is_verified_purchase",
        ],
    ),
];

/// (name, label, keys, unique)
const COMPOSITE_INDEXES: &[(&str, &str, &[&str], bool)] = &[
    ("userByUserId", "user", &["user_id"], true),
    ("productByProductId", "product", &["product_id"], true),
    ("orderByOrderId", "order", &["order_id"], true),
    ("reviewByReviewId", "review", &["review_id"], true),
    ("userByUsername", "user", &["username"], true),
    ("userByEmail", "user", &["email"], true),
    ("productByCategory", "product", &["category"], false),
    ("productByBrand", "product", &["brand"], false),
    ("orderByUserId", "order", &["user_id"], false),
    ("orderByStatus", "order", &["status"], false),
    ("reviewByProductId", "review", &["product_id"], false),
    ("reviewByUserId", "review", &["user_id"], false),
    ("reviewByRating", "review", &["rating"], false),
    (
        "productByCategoryAndBrand",
        "product",
        &["category", "brand"],
        false,
    ),
    (
        "reviewByProductAndRating",
        "review",
        &["product_id", "rating"],
        false,
    ),
];

/// (name, edge label, sort key)
const RELATION_INDEXES: &[(&str, &str, &str)] = &[
    ("userOrdersByDate", "placed_order", "order_date"),
    ("productReviewsByRating", "has_review", "rating"),
    ("userReviewsByDate", "wrote_review", "review_date"),
];

/// The target schema provisioned for the e-commerce demo
pub fn ecommerce_schema() -> SchemaDefinition {
    let mut schema = SchemaDefinition::new();

    for (name, data_type) in PROPERTY_KEYS {
        schema = schema.property_key(name, *data_type);
    }
    for label in VERTEX_LABELS {
        schema = schema.vertex_label(label);
    }
    for label in EDGE_LABELS {
        schema = schema.edge_label(label);
    }
    for (label, keys) in PROPERTY_CONSTRAINTS {
        schema = schema.property_constraint(label, keys);
    }
    for (name, label, keys, unique) in COMPOSITE_INDEXES {
        schema = schema.composite_index(name, label, keys, *unique);
    }
    for (name, edge_label, sort_key) in RELATION_INDEXES {
        schema = schema.relation_index(
            name,
            edge_label,
            Direction::Out,
            SortOrder::Desc,
            &[sort_key],
        );
    }

    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::SchemaElement;

    #[test]
    fn test_ecommerce_schema_is_valid_as_declared() {
        let schema = ecommerce_schema();
        schema.validate().expect("built-in schema must validate");
        assert_eq!(
            schema.len(),
            PROPERTY_KEYS.len()
                + VERTEX_LABELS.len()
                + EDGE_LABELS.len()
                + PROPERTY_CONSTRAINTS.len()
                + COMPOSITE_INDEXES.len()
                + RELATION_INDEXES.len()
        );
    }

    #[test]
    fn test_shared_keys_are_mapped_onto_several_labels() {
        let schema = ecommerce_schema();
        let labels_with = |key: &str| -> Vec<String> {
            schema
                .elements()
                .iter()
                .filter_map(|e| match e {
                    SchemaElement::PropertyConstraint(def) if def.keys.iter().any(|k| k == key) => {
                        Some(def.label.clone())
                    }
                    _ => None,
                })
                .collect()
        };

        assert_eq!(labels_with("is_active"), vec!["user", "product"]);
        assert_eq!(labels_with("user_id"), vec!["user", "order", "review"]);
        assert_eq!(labels_with("rating"), vec!["review"]);
    }

    #[test]
    fn test_user_by_user_id_is_unique_on_user() {
        let schema = ecommerce_schema();
        let index = schema
            .elements()
            .iter()
            .find_map(|e| match e {
                SchemaElement::CompositeIndex(def) if def.name == "userByUserId" => Some(def),
                _ => None,
            })
            .expect("userByUserId declared");

        assert!(index.unique);
        assert_eq!(index.label, "user");
        assert_eq!(index.keys, vec!["user_id".to_string()]);
    }
}
