// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for schema provisioning

use thiserror::Error;

use crate::management::ManagementError;
use crate::schema::{ElementRef, IndexStatus, ValidationError};

/// An index that will not become enabled on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexProblem {
    pub index: ElementRef,
    /// `None` when the index is missing from the status snapshot
    pub status: Option<IndexStatus>,
}

impl std::fmt::Display for IndexProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({})", self.index, status),
            None => write!(f, "{} (missing)", self.index),
        }
    }
}

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Invalid schema definition: {0}")]
    InvalidSchema(#[from] ValidationError),

    #[error("Failed to declare {element}: {source}")]
    Declaration {
        element: ElementRef,
        #[source]
        source: ManagementError,
    },

    #[error("Management error: {0}")]
    Management(#[from] ManagementError),

    #[error("Indexes failed to build: {}", join(.0))]
    IndexFailed(Vec<IndexProblem>),

    #[error("Indexes still building after {attempts} status checks: {}", join(.building))]
    IndexTimeout {
        attempts: u32,
        building: Vec<ElementRef>,
    },
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type ProvisionResult<T> = Result<T, ProvisionError>;
