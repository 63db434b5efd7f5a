// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for graph management sessions

use thiserror::Error;

use crate::schema::{ElementRef, ValidationError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ManagementError {
    #[error("Referenced entity not found: {0}")]
    NotFound(ElementRef),

    #[error("Entity already exists: {0}")]
    AlreadyExists(ElementRef),

    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Gremlin server error ({code}): {message}")]
    Remote { code: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Declaration rejected: {0}")]
    Rejected(String),
}

impl From<ValidationError> for ManagementError {
    fn from(err: ValidationError) -> Self {
        ManagementError::InvalidDefinition(err.to_string())
    }
}

impl From<reqwest::Error> for ManagementError {
    fn from(err: reqwest::Error) -> Self {
        ManagementError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ManagementError {
    fn from(err: serde_json::Error) -> Self {
        ManagementError::Protocol(err.to_string())
    }
}

pub type ManagementResult<T> = Result<T, ManagementError>;
