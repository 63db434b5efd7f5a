// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for EcomGraph
//!
//! Provides the environment lifecycle commands and the schema
//! provisioning and index inspection commands.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{is_informational, Cli, Commands};
pub use handlers::{
    handle_clean, handle_demo, handle_indexes, handle_provision, handle_setup, handle_start,
    handle_status, handle_stop, CliContext,
};
