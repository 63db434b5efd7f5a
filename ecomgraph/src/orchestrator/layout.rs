// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Files and directories the orchestrator works with

use std::path::{Path, PathBuf};

pub const VENV_DIR: &str = "venv";
pub const REQUIREMENTS_FILE: &str = "requirements.txt";
pub const ENV_TEMPLATE: &str = ".env.example";
pub const ENV_FILE: &str = ".env";
pub const COMPOSE_FILE: &str = "docker-compose.yml";
pub const DEMO_SCRIPT: &str = "python/ecommerce_demo.py";

/// Paths of a project checkout, all relative to one root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn venv_dir(&self) -> PathBuf {
        self.root.join(VENV_DIR)
    }

    pub fn venv_python(&self) -> PathBuf {
        self.venv_dir().join("bin").join("python")
    }

    pub fn venv_pip(&self) -> PathBuf {
        self.venv_dir().join("bin").join("pip")
    }

    pub fn requirements(&self) -> PathBuf {
        self.root.join(REQUIREMENTS_FILE)
    }

    pub fn env_template(&self) -> PathBuf {
        self.root.join(ENV_TEMPLATE)
    }

    pub fn env_file(&self) -> PathBuf {
        self.root.join(ENV_FILE)
    }

    pub fn compose_file(&self) -> PathBuf {
        self.root.join(COMPOSE_FILE)
    }

    pub fn demo_script(&self) -> PathBuf {
        self.root.join(DEMO_SCRIPT)
    }

    pub fn has_venv(&self) -> bool {
        self.venv_dir().is_dir()
    }
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self::new(".")
    }
}
