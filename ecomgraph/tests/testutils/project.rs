//! Temporary project checkouts

use ecomgraph::orchestrator::{HealthCheckPolicy, Orchestrator, ProjectLayout};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

use super::fakes::{FakeRunner, ScriptedProbe};

pub const TEMPLATE_CONTENTS: &str = "JANUSGRAPH_HOST=localhost\nJANUSGRAPH_PORT=8182\n";

/// A project directory that is removed when dropped
pub struct ProjectDir {
    dir: TempDir,
}

impl ProjectDir {
    /// Empty directory
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Directory with `.env.example`, `requirements.txt` and compose file
    pub fn with_template() -> Self {
        let project = Self::empty();
        project.write(".env.example", TEMPLATE_CONTENTS);
        project.write("requirements.txt", "gremlinpython==3.7.2\n");
        project.write("docker-compose.yml", "services: {}\n");
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::new(self.path())
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(path, contents).expect("Failed to write project file");
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path().join(relative)).expect("Failed to read project file")
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path().join(relative).exists()
    }

    /// Orchestrator over this directory with zero-interval health checks
    pub fn orchestrator(
        &self,
        runner: FakeRunner,
        probe: ScriptedProbe,
        retries: u32,
    ) -> Orchestrator<FakeRunner, ScriptedProbe> {
        Orchestrator::new(
            self.layout(),
            runner,
            probe,
            HealthCheckPolicy {
                url: "http://localhost:8182".to_string(),
                retries,
                interval: Duration::ZERO,
            },
        )
    }
}
