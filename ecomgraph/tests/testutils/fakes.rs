//! Fake command runner and health probe

use ecomgraph::orchestrator::{CommandOutput, CommandRunner, CommandSpec, HealthProbe};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Records commands; every command succeeds unless scripted otherwise
///
/// `python3 -m venv <dir>` creates `<dir>` so the orchestrator sees the
/// same filesystem effect as a real run.
#[derive(Default)]
pub struct FakeRunner {
    calls: RefCell<Vec<CommandSpec>>,
    /// Programs that are not installed
    missing: Vec<String>,
    /// Command line -> scripted output
    outputs: HashMap<String, CommandOutput>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_program(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    pub fn with_output(mut self, command_line: &str, code: i32, stdout: &str, stderr: &str) -> Self {
        self.outputs.insert(
            command_line.to_string(),
            CommandOutput {
                code: Some(code),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    /// Command lines in the order they ran
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.command_line()).collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
        self.calls.borrow_mut().push(spec.clone());

        let program = spec.program.to_string_lossy().into_owned();
        if self.missing.contains(&program) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: command not found", program),
            ));
        }

        let line = spec.command_line();
        if let Some(output) = self.outputs.get(&line) {
            return Ok(output.clone());
        }

        if program == "python3" && spec.args.len() == 3 && spec.args[0] == "-m" && spec.args[1] == "venv" {
            fs::create_dir_all(PathBuf::from(&spec.args[2]))?;
        }

        Ok(CommandOutput {
            code: Some(0),
            stdout: format!("{} 1.0.0\n", program),
            stderr: String::new(),
        })
    }
}

/// Answers probes from a script; once exhausted, repeats the last answer
pub struct ScriptedProbe {
    answers: Vec<bool>,
    calls: Cell<usize>,
}

impl ScriptedProbe {
    pub fn new(answers: Vec<bool>) -> Self {
        Self {
            answers,
            calls: Cell::new(0),
        }
    }

    pub fn always(ready: bool) -> Self {
        Self::new(vec![ready])
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl HealthProbe for ScriptedProbe {
    fn probe(&self, _url: &str) -> bool {
        let call = self.calls.get();
        self.calls.set(call + 1);
        self.answers
            .get(call)
            .or_else(|| self.answers.last())
            .copied()
            .unwrap_or(false)
    }
}
