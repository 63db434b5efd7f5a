//! Environment orchestration against a fake command runner and health probe

#[path = "testutils/mod.rs"]
mod testutils;

use ecomgraph::orchestrator::{EnvFileAction, OrchestratorError};
use testutils::fakes::{FakeRunner, ScriptedProbe};
use testutils::project::{ProjectDir, TEMPLATE_CONTENTS};

#[test]
fn test_setup_prepares_fresh_project() {
    let project = ProjectDir::with_template();
    let orchestrator = project.orchestrator(FakeRunner::new(), ScriptedProbe::always(true), 3);

    let report = orchestrator.setup().expect("setup should succeed");

    assert_eq!(report.tools.len(), 3);
    assert!(report.venv_created);
    assert!(report.requirements_installed);
    assert_eq!(report.env_file, EnvFileAction::Created);
    assert_eq!(project.read(".env"), TEMPLATE_CONTENTS);
    assert!(project.exists("venv"));

    let lines = orchestrator.runner().command_lines();
    assert_eq!(lines[0], "docker --version");
    assert_eq!(lines[1], "docker compose version");
    assert_eq!(lines[2], "python3 --version");
    assert!(lines[3].starts_with("python3 -m venv "));
    assert!(lines[4].ends_with(&format!(
        "install -r {}",
        project.path().join("requirements.txt").display()
    )));
}

#[test]
fn test_setup_twice_never_overwrites_env() {
    let project = ProjectDir::with_template();
    project.write(".env", "JANUSGRAPH_HOST=graph.internal\n");

    let first = project
        .orchestrator(FakeRunner::new(), ScriptedProbe::always(true), 3)
        .setup()
        .unwrap();
    let second_orchestrator =
        project.orchestrator(FakeRunner::new(), ScriptedProbe::always(true), 3);
    let second = second_orchestrator.setup().unwrap();

    assert_eq!(first.env_file, EnvFileAction::Kept);
    assert_eq!(second.env_file, EnvFileAction::Kept);
    assert!(!second.venv_created);
    assert_eq!(project.read(".env"), "JANUSGRAPH_HOST=graph.internal\n");
    assert!(!second_orchestrator
        .runner()
        .command_lines()
        .iter()
        .any(|line| line.contains("-m venv")));
}

#[test]
fn test_setup_with_missing_tool_changes_nothing() {
    let project = ProjectDir::with_template();
    let orchestrator = project.orchestrator(
        FakeRunner::new().without_program("python3"),
        ScriptedProbe::always(true),
        3,
    );

    let err = orchestrator.setup().unwrap_err();

    match err {
        OrchestratorError::MissingPrerequisite { tool, .. } => assert_eq!(tool, "python3"),
        other => panic!("expected MissingPrerequisite, got {:?}", other),
    }
    assert!(!project.exists(".env"));
    assert!(!project.exists("venv"));
}

#[test]
fn test_setup_stops_at_first_missing_tool() {
    let project = ProjectDir::with_template();
    let runner = FakeRunner::new().with_output("docker compose version", 1, "", "unknown command");
    let orchestrator = project.orchestrator(runner, ScriptedProbe::always(true), 3);

    let err = orchestrator.setup().unwrap_err();

    assert!(matches!(
        err,
        OrchestratorError::MissingPrerequisite { ref tool, .. } if tool == "docker compose"
    ));
    assert_eq!(orchestrator.runner().calls().len(), 2);
}

#[test]
fn test_setup_without_template_fails() {
    let project = ProjectDir::empty();
    let orchestrator = project.orchestrator(FakeRunner::new(), ScriptedProbe::always(true), 3);

    let err = orchestrator.setup().unwrap_err();

    assert!(matches!(err, OrchestratorError::MissingTemplate(_)));
    assert!(!project.exists(".env"));
}

#[test]
fn test_start_recreates_stack_and_waits() {
    let project = ProjectDir::with_template();
    let orchestrator = project.orchestrator(
        FakeRunner::new(),
        ScriptedProbe::new(vec![false, false, true]),
        5,
    );

    let attempts = orchestrator.start().expect("start should succeed");

    assert_eq!(attempts, 3);
    assert_eq!(
        orchestrator.runner().command_lines(),
        vec!["docker compose down", "docker compose up -d"]
    );
    let cwd = orchestrator.runner().calls()[0].cwd.clone();
    assert_eq!(cwd.as_deref(), Some(project.path()));
}

#[test]
fn test_start_gives_up_after_exactly_retries_probes() {
    let project = ProjectDir::with_template();
    let orchestrator = project.orchestrator(FakeRunner::new(), ScriptedProbe::always(false), 4);

    let err = orchestrator.start().unwrap_err();

    assert!(matches!(
        err,
        OrchestratorError::ServiceNotReady { attempts: 4, .. }
    ));
    assert_eq!(orchestrator.probe().calls(), 4);
    // No cleanup after a failed start
    assert_eq!(orchestrator.runner().calls().len(), 2);
}

#[test]
fn test_start_propagates_compose_failure() {
    let project = ProjectDir::with_template();
    let runner = FakeRunner::new().with_output("docker compose up -d", 1, "", "port is already allocated");
    let orchestrator = project.orchestrator(runner, ScriptedProbe::always(true), 3);

    let err = orchestrator.start().unwrap_err();

    match err {
        OrchestratorError::CommandFailed {
            command,
            code,
            stderr,
        } => {
            assert_eq!(command, "docker compose up -d");
            assert_eq!(code, Some(1));
            assert_eq!(stderr, "port is already allocated");
        }
        other => panic!("expected CommandFailed, got {:?}", other),
    }
    assert_eq!(orchestrator.probe().calls(), 0);
}

#[test]
fn test_stop_and_clean_commands() {
    let project = ProjectDir::with_template();
    let orchestrator = project.orchestrator(FakeRunner::new(), ScriptedProbe::always(true), 3);

    orchestrator.stop().unwrap();
    orchestrator.clean().unwrap();

    assert_eq!(
        orchestrator.runner().command_lines(),
        vec![
            "docker compose down",
            "docker compose down -v --remove-orphans",
            "docker volume prune -f",
        ]
    );
}

#[test]
fn test_status_is_read_only() {
    let project = ProjectDir::with_template();
    let runner = FakeRunner::new().with_output("docker compose ps", 0, "janusgraph  running\n", "");
    let orchestrator = project.orchestrator(runner, ScriptedProbe::always(false), 3);

    let report = orchestrator.status().unwrap();

    assert_eq!(report.containers, "janusgraph  running\n");
    assert!(!report.reachable);
    assert_eq!(orchestrator.probe().calls(), 1);
    assert_eq!(orchestrator.runner().command_lines(), vec!["docker compose ps"]);
}

#[test]
fn test_demo_without_venv_is_missing_setup() {
    let project = ProjectDir::with_template();
    project.write("python/ecommerce_demo.py", "print('demo')\n");
    let orchestrator = project.orchestrator(FakeRunner::new(), ScriptedProbe::always(true), 3);

    let err = orchestrator.run_demo().unwrap_err();

    assert!(matches!(err, OrchestratorError::MissingSetup { .. }));
    assert!(orchestrator.runner().calls().is_empty());
}

#[test]
fn test_demo_without_script_is_missing_setup() {
    let project = ProjectDir::with_template();
    std::fs::create_dir(project.path().join("venv")).unwrap();
    let orchestrator = project.orchestrator(FakeRunner::new(), ScriptedProbe::always(true), 3);

    let err = orchestrator.require_environment().unwrap_err();

    match err {
        OrchestratorError::MissingSetup { path, .. } => {
            assert!(path.ends_with("python/ecommerce_demo.py"))
        }
        other => panic!("expected MissingSetup, got {:?}", other),
    }
}

#[test]
fn test_demo_runs_script_through_venv_python() {
    let project = ProjectDir::with_template();
    project.write("python/ecommerce_demo.py", "print('demo')\n");
    std::fs::create_dir(project.path().join("venv")).unwrap();
    let orchestrator = project.orchestrator(FakeRunner::new(), ScriptedProbe::always(true), 3);

    orchestrator.run_demo().unwrap();

    let calls = orchestrator.runner().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].program,
        project.path().join("venv").join("bin").join("python").into_os_string()
    );
    assert!(calls[0].interactive);
}
