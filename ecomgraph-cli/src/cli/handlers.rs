// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for EcomGraph

use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;

use super::commands::OutputFormat;
use super::output::ReportFormatter;
use ecomgraph::orchestrator::{
    HealthProbe, HttpProbe, Orchestrator, OrchestratorError, ProjectLayout, SystemRunner,
};
use ecomgraph::provision::{
    enable_registered_indexes, observe_index_status, ReadinessPoller, Reconciler,
};
use ecomgraph::{ecommerce_schema, GremlinClient, GremlinGraph, Settings};

type HandlerResult = Result<(), Box<dyn std::error::Error>>;

/// Everything a handler needs from the command line and environment
pub struct CliContext {
    pub project_dir: PathBuf,
    pub settings: Settings,
    pub format: OutputFormat,
}

impl CliContext {
    fn orchestrator(&self) -> Result<Orchestrator<SystemRunner, HttpProbe>, Box<dyn std::error::Error>> {
        let probe = HttpProbe::new(self.settings.request_timeout)?;
        Ok(Orchestrator::new(
            ProjectLayout::new(&self.project_dir),
            SystemRunner,
            probe,
            self.settings.health_policy(),
        ))
    }

    fn graph(&self) -> Result<GremlinGraph, Box<dyn std::error::Error>> {
        let client = GremlinClient::new(
            self.settings.gremlin_endpoint(),
            self.settings.request_timeout,
        )?;
        Ok(GremlinGraph::new(client))
    }

    fn is_table(&self) -> bool {
        self.format == OutputFormat::Table
    }
}

pub fn handle_setup(ctx: &CliContext) -> HandlerResult {
    if ctx.is_table() {
        println!("{}", "Setting up EcomGraph environment...".bold().green());
    }

    let report = ctx.orchestrator()?.setup()?;
    print!("{}", ReportFormatter::setup_report(&report, ctx.format));

    if ctx.is_table() {
        println!("{}", "\nSetup complete. Start the services with:".yellow());
        println!("{}", "  ecomgraph start".cyan());
    }
    Ok(())
}

pub fn handle_start(ctx: &CliContext) -> HandlerResult {
    let orchestrator = ctx.orchestrator()?;
    println!("{}", "Starting JanusGraph services...".bold().green());

    match orchestrator.start() {
        Ok(attempts) => {
            println!(
                "{}",
                format!(
                    "JanusGraph is reachable at {} (after {} check(s))",
                    ctx.settings.health_check_url, attempts
                )
                .green()
            );
            Ok(())
        }
        Err(err @ OrchestratorError::ServiceNotReady { .. }) => {
            println!("{}", "Inspect the service logs with:".yellow());
            println!("{}", "  docker compose logs".cyan());
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

pub fn handle_stop(ctx: &CliContext) -> HandlerResult {
    ctx.orchestrator()?.stop()?;
    println!("{}", "Services stopped".green());
    Ok(())
}

pub fn handle_clean(ctx: &CliContext) -> HandlerResult {
    ctx.orchestrator()?.clean()?;
    println!("{}", "Containers, volumes and orphans removed".green());
    Ok(())
}

pub fn handle_status(ctx: &CliContext) -> HandlerResult {
    let report = ctx.orchestrator()?.status()?;
    print!("{}", ReportFormatter::status_report(&report, ctx.format));
    Ok(())
}

/// Provision the schema, then hand the terminal to the Python demo
pub fn handle_demo(ctx: &CliContext) -> HandlerResult {
    let orchestrator = ctx.orchestrator()?;
    orchestrator.require_environment()?;

    if !orchestrator.probe().probe(&ctx.settings.health_check_url) {
        println!(
            "{}",
            format!(
                "JanusGraph is not reachable at {}. Run 'ecomgraph start' first.",
                ctx.settings.health_check_url
            )
            .yellow()
        );
    }

    let graph = ctx.graph()?;
    let report = Reconciler::apply(&graph, &ecommerce_schema())?;
    print!("{}", ReportFormatter::provision_report(&report, ctx.format));

    println!("{}", "\nRunning e-commerce demo...".bold().green());
    orchestrator.run_demo()?;
    Ok(())
}

pub fn handle_provision(
    ctx: &CliContext,
    wait: bool,
    timeout: Option<u64>,
    dry_run: bool,
) -> HandlerResult {
    let graph = ctx.graph()?;
    let schema = ecommerce_schema();

    if dry_run {
        let plan = Reconciler::dry_run(&graph, &schema)?;
        print!("{}", ReportFormatter::provision_plan(&plan, ctx.format));
        return Ok(());
    }

    let report = Reconciler::apply(&graph, &schema)?;
    print!("{}", ReportFormatter::provision_report(&report, ctx.format));

    let statuses = observe_index_status(&graph)?;
    print!("{}", ReportFormatter::index_status(&statuses, ctx.format));

    if wait {
        let poller = match timeout {
            Some(secs) => ReadinessPoller::with_timeout(
                Duration::from_secs(secs),
                ctx.settings.index_poll_interval,
            ),
            None => ctx.settings.readiness_poller(),
        };
        if ctx.is_table() {
            println!("{}", "Waiting for indexes to become ENABLED...".yellow());
        }
        let ready = poller.wait(&graph, &schema.index_refs())?;
        print!("{}", ReportFormatter::index_status(&ready, ctx.format));
        if ctx.is_table() {
            println!("{}", "All indexes are ENABLED".bold().green());
        }
    }
    Ok(())
}

pub fn handle_indexes(ctx: &CliContext, enable: bool, wait: bool) -> HandlerResult {
    let graph = ctx.graph()?;

    let statuses = observe_index_status(&graph)?;
    print!("{}", ReportFormatter::index_status(&statuses, ctx.format));

    if enable {
        let enabled = enable_registered_indexes(&graph)?;
        if ctx.is_table() {
            if enabled.is_empty() {
                println!("{}", "No REGISTERED indexes to enable".yellow());
            } else {
                println!(
                    "{} {}",
                    "Requested ENABLE_INDEX for:".green(),
                    enabled.join(", ")
                );
            }
        }
    }

    if wait {
        let ready = ctx.settings.readiness_poller().wait(&graph, &[])?;
        print!("{}", ReportFormatter::index_status(&ready, ctx.format));
    }
    Ok(())
}
