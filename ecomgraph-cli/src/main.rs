// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! EcomGraph CLI entry point

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

mod cli;
use cli::{Cli, CliContext, Commands};
use ecomgraph::orchestrator::ProjectLayout;
use ecomgraph::Settings;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return usage_exit(err),
    };

    let env_file = ProjectLayout::new(&cli.project_dir).env_file();
    let settings = match Settings::from_env_and_file(&env_file) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{} {}", "Error:".red().bold(), err.to_string().red());
            return ExitCode::FAILURE;
        }
    };

    // -v wins over --log-level, which wins over LOG_LEVEL
    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else if let Some(level) = settings
        .log_level
        .as_deref()
        .and_then(|raw| raw.parse::<log::LevelFilter>().ok())
    {
        level
    } else {
        // Default to Warn (can still be overridden by RUST_LOG env var)
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    match run(cli, settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "Error:".red().bold(), err.to_string().red());
            ExitCode::FAILURE
        }
    }
}

/// Help and version exit with 0, usage errors with 1
fn usage_exit(err: clap::Error) -> ExitCode {
    let _ = err.print();
    if cli::is_informational(&err) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run(cli: Cli, settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = CliContext {
        project_dir: cli.project_dir,
        settings,
        format: cli.format,
    };

    match cli.command {
        Commands::Version => {
            println!("{} {}", "EcomGraph".bold().green(), ecomgraph::VERSION);
            println!("JanusGraph e-commerce environment tooling");
            Ok(())
        }
        Commands::Setup => cli::handle_setup(&ctx),
        Commands::Start => cli::handle_start(&ctx),
        Commands::Stop => cli::handle_stop(&ctx),
        Commands::Status => cli::handle_status(&ctx),
        Commands::Demo => cli::handle_demo(&ctx),
        Commands::Clean => cli::handle_clean(&ctx),
        Commands::Provision {
            wait,
            timeout,
            dry_run,
        } => cli::handle_provision(&ctx, wait, timeout, dry_run),
        Commands::Indexes { enable, wait } => cli::handle_indexes(&ctx, enable, wait),
    }
}
