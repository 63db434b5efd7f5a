// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command-line argument definitions

use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ecomgraph")]
#[command(version, about = "JanusGraph e-commerce environment and schema tooling")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Project directory holding docker-compose.yml, .env and the demo
    #[arg(long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Explicit log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<log::Level>,

    /// Output format for reports
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check prerequisites, create the Python venv and materialize .env
    Setup,

    /// Recreate the docker compose stack and wait for JanusGraph
    Start,

    /// Stop the docker compose stack
    Stop,

    /// Show container status and JanusGraph reachability
    Status,

    /// Provision the schema and run the e-commerce demo
    Demo,

    /// Remove containers, volumes and orphans, then prune volumes
    Clean,

    /// Reconcile the e-commerce schema against JanusGraph
    Provision {
        /// Wait until every schema index is ENABLED
        #[arg(long)]
        wait: bool,

        /// Seconds to wait for indexes (defaults to INDEX_WAIT_TIMEOUT)
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Show what would be created without changing anything
        #[arg(long, conflicts_with = "wait")]
        dry_run: bool,
    },

    /// Show index status, optionally enabling registered indexes
    Indexes {
        /// Request ENABLE_INDEX for every REGISTERED composite index
        #[arg(long)]
        enable: bool,

        /// Wait until every index is ENABLED
        #[arg(long)]
        wait: bool,
    },

    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Whether a parse "error" is really a request for help or version output
pub fn is_informational(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provision_flags() {
        let cli = Cli::parse_from(["ecomgraph", "provision", "--wait", "--timeout", "60"]);
        match cli.command {
            Commands::Provision {
                wait,
                timeout,
                dry_run,
            } => {
                assert!(wait);
                assert_eq!(timeout, Some(60));
                assert!(!dry_run);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.project_dir, PathBuf::from("."));
        assert_eq!(cli.format, OutputFormat::Table);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "ecomgraph",
            "indexes",
            "--enable",
            "--project-dir",
            "/srv/shop",
            "-v",
            "--format",
            "json",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.project_dir, PathBuf::from("/srv/shop"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Commands::Indexes {
                enable: true,
                wait: false
            }
        ));
    }

    #[test]
    fn test_help_requests_are_informational() {
        for args in [
            vec!["ecomgraph"],
            vec!["ecomgraph", "help"],
            vec!["ecomgraph", "--help"],
            vec!["ecomgraph", "--version"],
        ] {
            let err = Cli::try_parse_from(&args).unwrap_err();
            assert!(is_informational(&err), "{:?} should show help", args);
        }
    }

    #[test]
    fn test_unknown_command_is_a_usage_error() {
        let err = Cli::try_parse_from(["ecomgraph", "deploy"]).unwrap_err();
        assert!(!is_informational(&err));
    }

    #[test]
    fn test_dry_run_conflicts_with_wait() {
        let result = Cli::try_parse_from(["ecomgraph", "provision", "--dry-run", "--wait"]);
        assert!(result.is_err());
    }
}
