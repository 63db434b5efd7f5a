// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Report formatting for CLI output

use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use serde::Serialize;

use super::commands::OutputFormat;
use ecomgraph::orchestrator::{EnvFileAction, SetupReport, StatusReport};
use ecomgraph::provision::{ProvisionPlan, ProvisionReport};
use ecomgraph::schema::{IndexStatus, IndexStatusEntry};

/// Report formatter for the supported output formats
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn provision_report(report: &ProvisionReport, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::json(report),
            OutputFormat::Table => {
                let mut output = String::new();
                output.push_str(&format!("{}\n", "Schema Provisioning".bold().green()));
                output.push_str(&format!(
                    "Duration: {} ms\n",
                    (report.finished_at - report.started_at).num_milliseconds()
                ));
                output.push_str(&format!(
                    "Created: {}  Already present: {}\n\n",
                    report.created.len(),
                    report.skipped.len()
                ));

                let mut table = Table::new();
                table.load_preset(UTF8_FULL);
                table.set_header(vec![
                    Cell::new("Element").fg(Color::Green),
                    Cell::new("Kind").fg(Color::Green),
                    Cell::new("Action").fg(Color::Green),
                ]);
                for element in &report.created {
                    table.add_row(vec![
                        Cell::new(element.qualified_name()),
                        Cell::new(element.kind),
                        Cell::new("created").fg(Color::Green),
                    ]);
                }
                for element in &report.skipped {
                    table.add_row(vec![
                        Cell::new(element.qualified_name()),
                        Cell::new(element.kind),
                        Cell::new("present"),
                    ]);
                }
                output.push_str(&table.to_string());
                output.push('\n');

                if !report.pending_indexes.is_empty() {
                    output.push_str(&format!(
                        "\n{} {}\n",
                        "Indexes building in the background:".yellow(),
                        report.pending_indexes.join(", ")
                    ));
                }
                output
            }
        }
    }

    pub fn provision_plan(plan: &ProvisionPlan, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::json(plan),
            OutputFormat::Table => {
                if plan.is_noop() {
                    return format!(
                        "{} ({} elements already present)\n",
                        "Schema is up to date".green(),
                        plan.already_present.len()
                    );
                }

                let mut output = format!(
                    "{}\n",
                    format!("{} element(s) would be created:", plan.to_create.len()).bold()
                );
                for element in &plan.to_create {
                    output.push_str(&format!("  + {}\n", element));
                }
                output
            }
        }
    }

    pub fn index_status(entries: &[IndexStatusEntry], format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::json(&entries),
            OutputFormat::Table => {
                if entries.is_empty() {
                    return format!("{}\n", "No indexes found".yellow());
                }

                let mut table = Table::new();
                table.load_preset(UTF8_FULL);
                table.set_header(vec![
                    Cell::new("Index").fg(Color::Green),
                    Cell::new("Type").fg(Color::Green),
                    Cell::new("Edge Label").fg(Color::Green),
                    Cell::new("Status").fg(Color::Green),
                ]);
                for entry in entries {
                    table.add_row(vec![
                        Cell::new(&entry.name),
                        Cell::new(entry.kind),
                        Cell::new(entry.edge_label.as_deref().unwrap_or("-")),
                        Cell::new(entry.status).fg(status_color(entry.status)),
                    ]);
                }
                format!("{}\n", table)
            }
        }
    }

    pub fn setup_report(report: &SetupReport, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::json(report),
            OutputFormat::Table => {
                let mut output = String::new();
                for (tool, version) in &report.tools {
                    output.push_str(&format!("  {} {} {}\n", "✓".green(), tool, version.dimmed()));
                }
                output.push_str(&format!(
                    "  → Virtual environment {}\n",
                    if report.venv_created { "created" } else { "already present" }
                ));
                output.push_str(&format!(
                    "  → Python requirements {}\n",
                    if report.requirements_installed { "installed" } else { "skipped" }
                ));
                output.push_str(&format!(
                    "  → .env {}\n",
                    match report.env_file {
                        EnvFileAction::Created => "created from .env.example",
                        EnvFileAction::Kept => "kept as is",
                    }
                ));
                output
            }
        }
    }

    pub fn status_report(report: &StatusReport, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::json(report),
            OutputFormat::Table => {
                let mut output = String::new();
                output.push_str(&format!("{}\n", "Services".bold().green()));
                output.push_str(report.containers.trim_end());
                output.push_str("\n\n");
                let health = if report.reachable {
                    "reachable".green()
                } else {
                    "unreachable".red()
                };
                output.push_str(&format!("JanusGraph at {}: {}\n", report.health_url, health));
                output
            }
        }
    }

    /// Pretty JSON terminated by a newline
    fn json<T: Serialize + ?Sized>(value: &T) -> String {
        let mut output = serde_json::to_string_pretty(value).unwrap_or_else(|_| {
            "{\"status\": \"error\", \"error\": \"Could not serialize report to JSON\"}".to_string()
        });
        output.push('\n');
        output
    }
}

fn status_color(status: IndexStatus) -> Color {
    match status {
        IndexStatus::Enabled => Color::Green,
        IndexStatus::Installed | IndexStatus::Registered => Color::Yellow,
        IndexStatus::Disabled | IndexStatus::Discarded => Color::Red,
    }
}
