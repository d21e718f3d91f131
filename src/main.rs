use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use harmony::config;
use harmony::logging;
use harmony::manifest::{HttpManifestRegistry, ManifestRegistry};
use harmony::tool::ToolRegistry;
use harmony::update::{UpdateEngine, UpdateOutcome};

#[derive(Parser)]
#[command(name = "harmony")]
#[command(version, about = "Keep locally installed tools up to date")]
struct Cli {
    /// Directory of tool descriptor files (defaults to $HARMONY_CONFIG_DIR or the user config dir)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered tools
    List,
    /// Show the installed artifact of a tool
    Current { id: String },
    /// Check whether a newer artifact is available
    Check { id: String },
    /// Install the newest available artifact, archiving the current one
    Update { id: String },
    /// Show versions published in a remote manifest
    Manifest {
        url: String,
        /// Only show this software
        #[arg(long)]
        software: Option<String>,
    },
}

#[derive(Serialize)]
struct ToolSummary<'a> {
    id: &'a str,
    name: &'a str,
    current_version: String,
    artifact_type: String,
    install_location: &'a std::path::Path,
}

#[derive(Serialize)]
struct SoftwareSummary<'a> {
    name: &'a str,
    versions: &'a [String],
    latest: Option<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.verbose);
    let json = cli.json;
    let config_dir = cli.config_dir;

    match cli.command {
        Command::List => list_tools(&load_registry(config_dir)?, json),
        Command::Current { id } => show_current(&load_registry(config_dir)?, &id, json),
        Command::Check { id } => check_tool(&load_registry(config_dir)?, &id, json),
        Command::Update { id } => update_tool(&load_registry(config_dir)?, &id, json),
        Command::Manifest { url, software } => tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?
            .block_on(show_manifest(&url, software.as_deref(), json)),
    }
}

fn load_registry(config_dir: Option<PathBuf>) -> anyhow::Result<ToolRegistry> {
    let dir = config_dir.unwrap_or_else(config::config_dir);
    ToolRegistry::load_dir(&dir).with_context(|| format!("Failed to load tools from {:?}", dir))
}

fn list_tools(registry: &ToolRegistry, json: bool) -> anyhow::Result<ExitCode> {
    let summaries: Vec<ToolSummary> = registry
        .iter()
        .map(|tool| ToolSummary {
            id: &tool.id,
            name: &tool.name,
            current_version: tool.current_version_hint.version(),
            artifact_type: tool.artifact_type.to_string(),
            install_location: &tool.install_location,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        for summary in summaries {
            println!(
                "{}\t{}\t{}\t{}",
                summary.id, summary.name, summary.current_version, summary.artifact_type
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn show_current(registry: &ToolRegistry, id: &str, json: bool) -> anyhow::Result<ExitCode> {
    let current = UpdateEngine::new().locate_current(registry.get(id)?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&current)?);
    } else {
        println!("{} {}", current.filename, current.version);
    }

    Ok(ExitCode::SUCCESS)
}

fn check_tool(registry: &ToolRegistry, id: &str, json: bool) -> anyhow::Result<ExitCode> {
    let pending = UpdateEngine::new().check_update(registry.get(id)?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pending)?);
    } else {
        match pending {
            Some(pending) => println!(
                "Update available: {} ({})",
                pending.target_version, pending.target_filename
            ),
            None => println!("Up to date"),
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn update_tool(registry: &ToolRegistry, id: &str, json: bool) -> anyhow::Result<ExitCode> {
    let outcome = UpdateEngine::new().apply_update(registry.get(id)?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }

    match outcome {
        UpdateOutcome::UpToDate | UpdateOutcome::Updated { .. } => Ok(ExitCode::SUCCESS),
        UpdateOutcome::Aborted { .. } | UpdateOutcome::RolledBack { .. } => Ok(ExitCode::FAILURE),
    }
}

fn print_outcome(outcome: &UpdateOutcome) {
    match outcome {
        UpdateOutcome::UpToDate => println!("Up to date"),
        UpdateOutcome::Updated {
            from,
            to,
            archived,
            installed,
        } => println!(
            "Updated {} -> {}\n  installed {:?}\n  archived  {:?}",
            from, to, installed, archived
        ),
        UpdateOutcome::Aborted { step, reason } => {
            println!("Update aborted during {:?} step: {}", step, reason)
        }
        UpdateOutcome::RolledBack { reason, restored } => {
            println!("Install failed ({}), restored {:?}", reason, restored)
        }
    }
}

async fn show_manifest(url: &str, software: Option<&str>, json: bool) -> anyhow::Result<ExitCode> {
    let registry = HttpManifestRegistry::new(url)?;
    let manifest = registry
        .fetch_manifest()
        .await
        .with_context(|| format!("Failed to fetch manifest from {}", url))?;

    let mut summaries = Vec::new();
    for (name, versions) in manifest.list_software() {
        if software.is_some_and(|wanted| wanted != name.as_str()) {
            continue;
        }
        summaries.push(SoftwareSummary {
            name,
            versions,
            latest: manifest.get_latest_version(name)?,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        println!("manifest_version: {}", manifest.manifest_version());
        for summary in &summaries {
            println!(
                "{}\tlatest {}\t[{}]",
                summary.name,
                summary.latest.as_deref().unwrap_or("-"),
                summary.versions.join(", ")
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}
