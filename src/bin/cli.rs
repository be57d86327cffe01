use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use task_access::authz::{build_filter_signatures, build_role_signatures};
use task_access::models::role_assignment::RoleAssignment;
use task_access::models::search::SearchRequest;

#[derive(Parser, Debug)]
#[command(author, version, about = "task-access signature tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the grant signatures for a set of role assignments
    Grants {
        /// JSON file holding an array of role assignments
        #[arg(long)]
        assignments: PathBuf,
        /// Optional JSON file holding the search request (defaults to a
        /// general, unfiltered request)
        #[arg(long)]
        request: Option<PathBuf>,
    },
    /// Print the filter signatures for a search request
    Filters {
        #[arg(long)]
        request: PathBuf,
    },
    /// Print both signature sets as pretty JSON
    Evaluate {
        #[arg(long)]
        assignments: PathBuf,
        #[arg(long)]
        request: Option<PathBuf>,
        /// Restrict to a single actor's assignments
        #[arg(long)]
        actor: Option<Uuid>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Grants {
            assignments,
            request,
        } => {
            let assignments = read_assignments(&assignments, None)?;
            let request = read_request(request.as_deref())?;
            for signature in sorted(build_role_signatures(&assignments, &request)) {
                println!("{signature}");
            }
        }
        Commands::Filters { request } => {
            let request = read_request(Some(request.as_path()))?;
            for signature in sorted(build_filter_signatures(&request)) {
                println!("{signature}");
            }
        }
        Commands::Evaluate {
            assignments,
            request,
            actor,
        } => {
            let assignments = read_assignments(&assignments, actor)?;
            let request = read_request(request.as_deref())?;
            let output = serde_json::json!({
                "grant_signatures": sorted(build_role_signatures(&assignments, &request)),
                "filter_signatures": sorted(build_filter_signatures(&request)),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn read_assignments(path: &Path, actor: Option<Uuid>) -> anyhow::Result<Vec<RoleAssignment>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut assignments: Vec<RoleAssignment> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid role assignments in {}", path.display()))?;

    if let Some(actor) = actor {
        assignments.retain(|assignment| assignment.actor_id == actor);
    }

    Ok(assignments)
}

fn read_request(path: Option<&Path>) -> anyhow::Result<SearchRequest> {
    let Some(path) = path else {
        return Ok(SearchRequest::default());
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid search request in {}", path.display()))
}

fn sorted(signatures: HashSet<String>) -> Vec<String> {
    let mut list: Vec<String> = signatures.into_iter().collect();
    list.sort();
    list
}
