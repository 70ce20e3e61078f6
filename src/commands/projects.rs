//! Projects command - Search recently opened workspaces

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;
use std::path::PathBuf;

use super::utils;
use code_launcher::{config, ProjectEntry, WorkspaceCatalog};

/// Options for the projects command
pub struct ProjectsOptions {
    /// Substring to match against name or location
    pub query: Option<String>,
    /// Filter: local or remote
    pub filter: Option<String>,
    /// Limit number of results
    pub limit: Option<usize>,
    /// Workspace storage directory override
    pub storage_dir: Option<PathBuf>,
}

/// Select the projects to show, keeping catalog order (newest first)
pub fn select(projects: &[ProjectEntry], query: &str, filter: Option<&str>) -> Vec<ProjectEntry> {
    projects
        .iter()
        .filter(|p| match filter {
            Some("local") => !p.is_remote,
            Some("remote") => p.is_remote,
            _ => true,
        })
        .filter(|p| p.matches(query))
        .cloned()
        .collect()
}

/// Execute the projects command and return formatted output
pub fn execute(options: ProjectsOptions) -> Result<String> {
    if let Some(filter) = options.filter.as_deref() {
        if filter != "local" && filter != "remote" {
            anyhow::bail!("Invalid filter '{}'. Use 'local' or 'remote'", filter);
        }
    }

    let storage_dir = match options.storage_dir {
        Some(dir) => dir,
        None => config::workspace_storage_dir()
            .context("Failed to determine workspace storage directory")?,
    };
    let catalog = WorkspaceCatalog::new(storage_dir);

    let query = options.query.unwrap_or_default();
    let mut projects = select(&catalog.load(), &query, options.filter.as_deref());

    if projects.is_empty() {
        return Ok(if query.is_empty() {
            format!(
                "No projects found in {}\nOpen a folder in the editor to see it here",
                catalog.storage_dir().display()
            )
        } else {
            format!("No projects match '{}'", query)
        });
    }

    // Apply limit
    let total_count = projects.len();
    if let Some(n) = options.limit {
        projects.truncate(n);
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Name"),
        Cell::new("Remote"),
        Cell::new("Location"),
        Cell::new("Last Opened"),
    ]);

    for project in &projects {
        let remote_str = match (&project.remote, project.is_remote) {
            (Some(r), _) => r.launch_arg().to_string(),
            (None, true) => "remote".to_string(),
            (None, false) => "-".to_string(),
        };
        table.add_row(vec![
            Cell::new(&project.name),
            Cell::new(remote_str),
            Cell::new(&project.location),
            Cell::new(utils::format_time(project.last_opened)),
        ]);
    }

    let mut output = table.to_string();
    if projects.len() < total_count {
        output.push_str(&format!(
            "\n\nShowing {} of {} projects",
            projects.len(),
            total_count
        ));
    } else {
        output.push_str(&format!(
            "\n\n{} projects found",
            total_count.to_string().green()
        ));
    }

    Ok(output)
}
