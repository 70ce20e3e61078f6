//! Hosts command - Search SSH config host aliases

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;
use std::path::PathBuf;

use code_launcher::{config, HostConfigCatalog, HostEntry};

/// Options for the hosts command
pub struct HostsOptions {
    /// Substring to match against alias or hostname
    pub query: Option<String>,
    /// Include wildcard patterns such as `Host *`
    pub all: bool,
    /// SSH config file override
    pub config: Option<PathBuf>,
}

/// Select the hosts to show, keeping file order
pub fn select(hosts: &[HostEntry], query: &str, all: bool) -> Vec<HostEntry> {
    hosts
        .iter()
        .filter(|h| all || !h.is_pattern())
        .filter(|h| h.matches(query))
        .cloned()
        .collect()
}

/// Execute the hosts command and return formatted output
pub fn execute(options: HostsOptions) -> Result<String> {
    let config_path = match options.config {
        Some(path) => path,
        None => config::ssh_config_path().context("Failed to determine SSH config path")?,
    };
    let catalog = HostConfigCatalog::new(config_path);

    let query = options.query.unwrap_or_default();
    let hosts = select(&catalog.parse(), &query, options.all);

    if hosts.is_empty() {
        return Ok(if query.is_empty() {
            format!("No SSH hosts found in {}", catalog.config_path().display())
        } else {
            format!("No SSH hosts match '{}'", query)
        });
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Host"),
        Cell::new("Connects To"),
        Cell::new("Port"),
        Cell::new("Identity File"),
    ]);

    for host in &hosts {
        table.add_row(vec![
            Cell::new(&host.alias),
            Cell::new(host.display_label()),
            Cell::new(host.port.map_or_else(|| "-".to_string(), |p| p.to_string())),
            Cell::new(host.identity_file.as_deref().unwrap_or("-")),
        ]);
    }

    let mut output = table.to_string();
    output.push_str(&format!(
        "\n\n{} hosts found",
        hosts.len().to_string().green()
    ));

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use code_launcher::ssh::parse_config;
    use std::fs;

    #[test]
    fn test_select_hides_patterns_by_default() {
        let hosts = parse_config("Host *\n  User me\nHost web\nHost db\n");
        let shown = select(&hosts, "", false);
        let aliases: Vec<&str> = shown.iter().map(|h| h.alias.as_str()).collect();
        assert_eq!(aliases, vec!["web", "db"]);

        assert_eq!(select(&hosts, "", true).len(), 3);
    }

    #[test]
    fn test_select_by_query() {
        let hosts = parse_config("Host web\n  HostName 10.1.1.1\nHost db\n  HostName 10.2.2.2\n");
        let shown = select(&hosts, "10.2", false);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].alias, "db");
    }

    #[test]
    fn test_execute_lists_hosts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, "Host build\n  HostName 10.0.0.5\n  User ci\n  Port 2200\n").unwrap();

        let output = execute(HostsOptions {
            query: None,
            all: false,
            config: Some(path),
        })
        .unwrap();
        assert!(output.contains("build"));
        assert!(output.contains("ci@10.0.0.5"));
        assert!(output.contains("2200"));
    }

    #[test]
    fn test_execute_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let output = execute(HostsOptions {
            query: None,
            all: false,
            config: Some(dir.path().join("config")),
        })
        .unwrap();
        assert!(output.starts_with("No SSH hosts found"));
    }
}
